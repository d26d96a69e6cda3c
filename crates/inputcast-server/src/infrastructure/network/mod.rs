//! Network infrastructure: the HTTP command API and the presence beacon.
//!
//! - **`http`** – axum router exposing the wire protocol, plus a handle for
//!   binding and gracefully stopping the listener.
//! - **`beacon`** – UDP broadcast announcing the running service for client
//!   auto-discovery; a background thread with an `AtomicBool` shutdown flag.

pub mod beacon;
pub mod http;
