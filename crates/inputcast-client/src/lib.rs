//! Client library for talking to a running InputCast server.
//!
//! Two pieces:
//!
//! - **`proxy`** – [`RemoteProxy`], a typed HTTP client mirroring the
//!   server's command API. Every call returns the server's
//!   [`inputcast_core::ApiResult`] envelope; only transport failures (no
//!   route to host, timeout) surface as a client-side error.
//! - **`discovery`** – listens for the server's UDP presence beacon so a
//!   client can find a host on the LAN without manual address entry.

pub mod discovery;
pub mod proxy;

pub use discovery::{listen_for_server, DiscoveredServer, DiscoveryError};
pub use proxy::{ProxyError, RemoteProxy};
