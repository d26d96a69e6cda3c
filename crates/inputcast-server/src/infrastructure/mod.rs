//! Infrastructure adapters: everything that touches the OS, the network, or
//! the file system.
//!
//! - **`storage`** – App-config persistence and the file-backed storage
//!   gateway behind the [`storage::Storage`] trait.
//! - **`network`** – The axum HTTP command API and the UDP presence beacon.
//! - **`input`** – The input-simulation seam ([`input::InputSimulator`]).
//!
//! Keeping these concerns here — rather than scattered through the
//! application layer — means the application can be driven entirely by mocks
//! in tests.

pub mod input;
pub mod network;
pub mod storage;
