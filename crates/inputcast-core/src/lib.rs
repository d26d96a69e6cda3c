//! # inputcast-core
//!
//! Shared library for InputCast containing the domain entities, the API
//! result envelope, the HTTP route table, and the presence-beacon payload.
//!
//! This crate is used by both the server and client applications.
//! It has zero dependencies on OS APIs, network sockets, or the file system.
//!
//! # Architecture overview
//!
//! InputCast is a host application for automated input: it keeps a library of
//! named *input configurations* (sequences of keyboard/mouse actions) and
//! *scripts* (testable code fragments) persisted as JSON files, serves them
//! over a local-network HTTP API, and announces its presence over UDP so
//! remote clients can find it without manual address entry.
//!
//! This crate is the shared foundation. It defines:
//!
//! - **`domain`** – The persisted records: [`InputConfiguration`],
//!   [`Script`], and the [`ExecutionContext`] sent with an execute request.
//!
//! - **`api`** – The [`ApiResult`] envelope that wraps every command and
//!   remote-call outcome. Consumers branch on `success`, never on content
//!   nullness.
//!
//! - **`routes`** – The route paths spoken identically by the server's
//!   command surface and the client's remote proxy.
//!
//! - **`presence`** – The JSON datagram the running server broadcasts for
//!   client auto-discovery.

pub mod api;
pub mod domain;
pub mod presence;
pub mod routes;

// Re-export the most-used types at the crate root so callers can write
// `inputcast_core::InputConfiguration` instead of the full module path.
pub use api::ApiResult;
pub use domain::config::{ActionEntry, InputAction, InputConfiguration};
pub use domain::execution::ExecutionContext;
pub use domain::script::{Script, ScriptSourceFile, ScriptTestOutcome};
pub use presence::{PresenceAnnouncement, SERVICE_NAME};
