//! Application layer: stores, service context, commands, and the lifecycle
//! orchestrator.
//!
//! This layer orchestrates domain records to fulfil the host's use cases and
//! depends on the infrastructure only through traits (`Storage`,
//! `InputSimulator`), so the file system and the input engine can be swapped
//! without touching it.
//!
//! # Sub-modules
//!
//! - **`config_store` / `script_store`** – Concurrency-safe in-memory
//!   collections of the loaded records. The only shared mutable state
//!   reachable from concurrent request handlers.
//!
//! - **`context`** – The explicit dependency bundle ([`context::ServiceContext`])
//!   and the active-context pointer ([`context::ServiceRegistry`]) that
//!   request handlers resolve on every use.
//!
//! - **`commands`** – One single-shot request object per use case, each
//!   returning the uniform [`inputcast_core::ApiResult`] envelope.
//!
//! - **`load_pipeline`** – Reconciles the stores with persisted state under
//!   partial-failure conditions.
//!
//! - **`reload`** – The debounce timer that collapses a burst of reload
//!   requests into a single cold restart.
//!
//! - **`orchestrator`** – The start/stop/reload state machine driving all of
//!   the above.

pub mod commands;
pub mod config_store;
pub mod context;
pub mod load_pipeline;
pub mod orchestrator;
pub mod reload;
pub mod script_store;
