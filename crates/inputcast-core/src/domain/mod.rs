//! Domain entities: the persisted records InputCast manages.
//!
//! - **`config`** – [`config::InputConfiguration`]: a named, ordered bundle
//!   of automatable input actions plus optional UI-view metadata.
//! - **`script`** – [`script::Script`]: a named bundle of source files that
//!   runs a self-test when loaded.
//! - **`execution`** – [`execution::ExecutionContext`]: the request body that
//!   asks the host to execute a single action.
//!
//! All entities are plain serde structs. Identity is the `name` field,
//! compared case-sensitively (exact match). Records are mutated only by
//! wholesale replacement, never field-by-field.

pub mod config;
pub mod execution;
pub mod script;
