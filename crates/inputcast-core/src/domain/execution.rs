//! Execution request context.
//!
//! The body of an execute request: which action to run and how the simulator
//! should target it (foreground window, desktop, or a named process). The
//! core only carries this data; interpreting it is the input simulator's job.

use serde::{Deserialize, Serialize};

use crate::domain::config::InputAction;

/// Targeting and payload for one action-execution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    /// Send input to whatever window currently has focus.
    #[serde(default)]
    pub use_foreground_window: bool,
    /// Send input to the desktop session rather than a specific window.
    #[serde(default)]
    pub use_desktop: bool,
    /// Target process name, used when neither flag above is set.
    #[serde(default)]
    pub process_name: String,
    /// The action to execute.
    pub input_action: InputAction,
}
