//! Input-simulation seam.
//!
//! The actual keyboard/mouse engine is an external collaborator; the host
//! only needs an "execute this action, report success or failure"
//! capability. [`InputSimulator`] is that seam: the default registered
//! implementation logs the dispatch, tests substitute a mock, and a real
//! OS-level engine can be injected through the context builder without
//! touching the command layer.

use thiserror::Error;
use tracing::info;

use inputcast_core::ExecutionContext;

/// Error type for action execution.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The engine rejected or failed to perform the action.
    #[error("simulation failed: {0}")]
    Failed(String),
}

/// Capability to execute one input action against a target.
#[cfg_attr(test, mockall::automock)]
pub trait InputSimulator: Send + Sync {
    fn execute(&self, request: &ExecutionContext) -> Result<(), SimulationError>;
}

/// Default simulator: logs the dispatch and reports success.
///
/// Keeps the host fully functional on platforms where no input engine is
/// wired up, which is also what headless tests run against.
#[derive(Debug, Default)]
pub struct LogOnlySimulator;

impl InputSimulator for LogOnlySimulator {
    fn execute(&self, request: &ExecutionContext) -> Result<(), SimulationError> {
        let target = if request.use_foreground_window {
            "foreground window"
        } else if request.use_desktop {
            "desktop"
        } else {
            &request.process_name
        };
        info!(
            "executing action {} ({} entries) against {target}",
            request.input_action.name,
            request.input_action.entries.len()
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
