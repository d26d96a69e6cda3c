//! Command layer: one single-shot request object per use case.
//!
//! Each command is constructed with its resolved dependencies and
//! parameters and exposes exactly one `execute(self)` call returning the
//! uniform [`ApiResult`] envelope. Failure paths are values, not panics or
//! errors: every internal error is converted into a failed envelope carrying
//! a human-readable message plus the underlying detail, so nothing escapes
//! the command boundary.

use std::sync::Arc;

use inputcast_core::{ApiResult, ExecutionContext, InputConfiguration};

use crate::application::config_store::ConfigStore;
use crate::application::script_store::ScriptStore;
use crate::infrastructure::input::InputSimulator;
use crate::infrastructure::storage::Storage;

/// Opaque success marker returned by mutating commands.
const OK_MARKER: &str = "OK";

fn not_found_message(name: &str) -> String {
    format!("Input configuration with name {name} was not found")
}

/// A file name is admissible only as a single plain path component: no
/// separators, no parent/current-dir steps, no absolute paths, no drive
/// prefixes. Everything a record carries in `file_name` lands under the
/// configurations folder via a path join, so anything else would address
/// files outside the data root.
fn is_plain_file_name(file_name: &str) -> bool {
    let mut components = std::path::Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

// ── List configurations ───────────────────────────────────────────────────────

/// Lists the names of all loaded input configurations.
pub struct GetAllConfigurations {
    configs: Arc<ConfigStore>,
}

impl GetAllConfigurations {
    pub fn new(configs: Arc<ConfigStore>) -> Self {
        Self { configs }
    }

    pub fn execute(self) -> ApiResult<Vec<String>> {
        ApiResult::ok(self.configs.names())
    }
}

// ── List scripts ──────────────────────────────────────────────────────────────

/// Lists the names of all loaded scripts. An empty store is a success with
/// an empty sequence, never a failure.
pub struct GetAllScripts {
    scripts: Arc<ScriptStore>,
}

impl GetAllScripts {
    pub fn new(scripts: Arc<ScriptStore>) -> Self {
        Self { scripts }
    }

    pub fn execute(self) -> ApiResult<Vec<String>> {
        ApiResult::ok(self.scripts.names())
    }
}

// ── Get one configuration ─────────────────────────────────────────────────────

/// Fetches one configuration by name.
pub struct GetConfiguration {
    configs: Arc<ConfigStore>,
    name: String,
}

impl GetConfiguration {
    pub fn new(configs: Arc<ConfigStore>, name: impl Into<String>) -> Self {
        Self {
            configs,
            name: name.into(),
        }
    }

    pub fn execute(self) -> ApiResult<InputConfiguration> {
        match self.configs.find_by_name(&self.name) {
            Some(config) => ApiResult::ok(config),
            None => ApiResult::fail("Fail", not_found_message(&self.name)),
        }
    }
}

// ── Save configuration ────────────────────────────────────────────────────────

/// Persists a configuration and admits it to the store (replacing any
/// loaded record of the same name).
pub struct SaveConfiguration {
    configs: Arc<ConfigStore>,
    storage: Arc<dyn Storage>,
    config: InputConfiguration,
}

impl SaveConfiguration {
    pub fn new(
        configs: Arc<ConfigStore>,
        storage: Arc<dyn Storage>,
        config: InputConfiguration,
    ) -> Self {
        Self {
            configs,
            storage,
            config,
        }
    }

    pub fn execute(self) -> ApiResult<String> {
        let mut config = self.config;
        if config.name.trim().is_empty() {
            return ApiResult::fail("Fail", "Configuration has no name");
        }
        // Stamp the origin before persisting so a later remove targets the
        // same artifact.
        let file_name = match config.file_name.take() {
            Some(file_name) => file_name,
            None => format!("{}.json", config.name),
        };
        if !is_plain_file_name(&file_name) {
            return ApiResult::fail(
                "Fail",
                format!("Configuration file name {file_name} is not a plain file name"),
            );
        }
        config.file_name = Some(file_name);

        match self.storage.save_configuration(&config) {
            Ok(()) => {
                self.configs.add_or_update(config);
                ApiResult::ok(OK_MARKER.to_string())
            }
            Err(e) => ApiResult::fail(
                format!("Failed to save configuration {}", config.name),
                e.to_string(),
            ),
        }
    }
}

// ── Remove configuration ──────────────────────────────────────────────────────

/// Removes a configuration: deletes the backing artifact first, then evicts
/// the record.
///
/// The order is deliberate — if the delete fails, the record stays in the
/// store and the error is reported, so the store never claims an item is
/// gone while the disk still serves it to a fresh load.
pub struct RemoveConfiguration {
    configs: Arc<ConfigStore>,
    storage: Arc<dyn Storage>,
    name: String,
}

impl RemoveConfiguration {
    pub fn new(
        configs: Arc<ConfigStore>,
        storage: Arc<dyn Storage>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            configs,
            storage,
            name: name.into(),
        }
    }

    pub fn execute(self) -> ApiResult<String> {
        let Some(config) = self.configs.find_by_name(&self.name) else {
            return ApiResult::fail("Fail", not_found_message(&self.name));
        };

        if config.has_view {
            // TODO: remove the view folder, its files, and associated media
            // once view bundles are managed by the storage gateway.
        }

        match self.storage.remove_configuration(&config) {
            Ok(()) => {
                self.configs.remove(&self.name);
                ApiResult::ok(OK_MARKER.to_string())
            }
            Err(e) => ApiResult::fail(
                format!("Failed to remove configuration {}", self.name),
                e.to_string(),
            ),
        }
    }
}

// ── Execute action ────────────────────────────────────────────────────────────

/// Forwards one action-execution request to the input simulator.
pub struct ExecuteAction {
    simulator: Arc<dyn InputSimulator>,
    request: ExecutionContext,
}

impl ExecuteAction {
    pub fn new(simulator: Arc<dyn InputSimulator>, request: ExecutionContext) -> Self {
        Self { simulator, request }
    }

    pub fn execute(self) -> ApiResult<String> {
        let action_name = self.request.input_action.name.clone();
        match self.simulator.execute(&self.request) {
            Ok(()) => ApiResult::ok(OK_MARKER.to_string()),
            Err(e) => ApiResult::fail(
                format!("Failed to execute action {action_name}"),
                e.to_string(),
            ),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
