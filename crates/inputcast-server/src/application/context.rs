//! The explicit dependency bundle and the active-context pointer.
//!
//! Instead of a process-wide service locator, every capability the host needs
//! lives in one [`ServiceContext`] built explicitly at startup. Reload is
//! "construct a new context, swap the active pointer": the
//! [`ServiceRegistry`] holds that pointer, request handlers resolve it on
//! every use (never caching across a reload boundary), and
//! [`ServiceRegistry::teardown`] severs it so every capability resolves to
//! `NotRegistered` once the host is stopped.
//!
//! The registry is mutated only inside orchestrator-controlled start/stop
//! windows, never during steady-state request handling.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::application::config_store::ConfigStore;
use crate::application::script_store::ScriptStore;
use crate::infrastructure::input::{InputSimulator, LogOnlySimulator};
use crate::infrastructure::storage::config::AppConfig;
use crate::infrastructure::storage::gateway::FileStorage;
use crate::infrastructure::storage::Storage;

/// Error type for context resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No context is installed — the host is stopped or was never started.
    /// A steady-state hit is a programming error, not a user-facing failure.
    #[error("no service context installed; the host is not running")]
    NotRegistered,
}

/// Shared handle to the process-wide [`AppConfig`].
///
/// The config is replaced wholesale (load, first-run flagging), never
/// partially mutated concurrently with a read; readers take a snapshot.
#[derive(Debug, Default)]
pub struct AppConfigHandle {
    inner: RwLock<AppConfig>,
}

impl AppConfigHandle {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    /// Returns a clone of the current config.
    pub fn snapshot(&self) -> AppConfig {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces the config wholesale.
    pub fn replace(&self, config: AppConfig) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = config;
    }
}

/// One bundle of every capability the command layer and pipelines use.
pub struct ServiceContext {
    pub app_config: AppConfigHandle,
    pub configs: Arc<ConfigStore>,
    pub scripts: Arc<ScriptStore>,
    pub storage: Arc<dyn Storage>,
    pub simulator: Arc<dyn InputSimulator>,
}

impl ServiceContext {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}

/// Builds a [`ServiceContext`], filling unset slots with defaults.
///
/// Caller-supplied capabilities always win: `build()` only constructs a
/// default for a slot that was never set, so an injected storage gateway or
/// simulator cannot be evicted by a built-in.
#[derive(Default)]
pub struct ContextBuilder {
    app_config: Option<AppConfig>,
    storage: Option<Arc<dyn Storage>>,
    simulator: Option<Arc<dyn InputSimulator>>,
}

impl ContextBuilder {
    pub fn app_config(mut self, config: AppConfig) -> Self {
        self.app_config = Some(config);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn simulator(mut self, simulator: Arc<dyn InputSimulator>) -> Self {
        self.simulator = Some(simulator);
        self
    }

    pub fn build(self) -> ServiceContext {
        let app_config = self.app_config.unwrap_or_default();
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(FileStorage::from_config(&app_config)));
        let simulator = self
            .simulator
            .unwrap_or_else(|| Arc::new(LogOnlySimulator));

        ServiceContext {
            app_config: AppConfigHandle::new(app_config),
            configs: Arc::new(ConfigStore::new()),
            scripts: Arc::new(ScriptStore::new()),
            storage,
            simulator,
        }
    }
}

/// The single active-context pointer.
#[derive(Default)]
pub struct ServiceRegistry {
    active: RwLock<Option<Arc<ServiceContext>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in `context` as the active bundle, replacing any prior one.
    pub fn install(&self, context: Arc<ServiceContext>) {
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = Some(context);
    }

    /// Resolves the active context.
    pub fn context(&self) -> Result<Arc<ServiceContext>, RegistryError> {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(RegistryError::NotRegistered)
    }

    pub fn is_installed(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Clears the stores of the active context and severs the pointer, so
    /// subsequent resolution fails with [`RegistryError::NotRegistered`].
    /// Safe to call when nothing is installed.
    pub fn teardown(&self) {
        let previous = self
            .active
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(context) = previous {
            context.configs.clear();
            context.scripts.clear();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::input::MockInputSimulator;
    use crate::infrastructure::storage::MockStorage;
    use inputcast_core::InputConfiguration;

    #[test]
    fn test_builder_fills_defaults_for_unset_slots() {
        // Arrange / Act
        let context = ServiceContext::builder().build();

        // Assert — default storage is unconfigured, stores start empty
        assert!(context.storage.verify().is_err());
        assert!(context.configs.is_empty());
        assert!(context.scripts.is_empty());
        assert!(context.app_config.snapshot().data_folder.is_none());
    }

    #[test]
    fn test_builder_override_wins_over_default() {
        // Arrange — a storage override that claims to be verified
        let mut storage = MockStorage::new();
        storage.expect_verify().returning(|| Ok(()));

        // Act
        let context = ServiceContext::builder()
            .storage(Arc::new(storage))
            .simulator(Arc::new(MockInputSimulator::new()))
            .build();

        // Assert — build() must not replace the injected capability
        assert!(context.storage.verify().is_ok());
    }

    #[test]
    fn test_registry_resolves_nothing_before_install() {
        let registry = ServiceRegistry::new();
        assert_eq!(registry.context().unwrap_err(), RegistryError::NotRegistered);
        assert!(!registry.is_installed());
    }

    #[test]
    fn test_install_then_context_returns_same_bundle() {
        // Arrange
        let registry = ServiceRegistry::new();
        let context = Arc::new(ServiceContext::builder().build());

        // Act
        registry.install(Arc::clone(&context));

        // Assert
        let resolved = registry.context().expect("installed");
        assert!(Arc::ptr_eq(&resolved, &context));
    }

    #[test]
    fn test_install_replaces_prior_context() {
        let registry = ServiceRegistry::new();
        let first = Arc::new(ServiceContext::builder().build());
        let second = Arc::new(ServiceContext::builder().build());

        registry.install(Arc::clone(&first));
        registry.install(Arc::clone(&second));

        assert!(Arc::ptr_eq(&registry.context().unwrap(), &second));
    }

    #[test]
    fn test_teardown_clears_stores_and_severs_pointer() {
        // Arrange
        let registry = ServiceRegistry::new();
        let context = Arc::new(ServiceContext::builder().build());
        context.configs.add(InputConfiguration::new("demo"));
        registry.install(Arc::clone(&context));

        // Act
        registry.teardown();

        // Assert — nothing resolves any more, and the old bundle is emptied
        assert_eq!(registry.context().unwrap_err(), RegistryError::NotRegistered);
        assert!(context.configs.is_empty());
    }

    #[test]
    fn test_teardown_without_install_is_safe() {
        let registry = ServiceRegistry::new();
        registry.teardown();
        registry.teardown();
        assert!(!registry.is_installed());
    }

    #[test]
    fn test_app_config_handle_replaces_wholesale() {
        // Arrange
        let handle = AppConfigHandle::new(AppConfig::default());
        let mut updated = handle.snapshot();
        updated.first_time_running = true;

        // Act
        handle.replace(updated);

        // Assert
        assert!(handle.snapshot().first_time_running);
    }
}
