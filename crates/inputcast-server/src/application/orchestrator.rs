//! Lifecycle orchestrator: the start/stop/reload state machine.
//!
//! [`AppHost`] owns everything with a lifetime: the active service context,
//! the HTTP listener, the presence beacon, and the reload debouncer. Startup
//! runs one fixed sequence (config, context, storage verification, network
//! surfaces, load pipelines) and shutdown tears the same pieces down in
//! reverse. Reload is a cold restart: stop everything, then run the full
//! startup sequence again against a freshly built context.
//!
//! When storage verification reports a missing data folder the host degrades
//! into first-run mode instead of failing: the context is installed so a
//! settings UI can talk to it, but no network listener or beacon is started
//! and the `first_time_running` flag is persisted.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Weak};

use anyhow::Context as _;
use tracing::{error, info, warn};

use crate::application::context::{ContextBuilder, ServiceContext, ServiceRegistry};
use crate::application::load_pipeline::{load_input_configurations, load_scripts};
use crate::application::reload::{Debouncer, RELOAD_DEBOUNCE};
use crate::infrastructure::input::InputSimulator;
use crate::infrastructure::network::beacon::{start_beacon, BeaconHandle};
use crate::infrastructure::network::http::{start_http_server, HttpServerHandle};
use crate::infrastructure::storage::config::{load_app_config, save_app_config, AppConfig};
use crate::infrastructure::storage::{Storage, StorageError};

use inputcast_core::PresenceAnnouncement;

/// Where the host is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// The host. Build one per process with [`AppHost::builder`].
pub struct AppHost {
    registry: Arc<ServiceRegistry>,

    // Capabilities injected at build time; `None` means "use the real one".
    // An injected app config also suppresses config-file disk traffic.
    override_app_config: Option<AppConfig>,
    override_storage: Option<Arc<dyn Storage>>,
    override_simulator: Option<Arc<dyn InputSimulator>>,

    state: Mutex<LifecycleState>,
    http: tokio::sync::Mutex<Option<HttpServerHandle>>,
    http_addr: Mutex<Option<SocketAddr>>,
    beacon: Mutex<Option<BeaconHandle>>,
    reload: Mutex<Option<Debouncer>>,
}

impl AppHost {
    pub fn builder() -> AppHostBuilder {
        AppHostBuilder::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, next: LifecycleState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// The registry request handlers resolve the active context from.
    pub fn registry(&self) -> Arc<ServiceRegistry> {
        Arc::clone(&self.registry)
    }

    /// Bound address of the HTTP listener, when one is running.
    pub fn http_addr(&self) -> Option<SocketAddr> {
        *self.http_addr.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs the full startup sequence.
    ///
    /// On success the host is `Running` (possibly in first-run mode). On
    /// failure the host is left partially started; call [`AppHost::stop_all`]
    /// to tear the started pieces down.
    pub async fn run(self: &Arc<Self>) -> anyhow::Result<()> {
        self.set_state(LifecycleState::Starting);
        info!("starting host");

        let app_config = match &self.override_app_config {
            Some(config) => config.clone(),
            None => match load_app_config() {
                Ok(config) => config,
                Err(e) => {
                    warn!("could not load app config, continuing with defaults: {e}");
                    AppConfig::default()
                }
            },
        };

        let mut builder = ContextBuilder::default().app_config(app_config);
        if let Some(storage) = &self.override_storage {
            builder = builder.storage(Arc::clone(storage));
        }
        if let Some(simulator) = &self.override_simulator {
            builder = builder.simulator(Arc::clone(simulator));
        }
        let context = Arc::new(builder.build());

        match context.storage.verify() {
            Ok(()) => {}
            Err(StorageError::DataFolderMissing) => {
                return self.enter_first_run_mode(context);
            }
            Err(e) => {
                return Err(e).context("storage verification failed");
            }
        }

        self.registry.install(Arc::clone(&context));

        let config = context.app_config.snapshot();
        if self.override_app_config.is_none() {
            if let Err(e) = save_app_config(&config) {
                warn!("could not persist app config: {e}");
            }
        }

        let addr: SocketAddr = format!("{}:{}", config.last_ip, config.last_port)
            .parse()
            .with_context(|| {
                format!(
                    "invalid listen address {}:{}",
                    config.last_ip, config.last_port
                )
            })?;
        let http = start_http_server(Arc::clone(&self.registry), addr).await?;
        let bound = http.local_addr();
        *self.http_addr.lock().unwrap_or_else(|e| e.into_inner()) = Some(bound);
        *self.http.lock().await = Some(http);

        // Announce the port actually bound, which differs from the config
        // when port 0 was requested.
        let announcement =
            PresenceAnnouncement::new(config.broadcast_identifier.as_str(), bound.port());
        match start_beacon(config.beacon_port, &announcement) {
            Ok(handle) => {
                *self.beacon.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
            }
            // Discovery is a convenience; the host is still reachable by
            // address when the beacon cannot start.
            Err(e) => warn!("presence beacon unavailable: {e}"),
        }

        self.arm_reload_debouncer();

        load_input_configurations(Arc::clone(&context.configs), Arc::clone(&context.storage))
            .await;
        load_scripts(Arc::clone(&context.scripts), Arc::clone(&context.storage)).await;

        self.set_state(LifecycleState::Running);
        info!("host running");
        Ok(())
    }

    /// Installs the context without any network surface and flags the config
    /// so a settings UI can complete setup.
    fn enter_first_run_mode(self: &Arc<Self>, context: Arc<ServiceContext>) -> anyhow::Result<()> {
        warn!("data folder missing; entering first-run mode");

        let mut config = context.app_config.snapshot();
        config.first_time_running = true;
        context.app_config.replace(config.clone());

        if self.override_app_config.is_none() {
            if let Err(e) = save_app_config(&config) {
                warn!("could not persist first-run app config: {e}");
            }
        }

        self.registry.install(context);
        self.arm_reload_debouncer();
        self.set_state(LifecycleState::Running);
        Ok(())
    }

    /// Arms the debounce timer that turns reload requests into a cold
    /// restart. The closure holds only a weak handle so the timer task never
    /// keeps a stopped host alive.
    fn arm_reload_debouncer(self: &Arc<Self>) {
        let weak: Weak<AppHost> = Arc::downgrade(self);
        let debouncer = Debouncer::new(RELOAD_DEBOUNCE, move || {
            if let Some(host) = weak.upgrade() {
                tokio::spawn(async move {
                    host.reload_all().await;
                });
            }
        });
        *self.reload.lock().unwrap_or_else(|e| e.into_inner()) = Some(debouncer);
    }

    /// Requests a debounced reload. A burst of requests collapses into one
    /// restart; a no-op when the host was never started.
    pub fn request_reload(&self) {
        if let Some(debouncer) = self
            .reload
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            debouncer.trigger();
        }
    }

    /// Stops everything: pending reloads, the HTTP listener, the beacon, and
    /// the active context. Idempotent; safe on a partially started host.
    pub async fn stop_all(&self) {
        self.set_state(LifecycleState::Stopping);
        info!("stopping host");

        if let Some(debouncer) = self
            .reload
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            debouncer.cancel();
        }

        // Take the handle under the lock, await the shutdown outside it.
        let http = self.http.lock().await.take();
        if let Some(http) = http {
            http.stop().await;
        }
        *self.http_addr.lock().unwrap_or_else(|e| e.into_inner()) = None;

        if let Some(mut beacon) = self
            .beacon
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            beacon.stop();
        }

        self.registry.teardown();

        self.set_state(LifecycleState::Stopped);
        info!("host stopped");
    }

    /// Cold restart: full teardown followed by the full startup sequence.
    pub async fn reload_all(self: &Arc<Self>) {
        info!("reloading host");
        self.stop_all().await;
        if let Err(e) = self.run().await {
            error!("reload failed: {e:#}");
            self.stop_all().await;
        }
    }
}

/// Configures and builds an [`AppHost`].
#[derive(Default)]
pub struct AppHostBuilder {
    app_config: Option<AppConfig>,
    storage: Option<Arc<dyn Storage>>,
    simulator: Option<Arc<dyn InputSimulator>>,
}

impl AppHostBuilder {
    /// Uses `config` instead of the persisted app config, and suppresses all
    /// config-file disk traffic.
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

    pub fn build(self) -> Arc<AppHost> {
        Arc::new(AppHost {
            registry: Arc::new(ServiceRegistry::new()),
            override_app_config: self.app_config,
            override_storage: self.storage,
            override_simulator: self.simulator,
            state: Mutex::new(LifecycleState::Stopped),
            http: tokio::sync::Mutex::new(None),
            http_addr: Mutex::new(None),
            beacon: Mutex::new(None),
            reload: Mutex::new(None),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
