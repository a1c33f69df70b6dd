//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use trak_common::time::{Clock, SystemClock};
use trak_core::{
    AiApi, AppStore, AssistantService, LifecycleService, Notifier, SettingsApi, SettingsService,
    TaskApi, TimerController, TransferService, WindowControls,
};
use trak_domain::{Config, Result};
use trak_infra::api::{ApiClient, ApiClientConfig};
use trak_infra::{RestAiApi, RestSettingsApi, RestTaskApi};

/// Backend ports the services are built on
#[derive(Clone)]
pub struct Ports {
    pub tasks: Arc<dyn TaskApi>,
    pub settings: Arc<dyn SettingsApi>,
    pub ai: Arc<dyn AiApi>,
}

impl Ports {
    /// REST adapters sharing one client
    pub fn rest(client: Arc<ApiClient>) -> Self {
        Self {
            tasks: Arc::new(RestTaskApi::new(Arc::clone(&client))),
            settings: Arc::new(RestSettingsApi::new(Arc::clone(&client))),
            ai: Arc::new(RestAiApi::new(client)),
        }
    }
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub store: Arc<AppStore>,
    pub timer: Arc<TimerController>,
    pub lifecycle: Arc<LifecycleService>,
    pub settings: Arc<SettingsService>,
    pub assistant: Arc<AssistantService>,
    pub transfer: Arc<TransferService>,
    pub window: Arc<dyn WindowControls>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Wire the REST backend reached through `window.api_url()`
    ///
    /// # Errors
    ///
    /// Returns `TrakError::Config` if the URL is not a valid http(s) URL.
    pub fn new(
        config: Config,
        window: Arc<dyn WindowControls>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = ApiClient::builder()
            .config(ApiClientConfig::from(&config.api))
            .base_url(window.api_url())
            .build()?;
        info!(api_url = %client.base_url(), "REST client configured");

        let ports = Ports::rest(Arc::new(client));
        Ok(Self::with_ports(config, ports, Arc::new(SystemClock), window, notifier))
    }

    /// Wire the services over explicit ports and clock
    pub fn with_ports(
        config: Config,
        ports: Ports,
        clock: Arc<dyn Clock>,
        window: Arc<dyn WindowControls>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = Arc::new(AppStore::new());
        let timer = Arc::new(TimerController::new(Arc::clone(&clock)));
        let lifecycle = Arc::new(LifecycleService::new(
            Arc::clone(&ports.tasks),
            Arc::clone(&timer),
            Arc::clone(&store),
            Arc::clone(&notifier),
        ));
        let settings = Arc::new(SettingsService::new(
            Arc::clone(&ports.settings),
            Arc::clone(&store),
            Arc::clone(&notifier),
        ));
        let assistant = Arc::new(AssistantService::new(
            Arc::clone(&ports.ai),
            Arc::clone(&lifecycle),
            Arc::clone(&store),
            Arc::clone(&notifier),
        ));
        let transfer = Arc::new(TransferService::new(
            ports.tasks,
            ports.settings,
            Arc::clone(&lifecycle),
            clock,
            Arc::clone(&notifier),
        ));

        Self { config, store, timer, lifecycle, settings, assistant, transfer, window, notifier }
    }

    /// Load settings, today's tasks and stats
    ///
    /// An unreachable backend is reported but not fatal; the shell starts
    /// with defaults and the user can retry with `refresh`.
    pub async fn initialize(&self) {
        if let Err(err) = self.settings.fetch_settings().await {
            warn!(error = %err, "starting with default settings");
        }
        self.lifecycle.refresh().await;
        info!(tasks = self.store.tasks().len(), "context initialized");
    }

    /// Period of the live timer display
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.config.display.refresh_interval_ms)
    }
}
