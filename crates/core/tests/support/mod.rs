//! Shared test helpers for `trak-core` integration tests.
//!
//! In-memory implementations of every port with call recording and failure
//! injection, plus a fixture that wires the services together the way the
//! binary does.

#![allow(dead_code)]

pub mod ai;
pub mod notifier;
pub mod tasks;

use std::sync::Arc;

use trak_common::time::MockClock;
use trak_core::{
    AppStore, AssistantService, LifecycleService, SettingsService, TimerController,
    TransferService,
};

pub use self::ai::MockAiApi;
pub use self::notifier::RecordingNotifier;
pub use self::tasks::{MockSettingsApi, MockTaskApi};

pub const T0: i64 = 1_714_550_400_000;

/// Fully wired services over mock ports
pub struct Fixture {
    pub clock: MockClock,
    pub tasks: Arc<MockTaskApi>,
    pub settings_api: Arc<MockSettingsApi>,
    pub ai: Arc<MockAiApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<AppStore>,
    pub timer: Arc<TimerController>,
    pub lifecycle: Arc<LifecycleService>,
    pub settings: Arc<SettingsService>,
    pub assistant: Arc<AssistantService>,
    pub transfer: Arc<TransferService>,
}

impl Fixture {
    pub fn new() -> Self {
        let clock = MockClock::at(T0);
        let tasks = Arc::new(MockTaskApi::new(clock.clone()));
        let settings_api = Arc::new(MockSettingsApi::default());
        let ai = Arc::new(MockAiApi::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let store = Arc::new(AppStore::new());
        let timer = Arc::new(TimerController::new(Arc::new(clock.clone())));

        let lifecycle = Arc::new(LifecycleService::new(
            tasks.clone(),
            Arc::clone(&timer),
            Arc::clone(&store),
            notifier.clone(),
        ));
        let settings =
            Arc::new(SettingsService::new(settings_api.clone(), Arc::clone(&store), notifier.clone()));
        let assistant = Arc::new(AssistantService::new(
            ai.clone(),
            Arc::clone(&lifecycle),
            Arc::clone(&store),
            notifier.clone(),
        ));
        let transfer = Arc::new(TransferService::new(
            tasks.clone(),
            settings_api.clone(),
            Arc::clone(&lifecycle),
            Arc::new(clock.clone()),
            notifier.clone(),
        ));

        Self {
            clock,
            tasks,
            settings_api,
            ai,
            notifier,
            store,
            timer,
            lifecycle,
            settings,
            assistant,
            transfer,
        }
    }

    /// Turn AI on through the settings service
    pub async fn enable_ai(&self) {
        self.settings_api.set("use_ai", "true");
        self.settings.fetch_settings().await.expect("settings load");
    }
}
