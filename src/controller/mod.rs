//! Controller - owns the view model and every background request
//!
//! Each user or timer event becomes a tracked task on the tokio runtime.
//! Tasks write their results into the shared `PageState` and ask egui to
//! repaint; the UI thread never blocks on the network.

mod catalog;
mod health;
mod prediction;

use crate::api::ApiClient;
use crate::form::PredictionForm;
use crate::page::PageState;
use crate::settings::{Settings, StalePredictions};
use crate::types::PredictionRequest;
use crate::utils::today_iso;
use eframe::egui;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

pub(crate) fn lock_page(page: &Mutex<PageState>) -> MutexGuard<'_, PageState> {
    page.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything a background task needs to fetch and render.
#[derive(Clone)]
pub(crate) struct Shared {
    pub(crate) api: ApiClient,
    page: Arc<Mutex<PageState>>,
    ctx: egui::Context,
}

impl Shared {
    /// Apply one write to the view model and schedule a repaint.
    pub(crate) fn update(&self, f: impl FnOnce(&mut PageState)) {
        {
            let mut page = lock_page(&self.page);
            f(&mut page);
        }
        self.ctx.request_repaint();
    }
}

/// Spawns tasks that are tracked and abort on shutdown.
#[derive(Clone)]
pub(crate) struct Spawner {
    tracker: TaskTracker,
    token: CancellationToken,
    runtime: Handle,
}

impl Spawner {
    pub(crate) fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        self.tracker.spawn_on(
            async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = task => {}
                }
            },
            &self.runtime,
        );
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub poll_interval: Duration,
    pub stale_predictions: StalePredictions,
}

impl ControllerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            poll_interval: settings.health_poll_interval(),
            stale_predictions: settings.stale_predictions,
        }
    }
}

pub struct Controller {
    shared: Shared,
    spawner: Spawner,
    config: ControllerConfig,
    generation: Arc<AtomicU64>,
    running: bool,
}

impl Controller {
    pub fn new(api: ApiClient, ctx: egui::Context, runtime: Handle, config: ControllerConfig) -> Self {
        Self {
            shared: Shared {
                api,
                page: Arc::new(Mutex::new(PageState::default())),
                ctx,
            },
            spawner: Spawner {
                tracker: TaskTracker::new(),
                token: CancellationToken::new(),
                runtime,
            },
            config,
            generation: Arc::new(AtomicU64::new(0)),
            running: false,
        }
    }

    pub fn page(&self) -> MutexGuard<'_, PageState> {
        lock_page(&self.shared.page)
    }

    pub fn api_base_url(&self) -> &str {
        self.shared.api.base_url()
    }

    pub fn api_docs_url(&self) -> String {
        self.shared.api.docs_url()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of tracked tasks still alive, poller included.
    pub fn in_flight(&self) -> usize {
        self.spawner.tracker.len()
    }

    /// Default the form date to today, kick off the initial loads and start
    /// the health poller. No-op while already running.
    pub fn start(&mut self, form: &mut PredictionForm) {
        if self.running {
            return;
        }
        if self.spawner.token.is_cancelled() {
            self.spawner.token = CancellationToken::new();
            self.spawner.tracker.reopen();
        }
        self.running = true;

        form.date = today_iso();
        info!(
            api = %self.shared.api.base_url(),
            poll_secs = self.config.poll_interval.as_secs_f32(),
            "Controller starting"
        );

        self.check_api_status();
        self.load_menu_items();
        self.load_model_info();
        self.load_api_info();

        let shared = self.shared.clone();
        let spawner = self.spawner.clone();
        let period = self.config.poll_interval;
        self.spawner
            .spawn(async move { health::poll_health(shared, spawner, period).await });
    }

    /// Stop the poller and abort every in-flight request.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.spawner.token.cancel();
        self.spawner.tracker.close();
        info!(in_flight = self.in_flight(), "Controller stopped");
    }

    /// Re-run the health check and the data loads.
    pub fn refresh(&self) {
        debug!("Manual refresh");
        self.check_api_status();
        self.load_menu_items();
        self.load_model_info();
    }

    pub fn check_api_status(&self) {
        let shared = self.shared.clone();
        self.spawner
            .spawn(async move { health::check_api_status(&shared).await });
    }

    pub fn load_menu_items(&self) {
        let shared = self.shared.clone();
        self.spawner
            .spawn(async move { catalog::load_menu_items(&shared).await });
    }

    pub fn load_model_info(&self) {
        let shared = self.shared.clone();
        self.spawner
            .spawn(async move { catalog::load_model_info(&shared).await });
    }

    pub fn load_api_info(&self) {
        let shared = self.shared.clone();
        self.spawner
            .spawn(async move { catalog::load_api_info(&shared).await });
    }

    pub fn handle_prediction_submit(&self, form: &PredictionForm) {
        match form.to_request() {
            Ok(request) => self.get_prediction(request),
            Err(e) => {
                warn!(error = %e, "Prediction form rejected");
                self.shared.update(|page| page.show_error(e.to_string()));
            }
        }
    }

    pub fn get_prediction(&self, request: PredictionRequest) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.update(PageState::set_submit_busy);

        let latest = self.generation.clone();
        let policy = self.config.stale_predictions;

        // Lives inside the task so the control is restored on every exit,
        // including cancellation before the first poll. Under `LatestIssued`
        // only the newest request may re-enable it.
        let restore = scopeguard::guard(
            (self.shared.clone(), latest.clone()),
            move |(shared, latest)| {
                let superseded = policy == StalePredictions::LatestIssued
                    && latest.load(Ordering::SeqCst) != generation;
                if !superseded {
                    shared.update(PageState::restore_submit);
                }
            },
        );

        let shared = self.shared.clone();
        self.spawner.spawn(async move {
            let _restore = restore;
            prediction::request_prediction(&shared, &request, generation, &latest, policy).await;
        });
    }

    /// Wait until every tracked task has finished. Never returns while the
    /// poller is running, so call `stop()` first or bound it with a timeout.
    ///
    /// `TaskTracker::wait` only resolves once the tracker is closed. A tracker
    /// closed by `stop()` stays closed; otherwise it is reopened afterwards so
    /// the controller keeps accepting work.
    pub async fn wait_idle(&self) {
        let was_closed = self.spawner.tracker.is_closed();
        self.spawner.tracker.close();
        self.spawner.tracker.wait().await;
        if !was_closed {
            self.spawner.tracker.reopen();
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}
