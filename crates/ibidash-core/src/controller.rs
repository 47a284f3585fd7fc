// ── Dashboard abstraction ──
//
// Full lifecycle for one dashboard instance: builds the HTTP client,
// loads every tracked resource, runs the per-resource refresh timers,
// and publishes rendered panels into the RegionStore. Failures stay
// scoped to the resource that failed.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use futures_util::future::join_all;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ibidash_api::IbiClient;

use crate::config::DashboardConfig;
use crate::error::CoreError;
use crate::fetch::{fetch, render_payload};
use crate::navigation::{Navigator, Page, RowFilter};
use crate::render::error_panel;
use crate::resource::{Region, Resource};
use crate::scheduler::{RefreshScheduler, RefreshTarget};
use crate::store::RegionStore;
use crate::view::PanelView;

const NOTICE_CHANNEL_SIZE: usize = 64;

/// How often the last-refresh clock is re-stamped.
const CLOCK_PERIOD: Duration = Duration::from_secs(60);

// ── Notices ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient message for the front end's toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

// ── Dashboard ────────────────────────────────────────────────────────

/// The main entry point for front ends.
///
/// Cheaply cloneable via `Arc<DashboardInner>`. Independent instances
/// share nothing, so tests can run several side by side.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    client: IbiClient,
    store: RegionStore,
    navigator: Navigator,
    scheduler: RefreshScheduler,
    last_refresh: watch::Sender<Option<DateTime<Local>>>,
    notices: broadcast::Sender<Notice>,
    cancel: CancellationToken,
    /// Child token for the current run; cancelled by `stop()` and
    /// replaced by `start()` (avoids permanent cancellation).
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Dashboard {
    /// Create a dashboard from configuration. Does NOT fetch anything;
    /// call [`start()`](Self::start) to load and begin auto-refresh.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let client = IbiClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Create a dashboard around a pre-built client.
    pub fn with_client(config: DashboardConfig, client: IbiClient) -> Self {
        let (last_refresh, _) = watch::channel(None);
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(DashboardInner {
                config,
                client,
                store: RegionStore::new(),
                navigator: Navigator::new(),
                scheduler: RefreshScheduler::new(),
                last_refresh,
                notices,
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &RegionStore {
        &self.inner.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    /// Resources polled on the configured surface.
    pub fn tracked(&self) -> &'static [Resource] {
        Resource::tracked(self.inner.config.surface)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Load every tracked resource once, then start the refresh timers
    /// and the clock.
    ///
    /// Calling `start` again first tears down the previous run's timers,
    /// clock, and in-flight loads, so timers never pile up.
    pub async fn start(&self) {
        let child = {
            let mut current = self.inner.cancel_child.lock().await;
            current.cancel();
            *current = self.inner.cancel.child_token();
            current.clone()
        };
        self.abort_tasks().await;

        let tracked = self.tracked();
        info!(
            url = %self.inner.config.base_url,
            surface = %self.inner.config.surface,
            resources = tracked.len(),
            "starting dashboard"
        );

        self.stamp_clock();
        self.load_all(tracked).await;

        self.inner
            .scheduler
            .start(self, &child, tracked, self.inner.config.refresh_interval)
            .await;

        let ctrl = self.clone();
        let handle = tokio::spawn(clock_task(ctrl, CLOCK_PERIOD, child));
        self.inner.task_handles.lock().await.push(handle);
    }

    /// Cancel every timer and every in-flight load.
    pub async fn stop(&self) {
        // Cancel the child token (not the parent) so `start` can run again.
        self.inner.cancel_child.lock().await.cancel();
        self.inner.scheduler.stop().await;

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("dashboard stopped");
    }

    /// Re-load every tracked resource now and stamp the clock.
    pub async fn refresh_all(&self) {
        self.notify(Notice::info("Refreshing all panels"));
        self.stamp_clock();
        self.load_all(self.tracked()).await;
    }

    /// Resources with a live refresh timer.
    pub async fn active_timers(&self) -> Vec<Resource> {
        self.inner.scheduler.active().await
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch one resource and publish its regions.
    ///
    /// Failures render an error panel in this resource's regions only,
    /// emit a notice, and log a warning. Nothing propagates. A load
    /// cancelled by `stop()` publishes nothing.
    pub async fn load(&self, resource: Resource) {
        let cancel = self.inner.cancel_child.lock().await.clone();
        let surface = self.inner.config.surface;

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(%resource, "load cancelled");
                return;
            }
            result = fetch(&self.inner.client, surface, resource, self.inner.config.derive_threats) => result,
        };

        match result {
            Ok(payload) => {
                for (region, panel) in render_payload(surface, &payload) {
                    self.inner.store.publish(region, panel);
                }
                debug!(%resource, "loaded");
            }
            Err(e) => {
                warn!(%resource, error = %e, "failed to load resource");
                let panel = error_panel(resource, &e);
                for &region in resource.regions(surface) {
                    self.inner.store.publish(region, panel.clone());
                }
                let noun = resource.to_string().to_lowercase();
                self.notify(Notice::error(format!("Failed to load {noun} data")));
            }
        }
    }

    /// Load several resources concurrently; each publishes as it resolves.
    async fn load_all(&self, resources: &[Resource]) {
        join_all(resources.iter().map(|&r| self.load(r))).await;
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Show `page`. Loads its resources only when the page changes;
    /// returns the resources that were loaded.
    pub async fn select_page(&self, page: Page) -> Vec<Resource> {
        if !self.inner.navigator.select(page) {
            return Vec::new();
        }
        let resources = page.resources(self.inner.config.surface);
        debug!(%page, ?resources, "page selected");
        self.load_all(&resources).await;
        resources
    }

    pub fn current_page(&self) -> Page {
        self.inner.navigator.current()
    }

    pub fn set_filter(&self, region: Region, filter: RowFilter) {
        self.inner.navigator.set_filter(region, filter);
    }

    pub fn clear_filter(&self, region: Region) {
        self.inner.navigator.clear_filter(region);
    }

    /// A region's current panel with its filter applied.
    pub fn view(&self, region: Region) -> PanelView {
        let panel = self.inner.store.current(region);
        self.inner.navigator.view(region, &panel)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Delete an intent, then reload intents whatever the outcome.
    ///
    /// The reload is the source of truth: nothing is removed locally, so
    /// an intent the backend still reports stays visible. The outcome is
    /// also published as a notice.
    pub async fn delete_intent(&self, id: &str) -> Result<serde_json::Value, CoreError> {
        let outcome = self.inner.client.delete_intent(id).await.map_err(CoreError::from);
        match &outcome {
            Ok(ack) => {
                info!(id, %ack, "intent deleted");
                self.notify(Notice::success(format!("Deleted intent {id}")));
            }
            Err(e) => {
                warn!(id, error = %e, "intent deletion failed");
                self.notify(Notice::error(format!("Failed to delete intent {id}: {e}")));
            }
        }
        self.load(Resource::Intents).await;
        outcome
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Time of the last local refresh (a clock, not a success marker).
    pub fn last_refresh(&self) -> watch::Receiver<Option<DateTime<Local>>> {
        self.inner.last_refresh.subscribe()
    }

    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn notify(&self, notice: Notice) {
        // No subscribers is fine; notices are fire-and-forget.
        let _ = self.inner.notices.send(notice);
    }

    fn stamp_clock(&self) {
        self.inner.last_refresh.send_replace(Some(Local::now()));
    }

    async fn abort_tasks(&self) {
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            handle.abort();
        }
    }
}

impl RefreshTarget for Dashboard {
    async fn refresh(&self, resource: Resource) {
        self.load(resource).await;
    }
}

/// Re-stamp the last-refresh clock on a fixed period.
async fn clock_task(dashboard: Dashboard, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => dashboard.stamp_clock(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;
    use wiremock::MockServer;

    use super::*;

    fn dashboard(server: &MockServer) -> Dashboard {
        let mut config = DashboardConfig::new(Url::parse(&server.uri()).unwrap());
        config.refresh_interval = Duration::ZERO;
        Dashboard::new(config).unwrap()
    }

    /// Let spawned tasks observe fired timers.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn clock_restamps_every_period_until_stopped() {
        let server = MockServer::start().await;
        let dash = dashboard(&server);

        dash.start().await;
        dash.start().await;
        assert_eq!(dash.inner.task_handles.lock().await.len(), 1);
        assert!(dash.active_timers().await.is_empty());

        settle().await;
        tokio::time::pause();
        let mut rx = dash.last_refresh();
        assert!(rx.borrow_and_update().is_some());

        tokio::time::advance(CLOCK_PERIOD - Duration::from_secs(1)).await;
        settle().await;
        assert!(!rx.has_changed().unwrap());

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(rx.has_changed().unwrap());
        rx.mark_unchanged();

        dash.stop().await;
        assert!(dash.inner.task_handles.lock().await.is_empty());
        rx.mark_unchanged();

        tokio::time::advance(CLOCK_PERIOD * 2).await;
        settle().await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn notices_reach_every_subscriber() {
        let server = MockServer::start().await;
        let dash = dashboard(&server);
        let mut first = dash.notices();
        let mut second = dash.notices();

        dash.notify(Notice::success("Deleted intent abc"));

        assert_eq!(first.try_recv().unwrap(), Notice::success("Deleted intent abc"));
        assert_eq!(second.try_recv().unwrap().level, NoticeLevel::Success);
    }
}
