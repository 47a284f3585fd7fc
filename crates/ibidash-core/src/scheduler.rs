// ── Per-resource refresh timers ──
//
// Each tracked resource gets its own repeating timer task. Starting the
// scheduler again replaces every timer, so there is never more than one
// per resource. Each tick awaits its own load before the next tick is
// taken, so a slow backend delays that resource's timer instead of
// stacking requests.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::resource::Resource;

/// Something that can re-load one resource.
pub trait RefreshTarget: Clone + Send + Sync + 'static {
    fn refresh(&self, resource: Resource) -> impl Future<Output = ()> + Send;
}

struct Timer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// The set of live refresh timers.
#[derive(Default)]
pub struct RefreshScheduler {
    timers: Mutex<HashMap<Resource, Timer>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every timer with one per resource in `resources`.
    ///
    /// A resource ticks every `base × resource.cadence()`. Timer tokens are
    /// children of `parent`, so cancelling `parent` also stops them. A zero
    /// `base` cancels existing timers and starts none.
    pub async fn start<T: RefreshTarget>(
        &self,
        target: &T,
        parent: &CancellationToken,
        resources: &[Resource],
        base: Duration,
    ) {
        let mut timers = self.timers.lock().await;
        for (_, timer) in timers.drain() {
            timer.cancel.cancel();
        }

        if base.is_zero() {
            debug!("refresh interval is zero; auto-refresh disabled");
            return;
        }

        for &resource in resources {
            let period = base * resource.cadence();
            let cancel = parent.child_token();
            let handle = tokio::spawn(timer_task(target.clone(), resource, period, cancel.clone()));
            timers.insert(resource, Timer { cancel, handle });
        }
        debug!(count = timers.len(), ?base, "refresh timers started");
    }

    /// Cancel every timer and wait for the tasks to finish.
    pub async fn stop(&self) {
        let drained: Vec<Timer> = self.timers.lock().await.drain().map(|(_, t)| t).collect();
        for timer in &drained {
            timer.cancel.cancel();
        }
        for timer in drained {
            let _ = timer.handle.await;
        }
    }

    /// Resources with a live timer.
    pub async fn active(&self) -> Vec<Resource> {
        let timers = self.timers.lock().await;
        let mut active: Vec<Resource> = timers
            .iter()
            .filter(|(_, t)| !t.cancel.is_cancelled() && !t.handle.is_finished())
            .map(|(r, _)| *r)
            .collect();
        active.sort();
        active
    }
}

async fn timer_task<T: RefreshTarget>(
    target: T,
    resource: Resource,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                debug!(%resource, "refresh tick");
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    () = target.refresh(resource) => {}
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex as StdMutex};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Default)]
    struct Counter {
        hits: Arc<StdMutex<HashMap<Resource, usize>>>,
    }

    impl Counter {
        fn hits(&self, resource: Resource) -> usize {
            self.hits.lock().unwrap().get(&resource).copied().unwrap_or(0)
        }
    }

    impl RefreshTarget for Counter {
        async fn refresh(&self, resource: Resource) {
            *self.hits.lock().unwrap().entry(resource).or_default() += 1;
        }
    }

    const TRACKED: &[Resource] = &[Resource::Intents, Resource::Threats, Resource::ComponentStatus];

    #[tokio::test(start_paused = true)]
    async fn ticks_per_cadence() {
        let scheduler = RefreshScheduler::new();
        let target = Counter::default();
        let parent = CancellationToken::new();
        scheduler
            .start(&target, &parent, TRACKED, Duration::from_secs(2))
            .await;

        tokio::time::sleep(Duration::from_millis(4_100)).await;
        assert_eq!(target.hits(Resource::Intents), 2);
        assert_eq!(target.hits(Resource::Threats), 2);
        assert_eq!(target.hits(Resource::ComponentStatus), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_keeps_one_timer_per_resource() {
        let scheduler = RefreshScheduler::new();
        let target = Counter::default();
        let parent = CancellationToken::new();
        for _ in 0..3 {
            scheduler
                .start(&target, &parent, TRACKED, Duration::from_secs(2))
                .await;
        }
        let mut expected = TRACKED.to_vec();
        expected.sort();
        assert_eq!(scheduler.active().await, expected);

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert_eq!(target.hits(Resource::Intents), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticks() {
        let scheduler = RefreshScheduler::new();
        let target = Counter::default();
        let parent = CancellationToken::new();
        scheduler
            .start(&target, &parent, TRACKED, Duration::from_secs(2))
            .await;
        scheduler.stop().await;
        assert!(scheduler.active().await.is_empty());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(target.hits(Resource::Intents), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn parent_cancellation_stops_timers() {
        let scheduler = RefreshScheduler::new();
        let target = Counter::default();
        let parent = CancellationToken::new();
        scheduler
            .start(&target, &parent, TRACKED, Duration::from_secs(2))
            .await;
        parent.cancel();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(target.hits(Resource::Threats), 0);
        assert!(scheduler.active().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_starts_nothing() {
        let scheduler = RefreshScheduler::new();
        let target = Counter::default();
        scheduler
            .start(&target, &CancellationToken::new(), TRACKED, Duration::ZERO)
            .await;
        assert!(scheduler.active().await.is_empty());
    }
}
