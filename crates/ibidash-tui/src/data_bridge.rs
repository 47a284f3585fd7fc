//! Data bridge: connects [`Dashboard`] channels to TUI actions.
//!
//! Runs as a background task: starts the dashboard, subscribes to every
//! display region, the visible page, the last-refresh clock and the
//! notice feed, and forwards each change as an [`Action`] through the
//! TUI's action channel.

use std::sync::Arc;

use futures::future::join_all;
use strum::IntoEnumIterator;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use ibidash_core::{Dashboard, PanelView, Region};

use crate::action::{Action, Notification};

/// Spawn the data bridge connecting [`Dashboard`] channels to the TUI.
///
/// Sends initial snapshots, kicks off the dashboard's first load and
/// timers, then forwards changes until cancelled. Stops the dashboard on
/// the way out.
pub async fn spawn_data_bridge(
    dashboard: Dashboard,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut page = dashboard.navigator().subscribe();
    let mut clock = dashboard.last_refresh();
    let mut notices = dashboard.notices();

    let forwards: Vec<_> = Region::iter()
        .filter_map(|region| {
            let rx = dashboard.store().subscribe(region)?;
            Some(forward_region(
                dashboard.clone(),
                region,
                rx,
                action_tx.clone(),
            ))
        })
        .collect();

    // Push initial snapshots so screens paint immediately
    for region in Region::iter() {
        let _ = action_tx.send(Action::RegionUpdated(
            region,
            Arc::new(dashboard.view(region)),
        ));
    }
    let _ = action_tx.send(Action::PageChanged(*page.borrow_and_update()));
    let _ = action_tx.send(Action::LastRefresh(*clock.borrow_and_update()));

    // The first load can take up to the request timeout; keep forwarding meanwhile
    let starter = dashboard.clone();
    tokio::spawn(async move { starter.start().await });

    let regions = join_all(forwards);
    tokio::pin!(regions);

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            _ = &mut regions => break,

            Ok(()) = page.changed() => {
                let current = *page.borrow_and_update();
                let _ = action_tx.send(Action::PageChanged(current));
            }
            Ok(()) = clock.changed() => {
                let stamp = *clock.borrow_and_update();
                let _ = action_tx.send(Action::LastRefresh(stamp));
            }
            received = notices.recv() => match received {
                Ok(notice) => {
                    let _ = action_tx.send(Action::Notify(Notification::from(notice)));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notice feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    dashboard.stop().await;
    debug!("data bridge shut down");
}

/// Forward one region's changes, filtered through the navigator.
async fn forward_region(
    dashboard: Dashboard,
    region: Region,
    mut rx: watch::Receiver<Arc<PanelView>>,
    action_tx: mpsc::UnboundedSender<Action>,
) {
    while rx.changed().await.is_ok() {
        let view = Arc::new(dashboard.view(region));
        if action_tx.send(Action::RegionUpdated(region, view)).is_err() {
            break;
        }
    }
}
