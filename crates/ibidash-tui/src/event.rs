//! Terminal input and frame pacing for the dashboard loop.
//!
//! A background task merges crossterm input with two clocks: a slow tick
//! that ages toasts and a render tick that repaints. Data changes do not
//! come through here; they arrive as actions from the data bridge.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Toast expiry is checked at this rate.
const TICK_RATE: Duration = Duration::from_millis(250);
/// Roughly 30 frames per second.
const RENDER_RATE: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub enum Event {
    /// A key press (repeats and releases are dropped).
    Key(KeyEvent),
    /// The next draw picks up the new size.
    Resize,
    Tick,
    Render,
}

/// Handle to the input task. Dropping it stops the task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(read_events(tx, cancel.clone()));
        Self { rx, cancel }
    }

    /// `None` once the input task has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn pacer(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn read_events(tx: mpsc::UnboundedSender<Event>, cancel: CancellationToken) {
    let mut input = EventStream::new();
    let mut tick = pacer(TICK_RATE);
    let mut render = pacer(RENDER_RATE);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(raw)) = input.next() => match raw {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                CrosstermEvent::Resize(..) => Event::Resize,
                _ => continue,
            },
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}
