//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use ibidash_core::{Notice, NoticeLevel, Page, PanelView, Region, Resource};

use crate::screen::ScreenId;

/// How long a toast stays up unless dismissed.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

impl From<Notice> for Notification {
    fn from(notice: Notice) -> Self {
        let level = match notice.level {
            NoticeLevel::Info => NotificationLevel::Info,
            NoticeLevel::Success => NotificationLevel::Success,
            NoticeLevel::Error => NotificationLevel::Error,
        };
        Self {
            message: notice.message,
            level,
        }
    }
}

/// A notification on screen, stamped with when it appeared.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(notification: Notification, shown_at: Instant) -> Self {
        Self {
            notification,
            shown_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_TTL
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteIntent { id: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteIntent { id } => write!(f, "Delete intent {id}?"),
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    /// The dashboard's visible page changed.
    PageChanged(Page),

    // ── Data Events (from the region store) ───────────────────────
    RegionUpdated(Region, Arc<PanelView>),
    LastRefresh(Option<DateTime<Local>>),

    // ── Commands ──────────────────────────────────────────────────
    RefreshAll,
    Retry(Resource),
    RequestDelete(String),

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Filter ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,
    ClearFilter,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toast_expires_after_ttl() {
        let shown = Instant::now();
        let toast = Toast::new(Notification::info("hello"), shown);
        assert!(!toast.is_expired(shown));
        assert!(!toast.is_expired(shown + Duration::from_millis(4_999)));
        assert!(toast.is_expired(shown + TOAST_TTL));
        assert!(toast.is_expired(shown + Duration::from_secs(60)));
    }

    #[test]
    fn toast_clock_going_backwards_is_not_expired() {
        let shown = Instant::now() + Duration::from_secs(1);
        let toast = Toast::new(Notification::info("hello"), shown);
        assert!(!toast.is_expired(Instant::now()));
    }

    #[test]
    fn notices_keep_their_level() {
        let cases = [
            (NoticeLevel::Info, NotificationLevel::Info),
            (NoticeLevel::Success, NotificationLevel::Success),
            (NoticeLevel::Error, NotificationLevel::Error),
        ];
        for (level, expected) in cases {
            let notice = Notice {
                level,
                message: "Deleted intent abc".into(),
            };
            assert_eq!(
                Notification::from(notice),
                Notification {
                    message: "Deleted intent abc".into(),
                    level: expected,
                }
            );
        }
    }

    #[test]
    fn confirm_prompt_names_the_intent() {
        let confirm = ConfirmAction::DeleteIntent { id: "abc".into() };
        assert_eq!(confirm.to_string(), "Delete intent abc?");
    }
}
