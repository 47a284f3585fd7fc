//! Polling, rendering and navigation core for the HORSE IBI dashboard.
//!
//! This crate sits between `ibidash-api` and the terminal front end:
//!
//! - **[`Dashboard`]**: constructible context holding the configuration,
//!   HTTP client and reactive state. [`start()`](Dashboard::start) loads
//!   every tracked resource and runs one refresh timer per resource;
//!   [`stop()`](Dashboard::stop) cancels timers and in-flight requests.
//!
//! - **[`RegionStore`]**: one `tokio::sync::watch` channel per display
//!   [`Region`]. A failed fetch only ever replaces its own regions with an
//!   error panel.
//!
//! - **Render layer** ([`render`], [`view`]): pure functions turning wire
//!   records into typed tables, cards and error panels, with status classes
//!   taken from one shared lookup table ([`status`]).
//!
//! - **Navigation** ([`navigation`]): the visible [`Page`] and client-side
//!   [`RowFilter`]s applied at view time.

pub mod config;
pub mod controller;
pub mod derive;
pub mod error;
pub mod fetch;
pub mod format;
pub mod navigation;
pub mod render;
pub mod resource;
pub mod scheduler;
pub mod status;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ApiSurface, DashboardConfig, TlsVerification};
pub use controller::{Dashboard, Notice, NoticeLevel};
pub use derive::IntentStatistics;
pub use error::{CoreError, FailureKind};
pub use navigation::{NO_MATCHES, Navigator, Page, RowFilter};
pub use resource::{Region, Resource};
pub use scheduler::{RefreshScheduler, RefreshTarget};
pub use status::{StatusClass, StatusDomain};
pub use store::RegionStore;
pub use view::{
    AlertView, CardView, CellView, ErrorView, PanelView, RowKind, RowView, TableView, Tone,
};
