// ── Runtime dashboard configuration ──
//
// These types describe *which* backend to poll and how often.
// They never touch disk: the TUI (via ibidash-config) builds a
// `DashboardConfig` and hands it to `Dashboard::new`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use ibidash_api::{TlsMode, TransportConfig};

/// Default auto-refresh period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which set of backend endpoints the dashboard reads.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApiSurface {
    /// The `/stats/*` endpoints served next to the dashboard.
    #[default]
    Stats,
    /// The standalone `/intents` + `/system-states` deployment.
    Direct,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed lab deployments).
    DangerAcceptInvalid,
}

/// Configuration for one dashboard instance.
///
/// Several instances may coexist; nothing here is global.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend root (e.g. `http://127.0.0.1:8000`).
    pub base_url: Url,
    /// Endpoint surface to poll.
    pub surface: ApiSurface,
    /// Base auto-refresh period. Zero disables the timers.
    pub refresh_interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Derive threats from intents when the threats endpoint fails.
    pub derive_threats: bool,
}

impl DashboardConfig {
    /// A config for `base_url` with every other field at its default.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            surface: ApiSurface::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsVerification::default(),
            derive_threats: true,
        }
    }

    /// Transport settings for the HTTP client.
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
