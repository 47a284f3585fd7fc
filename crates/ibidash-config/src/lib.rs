//! Configuration for the IBI dashboard.
//!
//! TOML profiles layered with `IBIDASH_` environment variables, and
//! translation to `ibidash_core::DashboardConfig`. The TUI applies its
//! command-line overrides on top of the resolved profile.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ibidash_core::{ApiSurface, DashboardConfig, TlsVerification};

/// Prefix for environment overrides, e.g. `IBIDASH_DEFAULTS__REFRESH_INTERVAL_SECS`.
pub const ENV_PREFIX: &str = "IBIDASH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}'")]
    UnknownProfile { profile: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    /// Global defaults applied to every profile.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name, falling back to `default_profile`.
    ///
    /// When the default profile is not defined, a profile built from
    /// `Defaults` alone is returned so a fresh install still starts.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        if let Some(name) = name {
            return self
                .profiles
                .get(name)
                .cloned()
                .map(|p| (name.to_owned(), p))
                .ok_or_else(|| ConfigError::UnknownProfile {
                    profile: name.into(),
                });
        }

        let name = self.default_profile.clone().unwrap_or_else(|| "default".into());
        let profile = self.profiles.get(&name).cloned().unwrap_or_default();
        Ok((name, profile))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_surface")]
    pub surface: String,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_derive_threats")]
    pub derive_threats: bool,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            surface: default_surface(),
            refresh_interval_secs: default_refresh_interval(),
            timeout: default_timeout(),
            derive_threats: default_derive_threats(),
            insecure: false,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}
fn default_surface() -> String {
    "stats".into()
}
fn default_refresh_interval() -> u64 {
    2
}
fn default_timeout() -> u64 {
    30
}
fn default_derive_threats() -> bool {
    true
}

/// A named backend profile. Every field overrides `Defaults`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g. "http://127.0.0.1:8000").
    pub base_url: Option<String>,

    /// Endpoint surface: "stats" or "direct".
    pub surface: Option<String>,

    /// Auto-refresh period in seconds. 0 disables auto-refresh.
    pub refresh_interval_secs: Option<u64>,

    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,

    /// Derive threats from intents when the threats endpoint fails.
    pub derive_threats: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("eu", "horse", "ibidash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ibidash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error; defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `DashboardConfig` from a profile layered over `defaults`.
pub fn profile_to_dashboard_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<DashboardConfig, ConfigError> {
    let raw_url = profile.base_url.as_deref().unwrap_or(&defaults.base_url);
    let base_url: url::Url = raw_url.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw_url}"),
    })?;
    if base_url.cannot_be_a_base() {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("not an HTTP base URL: {raw_url}"),
        });
    }

    let raw_surface = profile.surface.as_deref().unwrap_or(&defaults.surface);
    let surface: ApiSurface = raw_surface.parse().map_err(|_| ConfigError::Validation {
        field: "surface".into(),
        reason: format!("expected 'stats' or 'direct', got '{raw_surface}'"),
    })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(DashboardConfig {
        base_url,
        surface,
        refresh_interval: Duration::from_secs(
            profile
                .refresh_interval_secs
                .unwrap_or(defaults.refresh_interval_secs),
        ),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        tls,
        derive_threats: profile.derive_threats.unwrap_or(defaults.derive_threats),
    })
}
