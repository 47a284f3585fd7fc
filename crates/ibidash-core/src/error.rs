// ── Core error types ──
//
// Errors surfaced by the dashboard core. Transport-layer errors from
// ibidash-api are translated through `From<ibidash_api::Error>` so the
// render layer only ever deals with `CoreError` and its `FailureKind`.

use thiserror::Error;

use crate::resource::Resource;

/// The failure class shown in a region's error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response (connection refused, DNS, timeout).
    Transport,
    /// Non-2xx response carrying its numeric status.
    Http(u16),
    /// Response body did not have the expected shape.
    Payload,
    /// Local setup problem.
    Config,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport errors ─────────────────────────────────────────────
    #[error("Cannot reach IBI backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to IBI backend timed out")]
    Timeout,

    // ── Response errors ──────────────────────────────────────────────
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    #[error("Unexpected response payload: {message}")]
    Payload { message: String },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("{resource} is not served by the {surface} endpoints")]
    Unsupported { resource: Resource, surface: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Classify this error for display purposes.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout => FailureKind::Transport,
            Self::Http { status, .. } => FailureKind::Http(*status),
            Self::Payload { .. } => FailureKind::Payload,
            Self::Unsupported { .. } | Self::Config { .. } => FailureKind::Config,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ibidash_api::Error> for CoreError {
    fn from(err: ibidash_api::Error) -> Self {
        match err {
            ibidash_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if let Some(status) = e.status() {
                    CoreError::Http {
                        status: status.as_u16(),
                        body: String::new(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            ibidash_api::Error::Http { status, body } => CoreError::Http { status, body },
            ibidash_api::Error::Deserialization { message, body: _ } => {
                CoreError::Payload { message }
            }
            ibidash_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ibidash_api::Error::InvalidBaseUrl { url } => CoreError::Config {
                message: format!("Base URL cannot carry API paths: {url}"),
            },
            ibidash_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
        }
    }
}
