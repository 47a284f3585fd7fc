// ibidash-api: Async Rust client for the HORSE IBI dashboard endpoints
//
// Two endpoint surfaces are exposed on one client: the `/stats/*` surface
// served next to the dashboard, and the direct `/intents` +
// `/system-states` surface of a standalone IBI deployment.

pub mod client;
pub mod direct;
pub mod error;
pub mod intents;
pub mod models;
pub mod stats;
pub mod transport;

pub use client::IbiClient;
pub use error::Error;
pub use models::{
    ComponentStatusRecord, IbiStatus, IntentRecord, IntentsSummary, MitigationRecord, NdtStatus,
    OneOrMany, Scalar, ThreatRecord, ThreatStatusCounts, Timestamp,
};
pub use transport::{TlsMode, TransportConfig};
