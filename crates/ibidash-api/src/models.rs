// Wire types for the IBI dashboard endpoints
//
// The backend is loosely typed: identifiers arrive as numbers or strings,
// host lists as a single string or an array, timestamps as RFC 3339 text
// or epoch seconds. Every record field is therefore optional and
// decoded leniently; only the list envelopes are required.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Loose scalar helpers ────────────────────────────────────────────

/// A JSON scalar shown verbatim in the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// A field that is either a single value or a list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T: Clone> OneOrMany<T> {
    /// Flatten into a list.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::Many(items) => items.clone(),
            Self::One(item) => vec![item.clone()],
        }
    }
}

/// A point in time as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Seconds since the Unix epoch (the direct surface's `start_time`).
    Epoch(f64),
    /// RFC 3339 / ISO 8601 text.
    Text(String),
}

// ── Records ─────────────────────────────────────────────────────────

/// An intent as returned by `/stats/intents` or `/intents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub id: Option<Scalar>,
    pub uid: Option<Scalar>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub start_time: Option<Timestamp>,
    pub threat: Option<String>,
    pub host: Option<OneOrMany<String>>,
    pub duration: Option<Scalar>,
    pub intent_type: Option<String>,
}

impl IntentRecord {
    /// Stable identity: `uid` when present, else `id`.
    pub fn key(&self) -> Option<String> {
        self.uid
            .as_ref()
            .or(self.id.as_ref())
            .map(ToString::to_string)
    }

    /// Hosts as a flat list (empty when absent).
    pub fn hosts(&self) -> Vec<String> {
        self.host.as_ref().map(OneOrMany::to_vec).unwrap_or_default()
    }
}

/// A threat as returned by `/stats/threats` or `/system-states`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatRecord {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub threat_type: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub hosts: Option<OneOrMany<String>>,
    pub affected_hosts: Option<OneOrMany<String>>,
    pub reported_at: Option<Timestamp>,
    pub first_detected: Option<Timestamp>,
    pub last_update: Option<Timestamp>,
    pub related_intents: Option<Vec<Scalar>>,
}

impl ThreatRecord {
    /// Display name: `name`, falling back to `threat_type`.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.threat_type.as_deref())
    }

    /// Hosts from either `hosts` or `affected_hosts`.
    pub fn host_list(&self) -> Vec<String> {
        self.hosts
            .as_ref()
            .or(self.affected_hosts.as_ref())
            .map(OneOrMany::to_vec)
            .unwrap_or_default()
    }

    /// When the threat was first seen: `reported_at`, else `first_detected`.
    pub fn reported(&self) -> Option<&Timestamp> {
        self.reported_at.as_ref().or(self.first_detected.as_ref())
    }
}

/// A mitigation action from `/stats/mitigations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MitigationRecord {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub threats: Option<OneOrMany<Scalar>>,
    pub priority: Option<Scalar>,
    pub enabled: Option<bool>,
}

/// One monitored component from `/stats/component-status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatusRecord {
    pub name: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

// ── Summary payloads ────────────────────────────────────────────────

/// `GET /stats/ibi`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IbiStatus {
    pub status: Option<String>,
}

impl IbiStatus {
    /// The orchestrator reports itself as stopped.
    pub fn is_stopped(&self) -> bool {
        self.status.as_deref() == Some("stopped")
    }
}

/// `GET /stats/intents-summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentsSummary {
    pub fulfilled: Option<Scalar>,
    pub not_fulfilled: Option<Scalar>,
}

/// `GET /stats/threat-status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatStatusCounts {
    pub new: Option<Scalar>,
    pub under_emulation: Option<Scalar>,
    pub under_mitigation: Option<Scalar>,
    pub reincident: Option<Scalar>,
    pub mitigated: Option<Scalar>,
}

/// `GET /stats/ndt`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NdtStatus {
    pub queue_size: Option<Scalar>,
    pub ndt_status: Option<String>,
}

impl NdtStatus {
    pub fn is_available(&self) -> bool {
        self.ndt_status.as_deref() == Some("available")
    }
}

// ── Envelopes ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct IntentsEnvelope {
    pub intents: Vec<IntentRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreatsEnvelope {
    pub threats: Vec<ThreatRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MitigationsEnvelope {
    pub mitigations: Vec<MitigationRecord>,
}

/// The direct surface returns either `{"intents": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IntentList {
    Wrapped { intents: Vec<IntentRecord> },
    Bare(Vec<IntentRecord>),
}

impl From<IntentList> for Vec<IntentRecord> {
    fn from(list: IntentList) -> Self {
        match list {
            IntentList::Wrapped { intents } | IntentList::Bare(intents) => intents,
        }
    }
}

/// `/system-states` returns either `{"threats": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ThreatList {
    Wrapped { threats: Vec<ThreatRecord> },
    Bare(Vec<ThreatRecord>),
}

impl From<ThreatList> for Vec<ThreatRecord> {
    fn from(list: ThreatList) -> Self {
        match list {
            ThreatList::Wrapped { threats } | ThreatList::Bare(threats) => threats,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn intent_accepts_numeric_id_and_single_host() {
        let intent: IntentRecord = serde_json::from_value(json!({
            "id": 1,
            "description": "x",
            "status": "fulfilled",
            "host": "10.0.0.1",
            "created_at": "2024-01-01T00:00:00Z",
            "start_time": 1_704_067_200
        }))
        .unwrap();

        assert_eq!(intent.id, Some(Scalar::Int(1)));
        assert_eq!(intent.key().as_deref(), Some("1"));
        assert_eq!(intent.hosts(), vec!["10.0.0.1".to_string()]);
        assert_eq!(intent.start_time, Some(Timestamp::Epoch(1_704_067_200.0)));
        assert_eq!(
            intent.created_at,
            Some(Timestamp::Text("2024-01-01T00:00:00Z".into()))
        );
    }

    #[test]
    fn intent_key_prefers_uid() {
        let intent: IntentRecord =
            serde_json::from_value(json!({ "id": 7, "uid": "abc" })).unwrap();
        assert_eq!(intent.key().as_deref(), Some("abc"));
    }

    #[test]
    fn null_fields_decode_as_none() {
        let intent: IntentRecord =
            serde_json::from_value(json!({ "updated_at": null, "host": null })).unwrap();
        assert!(intent.updated_at.is_none());
        assert!(intent.hosts().is_empty());
    }

    #[test]
    fn threat_type_field_is_renamed() {
        let threat: ThreatRecord = serde_json::from_value(json!({
            "threat_type": "ddos",
            "type": "network",
            "affected_hosts": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(threat.kind.as_deref(), Some("network"));
        assert_eq!(threat.display_name(), Some("ddos"));
        assert_eq!(threat.host_list(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn intent_list_accepts_both_shapes() {
        let wrapped: IntentList = serde_json::from_value(json!({ "intents": [{ "uid": "a" }] })).unwrap();
        let bare: IntentList = serde_json::from_value(json!([{ "uid": "b" }])).unwrap();
        assert_eq!(Vec::<IntentRecord>::from(wrapped).len(), 1);
        assert_eq!(Vec::<IntentRecord>::from(bare).len(), 1);
    }

    #[test]
    fn envelope_requires_list_field() {
        let result: Result<IntentsEnvelope, _> = serde_json::from_value(json!({ "items": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn scalar_display_is_verbatim() {
        assert_eq!(Scalar::Int(3).to_string(), "3");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
        assert_eq!(Scalar::Text("high".into()).to_string(), "high");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
    }

    #[test]
    fn ndt_availability() {
        let busy = NdtStatus {
            queue_size: Some(Scalar::Int(3)),
            ndt_status: Some("busy".into()),
        };
        assert!(!busy.is_available());
        let ok = NdtStatus {
            ndt_status: Some("available".into()),
            ..NdtStatus::default()
        };
        assert!(ok.is_available());
    }
}
