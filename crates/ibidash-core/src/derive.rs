// ── Client-side derivations ──
//
// The only places the dashboard computes anything from fetched data:
// threats grouped out of intents (when no threats endpoint answers) and
// the intent counters shown on the direct surface.

use indexmap::{IndexMap, IndexSet};

use ibidash_api::{IntentRecord, Scalar, ThreatRecord};

/// Status given to every derived threat.
pub const DERIVED_THREAT_STATUS: &str = "detected";

/// Intent statuses counted as active.
const ACTIVE_STATUSES: &[&str] = &["new", "processing", "under_mitigation"];

/// Group intents by their `threat` field.
///
/// Groups keep first-seen order, hosts are de-duplicated in first-seen
/// order, and `first_detected` is the start time of the first intent in
/// the group.
pub fn threats_from_intents(intents: &[IntentRecord]) -> Vec<ThreatRecord> {
    struct Group<'a> {
        first: &'a IntentRecord,
        hosts: IndexSet<String>,
        related: Vec<Scalar>,
    }

    let mut groups: IndexMap<Option<&str>, Group<'_>> = IndexMap::new();
    for intent in intents {
        let group = groups
            .entry(intent.threat.as_deref())
            .or_insert_with(|| Group {
                first: intent,
                hosts: IndexSet::new(),
                related: Vec::new(),
            });
        group.hosts.extend(intent.hosts());
        if let Some(key) = intent.key() {
            group.related.push(Scalar::Text(key));
        }
    }

    groups
        .into_iter()
        .map(|(threat, group)| ThreatRecord {
            threat_type: threat.map(str::to_owned),
            status: Some(DERIVED_THREAT_STATUS.to_owned()),
            affected_hosts: Some(ibidash_api::OneOrMany::Many(
                group.hosts.into_iter().collect(),
            )),
            first_detected: group.first.start_time.clone(),
            related_intents: Some(group.related),
            ..ThreatRecord::default()
        })
        .collect()
}

/// Counters over the current intent list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentStatistics {
    pub total: usize,
    /// Status `new`, `processing` or `under_mitigation`.
    pub active: usize,
    pub mitigated: usize,
    pub processing: usize,
}

impl IntentStatistics {
    pub fn from_intents(intents: &[IntentRecord]) -> Self {
        let count = |pred: &dyn Fn(&str) -> bool| {
            intents
                .iter()
                .filter(|i| i.status.as_deref().is_some_and(pred))
                .count()
        };
        Self {
            total: intents.len(),
            active: count(&|s| ACTIVE_STATUSES.contains(&s)),
            mitigated: count(&|s| s == "mitigated"),
            processing: count(&|s| s == "processing"),
        }
    }
}
