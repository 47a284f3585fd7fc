// ── Record → view renderers ──
//
// One pure function per entity type. The same input always yields the
// same view; nothing here reads the clock except through the local time
// zone used for timestamps.

use ibidash_api::{
    ComponentStatusRecord, IbiStatus, IntentRecord, IntentsSummary, MitigationRecord, NdtStatus,
    ThreatRecord, ThreatStatusCounts,
};

use crate::derive::IntentStatistics;
use crate::error::CoreError;
use crate::format;
use crate::resource::Resource;
use crate::status::{StatusDomain, status_class, status_label};
use crate::view::{AlertView, CardView, CellView, ErrorView, PanelView, RowView, TableView, Tone};

// ── Column layouts ───────────────────────────────────────────────────

pub const INTENT_COLUMNS: &[&str] = &["ID", "Description", "Status", "Created", "Updated"];
pub const THREAT_COLUMNS: &[&str] = &[
    "ID",
    "Name",
    "Type",
    "Status",
    "Hosts",
    "Reported",
    "Last Update",
];
pub const MITIGATION_COLUMNS: &[&str] = &["ID", "Name", "Category", "Threats", "Priority", "Status"];
pub const COMPONENT_COLUMNS: &[&str] = &["Component", "Status"];
pub const DIRECT_INTENT_COLUMNS: &[&str] = &[
    "Intent ID",
    "Type",
    "Threat",
    "Affected Hosts",
    "Status",
    "Created",
    "Duration",
];
pub const DIRECT_THREAT_COLUMNS: &[&str] = &[
    "Threat Type",
    "Affected Hosts",
    "Status",
    "First Detected",
    "Related Intents",
];

// ── Empty-state messages ─────────────────────────────────────────────

pub const NO_INTENTS: &str = "No intents found";
pub const NO_THREATS: &str = "No threats found";
pub const NO_MITIGATIONS: &str = "No mitigation actions found";
pub const NO_COMPONENTS: &str = "Components not being monitored";
pub const NO_DIRECT_INTENTS: &str = "No security intents found";
pub const NO_DIRECT_THREATS: &str = "No active threats detected";

pub const IBI_STOPPED: &str = "IBI is stopped: intents are not being processed";

// ── Summary panels ───────────────────────────────────────────────────

/// The IBI banner is active iff the backend reports `stopped`.
pub fn ibi_alert(status: &IbiStatus) -> PanelView {
    PanelView::Alert(AlertView {
        active: status.is_stopped(),
        message: IBI_STOPPED.to_owned(),
    })
}

pub fn intents_summary(summary: &IntentsSummary) -> PanelView {
    PanelView::Cards(vec![
        card("Fulfilled", format::scalar(summary.fulfilled.as_ref()), Tone::Success),
        card(
            "Not Fulfilled",
            format::scalar(summary.not_fulfilled.as_ref()),
            Tone::Danger,
        ),
    ])
}

pub fn threat_status(counts: &ThreatStatusCounts) -> PanelView {
    PanelView::Cards(vec![
        card("New", format::scalar(counts.new.as_ref()), Tone::Info),
        card(
            "Under Emulation",
            format::scalar(counts.under_emulation.as_ref()),
            Tone::Warning,
        ),
        card(
            "Under Mitigation",
            format::scalar(counts.under_mitigation.as_ref()),
            Tone::Primary,
        ),
        card("Reincident", format::scalar(counts.reincident.as_ref()), Tone::Danger),
        card("Mitigated", format::scalar(counts.mitigated.as_ref()), Tone::Success),
    ])
}

/// Queue size verbatim; availability as `Available` (success) or `Busy`.
pub fn ndt_status(ndt: &NdtStatus) -> PanelView {
    let availability = if ndt.is_available() {
        card("IA-NDT", "Available".into(), Tone::Success)
    } else {
        card("IA-NDT", "Busy".into(), Tone::Primary)
    };
    PanelView::Cards(vec![
        card("Queue Size", format::scalar(ndt.queue_size.as_ref()), Tone::Info),
        availability,
    ])
}

pub fn intent_statistics(stats: &IntentStatistics) -> PanelView {
    PanelView::Cards(vec![
        card("Total Intents", stats.total.to_string(), Tone::Primary),
        card("Active Threats", stats.active.to_string(), Tone::Danger),
        card("Mitigated", stats.mitigated.to_string(), Tone::Success),
        card("Processing", stats.processing.to_string(), Tone::Warning),
    ])
}

fn card(label: &'static str, value: String, tone: Tone) -> CardView {
    CardView { label, value, tone }
}

// ── Tables: stats surface ────────────────────────────────────────────

/// Intents as shown on the dashboard and the management page.
pub fn intents_table(intents: &[IntentRecord]) -> TableView {
    let rows = intents
        .iter()
        .map(|intent| {
            RowView::record(
                intent.key(),
                vec![
                    CellView::plain(format::scalar(intent.id.as_ref().or(intent.uid.as_ref()))),
                    CellView::plain(format::text(intent.description.as_deref())),
                    status_cell(StatusDomain::Intent, intent.status.as_deref()),
                    CellView::plain(format::timestamp(intent.created_at.as_ref())),
                    CellView::plain(format::timestamp(intent.updated_at.as_ref())),
                ],
            )
        })
        .collect();
    TableView::new(INTENT_COLUMNS, rows, NO_INTENTS)
}

pub fn threats_table(threats: &[ThreatRecord]) -> TableView {
    let rows = threats
        .iter()
        .map(|threat| {
            RowView::record(
                threat.id.as_ref().map(ToString::to_string),
                vec![
                    CellView::plain(format::scalar(threat.id.as_ref())),
                    CellView::strong(format::text(threat.display_name())),
                    CellView::plain(format::text(threat.kind.as_deref())),
                    status_cell(StatusDomain::Threat, threat.status.as_deref()),
                    CellView::plain(format::hosts(&threat.host_list())),
                    CellView::plain(format::timestamp(threat.reported())),
                    CellView::plain(format::timestamp(threat.last_update.as_ref())),
                ],
            )
        })
        .collect();
    TableView::new(THREAT_COLUMNS, rows, NO_THREATS)
}

pub fn mitigations_table(mitigations: &[MitigationRecord]) -> TableView {
    let rows = mitigations
        .iter()
        .map(|m| {
            let threats = m
                .threats
                .as_ref()
                .map(|t| {
                    t.to_vec()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .filter(|s| !s.is_empty());
            RowView::record(
                m.id.as_ref().map(ToString::to_string),
                vec![
                    CellView::plain(format::scalar(m.id.as_ref())),
                    CellView::strong(format::text(m.name.as_deref())),
                    CellView::plain(format::text(m.category.as_deref())),
                    CellView::plain(format::text(threats.as_deref())),
                    CellView::plain(format::scalar(m.priority.as_ref())),
                    mitigation_cell(m.enabled),
                ],
            )
        })
        .collect();
    TableView::new(MITIGATION_COLUMNS, rows, NO_MITIGATIONS)
}

pub fn component_status_table(components: &[ComponentStatusRecord]) -> TableView {
    let rows = components
        .iter()
        .map(|c| {
            RowView::record(
                c.name.clone(),
                vec![
                    CellView::plain(format::text(c.name.as_deref())),
                    status_cell(StatusDomain::Component, c.status.as_deref()),
                ],
            )
        })
        .collect();
    TableView::new(COMPONENT_COLUMNS, rows, NO_COMPONENTS)
}

// ── Tables: direct surface ───────────────────────────────────────────

pub fn direct_intents_table(intents: &[IntentRecord]) -> TableView {
    let rows = intents
        .iter()
        .map(|intent| {
            RowView::record(
                intent.key(),
                vec![
                    CellView::plain(format::text(intent.key().as_deref())),
                    CellView::plain(format::text(intent.intent_type.as_deref())),
                    CellView::strong(format::text(intent.threat.as_deref())),
                    CellView::plain(format::hosts(&intent.hosts())),
                    // Intents without a status are new.
                    status_cell(StatusDomain::Intent, Some(intent.status.as_deref().unwrap_or("new"))),
                    CellView::plain(format::timestamp(intent.start_time.as_ref())),
                    CellView::plain(format::seconds(intent.duration.as_ref())),
                ],
            )
        })
        .collect();
    TableView::new(DIRECT_INTENT_COLUMNS, rows, NO_DIRECT_INTENTS)
}

pub fn direct_threats_table(threats: &[ThreatRecord]) -> TableView {
    let rows = threats
        .iter()
        .map(|threat| {
            let related = threat.related_intents.as_ref().map_or(0, Vec::len);
            RowView::record(
                threat.display_name().map(str::to_owned),
                vec![
                    CellView::strong(format::text(threat.display_name())),
                    CellView::plain(format::hosts(&threat.host_list())),
                    status_cell(StatusDomain::Threat, threat.status.as_deref()),
                    CellView::plain(format::timestamp(threat.reported())),
                    CellView::plain(format!("{related} intents")),
                ],
            )
        })
        .collect();
    TableView::new(DIRECT_THREAT_COLUMNS, rows, NO_DIRECT_THREATS)
}

fn status_cell(domain: StatusDomain, status: Option<&str>) -> CellView {
    match status {
        Some(s) => CellView::status(status_label(domain, s), status_class(domain, s)),
        None => CellView::status(format::DASH, status_class(domain, "")),
    }
}

/// A missing flag reads as disabled but keeps the pending class.
fn mitigation_cell(enabled: Option<bool>) -> CellView {
    let key = enabled.map_or("", |e| if e { "true" } else { "false" });
    CellView::status(
        status_label(StatusDomain::Mitigation, key),
        status_class(StatusDomain::Mitigation, key),
    )
}

// ── Error panels ─────────────────────────────────────────────────────

/// The panel shown in every region of `resource` after a failed fetch.
pub fn error_panel(resource: Resource, err: &CoreError) -> PanelView {
    let noun = resource.to_string().to_lowercase();
    PanelView::Error(ErrorView {
        title: format!("Error Loading {resource}"),
        message: format!("Unable to load {noun} data. Please check your connection and try again."),
        detail: err.to_string(),
        kind: err.kind(),
        retry: resource,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ibidash_api::{Scalar, Timestamp};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::error::FailureKind;
    use crate::status::StatusClass;
    use crate::view::RowKind;

    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_tables_render_one_placeholder() {
        let cases = [
            (intents_table(&[]), NO_INTENTS),
            (threats_table(&[]), NO_THREATS),
            (mitigations_table(&[]), NO_MITIGATIONS),
            (component_status_table(&[]), NO_COMPONENTS),
            (direct_intents_table(&[]), NO_DIRECT_INTENTS),
            (direct_threats_table(&[]), NO_DIRECT_THREATS),
        ];
        for (table, message) in cases {
            assert_eq!(table.rows.len(), 1);
            assert_eq!(table.rows[0].kind, RowKind::Placeholder);
            assert_eq!(table.rows[0].cells[0].text, message);
        }
    }

    #[test]
    fn fulfilled_intent_row() {
        let intents: Vec<IntentRecord> = decode(json!([
            {
                "id": 1,
                "description": "x",
                "status": "fulfilled",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-02T00:00:00Z"
            },
            { "id": 2, "status": "not_fulfilled" }
        ]));
        let table = intents_table(&intents);

        assert_eq!(table.rows.len(), 2);
        let first = &table.rows[0];
        assert_eq!(first.key.as_deref(), Some("1"));
        assert_eq!(first.cells[0].text, "1");
        assert_eq!(first.cells[1].text, "x");
        assert_eq!(first.cells[2].text, "Fulfilled");
        assert_eq!(first.cells[2].class, Some(StatusClass::Fulfilled));

        let second = &table.rows[1];
        assert_eq!(second.cells[2].text, "Not Fulfilled");
        assert_ne!(second.cells[2].class, first.cells[2].class);
        // Missing fields render as dashes.
        assert_eq!(second.cells[1].text, "-");
        assert_eq!(second.cells[3].text, "-");
    }

    #[test]
    fn rendering_is_deterministic() {
        let threats: Vec<ThreatRecord> = decode(json!([
            { "id": 4, "name": "ddos", "type": "network", "status": "under_emulation", "hosts": ["a"] }
        ]));
        assert_eq!(threats_table(&threats), threats_table(&threats));
    }

    #[test]
    fn unknown_threat_status_is_pending() {
        let threats: Vec<ThreatRecord> = decode(json!([{ "id": 1, "status": "vanished" }]));
        let table = threats_table(&threats);
        assert_eq!(table.rows[0].cells[3].class, Some(StatusClass::Pending));
        assert_eq!(table.rows[0].cells[3].text, "Vanished");
        assert!(table.rows[0].cells[1].emphasis);
    }

    #[test]
    fn mitigation_status() {
        let mitigations: Vec<MitigationRecord> = decode(json!([
            { "id": "m1", "name": "a", "threats": ["ddos", "scan"], "enabled": true },
            { "id": "m2", "name": "b", "threats": "ddos", "enabled": false },
            { "id": "m3", "name": "c" }
        ]));
        let table = mitigations_table(&mitigations);
        let status = |row: usize| table.rows[row].cells[5].clone();

        assert_eq!(status(0).text, "Enabled");
        assert_eq!(status(0).class, Some(StatusClass::Completed));
        assert_eq!(status(1).text, "Disabled");
        assert_eq!(status(1).class, Some(StatusClass::InProgress));
        assert_eq!(status(2).text, "Disabled");
        assert_eq!(status(2).class, Some(StatusClass::Pending));
        assert_eq!(table.rows[0].cells[3].text, "ddos, scan");
        assert_eq!(table.rows[2].cells[3].text, "-");
    }

    #[test]
    fn component_leds() {
        let components: Vec<ComponentStatusRecord> = decode(json!([
            { "name": "CKB", "status": "Online" },
            { "name": "RTR", "status": "Offline" }
        ]));
        let table = component_status_table(&components);
        assert_eq!(table.rows[0].cells[1].class, Some(StatusClass::Online));
        assert_eq!(table.rows[1].cells[1].class, Some(StatusClass::Offline));
        assert_eq!(table.rows[1].cells[1].text, "Offline");
    }

    #[test]
    fn ndt_availability_tones() {
        let busy = ndt_status(&NdtStatus {
            queue_size: Some(Scalar::Int(3)),
            ndt_status: Some("busy".into()),
        });
        let PanelView::Cards(cards) = busy else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].value, "3");
        assert_eq!(cards[1].value, "Busy");
        assert_ne!(cards[1].tone, Tone::Success);

        let available = ndt_status(&NdtStatus {
            queue_size: Some(Scalar::Int(0)),
            ndt_status: Some("available".into()),
        });
        let PanelView::Cards(cards) = available else {
            panic!("expected cards");
        };
        assert_eq!(cards[1].value, "Available");
        assert_eq!(cards[1].tone, Tone::Success);
    }

    #[test]
    fn ibi_banner() {
        let stopped = ibi_alert(&IbiStatus {
            status: Some("stopped".into()),
        });
        assert!(matches!(stopped, PanelView::Alert(AlertView { active: true, .. })));
        let running = ibi_alert(&IbiStatus {
            status: Some("running".into()),
        });
        assert!(matches!(running, PanelView::Alert(AlertView { active: false, .. })));
    }

    #[test]
    fn direct_rows() {
        let intents: Vec<IntentRecord> = decode(json!([{
            "uid": "i-1",
            "intent_type": "mitigation",
            "threat": "ddos",
            "host": ["a", "b", "c", "d"],
            "duration": 60
        }]));
        let table = direct_intents_table(&intents);
        let row = &table.rows[0];
        assert_eq!(row.key.as_deref(), Some("i-1"));
        assert_eq!(row.cells[3].text, "a, b, c +1 more");
        assert_eq!(row.cells[4].text, "New");
        assert_eq!(row.cells[5].text, "-");
        assert_eq!(row.cells[6].text, "60s");

        let threats = vec![ThreatRecord {
            threat_type: Some("ddos".into()),
            status: Some("detected".into()),
            first_detected: None::<Timestamp>,
            related_intents: Some(vec![Scalar::Text("i-1".into())]),
            ..ThreatRecord::default()
        }];
        let table = direct_threats_table(&threats);
        assert_eq!(table.rows[0].cells[2].class, Some(StatusClass::Detected));
        assert_eq!(table.rows[0].cells[4].text, "1 intents");
    }

    #[test]
    fn error_panel_names_the_resource() {
        let err = CoreError::Http {
            status: 500,
            body: String::new(),
        };
        let PanelView::Error(view) = error_panel(Resource::Intents, &err) else {
            panic!("expected error panel");
        };
        assert_eq!(view.title, "Error Loading Intents");
        assert_eq!(
            view.message,
            "Unable to load intents data. Please check your connection and try again."
        );
        assert_eq!(view.detail, "HTTP error! status: 500");
        assert_eq!(view.kind, FailureKind::Http(500));
        assert_eq!(view.retry, Resource::Intents);
    }
}
