#![allow(clippy::unwrap_used)]
// End-to-end tests for `Dashboard` against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ibidash_core::render::{DIRECT_THREAT_COLUMNS, NO_THREATS};
use ibidash_core::{
    ApiSurface, Dashboard, DashboardConfig, FailureKind, NO_MATCHES, NoticeLevel, Page, PanelView,
    Region, Resource, RowFilter, StatusClass, TableView, Tone,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn dashboard(server: &MockServer, surface: ApiSurface, interval: Duration) -> Dashboard {
    let mut config = DashboardConfig::new(Url::parse(&server.uri()).unwrap());
    config.surface = surface;
    config.refresh_interval = interval;
    config.timeout = Duration::from_secs(5);
    Dashboard::new(config).unwrap()
}

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, at: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
        .mount(server)
        .await;
}

fn intents_body() -> serde_json::Value {
    json!({
        "intents": [
            {
                "id": 1,
                "uid": "abc",
                "description": "x",
                "status": "fulfilled",
                "threat": "ddos",
                "host": ["10.0.0.1", "10.0.0.2"],
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-02T00:00:00Z"
            },
            {
                "id": 2,
                "uid": "def",
                "description": "y",
                "status": "not_fulfilled",
                "threat": "ddos",
                "host": "10.0.0.3"
            }
        ]
    })
}

async fn mount_stats(server: &MockServer) {
    mount_json(server, "/stats/ibi", json!({ "status": "running" })).await;
    mount_json(
        server,
        "/stats/intents-summary",
        json!({ "fulfilled": 1, "not_fulfilled": 1 }),
    )
    .await;
    mount_json(
        server,
        "/stats/threat-status",
        json!({ "new": 0, "under_emulation": 1, "under_mitigation": 0, "reincident": 0, "mitigated": 2 }),
    )
    .await;
    mount_json(server, "/stats/ndt", json!({ "queue_size": 3, "ndt_status": "busy" })).await;
    mount_json(server, "/stats/intents", intents_body()).await;
    mount_json(server, "/stats/threats", json!({ "threats": [] })).await;
    mount_json(
        server,
        "/stats/component-status",
        json!([{ "name": "CKB", "status": "Online" }]),
    )
    .await;
    mount_json(server, "/stats/mitigations", json!({ "mitigations": [] })).await;
}

fn table(dashboard: &Dashboard, region: Region) -> TableView {
    match dashboard.view(region) {
        PanelView::Table(table) => table,
        other => panic!("expected a table in {region}, got {other:?}"),
    }
}

fn keys(table: &TableView) -> Vec<String> {
    table.records().filter_map(|r| r.key.clone()).collect()
}

// ── Initial load ────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_renders_every_region() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::from_secs(3600));

    dash.start().await;

    let intents = table(&dash, Region::IntentsTable);
    assert_eq!(intents.rows.len(), 2);
    assert_eq!(intents.rows[0].cells[2].text, "Fulfilled");
    assert_eq!(intents.rows[0].cells[2].class, Some(StatusClass::Fulfilled));
    assert_eq!(intents.rows[1].cells[2].text, "Not Fulfilled");
    assert_ne!(intents.rows[1].cells[2].class, intents.rows[0].cells[2].class);

    let threats = table(&dash, Region::ThreatsTable);
    assert_eq!(threats.rows.len(), 1);
    assert!(threats.rows[0].is_placeholder());
    assert_eq!(threats.rows[0].cells[0].text, NO_THREATS);

    let PanelView::Cards(ndt) = dash.view(Region::NdtStatus) else {
        panic!("expected NDT cards");
    };
    assert_eq!(ndt[0].value, "3");
    assert_eq!(ndt[1].value, "Busy");
    assert_ne!(ndt[1].tone, Tone::Success);

    assert!(matches!(dash.view(Region::IbiAlert), PanelView::Alert(a) if !a.active));
    assert_eq!(table(&dash, Region::ComponentStatus).rows.len(), 1);
    assert_eq!(keys(&table(&dash, Region::IntentManagement)), vec!["abc", "def"]);
    assert!(dash.last_refresh().borrow().is_some());

    let mut expected = dash.tracked().to_vec();
    expected.sort();
    assert_eq!(dash.active_timers().await, expected);

    dash.stop().await;
    assert!(dash.active_timers().await.is_empty());
}

#[tokio::test]
async fn test_restart_keeps_one_timer_per_resource() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::from_secs(3600));

    dash.start().await;
    dash.start().await;

    assert_eq!(dash.active_timers().await.len(), dash.tracked().len());
    dash.stop().await;
}

// ── Failure scoping ─────────────────────────────────────────────────

#[tokio::test]
async fn test_failure_only_touches_its_regions() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);
    dash.start().await;
    let intents_before = dash.view(Region::IntentsTable);

    server.reset().await;
    mount_status(&server, "/stats/threats", 500).await;
    mount_status(&server, "/stats/intents", 500).await;
    let mut notices = dash.notices();

    dash.load(Resource::Threats).await;

    let err = dash.view(Region::ThreatsTable);
    let err = err.as_error().unwrap();
    assert_eq!(err.title, "Error Loading Threats");
    assert_eq!(err.kind, FailureKind::Http(500));
    assert_eq!(err.retry, Resource::Threats);

    // Untouched regions keep their last content.
    assert_eq!(dash.view(Region::IntentsTable), intents_before);
    assert!(matches!(dash.view(Region::NdtStatus), PanelView::Cards(_)));

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Failed to load threats data");
}

#[tokio::test]
async fn test_threats_without_derivation_fail() {
    let server = MockServer::start().await;
    mount_status(&server, "/stats/threats", 503).await;
    let mut config = DashboardConfig::new(Url::parse(&server.uri()).unwrap());
    config.derive_threats = false;
    let dash = Dashboard::new(config).unwrap();

    dash.load(Resource::Threats).await;

    let panel = dash.view(Region::ThreatsTable);
    assert_eq!(panel.as_error().unwrap().kind, FailureKind::Http(503));
}

#[tokio::test]
async fn test_threats_fall_back_to_intents() {
    let server = MockServer::start().await;
    mount_status(&server, "/stats/threats", 500).await;
    mount_json(&server, "/stats/intents", intents_body()).await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);

    dash.load(Resource::Threats).await;

    let threats = table(&dash, Region::ThreatsTable);
    assert_eq!(threats.columns, DIRECT_THREAT_COLUMNS.to_vec());
    assert_eq!(threats.rows.len(), 1);
    let row = &threats.rows[0];
    assert_eq!(row.cells[0].text, "ddos");
    assert_eq!(row.cells[1].text, "10.0.0.1, 10.0.0.2, 10.0.0.3");
    assert_eq!(row.cells[2].class, Some(StatusClass::Detected));
    assert_eq!(row.cells[4].text, "2 intents");
}

#[tokio::test]
async fn test_malformed_payload_is_scoped_error() {
    let server = MockServer::start().await;
    mount_json(&server, "/stats/mitigations", json!({ "items": [] })).await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);

    dash.load(Resource::Mitigations).await;

    let panel = dash.view(Region::Mitigations);
    assert_eq!(panel.as_error().unwrap().kind, FailureKind::Payload);
    assert_eq!(dash.view(Region::IntentsTable), PanelView::Loading);
}

#[tokio::test]
async fn test_transport_failure_is_scoped_error() {
    let server = MockServer::start().await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);
    drop(server);

    dash.load(Resource::NdtStatus).await;

    let panel = dash.view(Region::NdtStatus);
    assert_eq!(panel.as_error().unwrap().kind, FailureKind::Transport);
}

#[tokio::test]
async fn test_instances_are_independent() {
    let healthy = MockServer::start().await;
    mount_stats(&healthy).await;
    let broken = MockServer::start().await;
    mount_status(&broken, "/stats/ndt", 500).await;

    let a = dashboard(&healthy, ApiSurface::Stats, Duration::ZERO);
    let b = dashboard(&broken, ApiSurface::Stats, Duration::ZERO);
    a.load(Resource::NdtStatus).await;
    b.load(Resource::NdtStatus).await;

    assert!(matches!(a.view(Region::NdtStatus), PanelView::Cards(_)));
    assert!(b.view(Region::NdtStatus).is_error());
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_all_stamps_clock_and_refetches() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);
    assert!(dash.last_refresh().borrow().is_none());
    let mut notices = dash.notices();

    dash.refresh_all().await;

    assert!(dash.last_refresh().borrow().is_some());
    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Refreshing all panels");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), dash.tracked().len());
}

#[tokio::test]
async fn test_stop_aborts_in_flight_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/intents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intents_body()).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);

    let loader = dash.clone();
    let pending = tokio::spawn(async move { loader.load(Resource::Intents).await });
    tokio::time::sleep(Duration::from_millis(200)).await;

    dash.stop().await;
    tokio::time::timeout(Duration::from_secs(5), pending)
        .await
        .expect("load should abort promptly")
        .unwrap();

    assert_eq!(dash.view(Region::IntentsTable), PanelView::Loading);
}

// ── Navigation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_select_page_loads_only_on_change() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/mitigations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mitigations": [{ "id": "m1", "name": "Block", "enabled": true }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);
    assert_eq!(dash.current_page(), Page::Dashboard);

    assert_eq!(dash.select_page(Page::Mitigations).await, vec![Resource::Mitigations]);
    assert!(dash.select_page(Page::Mitigations).await.is_empty());
    assert_eq!(dash.current_page(), Page::Mitigations);

    let mitigations = table(&dash, Region::Mitigations);
    assert_eq!(mitigations.rows[0].cells[5].text, "Enabled");
}

#[tokio::test]
async fn test_filters_never_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/intents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intents_body()))
        .expect(1)
        .mount(&server)
        .await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);
    dash.load(Resource::Intents).await;

    dash.set_filter(
        Region::IntentManagement,
        RowFilter::Column {
            column: "Status".into(),
            value: "not fulfilled".into(),
        },
    );
    assert_eq!(keys(&table(&dash, Region::IntentManagement)), vec!["def"]);

    dash.set_filter(Region::IntentManagement, RowFilter::Text("nothing-here".into()));
    let hidden = table(&dash, Region::IntentManagement);
    assert_eq!(hidden.rows.len(), 1);
    assert_eq!(hidden.rows[0].cells[0].text, NO_MATCHES);

    dash.clear_filter(Region::IntentManagement);
    assert_eq!(keys(&table(&dash, Region::IntentManagement)), vec!["abc", "def"]);
}

// ── Deletion ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_trusts_the_fresh_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/intents/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "queued" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats/intents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intents_body()))
        .expect(1)
        .mount(&server)
        .await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);
    let mut notices = dash.notices();

    let ack = dash.delete_intent("abc").await.unwrap();
    assert_eq!(ack, json!({ "status": "queued" }));

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Deleted intent abc");

    // The backend still reports `abc`, so it stays visible.
    assert!(keys(&table(&dash, Region::IntentManagement)).contains(&"abc".to_owned()));
}

#[tokio::test]
async fn test_failed_delete_still_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/intents/abc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats/intents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intents_body()))
        .expect(1)
        .mount(&server)
        .await;
    let dash = dashboard(&server, ApiSurface::Stats, Duration::ZERO);
    let mut notices = dash.notices();

    let err = dash.delete_intent("abc").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Http(500));

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Failed to delete intent abc: HTTP error! status: 500");
    assert_eq!(keys(&table(&dash, Region::IntentManagement)), vec!["abc", "def"]);
}

// ── Direct surface ──────────────────────────────────────────────────

#[tokio::test]
async fn test_direct_surface_derives_threats_and_counts_intents() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/intents",
        json!([
            { "uid": "i1", "threat": "ddos", "host": ["h1"], "status": "processing", "start_time": 1_700_000_000 },
            { "uid": "i2", "threat": "scan", "host": ["h2"], "status": "mitigated" }
        ]),
    )
    .await;
    mount_status(&server, "/system-states", 404).await;
    let dash = dashboard(&server, ApiSurface::Direct, Duration::ZERO);

    dash.start().await;

    let threats = table(&dash, Region::ThreatsTable);
    assert_eq!(keys(&threats), vec!["ddos", "scan"]);

    let PanelView::Cards(stats) = dash.view(Region::IntentStatistics) else {
        panic!("expected statistics cards");
    };
    let values: Vec<&str> = stats.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["2", "1", "1", "1"]);

    // Stats-only regions are never fetched on the direct surface.
    assert_eq!(dash.view(Region::Mitigations), PanelView::Loading);
    dash.stop().await;
}
