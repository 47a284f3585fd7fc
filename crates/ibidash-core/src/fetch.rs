// ── Resource fetching ──
//
// Maps a `Resource` onto the right client call for the configured
// surface and turns the decoded payload into region panels. Threats
// fall back to being derived from intents when enabled.

use tracing::{debug, warn};

use ibidash_api::{
    ComponentStatusRecord, IbiClient, IbiStatus, IntentRecord, IntentsSummary, MitigationRecord,
    NdtStatus, ThreatRecord, ThreatStatusCounts,
};

use crate::config::ApiSurface;
use crate::derive::{IntentStatistics, threats_from_intents};
use crate::error::CoreError;
use crate::render;
use crate::resource::{Region, Resource};
use crate::view::PanelView;

/// A decoded response for one resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    IbiStatus(IbiStatus),
    IntentsSummary(IntentsSummary),
    ThreatStatus(ThreatStatusCounts),
    NdtStatus(NdtStatus),
    Intents(Vec<IntentRecord>),
    Threats {
        records: Vec<ThreatRecord>,
        /// Grouped out of intents rather than fetched.
        derived: bool,
    },
    Mitigations(Vec<MitigationRecord>),
    ComponentStatus(Vec<ComponentStatusRecord>),
}

/// Fetch one resource from `surface`.
pub async fn fetch(
    client: &IbiClient,
    surface: ApiSurface,
    resource: Resource,
    derive_threats: bool,
) -> Result<Payload, CoreError> {
    let payload = match (surface, resource) {
        (ApiSurface::Stats, Resource::IbiStatus) => Payload::IbiStatus(client.get_ibi_status().await?),
        (ApiSurface::Stats, Resource::IntentsSummary) => {
            Payload::IntentsSummary(client.get_intents_summary().await?)
        }
        (ApiSurface::Stats, Resource::ThreatStatus) => {
            Payload::ThreatStatus(client.get_threat_status().await?)
        }
        (ApiSurface::Stats, Resource::NdtStatus) => Payload::NdtStatus(client.get_ndt_status().await?),
        (ApiSurface::Stats, Resource::Mitigations) => {
            Payload::Mitigations(client.list_mitigations().await?)
        }
        (ApiSurface::Stats, Resource::ComponentStatus) => {
            Payload::ComponentStatus(client.list_component_status().await?)
        }
        (_, Resource::Intents) => Payload::Intents(list_intents(client, surface).await?),
        (_, Resource::Threats) => fetch_threats(client, surface, derive_threats).await?,
        (ApiSurface::Direct, _) => {
            return Err(CoreError::Unsupported {
                resource,
                surface: surface.to_string(),
            });
        }
    };
    Ok(payload)
}

async fn list_intents(client: &IbiClient, surface: ApiSurface) -> Result<Vec<IntentRecord>, CoreError> {
    Ok(match surface {
        ApiSurface::Stats => client.list_intents().await?,
        ApiSurface::Direct => client.list_direct_intents().await?,
    })
}

async fn fetch_threats(
    client: &IbiClient,
    surface: ApiSurface,
    derive_threats: bool,
) -> Result<Payload, CoreError> {
    let primary = match surface {
        ApiSurface::Stats => client.list_threats().await,
        ApiSurface::Direct => client.list_system_states().await,
    };
    let err = match primary {
        Ok(records) => {
            return Ok(Payload::Threats {
                records,
                derived: false,
            });
        }
        Err(e) => CoreError::from(e),
    };

    if !derive_threats {
        return Err(err);
    }

    debug!(error = %err, "threats endpoint failed; deriving threats from intents");
    match list_intents(client, surface).await {
        Ok(intents) => Ok(Payload::Threats {
            records: threats_from_intents(&intents),
            derived: true,
        }),
        Err(fallback) => {
            warn!(error = %fallback, "threat derivation failed");
            Err(err)
        }
    }
}

/// Panels for every region fed by a payload.
pub fn render_payload(surface: ApiSurface, payload: &Payload) -> Vec<(Region, PanelView)> {
    match payload {
        Payload::IbiStatus(status) => vec![(Region::IbiAlert, render::ibi_alert(status))],
        Payload::IntentsSummary(summary) => {
            vec![(Region::IntentsSummary, render::intents_summary(summary))]
        }
        Payload::ThreatStatus(counts) => vec![(Region::ThreatStatus, render::threat_status(counts))],
        Payload::NdtStatus(ndt) => vec![(Region::NdtStatus, render::ndt_status(ndt))],
        Payload::Intents(intents) => match surface {
            ApiSurface::Stats => {
                let table = render::intents_table(intents);
                vec![
                    (Region::IntentsTable, PanelView::Table(table.clone())),
                    (Region::IntentManagement, PanelView::Table(table)),
                ]
            }
            ApiSurface::Direct => {
                let table = render::direct_intents_table(intents);
                let stats = IntentStatistics::from_intents(intents);
                vec![
                    (Region::IntentsTable, PanelView::Table(table.clone())),
                    (Region::IntentManagement, PanelView::Table(table)),
                    (Region::IntentStatistics, render::intent_statistics(&stats)),
                ]
            }
        },
        Payload::Threats { records, .. } => {
            // Derived threats only carry the direct-surface fields.
            let table = match (surface, payload) {
                (ApiSurface::Stats, Payload::Threats { derived: false, .. }) => {
                    render::threats_table(records)
                }
                _ => render::direct_threats_table(records),
            };
            vec![(Region::ThreatsTable, PanelView::Table(table))]
        }
        Payload::Mitigations(list) => {
            vec![(Region::Mitigations, PanelView::Table(render::mitigations_table(list)))]
        }
        Payload::ComponentStatus(list) => vec![(
            Region::ComponentStatus,
            PanelView::Table(render::component_status_table(list)),
        )],
    }
}
