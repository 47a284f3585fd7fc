// ── Resources and display regions ──
//
// A `Resource` is one thing the dashboard fetches; a `Region` is one
// panel it paints. Most resources feed a single region, but intents on
// the stats surface feed both the dashboard table and the management
// table, and on the direct surface they also feed the statistics cards.

use strum::{Display, EnumIter};

use crate::config::ApiSurface;

/// A fetchable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Resource {
    #[strum(to_string = "IBI Status")]
    IbiStatus,
    #[strum(to_string = "Intents Summary")]
    IntentsSummary,
    #[strum(to_string = "Threat Status")]
    ThreatStatus,
    #[strum(to_string = "NDT Status")]
    NdtStatus,
    Intents,
    Threats,
    #[strum(to_string = "Component Status")]
    ComponentStatus,
    Mitigations,
}

const STATS_TRACKED: &[Resource] = &[
    Resource::IbiStatus,
    Resource::IntentsSummary,
    Resource::ThreatStatus,
    Resource::NdtStatus,
    Resource::Intents,
    Resource::Threats,
    Resource::ComponentStatus,
    Resource::Mitigations,
];

const DIRECT_TRACKED: &[Resource] = &[Resource::Intents, Resource::Threats];

impl Resource {
    /// Resources polled on `surface`, in load order.
    pub fn tracked(surface: ApiSurface) -> &'static [Resource] {
        match surface {
            ApiSurface::Stats => STATS_TRACKED,
            ApiSurface::Direct => DIRECT_TRACKED,
        }
    }

    /// Whether `surface` serves this resource at all.
    pub fn is_served_by(self, surface: ApiSurface) -> bool {
        Self::tracked(surface).contains(&self)
    }

    /// Regions repainted when this resource resolves.
    pub fn regions(self, surface: ApiSurface) -> &'static [Region] {
        match (self, surface) {
            (Self::IbiStatus, _) => &[Region::IbiAlert],
            (Self::IntentsSummary, _) => &[Region::IntentsSummary],
            (Self::ThreatStatus, _) => &[Region::ThreatStatus],
            (Self::NdtStatus, _) => &[Region::NdtStatus],
            (Self::Intents, ApiSurface::Stats) => &[Region::IntentsTable, Region::IntentManagement],
            (Self::Intents, ApiSurface::Direct) => &[
                Region::IntentsTable,
                Region::IntentManagement,
                Region::IntentStatistics,
            ],
            (Self::Threats, _) => &[Region::ThreatsTable],
            (Self::ComponentStatus, _) => &[Region::ComponentStatus],
            (Self::Mitigations, _) => &[Region::Mitigations],
        }
    }

    /// Multiplier applied to the base refresh interval.
    ///
    /// Component status is polled at half the rate of everything else.
    pub fn cadence(self) -> u32 {
        match self {
            Self::ComponentStatus => 2,
            _ => 1,
        }
    }
}

/// A named display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Region {
    #[strum(to_string = "IBI Status")]
    IbiAlert,
    #[strum(to_string = "Intents Summary")]
    IntentsSummary,
    #[strum(to_string = "Threat Status")]
    ThreatStatus,
    #[strum(to_string = "IA-NDT Status")]
    NdtStatus,
    #[strum(to_string = "Intent Statistics")]
    IntentStatistics,
    #[strum(to_string = "Security Intents")]
    IntentsTable,
    #[strum(to_string = "Active Threats")]
    ThreatsTable,
    #[strum(to_string = "Component Status")]
    ComponentStatus,
    #[strum(to_string = "Mitigation Actions")]
    Mitigations,
    #[strum(to_string = "Intent Management")]
    IntentManagement,
}

impl Region {
    /// The resource whose fetch paints this region.
    pub fn source(self) -> Resource {
        match self {
            Self::IbiAlert => Resource::IbiStatus,
            Self::IntentsSummary => Resource::IntentsSummary,
            Self::ThreatStatus => Resource::ThreatStatus,
            Self::NdtStatus => Resource::NdtStatus,
            Self::IntentStatistics | Self::IntentsTable | Self::IntentManagement => {
                Resource::Intents
            }
            Self::ThreatsTable => Resource::Threats,
            Self::ComponentStatus => Resource::ComponentStatus,
            Self::Mitigations => Resource::Mitigations,
        }
    }
}
