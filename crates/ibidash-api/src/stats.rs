// `/stats/*` endpoint surface
//
// The canonical dashboard surface: summary cards plus the intents,
// threats, mitigations and component-status tables.

use tracing::debug;

use crate::client::IbiClient;
use crate::error::Error;
use crate::models::{
    ComponentStatusRecord, IbiStatus, IntentRecord, IntentsEnvelope, IntentsSummary,
    MitigationRecord, MitigationsEnvelope, NdtStatus, ThreatRecord, ThreatStatusCounts,
    ThreatsEnvelope,
};

impl IbiClient {
    /// Orchestrator run state.
    ///
    /// `GET /stats/ibi`
    pub async fn get_ibi_status(&self) -> Result<IbiStatus, Error> {
        let url = self.endpoint_url("stats/ibi")?;
        debug!("fetching IBI status");
        self.get_json(url).await
    }

    /// Fulfilled / not-fulfilled intent counters.
    ///
    /// `GET /stats/intents-summary`
    pub async fn get_intents_summary(&self) -> Result<IntentsSummary, Error> {
        let url = self.endpoint_url("stats/intents-summary")?;
        debug!("fetching intents summary");
        self.get_json(url).await
    }

    /// Threat counters per lifecycle status.
    ///
    /// `GET /stats/threat-status`
    pub async fn get_threat_status(&self) -> Result<ThreatStatusCounts, Error> {
        let url = self.endpoint_url("stats/threat-status")?;
        debug!("fetching threat status counters");
        self.get_json(url).await
    }

    /// IA-NDT availability and queue depth.
    ///
    /// `GET /stats/ndt`
    pub async fn get_ndt_status(&self) -> Result<NdtStatus, Error> {
        let url = self.endpoint_url("stats/ndt")?;
        debug!("fetching IA-NDT status");
        self.get_json(url).await
    }

    /// `GET /stats/intents` → `{"intents": [...]}`
    pub async fn list_intents(&self) -> Result<Vec<IntentRecord>, Error> {
        let url = self.endpoint_url("stats/intents")?;
        debug!("listing intents");
        let envelope: IntentsEnvelope = self.get_json(url).await?;
        Ok(envelope.intents)
    }

    /// `GET /stats/threats` → `{"threats": [...]}`
    pub async fn list_threats(&self) -> Result<Vec<ThreatRecord>, Error> {
        let url = self.endpoint_url("stats/threats")?;
        debug!("listing threats");
        let envelope: ThreatsEnvelope = self.get_json(url).await?;
        Ok(envelope.threats)
    }

    /// `GET /stats/mitigations` → `{"mitigations": [...]}`
    pub async fn list_mitigations(&self) -> Result<Vec<MitigationRecord>, Error> {
        let url = self.endpoint_url("stats/mitigations")?;
        debug!("listing mitigations");
        let envelope: MitigationsEnvelope = self.get_json(url).await?;
        Ok(envelope.mitigations)
    }

    /// `GET /stats/component-status` → bare array.
    pub async fn list_component_status(&self) -> Result<Vec<ComponentStatusRecord>, Error> {
        let url = self.endpoint_url("stats/component-status")?;
        debug!("listing component status");
        self.get_json(url).await
    }
}
