// Direct endpoint surface
//
// A standalone IBI deployment exposes its intent store at `/intents` and,
// on some builds, threat state at `/system-states`. Both accept either an
// enveloped or a bare JSON array.

use tracing::debug;

use crate::client::IbiClient;
use crate::error::Error;
use crate::models::{IntentList, IntentRecord, ThreatList, ThreatRecord};

impl IbiClient {
    /// `GET /intents`
    pub async fn list_direct_intents(&self) -> Result<Vec<IntentRecord>, Error> {
        let url = self.endpoint_url("intents")?;
        debug!("listing intents (direct)");
        let list: IntentList = self.get_json(url).await?;
        Ok(list.into())
    }

    /// `GET /system-states`
    ///
    /// Not every deployment serves this; callers fall back to deriving
    /// threats from [`list_direct_intents`](Self::list_direct_intents).
    pub async fn list_system_states(&self) -> Result<Vec<ThreatRecord>, Error> {
        let url = self.endpoint_url("system-states")?;
        debug!("listing system states");
        let list: ThreatList = self.get_json(url).await?;
        Ok(list.into())
    }
}
