// Intent management endpoints

use tracing::debug;

use crate::client::IbiClient;
use crate::error::Error;

impl IbiClient {
    /// Delete an intent.
    ///
    /// `DELETE /intents/{id}`
    ///
    /// The acknowledgment body is returned as loose JSON; the dashboard
    /// only logs it.
    pub async fn delete_intent(&self, id: &str) -> Result<serde_json::Value, Error> {
        let url = self.item_url("intents", id)?;
        debug!(id, "deleting intent");
        self.delete_json(url).await
    }
}
