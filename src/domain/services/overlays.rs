#[cfg(test)]
#[path = "overlays_test.rs"]
mod tests;

use super::OverlayIndex;
use crate::domain::models::BridgeError;
use crate::domain::models::OverlayGraphic;
use crate::domain::models::RemoteBox;

const OVERLAY_LIST_PATH: &str = "overlay-graphics";
const TAKE_IN_PATH: &str = "command/overlay-graphics/take-in";
const TAKE_OUT_PATH: &str = "command/overlay-graphics/take-out";

fn take_query(id: &str, name: &str) -> Result<Vec<(String, String)>, BridgeError> {
    if id.is_empty() && name.is_empty() {
        return Err(BridgeError::InvalidArgument(
            "An overlay id or name is required".to_string(),
        ));
    }

    let mut query = vec![];
    if !id.is_empty() {
        query.push(("id".to_string(), id.to_string()));
    }
    if !name.is_empty() {
        query.push(("name".to_string(), name.to_string()));
    }

    return Ok(query);
}

pub struct OverlayService {}

impl OverlayService {
    pub async fn fetch(client: RemoteBox) -> Result<Vec<OverlayGraphic>, BridgeError> {
        let body = client.get(OVERLAY_LIST_PATH, &[]).await?;
        let overlays = serde_json::from_str::<Vec<OverlayGraphic>>(&body)?;

        return Ok(overlays);
    }

    /// Takes an overlay in by id and/or name. The id, when supplied, becomes
    /// the last-taken overlay once the server has accepted the command.
    pub async fn take_in(
        client: &RemoteBox,
        index: &mut OverlayIndex,
        id: &str,
        name: &str,
    ) -> Result<(), BridgeError> {
        let query = take_query(id, name)?;
        client.get(TAKE_IN_PATH, &query).await?;

        if !id.is_empty() {
            index.record_take(id);
        }

        return Ok(());
    }

    pub async fn take_out(client: &RemoteBox, id: &str, name: &str) -> Result<(), BridgeError> {
        let query = take_query(id, name)?;
        client.get(TAKE_OUT_PATH, &query).await?;

        return Ok(());
    }

    pub async fn take_last_out(
        client: &RemoteBox,
        index: &OverlayIndex,
    ) -> Result<(), BridgeError> {
        let id = index.last_taken_overlay_id().to_string();
        if id.is_empty() {
            return Err(BridgeError::NoPriorTake);
        }

        return OverlayService::take_out(client, &id, "").await;
    }
}
