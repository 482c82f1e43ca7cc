//! Component endpoints
//!
//! Components are the individual entries on a status page. All endpoints
//! live under `/v1/{page_id}/components`.

use super::{ApiError, Client};
use serde::{Deserialize, Serialize};

/// Body sent when creating or updating a component.
///
/// The API accepts the parent group both as `group` (a group name, creating
/// the group on demand) and as `groupId` (an existing group's identifier).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_uptime: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// A component as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub show_uptime: Option<bool>,
    pub group: Option<ComponentGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGroup {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Component {
    pub fn group_name(&self) -> Option<String> {
        self.group.as_ref().and_then(|g| g.name.clone())
    }

    pub fn group_id(&self) -> Option<String> {
        self.group.as_ref().and_then(|g| g.id.clone())
    }
}

impl Client {
    pub async fn create_component(
        &self,
        page_id: &str,
        request: &ComponentRequest,
    ) -> Result<Component, ApiError> {
        self.post(&format!("/v1/{page_id}/components"), request)
            .await
    }

    pub async fn get_component(&self, page_id: &str, id: &str) -> Result<Component, ApiError> {
        self.get(&format!("/v1/{page_id}/components/{id}")).await
    }

    pub async fn update_component(
        &self,
        page_id: &str,
        id: &str,
        request: &ComponentRequest,
    ) -> Result<Component, ApiError> {
        self.put(&format!("/v1/{page_id}/components/{id}"), request)
            .await
    }

    pub async fn delete_component(&self, page_id: &str, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v1/{page_id}/components/{id}")).await
    }
}
