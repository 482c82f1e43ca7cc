//! Resource trait and lifecycle request/response types
//!
//! A resource implements the full Terraform lifecycle: create, read,
//! update, delete. Resources that support `terraform import` additionally
//! implement [`ResourceWithImportState`].
//!
//! Every response carries [`Diagnostics`] rather than a `Result`: a failed
//! operation reports errors through diagnostics and still returns whatever
//! state is appropriate for Terraform to record.

use crate::context::Context;
use crate::schema::Schema;
use crate::types::{Diagnostics, DynamicValue};
use async_trait::async_trait;

/// A managed resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Fully qualified type name, e.g. `instatus_component`.
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    async fn create(&self, ctx: Context, request: CreateResourceRequest)
        -> CreateResourceResponse;

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse;

    async fn update(&self, ctx: Context, request: UpdateResourceRequest)
        -> UpdateResourceResponse;

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest)
        -> DeleteResourceResponse;
}

/// A resource that can be brought under management via `terraform import`.
#[async_trait]
pub trait ResourceWithImportState: Resource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse;
}

pub struct CreateResourceRequest {
    pub type_name: String,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct CreateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Diagnostics,
}

pub struct ReadResourceRequest {
    pub type_name: String,
    pub current_state: DynamicValue,
}

pub struct ReadResourceResponse {
    /// `None` signals the remote object no longer exists and should be
    /// planned for recreation.
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Diagnostics,
}

pub struct UpdateResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct UpdateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Diagnostics,
}

pub struct DeleteResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
}

pub struct DeleteResourceResponse {
    pub diagnostics: Diagnostics,
}

pub struct ImportResourceStateRequest {
    pub type_name: String,
    /// The raw identifier the operator passed to `terraform import`.
    pub id: String,
}

pub struct ImportedResource {
    pub type_name: String,
    pub state: DynamicValue,
}

pub struct ImportResourceStateResponse {
    pub imported_resources: Vec<ImportedResource>,
    pub diagnostics: Diagnostics,
}
