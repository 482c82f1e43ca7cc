//! Provider trait
//!
//! A provider owns its configuration (credentials, endpoint) and acts as a
//! factory for the resources it serves. `configure` runs once per Terraform
//! operation, before any resource method.

use crate::context::Context;
use crate::error::Result;
use crate::resource::Resource;
use crate::schema::Schema;
use crate::types::{Diagnostics, DynamicValue};
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider type name, e.g. `instatus`.
    fn type_name(&self) -> &str;

    /// Schema of the provider configuration block.
    fn schema(&self) -> Schema;

    /// Validates configuration and builds whatever clients the resources
    /// need. Configuration problems are reported through diagnostics.
    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse;

    /// Instantiates the resource registered under `type_name`.
    ///
    /// Fails with [`TfplugError::ProviderNotConfigured`] before `configure`
    /// has run, and [`TfplugError::ResourceNotFound`] for unknown names.
    ///
    /// [`TfplugError::ProviderNotConfigured`]: crate::error::TfplugError::ProviderNotConfigured
    /// [`TfplugError::ResourceNotFound`]: crate::error::TfplugError::ResourceNotFound
    fn create_resource(&self, type_name: &str) -> Result<Box<dyn Resource>>;

    /// Schemas of every resource type this provider serves.
    fn resource_schemas(&self) -> HashMap<String, Schema>;
}

pub struct ConfigureProviderRequest {
    pub config: DynamicValue,
}

pub struct ConfigureProviderResponse {
    pub diagnostics: Diagnostics,
}
