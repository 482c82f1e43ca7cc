//! Terraform provider for Instatus status pages
//!
//! The provider authenticates against the Instatus REST API with an API key
//! and currently serves a single resource type, `instatus_component`.

pub mod api;
pub mod resources;

use api::{Client, DEFAULT_ENDPOINT};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tfplug::provider::{ConfigureProviderRequest, ConfigureProviderResponse, Provider};
use tfplug::resource::Resource;
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostics};
use tfplug::{Context, Result, TfplugError};

pub struct InstatusProvider {
    client: Option<Arc<Client>>,
}

impl InstatusProvider {
    pub fn new() -> Self {
        Self { client: None }
    }
}

impl Default for InstatusProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for InstatusProvider {
    fn type_name(&self) -> &str {
        "instatus"
    }

    fn schema(&self) -> Schema {
        SchemaBuilder::new()
            .description("Interact with Instatus status pages.")
            .attribute(
                AttributeBuilder::new("api_key", AttributeType::String)
                    .description(
                        "Instatus API key. Can also be set via the INSTATUS_API_KEY \
                         environment variable.",
                    )
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("endpoint", AttributeType::String)
                    .description("API endpoint, defaults to https://api.instatus.com.")
                    .optional()
                    .build(),
            )
            .build()
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let mut diagnostics = Diagnostics::new();

        let api_key = request
            .config
            .get_string(&AttributePath::new("api_key"))
            .ok()
            .or_else(|| std::env::var("INSTATUS_API_KEY").ok());

        let endpoint = request
            .config
            .get_string(&AttributePath::new("endpoint"))
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        match api_key {
            Some(api_key) => match Client::new(&endpoint, &api_key) {
                Ok(client) => {
                    self.client = Some(Arc::new(client));
                }
                Err(e) => {
                    diagnostics.add_error("Failed to create API client", e.to_string());
                }
            },
            None => {
                diagnostics.add_error(
                    "api_key is required",
                    "Set it in the provider configuration or via the INSTATUS_API_KEY \
                     environment variable.",
                );
            }
        }

        ConfigureProviderResponse { diagnostics }
    }

    fn create_resource(&self, type_name: &str) -> Result<Box<dyn Resource>> {
        let client = self
            .client
            .clone()
            .ok_or(TfplugError::ProviderNotConfigured)?;

        match type_name {
            "instatus_component" => Ok(Box::new(resources::ComponentResource::new(client))),
            _ => Err(TfplugError::ResourceNotFound(type_name.to_string())),
        }
    }

    fn resource_schemas(&self) -> HashMap<String, Schema> {
        static SCHEMAS: std::sync::OnceLock<HashMap<String, Schema>> = std::sync::OnceLock::new();

        SCHEMAS
            .get_or_init(|| {
                let mut schemas = HashMap::new();
                schemas.insert(
                    "instatus_component".to_string(),
                    resources::ComponentResource::schema_static(),
                );
                schemas
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tfplug::types::DynamicValue;

    fn configure_request(fields: &[(&str, &str)]) -> ConfigureProviderRequest {
        let mut config = DynamicValue::empty_object();
        for (name, value) in fields {
            config
                .set_string(&AttributePath::new(name), value.to_string())
                .unwrap();
        }
        ConfigureProviderRequest { config }
    }

    #[tokio::test]
    #[serial]
    async fn provider_configures_with_explicit_api_key() {
        std::env::remove_var("INSTATUS_API_KEY");

        let mut provider = InstatusProvider::new();
        let response = provider
            .configure(Context::new(), configure_request(&[("api_key", "secret")]))
            .await;

        assert!(!response.diagnostics.has_errors());
        assert!(provider.client.is_some());
    }

    #[tokio::test]
    #[serial]
    async fn provider_configures_from_environment() {
        std::env::set_var("INSTATUS_API_KEY", "env-secret");

        let mut provider = InstatusProvider::new();
        let response = provider
            .configure(Context::new(), configure_request(&[]))
            .await;

        assert!(!response.diagnostics.has_errors());
        assert!(provider.client.is_some());

        std::env::remove_var("INSTATUS_API_KEY");
    }

    #[tokio::test]
    #[serial]
    async fn provider_configure_requires_api_key() {
        std::env::remove_var("INSTATUS_API_KEY");

        let mut provider = InstatusProvider::new();
        let response = provider
            .configure(Context::new(), configure_request(&[]))
            .await;

        assert!(response.diagnostics.has_errors());
        assert!(response.diagnostics.as_slice()[0]
            .summary
            .contains("api_key is required"));
        assert!(provider.client.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn provider_configure_rejects_invalid_endpoint() {
        std::env::remove_var("INSTATUS_API_KEY");

        let mut provider = InstatusProvider::new();
        let response = provider
            .configure(
                Context::new(),
                configure_request(&[("api_key", "secret"), ("endpoint", "not a url")]),
            )
            .await;

        assert!(response.diagnostics.has_errors());
        assert!(response.diagnostics.as_slice()[0]
            .summary
            .contains("Failed to create API client"));
    }

    #[tokio::test]
    #[serial]
    async fn provider_creates_resources_after_configuration() {
        std::env::remove_var("INSTATUS_API_KEY");

        let mut provider = InstatusProvider::new();
        provider
            .configure(Context::new(), configure_request(&[("api_key", "secret")]))
            .await;

        let resource = provider.create_resource("instatus_component");
        assert!(resource.is_ok());
        assert_eq!(resource.unwrap().type_name(), "instatus_component");

        let unknown = provider.create_resource("instatus_unknown");
        assert!(matches!(unknown, Err(TfplugError::ResourceNotFound(_))));
    }

    #[tokio::test]
    async fn provider_fails_to_create_resources_before_configuration() {
        let provider = InstatusProvider::new();

        let resource = provider.create_resource("instatus_component");
        assert!(matches!(resource, Err(TfplugError::ProviderNotConfigured)));
    }

    #[tokio::test]
    async fn provider_schemas_contain_expected_resources() {
        let provider = InstatusProvider::new();

        let schemas = provider.resource_schemas();
        let component = schemas.get("instatus_component").unwrap();

        assert!(component.attribute("page_id").unwrap().required);
        assert!(component.attribute("id").unwrap().computed);
        assert!(component.attribute("grouped").unwrap().default.is_some());
    }

    #[test]
    fn provider_schema_marks_api_key_sensitive() {
        let provider = InstatusProvider::new();
        let schema = provider.schema();

        assert!(schema.attribute("api_key").unwrap().sensitive);
        assert!(schema.attribute("endpoint").unwrap().optional);
    }
}
