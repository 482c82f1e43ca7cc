//! The `instatus_component` resource
//!
//! Maps the declarative component model onto the API's request and
//! response payloads. Two quirks of the remote API are preserved here on
//! purpose and pinned by tests:
//!
//! * create sends the configured `group_id` as both `group` and `groupId`,
//!   while update sends `group_name` as `group`;
//! * on read, `grouped` is derived from whether the response carries a
//!   group name, not from any flag the server returns.

use crate::api::component::{Component, ComponentRequest};
use crate::api::Client;
use async_trait::async_trait;
use std::sync::Arc;
use tfplug::import::import_state_passthrough_id;
use tfplug::plan_modifier::UseStateForUnknown;
use tfplug::resource::{
    CreateResourceRequest, CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceWithImportState, UpdateResourceRequest,
    UpdateResourceResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, Diagnostics, Dynamic, DynamicValue};
use tfplug::Context;
use tfplug::StaticDefault;

pub struct ComponentResource {
    client: Arc<Client>,
}

impl ComponentResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn schema_static() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages a component on an Instatus status page.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Identifier of the component, assigned by Instatus.")
                    .computed()
                    .plan_modifier(Arc::new(UseStateForUnknown))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("page_id", AttributeType::String)
                    .description("Identifier of the status page the component belongs to.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Display name of the component.")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("description", AttributeType::String)
                    .description("Description shown under the component name.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("show_uptime", AttributeType::Bool)
                    .description("Whether to show the uptime percentage for this component.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("grouped", AttributeType::Bool)
                    .description("Whether the component belongs to a group.")
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(false))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("group_name", AttributeType::String)
                    .description("Name of the group the component belongs to.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("group_id", AttributeType::String)
                    .description("Identifier of the group the component belongs to.")
                    .optional()
                    .build(),
            )
            .build()
    }
}

fn opt_string(model: &DynamicValue, name: &str) -> Option<String> {
    model.get_string(&AttributePath::new(name)).ok()
}

fn opt_bool(model: &DynamicValue, name: &str) -> Option<bool> {
    model.get_bool(&AttributePath::new(name)).ok()
}

/// Request body for create. The `group` field is filled from `group_id`,
/// matching what the API expects on this path.
fn create_request(plan: &DynamicValue) -> ComponentRequest {
    ComponentRequest {
        name: opt_string(plan, "name"),
        description: opt_string(plan, "description"),
        show_uptime: opt_bool(plan, "show_uptime"),
        grouped: opt_bool(plan, "grouped"),
        group: opt_string(plan, "group_id"),
        group_id: opt_string(plan, "group_id"),
    }
}

/// Request body for update. Unlike create, `group` is filled from
/// `group_name`.
fn update_request(plan: &DynamicValue) -> ComponentRequest {
    ComponentRequest {
        name: opt_string(plan, "name"),
        description: opt_string(plan, "description"),
        show_uptime: opt_bool(plan, "show_uptime"),
        grouped: opt_bool(plan, "grouped"),
        group: opt_string(plan, "group_name"),
        group_id: opt_string(plan, "group_id"),
    }
}

fn set_opt_string(state: &mut DynamicValue, name: &str, value: Option<String>) {
    let dynamic = match value {
        Some(v) => Dynamic::String(v),
        None => Dynamic::Null,
    };
    let _ = state.set(&AttributePath::new(name), dynamic);
}

/// Copies the server-assigned fields of a create or update response into
/// the state. Everything else keeps its planned value.
fn apply_component_response(state: &mut DynamicValue, component: &Component) {
    let _ = state.set_string(&AttributePath::new("id"), component.id.clone());
    set_opt_string(state, "description", component.description.clone());
    set_opt_string(state, "group_name", component.group_name());
    set_opt_string(state, "group_id", component.group_id());
}

/// Builds the refreshed state after a read. `page_id` and `id` come from
/// the prior state; everything else comes from the response. `grouped` is
/// true exactly when the response names a group.
fn refreshed_state(prior: &DynamicValue, component: &Component) -> DynamicValue {
    let mut state = DynamicValue::empty_object();

    set_opt_string(&mut state, "page_id", opt_string(prior, "page_id"));
    set_opt_string(&mut state, "id", opt_string(prior, "id"));

    set_opt_string(&mut state, "name", component.name.clone());
    set_opt_string(&mut state, "description", component.description.clone());
    let _ = state.set(
        &AttributePath::new("show_uptime"),
        match component.show_uptime {
            Some(v) => Dynamic::Bool(v),
            None => Dynamic::Null,
        },
    );

    let group_name = component.group_name();
    let _ = state.set_bool(&AttributePath::new("grouped"), group_name.is_some());
    set_opt_string(&mut state, "group_name", group_name);
    set_opt_string(&mut state, "group_id", component.group_id());

    state
}

/// Splits an import identifier of the form `PageId/id` into its parts.
/// Both segments must be non-empty and no extra separator is allowed.
fn parse_import_id(raw: &str) -> Result<(String, String), Diagnostic> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(Diagnostic::error(
            "Invalid import identifier",
            format!("Import identifier must be in the format 'PageId/id'. Got: {raw}"),
        ));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

#[async_trait]
impl Resource for ComponentResource {
    fn type_name(&self) -> &str {
        "instatus_component"
    }

    fn schema(&self) -> Schema {
        Self::schema_static()
    }

    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = Diagnostics::new();
        let plan = request.planned_state;

        let page_id = match plan.get_string(&AttributePath::new("page_id")) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error(
                    "Error creating component",
                    format!("Could not create component, unexpected error: {e}"),
                );
                return CreateResourceResponse {
                    new_state: plan,
                    diagnostics,
                };
            }
        };

        let body = create_request(&plan);
        match self.client.create_component(&page_id, &body).await {
            Ok(component) => {
                let mut state = plan;
                apply_component_response(&mut state, &component);
                tracing::debug!(id = %component.id, %page_id, "created component");
                CreateResourceResponse {
                    new_state: state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.add_error(
                    "Error creating component",
                    format!("Could not create component, unexpected error: {e}"),
                );
                CreateResourceResponse {
                    new_state: plan,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = Diagnostics::new();
        let state = request.current_state;

        // Without both identifiers there is nothing to look up; report the
        // resource as gone so it gets planned for recreation.
        let page_id = state.get_string(&AttributePath::new("page_id"));
        let id = state.get_string(&AttributePath::new("id"));
        let (page_id, id) = match (page_id, id) {
            (Ok(page_id), Ok(id)) => (page_id, id),
            _ => {
                return ReadResourceResponse {
                    new_state: None,
                    diagnostics,
                }
            }
        };

        match self.client.get_component(&page_id, &id).await {
            Ok(component) => ReadResourceResponse {
                new_state: Some(refreshed_state(&state, &component)),
                diagnostics,
            },
            Err(e) => {
                diagnostics.add_error(
                    "Error Reading Instatus Component",
                    format!("Could not read Instatus component ID {id}: {e}"),
                );
                ReadResourceResponse {
                    new_state: Some(state),
                    diagnostics,
                }
            }
        }
    }

    async fn update(
        &self,
        _ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let mut diagnostics = Diagnostics::new();
        let plan = request.planned_state;

        let page_id = plan.get_string(&AttributePath::new("page_id"));
        let id = plan.get_string(&AttributePath::new("id"));
        let (page_id, id) = match (page_id, id) {
            (Ok(page_id), Ok(id)) => (page_id, id),
            (Err(e), _) | (_, Err(e)) => {
                diagnostics.add_error(
                    "Error Updating Instatus Component",
                    format!("Could not update component, unexpected error: {e}"),
                );
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        let body = update_request(&plan);
        match self.client.update_component(&page_id, &id, &body).await {
            Ok(component) => {
                let mut state = plan;
                apply_component_response(&mut state, &component);
                UpdateResourceResponse {
                    new_state: state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.add_error(
                    "Error Updating Instatus Component",
                    format!("Could not update component, unexpected error: {e}"),
                );
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = Diagnostics::new();
        let state = request.prior_state;

        let page_id = state.get_string(&AttributePath::new("page_id"));
        let id = state.get_string(&AttributePath::new("id"));
        let (page_id, id) = match (page_id, id) {
            (Ok(page_id), Ok(id)) => (page_id, id),
            (Err(e), _) | (_, Err(e)) => {
                diagnostics.add_error(
                    "Error Deleting Instatus Component",
                    format!("Could not delete component, unexpected error: {e}"),
                );
                return DeleteResourceResponse { diagnostics };
            }
        };

        if let Err(e) = self.client.delete_component(&page_id, &id).await {
            diagnostics.add_error(
                "Error Deleting Instatus Component",
                format!("Could not delete component, unexpected error: {e}"),
            );
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for ComponentResource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: Vec::new(),
            diagnostics: Diagnostics::new(),
        };

        let (page_id, id) = match parse_import_id(&request.id) {
            Ok(parts) => parts,
            Err(diagnostic) => {
                response.diagnostics.push(diagnostic);
                return response;
            }
        };

        let passthrough = ImportResourceStateRequest {
            type_name: request.type_name.clone(),
            id,
        };
        import_state_passthrough_id(&ctx, AttributePath::new("id"), &passthrough, &mut response);

        if let Some(imported) = response.imported_resources.last_mut() {
            if let Err(e) = imported
                .state
                .set_string(&AttributePath::new("page_id"), page_id)
            {
                response.diagnostics.push(
                    Diagnostic::error(
                        "Invalid import identifier",
                        format!("Could not write page_id to state: {e}"),
                    )
                    .with_attribute(AttributePath::new("page_id")),
                );
            }
        }

        response
    }
}
