//! Import helpers

use crate::context::Context;
use crate::resource::{ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource};
use crate::types::{AttributePath, Diagnostic, DynamicValue};

/// Seeds imported state by writing the raw import identifier into a single
/// attribute, typically `id`. Resources with composite identifiers parse
/// the identifier themselves and then distribute the parts.
pub fn import_state_passthrough_id(
    _ctx: &Context,
    attr_path: AttributePath,
    request: &ImportResourceStateRequest,
    response: &mut ImportResourceStateResponse,
) {
    let mut state = DynamicValue::empty_object();
    if let Err(e) = state.set_string(&attr_path, request.id.clone()) {
        response.diagnostics.push(
            Diagnostic::error(
                "Failed to set import identifier",
                format!("Could not write import identifier to state: {e}"),
            )
            .with_attribute(attr_path),
        );
        return;
    }

    response.imported_resources.push(ImportedResource {
        type_name: request.type_name.clone(),
        state,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diagnostics;

    #[test]
    fn passthrough_writes_id_into_state() {
        let ctx = Context::new();
        let request = ImportResourceStateRequest {
            type_name: "instatus_component".to_string(),
            id: "cmp_42".to_string(),
        };
        let mut response = ImportResourceStateResponse {
            imported_resources: Vec::new(),
            diagnostics: Diagnostics::new(),
        };

        import_state_passthrough_id(&ctx, AttributePath::new("id"), &request, &mut response);

        assert!(response.diagnostics.is_empty());
        assert_eq!(response.imported_resources.len(), 1);
        let imported = &response.imported_resources[0];
        assert_eq!(imported.type_name, "instatus_component");
        assert_eq!(
            imported
                .state
                .get_string(&AttributePath::new("id"))
                .unwrap(),
            "cmp_42"
        );
    }
}
