//! Plan modifiers for computed attribute behavior

use crate::schema::{PlanModifier, PlanModifierRequest, PlanModifierResponse};
use crate::types::{Diagnostics, Dynamic};

/// Keeps the prior state value when the planned value is unknown.
///
/// Computed attributes are marked unknown during planning; for values that
/// never change after creation (such as server-assigned identifiers) the
/// prior state value is carried forward instead.
pub struct UseStateForUnknown;

impl PlanModifier for UseStateForUnknown {
    fn description(&self) -> String {
        "use the prior state value when the planned value is unknown".to_string()
    }

    fn modify(&self, request: PlanModifierRequest) -> PlanModifierResponse {
        let plan_value = match request.plan_value {
            // Unknown may arrive as Null after a msgpack round trip
            Dynamic::Unknown | Dynamic::Null => match request.state_value {
                Dynamic::Null => request.plan_value,
                state => state,
            },
            plan => plan,
        };

        PlanModifierResponse {
            plan_value,
            requires_replace: false,
            diagnostics: Diagnostics::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributePath;

    fn request(state: Dynamic, plan: Dynamic) -> PlanModifierRequest {
        PlanModifierRequest {
            config_value: Dynamic::Null,
            state_value: state,
            plan_value: plan,
            path: AttributePath::new("id"),
        }
    }

    #[test]
    fn unknown_plan_takes_state_value() {
        let response = UseStateForUnknown.modify(request(
            Dynamic::String("cmp_42".to_string()),
            Dynamic::Unknown,
        ));
        assert_eq!(response.plan_value, Dynamic::String("cmp_42".to_string()));
        assert!(!response.requires_replace);
    }

    #[test]
    fn known_plan_value_wins() {
        let response = UseStateForUnknown.modify(request(
            Dynamic::String("old".to_string()),
            Dynamic::String("new".to_string()),
        ));
        assert_eq!(response.plan_value, Dynamic::String("new".to_string()));
    }

    #[test]
    fn unknown_plan_with_null_state_stays_unknown() {
        let response = UseStateForUnknown.modify(request(Dynamic::Null, Dynamic::Unknown));
        assert_eq!(response.plan_value, Dynamic::Unknown);
    }
}
