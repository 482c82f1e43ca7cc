//! Planning helpers
//!
//! Terraform expects the provider to fill planned state before apply:
//! absent optional attributes take their declared default, absent computed
//! attributes become unknown, and plan modifiers run last. This module
//! implements that sequence for a schema.

use crate::schema::{PlanModifierRequest, Schema};
use crate::types::{AttributePath, Diagnostics, Dynamic, DynamicValue};

/// Result of planning one resource change.
pub struct PlannedChange {
    pub planned_state: DynamicValue,
    pub requires_replace: Vec<AttributePath>,
    pub diagnostics: Diagnostics,
}

/// Produces the planned state for `config` against `schema`.
///
/// `prior_state` is the last known state, or a null value on create.
pub fn plan_new_state(
    schema: &Schema,
    prior_state: &DynamicValue,
    config: &DynamicValue,
) -> PlannedChange {
    let mut diagnostics = Diagnostics::new();
    let mut requires_replace = Vec::new();

    let mut planned = config.clone();
    if !matches!(planned.value, Dynamic::Map(_)) {
        planned = DynamicValue::empty_object();
    }

    for attribute in &schema.attributes {
        let path = AttributePath::new(&attribute.name);
        let config_value = config.get(&path).cloned().unwrap_or(Dynamic::Null);

        if matches!(config_value, Dynamic::Null) {
            if let Some(default) = &attribute.default {
                let _ = planned.set(&path, default.default_value());
            } else if attribute.computed {
                let _ = planned.mark_unknown(&path);
            }
        }

        for modifier in &attribute.plan_modifiers {
            let request = PlanModifierRequest {
                config_value: config_value.clone(),
                state_value: prior_state.get(&path).cloned().unwrap_or(Dynamic::Null),
                plan_value: planned.get(&path).cloned().unwrap_or(Dynamic::Null),
                path: path.clone(),
            };
            let response = modifier.modify(request);
            let _ = planned.set(&path, response.plan_value);
            if response.requires_replace {
                requires_replace.push(path.clone());
            }
            diagnostics.extend(response.diagnostics);
        }
    }

    PlannedChange {
        planned_state: planned,
        requires_replace,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::StaticDefault;
    use crate::plan_modifier::UseStateForUnknown;
    use crate::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
    use std::sync::Arc;

    fn schema() -> Schema {
        SchemaBuilder::new()
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .plan_modifier(Arc::new(UseStateForUnknown))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("grouped", AttributeType::Bool)
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(false))
                    .build(),
            )
            .build()
    }

    fn config(name: &str) -> DynamicValue {
        let mut config = DynamicValue::empty_object();
        config
            .set_string(&AttributePath::new("name"), name.to_string())
            .unwrap();
        config
    }

    #[test]
    fn absent_optional_takes_default() {
        let change = plan_new_state(&schema(), &DynamicValue::null(), &config("API"));

        assert!(change.diagnostics.is_empty());
        assert!(!change
            .planned_state
            .get_bool(&AttributePath::new("grouped"))
            .unwrap());
    }

    #[test]
    fn explicit_value_is_not_overwritten_by_default() {
        let mut cfg = config("API");
        cfg.set_bool(&AttributePath::new("grouped"), true).unwrap();

        let change = plan_new_state(&schema(), &DynamicValue::null(), &cfg);

        assert!(change
            .planned_state
            .get_bool(&AttributePath::new("grouped"))
            .unwrap());
    }

    #[test]
    fn computed_attribute_becomes_unknown_on_create() {
        let change = plan_new_state(&schema(), &DynamicValue::null(), &config("API"));

        assert_eq!(
            change.planned_state.get(&AttributePath::new("id")),
            Some(&Dynamic::Unknown)
        );
    }

    #[test]
    fn computed_attribute_retains_prior_state_value() {
        let mut prior = DynamicValue::empty_object();
        prior
            .set_string(&AttributePath::new("id"), "cmp_42".to_string())
            .unwrap();

        let change = plan_new_state(&schema(), &prior, &config("API"));

        assert_eq!(
            change
                .planned_state
                .get_string(&AttributePath::new("id"))
                .unwrap(),
            "cmp_42"
        );
    }
}
