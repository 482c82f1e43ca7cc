//! Default value providers for optional attributes
//!
//! Defaults run during planning when an attribute is absent from
//! configuration. They differ from plan modifiers in that they never run
//! when the value is explicitly set.

use crate::schema::DefaultValue;
use crate::types::Dynamic;
use std::sync::Arc;

/// A fixed default value.
pub struct StaticDefault {
    value: Dynamic,
}

impl StaticDefault {
    pub fn create(value: Dynamic) -> Arc<dyn DefaultValue> {
        Arc::new(Self { value })
    }

    pub fn string(value: &str) -> Arc<dyn DefaultValue> {
        Self::create(Dynamic::String(value.to_string()))
    }

    pub fn number(value: f64) -> Arc<dyn DefaultValue> {
        Self::create(Dynamic::Number(value))
    }

    pub fn bool(value: bool) -> Arc<dyn DefaultValue> {
        Self::create(Dynamic::Bool(value))
    }
}

impl DefaultValue for StaticDefault {
    fn description(&self) -> String {
        format!("static default value: {:?}", self.value)
    }

    fn default_value(&self) -> Dynamic {
        self.value.clone()
    }
}
