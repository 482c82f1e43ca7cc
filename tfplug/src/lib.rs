//! tfplug - provider-side framework for building Terraform providers in Rust
//!
//! This crate covers the provider-facing API surface: dynamic values with
//! typed accessors, schemas with defaults and plan modifiers, async provider
//! and resource traits, planning helpers, and import helpers. Transport to
//! Terraform itself (the plugin wire protocol) is handled by the host plugin
//! runtime and is out of scope for this crate.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Provider API modules
pub mod provider;
pub mod resource;

// Helper modules
pub mod defaults;
pub mod import;
pub mod plan;
pub mod plan_modifier;

// Re-exports for convenience
pub use context::Context;
pub use defaults::StaticDefault;
pub use error::{Result, TfplugError};
pub use import::import_state_passthrough_id;
pub use plan::{plan_new_state, PlannedChange};
pub use provider::{ConfigureProviderRequest, ConfigureProviderResponse, Provider};
pub use resource::{Resource, ResourceWithImportState};
pub use schema::{Attribute, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{AttributePath, Diagnostic, Diagnostics, Dynamic, DynamicValue};
