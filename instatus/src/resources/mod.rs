//! Resource implementations

pub mod component;

pub use component::ComponentResource;
