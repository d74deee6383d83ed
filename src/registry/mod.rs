//! Entity type metadata and the process-wide type registry

pub mod entity_registry;
pub mod entity_type;

pub use entity_registry::TypeRegistry;
pub use entity_type::{EntityType, Namespace};
