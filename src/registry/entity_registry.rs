use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::error::{EntityError, Result};
use crate::registry::entity_type::EntityType;

/// Registry of entity types keyed by type name, shared by every finder in the process.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Arc<RwLock<HashMap<String, Arc<EntityType>>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry { types: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Register a type; a second registration under the same name is rejected.
    pub fn register(&self, entity_type: EntityType) -> Result<Arc<EntityType>> {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        let name = entity_type.type_name().to_string();
        if types.contains_key(&name) {
            return Err(EntityError::ConfigError(format!(
                "entity type already registered : {}",
                name
            )));
        }

        let entity_type = Arc::new(entity_type);
        types.insert(name, Arc::clone(&entity_type));
        Ok(entity_type)
    }

    pub fn get(&self, type_name: &str) -> Option<Arc<EntityType>> {
        self.types.read().unwrap_or_else(PoisonError::into_inner).get(type_name).cloned()
    }

    pub fn lookup(&self, type_name: &str) -> Result<Arc<EntityType>> {
        self.get(type_name).ok_or_else(|| {
            EntityError::ConfigError(format!("entity type not registered : {}", type_name))
        })
    }

    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
