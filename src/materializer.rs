//! Turns subject groups returned by a connection into entities.

use crate::connection::SubjectGroup;
use crate::entity::Entity;
use crate::registry::Namespace;

/// One entity per group, in the order the groups were returned.
///
/// Groups are neither deduplicated nor filtered; an empty attribute map still
/// produces an entity.
pub fn build_all(namespace: &Namespace, groups: Vec<SubjectGroup>) -> Vec<Entity> {
    groups
        .into_iter()
        .map(|group| Entity::new(group.id, namespace.clone(), group.attributes))
        .collect()
}
