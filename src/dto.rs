//! Identifier contracts shared by entities and transfer objects.

use serde::{Deserialize, Serialize};

/// A persistence record keyed by `K`.
///
/// The key is assigned by the data layer on insert, which is why entities
/// expose a setter while DTOs do not.
pub trait Entity<K> {
    fn id(&self) -> &K;
    fn set_id(&mut self, id: K);
}

/// A transfer object carrying the identifier of the entity it shapes.
pub trait Dto<K> {
    fn id(&self) -> &K;
}

/// Minimal transfer object holding nothing but an identifier.
///
/// Useful on its own for key-only payloads, or flattened into richer DTOs
/// with `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseDto<K> {
    pub id: K,
}

impl<K> BaseDto<K> {
    pub fn new(id: K) -> Self {
        Self { id }
    }
}

impl<K> Dto<K> for BaseDto<K> {
    fn id(&self) -> &K {
        &self.id
    }
}
