//! The CRUD contract callers depend on.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cancel::Cancellation;
use crate::dto::{Dto, Entity};
use crate::error::AppError;

/// Bundles the types one service instantiation works with.
///
/// Implemented on a marker type per entity, e.g. `enum ContactTypes {}`.
pub trait CrudTypes: Send + Sync + 'static {
    /// Identifier shared by the entity and its DTOs.
    type Key: Clone + Debug + Send + Sync;
    /// Persistence record.
    type Entity: Entity<Self::Key> + Serialize + DeserializeOwned + Send + Sync;
    /// Read model returned to callers.
    type Dto: Serialize + DeserializeOwned + Send;
    /// Payload for creation; carries no identifier.
    type AddDto: Serialize + Debug + Send + Sync;
    /// Payload for modification; carries the identifier of its target.
    type EditDto: Dto<Self::Key> + Serialize + Debug + Send + Sync;
}

/// Create/read/update/delete over one entity type.
///
/// Absence is never an error: `get` and `edit` return `None` when the
/// record does not exist. Payloads are optional so a missing one can be
/// rejected with [`AppError::InvalidArgument`] before any I/O happens.
#[async_trait]
pub trait CrudService: Send + Sync {
    type Key: Send + Sync;
    type Dto: Send;
    type AddDto: Send;
    type EditDto: Send;

    /// Every record, mapped to DTOs.
    async fn list(&self, cancel: &Cancellation) -> Result<Vec<Self::Dto>, AppError>;

    /// One record, or `None` if no record has this key.
    async fn get(
        &self,
        id: &Self::Key,
        cancel: &Cancellation,
    ) -> Result<Option<Self::Dto>, AppError>;

    /// Creates a record and returns it with its assigned key.
    async fn add(
        &self,
        item: Option<Self::AddDto>,
        cancel: &Cancellation,
    ) -> Result<Self::Dto, AppError>;

    /// Updates the record named by `item`, or returns `None` if it is gone.
    async fn edit(
        &self,
        item: Option<Self::EditDto>,
        cancel: &Cancellation,
    ) -> Result<Option<Self::Dto>, AppError>;

    /// Deletes a record; `true` only if exactly one record was removed.
    async fn delete(&self, id: &Self::Key, cancel: &Cancellation) -> Result<bool, AppError>;
}
