//! Repository and unit-of-work traits.

use async_trait::async_trait;

use crate::cancel::Cancellation;
use crate::error::AppError;

/// Persistence access point for one entity type keyed by `K`.
///
/// Mutations are staged; nothing is final until the owning
/// [`UnitOfWork`] commits. Filtering, sorting and paging belong to
/// implementations, not to callers of this trait.
#[async_trait]
pub trait Repository<E, K>: Send + Sync
where
    E: Send,
    K: Sync,
{
    /// Fetches one entity by key.
    async fn get(&self, id: &K, cancel: &Cancellation) -> Result<Option<E>, AppError>;

    /// Fetches every entity.
    async fn list(&self, cancel: &Cancellation) -> Result<Vec<E>, AppError>;

    /// Stages a new entity, returning it with its assigned key.
    async fn insert(&self, entity: E, cancel: &Cancellation) -> Result<E, AppError>;

    /// Stages a replacement for an existing entity.
    async fn update(&self, entity: E, cancel: &Cancellation) -> Result<E, AppError>;

    /// Stages removal of the entity with the given key.
    async fn delete(&self, id: &K, cancel: &Cancellation) -> Result<(), AppError>;
}

/// Transactional scope over one or more repositories.
///
/// A call stages its changes while holding the scope returned by
/// [`begin`](UnitOfWork::begin), then either commits or rolls back before
/// releasing it. Changes staged outside a scope may be picked up or dropped
/// by whichever call commits or rolls back next.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Held by one call from its first staged change until commit or rollback.
    type Scope<'a>: Send
    where
        Self: 'a;

    /// Waits for exclusive use of the staging area, giving up with
    /// [`AppError::Cancelled`] if `cancel` fires first.
    async fn begin<'a>(&'a self, cancel: &Cancellation) -> Result<Self::Scope<'a>, AppError>;

    /// Finalizes staged changes, returning how many records were affected.
    ///
    /// On failure nothing becomes visible and the staged changes remain
    /// until [`rollback`](UnitOfWork::rollback).
    async fn commit(&self, cancel: &Cancellation) -> Result<usize, AppError>;

    /// Discards staged changes.
    async fn rollback(&self) -> Result<(), AppError>;
}
