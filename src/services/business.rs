//! Generic CRUD orchestration over a repository and a unit of work.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::cancel::Cancellation;
use crate::data::{Repository, UnitOfWork};
use crate::dto::{Dto, Entity};
use crate::error::AppError;
use crate::mapper::{JsonMapper, Mapper};
use crate::services::crud::{CrudService, CrudTypes};

/// Picks the repository for one entity type out of a unit of work.
pub type RepositorySelector<U, R> = fn(&U) -> &R;

/// CRUD service for the types bundled in `T`.
///
/// Each verb is one linear pipeline: resolve the repository, map the input,
/// call the repository, commit once for mutations, map the result back.
/// Mutations run inside a unit-of-work scope and roll back whatever they
/// staged when a later step fails or is cancelled. Repository and commit
/// failures are returned exactly as produced.
///
/// # Example
///
/// ```ignore
/// let service: BusinessService<ContactTypes, ContactsUnitOfWork, _> =
///     BusinessService::new(uow, |uow| &uow.contacts, JsonMapper);
///
/// let created = service.add(Some(new_contact), &Cancellation::none()).await?;
/// ```
pub struct BusinessService<T, U, R, M = JsonMapper> {
    unit_of_work: Arc<U>,
    selector: RepositorySelector<U, R>,
    mapper: M,
    _types: PhantomData<fn() -> T>,
}

impl<T, U, R, M: Clone> Clone for BusinessService<T, U, R, M> {
    fn clone(&self) -> Self {
        Self {
            unit_of_work: Arc::clone(&self.unit_of_work),
            selector: self.selector,
            mapper: self.mapper.clone(),
            _types: PhantomData,
        }
    }
}

impl<T, U, R, M> BusinessService<T, U, R, M>
where
    T: CrudTypes,
    U: UnitOfWork,
    R: Repository<T::Entity, T::Key>,
    M: Mapper,
{
    /// Creates a service over `unit_of_work`, reaching its repository
    /// through `selector`.
    pub fn new(unit_of_work: Arc<U>, selector: RepositorySelector<U, R>, mapper: M) -> Self {
        Self {
            unit_of_work,
            selector,
            mapper,
            _types: PhantomData,
        }
    }

    fn repository(&self) -> &R {
        (self.selector)(&self.unit_of_work)
    }

    async fn save_changes(&self, event: &'static str, cancel: &Cancellation) -> Result<usize, AppError> {
        cancel.check()?;
        tracing::info!(event, "Save changes");
        self.unit_of_work.commit(cancel).await
    }

    /// Rolls back staged changes when `result` is a failure, then hands it on.
    async fn settle<O: Send>(
        &self,
        event: &'static str,
        result: Result<O, AppError>,
    ) -> Result<O, AppError> {
        if result.is_err() {
            if let Err(e) = self.unit_of_work.rollback().await {
                tracing::warn!(event, error = %e, "Rollback failed");
            }
        }
        result
    }

    async fn insert_and_save(
        &self,
        entity: T::Entity,
        cancel: &Cancellation,
    ) -> Result<T::Entity, AppError> {
        cancel.check()?;
        let entity = self.repository().insert(entity, cancel).await?;

        self.save_changes("add", cancel).await?;
        Ok(entity)
    }

    async fn merge_and_save(
        &self,
        item: &T::EditDto,
        cancel: &Cancellation,
    ) -> Result<Option<T::Entity>, AppError> {
        cancel.check()?;
        let Some(mut entity) = self.repository().get(item.id(), cancel).await? else {
            tracing::warn!(event = "edit", id = ?item.id(), "Item not found");
            return Ok(None);
        };

        // The stored key wins over whatever the payload carries.
        let id = entity.id().clone();
        self.mapper.map_into(item, &mut entity)?;
        entity.set_id(id);

        cancel.check()?;
        let entity = self.repository().update(entity, cancel).await?;

        self.save_changes("edit", cancel).await?;
        Ok(Some(entity))
    }

    async fn delete_and_save(&self, id: &T::Key, cancel: &Cancellation) -> Result<usize, AppError> {
        cancel.check()?;
        self.repository().delete(id, cancel).await?;

        self.save_changes("delete", cancel).await
    }
}

#[async_trait]
impl<T, U, R, M> CrudService for BusinessService<T, U, R, M>
where
    T: CrudTypes,
    U: UnitOfWork,
    R: Repository<T::Entity, T::Key>,
    M: Mapper,
{
    type Key = T::Key;
    type Dto = T::Dto;
    type AddDto = T::AddDto;
    type EditDto = T::EditDto;

    async fn list(&self, cancel: &Cancellation) -> Result<Vec<T::Dto>, AppError> {
        cancel.check()?;
        let entities = self.repository().list(cancel).await?;

        entities.iter().map(|entity| self.mapper.map(entity)).collect()
    }

    async fn get(&self, id: &T::Key, cancel: &Cancellation) -> Result<Option<T::Dto>, AppError> {
        cancel.check()?;
        let entity = self.repository().get(id, cancel).await?;

        entity.map(|entity| self.mapper.map(&entity)).transpose()
    }

    async fn add(&self, item: Option<T::AddDto>, cancel: &Cancellation) -> Result<T::Dto, AppError> {
        let item = item.ok_or(AppError::InvalidArgument("item"))?;

        tracing::info!(event = "add", item = ?item, "Add item");
        let entity: T::Entity = self.mapper.map(&item)?;

        let _scope = self.unit_of_work.begin(cancel).await?;
        let result = self.insert_and_save(entity, cancel).await;
        let entity = self.settle("add", result).await?;

        self.mapper.map(&entity)
    }

    async fn edit(
        &self,
        item: Option<T::EditDto>,
        cancel: &Cancellation,
    ) -> Result<Option<T::Dto>, AppError> {
        let item = item.ok_or(AppError::InvalidArgument("item"))?;

        tracing::info!(event = "edit", item = ?item, "Edit item");

        let _scope = self.unit_of_work.begin(cancel).await?;
        let result = self.merge_and_save(&item, cancel).await;
        let entity = self.settle("edit", result).await?;

        entity.map(|entity| self.mapper.map(&entity)).transpose()
    }

    async fn delete(&self, id: &T::Key, cancel: &Cancellation) -> Result<bool, AppError> {
        tracing::info!(event = "delete", id = ?id, "Delete item");

        let _scope = self.unit_of_work.begin(cancel).await?;
        let result = self.delete_and_save(id, cancel).await;
        let affected = self.settle("delete", result).await?;

        Ok(affected == 1)
    }
}
