//! Staged in-process repository.
//!
//! Reads see committed rows only. Inserts, updates and deletes are queued
//! until [`MemoryRepository::flush`] applies them, which is what a unit of
//! work calls on commit.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::cancel::Cancellation;
use crate::data::keys::KeyGenerator;
use crate::data::traits::Repository;
use crate::dto::Entity;
use crate::error::AppError;

#[derive(Clone)]
enum Change<E, K> {
    Insert(E),
    Update(E),
    Delete(K),
}

struct Table<E, K> {
    rows: RwLock<BTreeMap<K, E>>,
    pending: Mutex<Vec<Change<E, K>>>,
    keys: Box<dyn KeyGenerator<K>>,
}

/// Repository over a shared in-memory table.
///
/// Clones share the same table, so a unit of work and the services using it
/// can each hold a handle.
pub struct MemoryRepository<E, K> {
    table: Arc<Table<E, K>>,
}

impl<E, K> Clone for MemoryRepository<E, K> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<E, K> MemoryRepository<E, K>
where
    E: Entity<K> + Clone + Send + Sync,
    K: Ord + Clone + Send + Sync,
{
    /// Creates an empty table assigning keys with `keys`.
    pub fn new<G>(keys: G) -> Self
    where
        G: KeyGenerator<K> + 'static,
    {
        Self {
            table: Arc::new(Table {
                rows: RwLock::new(BTreeMap::new()),
                pending: Mutex::new(Vec::new()),
                keys: Box::new(keys),
            }),
        }
    }

    /// Seeds committed rows, bypassing staging.
    pub async fn load(&self, rows: impl IntoIterator<Item = E>) {
        let mut table = self.table.rows.write().await;
        for row in rows {
            self.table.keys.observe(row.id());
            table.insert(row.id().clone(), row);
        }
    }

    /// Committed rows in key order.
    pub async fn snapshot(&self) -> Vec<E> {
        self.table.rows.read().await.values().cloned().collect()
    }

    /// Number of staged changes awaiting a flush.
    pub async fn pending(&self) -> usize {
        self.table.pending.lock().await.len()
    }

    /// Committed rows in key order as they would be after a flush, with the
    /// number of rows that flush would change. Nothing is applied.
    pub async fn preview(&self) -> (Vec<E>, usize) {
        let changes = self.table.pending.lock().await.clone();
        let mut rows = self.table.rows.read().await.clone();
        let affected = apply(&mut rows, changes);
        (rows.into_values().collect(), affected)
    }

    /// Applies staged changes, returning how many rows actually changed.
    ///
    /// Updates and deletes aimed at keys that no longer exist count zero.
    pub async fn flush(&self) -> usize {
        let changes = std::mem::take(&mut *self.table.pending.lock().await);
        let mut rows = self.table.rows.write().await;
        apply(&mut rows, changes)
    }

    /// Drops staged changes without applying them, returning how many there were.
    pub async fn discard(&self) -> usize {
        std::mem::take(&mut *self.table.pending.lock().await).len()
    }
}

fn apply<E, K>(rows: &mut BTreeMap<K, E>, changes: Vec<Change<E, K>>) -> usize
where
    E: Entity<K>,
    K: Ord + Clone,
{
    changes
        .into_iter()
        .map(|change| match change {
            Change::Insert(entity) => {
                rows.insert(entity.id().clone(), entity);
                1
            }
            Change::Update(entity) => match rows.get_mut(entity.id()) {
                Some(slot) => {
                    *slot = entity;
                    1
                }
                None => 0,
            },
            Change::Delete(id) => usize::from(rows.remove(&id).is_some()),
        })
        .sum()
}

#[async_trait]
impl<E, K> Repository<E, K> for MemoryRepository<E, K>
where
    E: Entity<K> + Clone + Send + Sync,
    K: Ord + Clone + Send + Sync,
{
    async fn get(&self, id: &K, cancel: &Cancellation) -> Result<Option<E>, AppError> {
        cancel.check()?;
        Ok(self.table.rows.read().await.get(id).cloned())
    }

    async fn list(&self, cancel: &Cancellation) -> Result<Vec<E>, AppError> {
        cancel.check()?;
        Ok(self.snapshot().await)
    }

    async fn insert(&self, mut entity: E, cancel: &Cancellation) -> Result<E, AppError> {
        cancel.check()?;
        entity.set_id(self.table.keys.next_key());
        self.table
            .pending
            .lock()
            .await
            .push(Change::Insert(entity.clone()));
        Ok(entity)
    }

    async fn update(&self, entity: E, cancel: &Cancellation) -> Result<E, AppError> {
        cancel.check()?;
        self.table
            .pending
            .lock()
            .await
            .push(Change::Update(entity.clone()));
        Ok(entity)
    }

    async fn delete(&self, id: &K, cancel: &Cancellation) -> Result<(), AppError> {
        cancel.check()?;
        self.table
            .pending
            .lock()
            .await
            .push(Change::Delete(id.clone()));
        Ok(())
    }
}
