//! Contacts unit of work, optionally persisted to a JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use crate::cancel::Cancellation;
use crate::data::{MemoryRepository, Sequential, UnitOfWork};
use crate::error::AppError;
use crate::models::Contact;

/// Unit of work owning the contacts table.
///
/// Every call stages under the scope from [`UnitOfWork::begin`], which also
/// drops changes an earlier, abandoned call left behind.
///
/// Commits write the would-be table to the attached file (through a
/// temporary sibling and a rename) and only then apply staged changes in
/// memory, so a failed write leaves both sides as they were.
pub struct ContactsUnitOfWork {
    pub contacts: MemoryRepository<Contact, u64>,
    path: Option<PathBuf>,
    staging: Mutex<()>,
}

impl ContactsUnitOfWork {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            contacts: MemoryRepository::new(Sequential::new()),
            path: None,
            staging: Mutex::new(()),
        }
    }

    /// Opens the store at `path`, starting empty if the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let contacts = MemoryRepository::new(Sequential::new());

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let rows: Vec<Contact> = serde_json::from_slice(&bytes).map_err(|e| {
                    AppError::Persistence(format!("unreadable store {}: {}", path.display(), e))
                })?;
                tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded contacts store");
                contacts.load(rows).await;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Starting empty contacts store");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            contacts,
            path: Some(path),
            staging: Mutex::new(()),
        })
    }

    async fn persist(path: &Path, rows: &[Contact]) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(rows)
            .map_err(|e| AppError::Persistence(format!("cannot encode contacts: {}", e)))?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, path).await?;
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for ContactsUnitOfWork {
    type Scope<'a> = MutexGuard<'a, ()>;

    async fn begin<'a>(&'a self, cancel: &Cancellation) -> Result<Self::Scope<'a>, AppError> {
        cancel.check()?;
        let scope = tokio::select! {
            scope = self.staging.lock() => scope,
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
        };

        // Anything still staged was left by a call that never finished.
        let abandoned = self.contacts.discard().await;
        if abandoned > 0 {
            tracing::warn!(abandoned, "Discarded changes staged outside a scope");
        }
        Ok(scope)
    }

    async fn commit(&self, cancel: &Cancellation) -> Result<usize, AppError> {
        cancel.check()?;

        if let Some(path) = self.path.as_deref() {
            let (rows, affected) = self.contacts.preview().await;
            if affected > 0 {
                Self::persist(path, &rows).await?;
            }
        }
        let affected = self.contacts.flush().await;

        tracing::debug!(affected, "Committed contacts");
        Ok(affected)
    }

    async fn rollback(&self) -> Result<(), AppError> {
        let discarded = self.contacts.discard().await;
        tracing::debug!(discarded, "Rolled back contacts");
        Ok(())
    }
}
