//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::mapper::JsonMapper;
use crate::repositories::ContactsUnitOfWork;

/// Root application context for dependency injection.
///
/// `#[derive(Context)]` makes each field resolvable through `FromRef`, so
/// services and command handlers can be built straight from it.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Contacts unit of work shared by every service.
    pub store: Arc<ContactsUnitOfWork>,
    /// Entity/DTO mapper.
    pub mapper: JsonMapper,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(store: ContactsUnitOfWork, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            mapper: JsonMapper::new(),
            config: Arc::new(config),
        }
    }

    /// Opens the configured store and builds the context around it.
    pub async fn open(config: Config) -> Result<Self, AppError> {
        let path = config.store.effective_path();
        tracing::info!(path = %path.display(), "Opening contacts store");
        let store = ContactsUnitOfWork::open(path).await?;
        Ok(Self::new(store, config))
    }
}
