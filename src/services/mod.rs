//! Business logic services.
//!
//! [`BusinessService`] implements the [`CrudService`] contract for any
//! [`CrudTypes`] bundle; concrete instantiations such as [`ContactService`]
//! are resolved from the application context.

mod business;
mod contacts;
mod crud;

pub use business::{BusinessService, RepositorySelector};
pub use contacts::{ContactService, ContactTypes};
pub use crud::{CrudService, CrudTypes};
