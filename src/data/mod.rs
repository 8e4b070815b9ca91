//! Data-access contracts consumed by the service layer.
//!
//! The service only ever talks to these traits:
//!
//! - [`Repository`] - per-entity get/list/insert/update/delete
//! - [`UnitOfWork`] - commits pending changes and reports affected rows
//!
//! [`memory`] provides a staged in-process implementation, with key
//! assignment strategies in [`keys`].

pub mod keys;
pub mod memory;
mod traits;

pub use keys::{KeyGenerator, Sequential, UlidKeys};
pub use memory::MemoryRepository;
pub use traits::{Repository, UnitOfWork};
