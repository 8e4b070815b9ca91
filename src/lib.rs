//! bizsvc - generic business services
//!
//! CRUD orchestration between callers and a data-access layer: a service
//! resolves its repository from a unit of work, maps transfer objects to
//! entities and back, and commits once per mutation.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod context;
pub mod data;
pub mod di;
pub mod dto;
pub mod error;
mod macros;
pub mod mapper;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
