//! Concrete units of work backing the bundled services.

mod contacts;

pub use contacts::ContactsUnitOfWork;
