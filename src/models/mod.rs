//! Domain models served by the bundled application.

mod contact;

pub use contact::{Contact, ContactDto, ContactEdit, NewContact};
