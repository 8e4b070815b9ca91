//! Dependency injection infrastructure.
//!
//! Compile-time DI built on the `FromRef` trait and the derives from
//! `di-macros`:
//!
//! - `FromRef<T>`: extract a value from a reference to `T`
//! - `#[derive(Context)]`: each field of the root context becomes extractable
//! - `#[derive(FromContext)]`: build a struct by resolving each of its fields
//!
//! ```ignore
//! #[derive(FromContext, Clone)]
//! pub struct ContactCommands {
//!     contacts: ContactService, // resolved via FromRef<Context>
//! }
//!
//! let commands = ContactCommands::from_ref(&ctx);
//! ```

/// Extracts a value from a reference to another type.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Any `Clone` type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

pub use di_macros::{Context, FromContext};
