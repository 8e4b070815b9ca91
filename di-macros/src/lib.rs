//! Derive macros wiring services to the bizsvc application context.
//!
//! - `#[derive(Context)]` turns every field of the context struct into
//!   something resolvable through `FromRef`.
//! - `#[derive(FromContext)]` builds a struct by resolving each of its
//!   fields from the context.
//!
//! Generated code refers to `crate::FromRef`, so the consuming crate must
//! expose the trait at its root.

use proc_macro::TokenStream;

mod context;
mod fields;
mod from_context;

/// Makes each field of the annotated struct extractable from it.
///
/// For every field `name: Ty` this expands to
/// `impl crate::FromRef<Struct> for Ty { ctx.name.clone() }`, so field types
/// must be `Clone` and distinct from one another.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub store: AppStore,
///     pub mapper: JsonMapper,
/// }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::expand(input)
}

/// Builds the annotated struct out of a context.
///
/// Each field is resolved with `<FieldTy as crate::FromRef<Ctx>>::from_ref`.
/// The context type is `Context` unless overridden:
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// #[from_context(Context = "crate::context::Context")]
/// pub struct ContactCommands {
///     contacts: ContactService,
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::expand(input)
}
