mod entity;
mod patch;

use proc_macro::TokenStream;
use syn::DeriveInput;

// ============================================================================
// #[derive(Entity)] derive macro
// ============================================================================

/// Derive macro for the `Entity` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, Entity)]
/// struct Todo {
///     #[entity(id)]
///     pub key: String,
///     pub title: String,
/// }
/// ```
///
/// - `#[entity(id)]` marks the field used as the unique identifier.
///   If omitted, defaults to a field named `id`.
/// - The id type is the field's type; `id()` returns a clone of it.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    entity::derive_entity(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

// ============================================================================
// #[derive(Patch)] derive macro
// ============================================================================

/// Derive macro generating a partial-update struct for a record.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, Patch)]
/// struct Todo {
///     pub id: String,
///     pub title: String,
///     pub done: bool,
/// }
///
/// let change = TodoPatch { done: Some(true), ..Default::default() };
/// ```
///
/// Generates `TodoPatch` with every field wrapped in `Option`, plus an
/// `entity_adapter::Patch<Todo>` impl that overwrites exactly the `Some`
/// fields. Values are replaced wholesale, never merged.
///
/// - `#[patch(skip)]` on a field leaves it out of the patch struct.
/// - `#[patch(name = "...")]` on the struct overrides the generated name.
/// - Any other key inside `patch(...)` is a compile error.
#[proc_macro_derive(Patch, attributes(patch))]
pub fn derive_patch(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    patch::derive_patch(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
