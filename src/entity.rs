use std::hash::Hash;

/// A record that carries its own identifier.
///
/// Usually derived:
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
/// Without `#[entity(id)]` the derive uses a field named `id`.
pub trait Entity {
    type Id: Eq + Hash + Clone;

    fn id(&self) -> Self::Id;
}
