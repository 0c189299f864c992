//! Partial updates for stored records.
//!
//! A patch is a shallow merge: it overwrites the fields it carries and leaves
//! every other field alone. Nested values are replaced wholesale, never merged.
//! `#[derive(Patch)]` generates a `<Name>Patch` struct with one `Option` per
//! field; closures can be used through [`PatchFn`].

/// A set of field overwrites applicable to a `T`.
pub trait Patch<T> {
    fn apply(self, target: &mut T);
}

/// Wraps a closure as a [`Patch`].
///
/// ```ignore
/// adapter.update_one(&mut state, Update::new(id, PatchFn(|todo: &mut Todo| todo.done = true)));
/// ```
pub struct PatchFn<F>(pub F);

impl<T, F> Patch<T> for PatchFn<F>
where
    F: FnOnce(&mut T),
{
    fn apply(self, target: &mut T) {
        (self.0)(target)
    }
}

/// Id plus change payload consumed by `update_one` / `update_many`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update<K, P> {
    pub id: K,
    pub change: P,
}

impl<K, P> Update<K, P> {
    pub fn new(id: K, change: P) -> Self {
        Self { id, change }
    }
}

impl<K, P> From<(K, P)> for Update<K, P> {
    fn from((id, change): (K, P)) -> Self {
        Self { id, change }
    }
}
