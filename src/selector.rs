//! Read-only views over an [`EntityState`].

use std::hash::Hash;

use indexmap::Equivalent;

use crate::config::SortByFn;
use crate::state::EntityState;

/// Read-only query view produced by
/// [`EntityAdapter::get_selector`](crate::EntityAdapter::get_selector).
///
/// Holds a shared borrow of the store, so the store cannot be mutated while a
/// selector is alive.
pub struct Selector<'a, K, T> {
    state: &'a EntityState<K, T>,
    sort_by: Option<&'a SortByFn<T>>,
}

impl<'a, K, T> Selector<'a, K, T>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new(state: &'a EntityState<K, T>, sort_by: Option<&'a SortByFn<T>>) -> Self {
        Self { state, sort_by }
    }

    /// All records in `entities`, in map order, then sorted by the adapter's
    /// comparator if one is configured. Sorts on every call.
    pub fn select_all(&self) -> Vec<&'a T> {
        let mut values: Vec<&'a T> = self.state.entities.values().collect();
        if let Some(sort_by) = self.sort_by {
            values.sort_by(|a, b| sort_by(*a, *b));
        }
        values
    }

    /// The record stored under `id`, if any. `id` may be any borrowed form
    /// of the key.
    pub fn select_one<Q>(&self, id: &Q) -> Option<&'a T>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.state.entities.get(id)
    }

    /// Ids in `ids` order. Never re-sorted by the comparator.
    pub fn get_ids(&self) -> Vec<K> {
        self.state.ids.iter().cloned().collect()
    }

    pub fn select_total(&self) -> usize {
        self.state.entities.len()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.state.entities.contains_key(id)
    }
}
