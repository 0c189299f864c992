//! EntityState - the normalized collection store.
//!
//! Pure data: an ordered set of ids plus an ordered id -> record map.
//! All mutation goes through [`EntityAdapter`](crate::EntityAdapter).

use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Normalized storage for one collection of records.
///
/// `ids` and `entities` are expected to hold the same key set. The only
/// operation that breaks this is `add_many` in
/// [`AddManyMode::Replace`](crate::AddManyMode::Replace).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, T: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash, T: Deserialize<'de>"
))]
pub struct EntityState<K, T> {
    pub ids: IndexSet<K>,
    pub entities: IndexMap<K, T>,
}

impl<K, T> Default for EntityState<K, T> {
    fn default() -> Self {
        Self {
            ids: IndexSet::default(),
            entities: IndexMap::default(),
        }
    }
}

impl<K: Eq + Hash, T: PartialEq> PartialEq for EntityState<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids && self.entities == other.entities
    }
}

impl<K: Eq + Hash, T: Eq> Eq for EntityState<K, T> {}

impl<K: Eq + Hash, T> EntityState<K, T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in `entities`.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True when `ids` and the key set of `entities` are identical.
    pub fn is_consistent(&self) -> bool {
        self.ids.len() == self.entities.len()
            && self.ids.iter().all(|id| self.entities.contains_key(id))
    }
}

/// An [`EntityState`] embedded next to host-defined fields.
///
/// Derefs to the inner state, so every adapter operation accepts
/// `&mut Collection` directly. Serializes flat: `{ ...extra, ids, entities }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "X: Serialize, K: Serialize, T: Serialize",
    deserialize = "X: Deserialize<'de>, K: Deserialize<'de> + Eq + Hash, T: Deserialize<'de>"
))]
pub struct Collection<X, K, T> {
    #[serde(flatten)]
    pub extra: X,
    #[serde(flatten)]
    pub state: EntityState<K, T>,
}

impl<X: Default, K, T> Default for Collection<X, K, T> {
    fn default() -> Self {
        Self {
            extra: X::default(),
            state: EntityState::default(),
        }
    }
}

impl<X: PartialEq, K: Eq + Hash, T: PartialEq> PartialEq for Collection<X, K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.extra == other.extra && self.state == other.state
    }
}

impl<X, K, T> Collection<X, K, T> {
    pub fn into_parts(self) -> (X, EntityState<K, T>) {
        (self.extra, self.state)
    }
}

impl<X, K, T> Deref for Collection<X, K, T> {
    type Target = EntityState<K, T>;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<X, K, T> DerefMut for Collection<X, K, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}
