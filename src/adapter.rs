//! EntityAdapter - stateless operator over [`EntityState`] stores.
//!
//! The adapter knows how to derive an id from a record and, optionally, how to
//! order records for reads. It holds no per-store data, so one adapter can be
//! shared by any number of stores.
//!
//! ## Example
//!
//! ```ignore
//! use entity_adapter::{AdapterConfig, EntityAdapter, Update};
//!
//! let adapter = EntityAdapter::new(
//!     AdapterConfig::new(|todo: &Todo| todo.id.clone())
//!         .with_sort_by(|a: &Todo, b: &Todo| a.title.cmp(&b.title)),
//! );
//!
//! let mut state = adapter.get_initial_state(Page::default());
//! adapter.add_one(&mut state, todo);
//! adapter.update_one(&mut state, Update::new(id, TodoPatch { done: Some(true), ..Default::default() }));
//!
//! let all = adapter.get_selector(&state).select_all();
//! ```

use std::fmt;
use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};
use tracing::{debug, trace, warn};

use crate::config::{AdapterConfig, AddManyMode, SortByFn};
use crate::entity::Entity;
use crate::patch::{Patch, Update};
use crate::selector::Selector;
use crate::state::{Collection, EntityState};

/// Mutation and selector operations for one record type.
pub struct EntityAdapter<K, T> {
    config: AdapterConfig<K, T>,
}

/// Build an adapter from an id extractor and an optional comparator.
pub fn create_entity_adapter<K, T, F>(
    select_id: F,
    sort_by: Option<SortByFn<T>>,
) -> EntityAdapter<K, T>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    let mut config = AdapterConfig::new(select_id);
    config.sort_by = sort_by;
    EntityAdapter::new(config)
}

impl<K, T> EntityAdapter<K, T>
where
    K: Eq + Hash + Clone,
{
    pub fn new(config: AdapterConfig<K, T>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdapterConfig<K, T> {
        &self.config
    }

    /// Id of `entity` according to the configured extractor.
    pub fn select_id(&self, entity: &T) -> K {
        (self.config.select_id)(entity)
    }

    /// A fresh store merged with host-defined fields.
    pub fn get_initial_state<X>(&self, extra: X) -> Collection<X, K, T> {
        Collection {
            extra,
            state: EntityState::default(),
        }
    }

    pub fn get_empty_state(&self) -> EntityState<K, T> {
        EntityState::default()
    }

    /// Insert or overwrite one record. Calling it twice with the same record is
    /// the same as calling it once.
    pub fn add_one(&self, state: &mut EntityState<K, T>, entity: T) {
        let id = self.select_id(&entity);
        state.ids.insert(id.clone());
        state.entities.insert(id, entity);
    }

    /// Replace `entities` with a map built from `entities` in one assignment.
    ///
    /// In [`AddManyMode::Replace`] the id set is left as it was, so records
    /// dropped by the replacement leave stale ids behind and new records have
    /// no id entry. [`AddManyMode::Unify`] rebuilds `ids` from the batch.
    /// Duplicate ids within the batch resolve last-write-wins.
    pub fn add_many<I>(&self, state: &mut EntityState<K, T>, entities: I)
    where
        I: IntoIterator<Item = T>,
    {
        let entities = entities.into_iter();
        let mut payload = IndexMap::with_capacity(entities.size_hint().0);
        for entity in entities {
            let id = self.select_id(&entity);
            payload.insert(id, entity);
        }

        debug!(count = payload.len(), mode = ?self.config.add_many, "add_many");

        match self.config.add_many {
            AddManyMode::Replace => {
                state.entities = payload;
                if !state.is_consistent() {
                    warn!(
                        ids = state.ids.len(),
                        entities = state.entities.len(),
                        "add_many replaced entities without updating ids"
                    );
                }
            }
            AddManyMode::Unify => {
                state.ids = payload.keys().cloned().collect();
                state.entities = payload;
            }
        }
    }

    /// Overwrite a record only if its id is already present in `entities`.
    pub fn set_one(&self, state: &mut EntityState<K, T>, entity: T) {
        let id = self.select_id(&entity);
        match state.entities.get_mut(&id) {
            Some(slot) => *slot = entity,
            None => trace!(op = "set_one", "unknown id, skipped"),
        }
    }

    pub fn set_many<I>(&self, state: &mut EntityState<K, T>, entities: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut count = 0usize;
        for entity in entities {
            self.set_one(state, entity);
            count += 1;
        }
        debug!(count, "set_many");
    }

    /// Delete `id` from both `ids` and `entities`. Remaining entries keep
    /// their relative order.
    ///
    /// `id` may be any borrowed form of the key, e.g. `&str` for `String` ids.
    pub fn remove_one<Q>(&self, state: &mut EntityState<K, T>, id: &Q)
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let in_ids = state.ids.shift_remove(id);
        let in_entities = state.entities.shift_remove(id).is_some();
        if !in_ids && !in_entities {
            trace!(op = "remove_one", "unknown id, skipped");
        }
    }

    /// [`remove_one`](Self::remove_one) for each id, independently.
    ///
    /// Every removal shifts the entries behind it to keep order, so removing
    /// `m` ids from a store of `n` records costs O(n * m).
    pub fn remove_all<'i, Q, I>(&self, state: &mut EntityState<K, T>, ids: I)
    where
        Q: ?Sized + Hash + Equivalent<K> + 'i,
        I: IntoIterator<Item = &'i Q>,
    {
        let mut count = 0usize;
        for id in ids {
            self.remove_one(state, id);
            count += 1;
        }
        debug!(count, remaining = state.len(), "remove_all");
    }

    /// Shallow-merge `update.change` into the stored record. The record keeps
    /// its key and position; the key is not re-derived from the patched record.
    pub fn update_one<P>(&self, state: &mut EntityState<K, T>, update: Update<K, P>)
    where
        P: Patch<T>,
    {
        match state.entities.get_mut(&update.id) {
            Some(entity) => update.change.apply(entity),
            None => trace!(op = "update_one", "unknown id, skipped"),
        }
    }

    pub fn update_many<P, I>(&self, state: &mut EntityState<K, T>, updates: I)
    where
        P: Patch<T>,
        I: IntoIterator<Item = Update<K, P>>,
    {
        let mut count = 0usize;
        for update in updates {
            self.update_one(state, update);
            count += 1;
        }
        debug!(count, "update_many");
    }

    /// Read-only view of `state` ordered by this adapter's comparator.
    pub fn get_selector<'a>(&'a self, state: &'a EntityState<K, T>) -> Selector<'a, K, T> {
        Selector::new(state, self.config.sort_by.as_ref())
    }
}

impl<K, T> EntityAdapter<K, T>
where
    K: Eq + Hash + Clone + 'static,
    T: Entity<Id = K> + 'static,
{
    /// Adapter whose ids come from [`Entity::id`].
    pub fn for_entity() -> Self {
        Self::new(AdapterConfig::new(|entity: &T| entity.id()))
    }
}

impl<K, T> Clone for EntityAdapter<K, T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl<K, T> fmt::Debug for EntityAdapter<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityAdapter")
            .field("config", &self.config)
            .finish()
    }
}
