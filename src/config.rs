//! Adapter configuration: id extraction, optional read-time ordering and
//! the `add_many` behavior switch.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Derives the id of a record. Must be total and deterministic.
pub type SelectIdFn<K, T> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Orders records at read time. Never consulted on write.
pub type SortByFn<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// How `add_many` treats the id set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddManyMode {
    /// Replace `entities` wholesale with the batch and leave `ids` untouched.
    ///
    /// Records missing from the batch disappear from `entities` while their
    /// ids stay behind, so `ids` and `entities` can diverge.
    #[default]
    Replace,
    /// Replace `entities` wholesale and rebuild `ids` from the same batch.
    Unify,
}

/// Construction parameters for an [`EntityAdapter`](crate::EntityAdapter).
pub struct AdapterConfig<K, T> {
    pub select_id: SelectIdFn<K, T>,
    pub sort_by: Option<SortByFn<T>>,
    pub add_many: AddManyMode,
}

impl<K, T> AdapterConfig<K, T> {
    /// Config with the given id extractor, no ordering and `AddManyMode::Replace`.
    pub fn new<F>(select_id: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            select_id: Arc::new(select_id),
            sort_by: None,
            add_many: AddManyMode::default(),
        }
    }

    /// Sort records returned by `select_all` with `compare`.
    pub fn with_sort_by<F>(mut self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.sort_by = Some(Arc::new(compare));
        self
    }

    pub fn with_add_many_mode(mut self, mode: AddManyMode) -> Self {
        self.add_many = mode;
        self
    }
}

impl<K, T> Clone for AdapterConfig<K, T> {
    fn clone(&self) -> Self {
        Self {
            select_id: Arc::clone(&self.select_id),
            sort_by: self.sort_by.clone(),
            add_many: self.add_many,
        }
    }
}

impl<K, T> fmt::Debug for AdapterConfig<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("sort_by", &self.sort_by.is_some())
            .field("add_many", &self.add_many)
            .finish_non_exhaustive()
    }
}
