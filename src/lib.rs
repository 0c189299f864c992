//! Normalized, sorted in-memory entity collections.
//!
//! An [`EntityState`] holds an ordered id set and an id -> record map. An
//! [`EntityAdapter`] knows how to derive ids from records and applies batch
//! add / set / remove / update operations to any store of its record type,
//! then exposes read-only [`Selector`]s that sort on read.

// Lets the derive macros refer to `entity_adapter::...` from inside this crate.
extern crate self as entity_adapter;

mod adapter;
mod config;
mod entity;
mod patch;
mod selector;
mod snapshot;
mod state;
#[cfg(feature = "status")]
pub mod status;

pub use adapter::{create_entity_adapter, EntityAdapter};
pub use config::{AdapterConfig, AddManyMode, SelectIdFn, SortByFn};
pub use entity::Entity;
pub use patch::{Patch, PatchFn, Update};
pub use selector::Selector;
pub use snapshot::{SnapshotError, StateSnapshot};
pub use state::{Collection, EntityState};
#[cfg(feature = "status")]
pub use status::{reducer, Status, StatusPayload, StatusReducer};

// Derive macros share their trait's name, like serde's `Serialize`.
pub use entity_adapter_macros::{Entity, Patch};
