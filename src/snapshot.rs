//! Snapshots of an [`EntityState`].
//!
//! The store is encoded with bitcode. A [`StateSnapshot`] is itself serde
//! serializable; in JSON its payload is a base64 string.

use std::fmt;
use std::hash::Hash;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::adapter::EntityAdapter;
use crate::state::EntityState;

/// Error when encoding or decoding a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The store could not be encoded.
    Encode(String),
    /// The payload could not be decoded into a store.
    Decode(String),
    /// The snapshot could not be converted to or from JSON.
    Json(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Encode(msg) => write!(f, "snapshot encode error: {}", msg),
            SnapshotError::Decode(msg) => write!(f, "snapshot decode error: {}", msg),
            SnapshotError::Json(msg) => write!(f, "snapshot json error: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Encoded copy of a store at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Number of records in `entities` when the snapshot was taken.
    pub len: usize,
    #[serde(with = "payload_serde")]
    pub payload: Vec<u8>,
}

mod payload_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(payload: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(payload).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

impl StateSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))
    }
}

impl<K, T> EntityAdapter<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Encode `state`, including any divergence between `ids` and `entities`.
    pub fn snapshot(&self, state: &EntityState<K, T>) -> Result<StateSnapshot, SnapshotError>
    where
        K: Serialize,
        T: Serialize,
    {
        let payload =
            bitcode::serialize(state).map_err(|e| SnapshotError::Encode(e.to_string()))?;
        debug!(len = state.len(), bytes = payload.len(), "snapshot taken");
        Ok(StateSnapshot {
            len: state.len(),
            payload,
        })
    }

    /// Rebuild a store from `snapshot`, preserving id and record order.
    pub fn restore(&self, snapshot: &StateSnapshot) -> Result<EntityState<K, T>, SnapshotError>
    where
        K: DeserializeOwned,
        T: DeserializeOwned,
    {
        let state: EntityState<K, T> = bitcode::deserialize(&snapshot.payload)
            .map_err(|e| SnapshotError::Decode(e.to_string()))?;
        debug!(len = state.len(), "snapshot restored");
        Ok(state)
    }
}
