//! Serde adapter for aggregate slots.
//!
//! The persisted form stores bare specific values: a slot whose cell has
//! no override is omitted entirely (absence means "inherit"), and a value
//! read back becomes a fresh cell with that value as its override and no
//! parent. Parents are rewired programmatically after load, never stored.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cell::Param;

/// Whether a slot should be left out of the persisted form. A missing
/// cell and a cell with no specific value both carry no information
/// worth writing.
pub fn is_unset<T>(slot: &Option<Arc<Param<T>>>) -> bool {
    match slot {
        Some(cell) => !cell.is_specific(),
        None => true,
    }
}

/// Serialize the slot as its bare specific value.
pub fn serialize<T, S>(slot: &Option<Arc<Param<T>>>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + Clone,
    S: Serializer,
{
    match slot.as_ref().and_then(|cell| cell.specific()) {
        Some(value) => value.serialize(serializer),
        // Unset slots are skipped by is_unset; this arm keeps the adapter
        // total for callers that serialize without the skip.
        None => serializer.serialize_none(),
    }
}

/// Deserialize a bare value into a fresh unwired cell.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Arc<Param<T>>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let value = T::deserialize(deserializer)?;
    let cell = Param::new();
    cell.set_specific(Some(value));
    Ok(Some(Arc::new(cell)))
}
