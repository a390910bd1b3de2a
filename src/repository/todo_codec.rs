//! Todo collection codec
//!
//! The slot holds the entire collection as one JSON array; every write
//! replaces it wholesale.

use crate::domain::{DomainError, DomainResult, Todo};
use super::traits::KeyValueStore;

/// Read the collection stored under `key`.
///
/// `Ok(None)` when nothing was ever stored. Content that does not parse as
/// an array of todos is `DomainError::CorruptStorage`.
pub fn read_todos<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> DomainResult<Option<Vec<Todo>>> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str::<Vec<Todo>>(&raw)
        .map(Some)
        .map_err(|e| DomainError::CorruptStorage {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Serialize `todos` and overwrite the slot under `key`.
pub fn write_todos<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, todos: &[Todo]) -> DomainResult<()> {
    let raw = serde_json::to_string(todos).map_err(|e| DomainError::Serialization(e.to_string()))?;
    store.set_item(key, &raw)
}
