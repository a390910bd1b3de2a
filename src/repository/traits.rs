//! Repository Layer - Core Traits
//!
//! Defines the durable key/value slot abstraction.
//! Implementations can use the filesystem, in-memory maps, etc.

use crate::domain::DomainResult;

/// Synchronous string key/value storage
///
/// Each `set_item` replaces the whole value under `key`.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when the key was never written
    fn get_item(&self, key: &str) -> DomainResult<Option<String>>;

    /// Overwrite the value under `key`
    fn set_item(&mut self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove the value under `key`; removing a missing key is a no-op
    fn remove_item(&mut self, key: &str) -> DomainResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> DomainResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> DomainResult<()> {
        (**self).remove_item(key)
    }
}
