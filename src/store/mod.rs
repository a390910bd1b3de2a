//! Todo Store
//!
//! Single source of truth for the todo collection. Every mutation is
//! written through to the storage slot before the call returns.
//! Derived views live in `views`.

mod clock;
mod views;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::{ensure_storable, DomainError, DomainResult, Todo};
use crate::repository::{read_todos, write_todos, KeyValueStore};

pub use clock::{Clock, FixedClock, SystemClock};
pub use views::StatusSummary;

/// In-memory todo collection mirrored to one key of a `KeyValueStore`
pub struct TodoStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    key: String,
    clock: C,
    todos: Vec<Todo>,
    /// `None` once every id up to `u64::MAX` has been handed out
    next_id: Option<u64>,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Load the collection stored under `key` using the wall clock.
    pub fn load(storage: S, key: impl Into<String>) -> DomainResult<Self> {
        Self::load_with_clock(storage, key, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> TodoStore<S, C> {
    /// Load the collection stored under `key`.
    ///
    /// An absent slot starts an empty collection. Malformed content is
    /// returned as `DomainError::CorruptStorage` and the slot is left as is.
    pub fn load_with_clock(storage: S, key: impl Into<String>, clock: C) -> DomainResult<Self> {
        let key = key.into();
        let todos = match read_todos(&storage, &key) {
            Ok(todos) => todos.unwrap_or_default(),
            Err(e) => {
                log::error!("[TodoStore] Failed to load '{}': {}", key, e);
                return Err(e);
            }
        };

        let mut seen = HashSet::with_capacity(todos.len());
        if let Some(dup) = todos.iter().find(|t| !seen.insert(t.id)) {
            log::warn!("[TodoStore] Duplicate todo id {} in '{}'", dup.id, key);
        }

        let next_id = next_id_after(&todos);
        log::info!(
            "[TodoStore] Loaded {} todo(s) from '{}', next id {:?}",
            todos.len(),
            key,
            next_id
        );

        Ok(Self {
            storage,
            key,
            clock,
            todos,
            next_id,
        })
    }

    /// Append a new uncompleted todo and persist. Returns its id.
    ///
    /// The title is not validated here. Timestamps outside years
    /// 0000-9999 are rejected with `InvalidInput` before an id is taken.
    /// If the write fails the todo is dropped again, but its id stays
    /// consumed.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> DomainResult<u64> {
        let created_at = self.clock.now();
        if let Some(due) = due_date {
            ensure_storable("dueDate", due)?;
        }
        ensure_storable("createdAt", created_at)?;

        let id = self.next_id.ok_or(DomainError::IdsExhausted)?;
        self.next_id = id.checked_add(1);

        let todo = Todo::new(id, title, text, due_date, created_at);
        self.todos.push(todo);

        if let Err(e) = self.persist() {
            self.todos.pop();
            log::warn!("[TodoStore] Reverted add of todo {}: {}", id, e);
            return Err(e);
        }

        log::debug!("[TodoStore] Added todo {}", id);
        Ok(id)
    }

    pub fn get_todo_by_id(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Lookup by an id taken from a URL segment; malformed ids are absent.
    pub fn get_todo_by_path_id(&self, raw: &str) -> Option<&Todo> {
        raw.trim()
            .parse::<u64>()
            .ok()
            .and_then(|id| self.get_todo_by_id(id))
    }

    /// Flip `completed` and persist.
    ///
    /// Returns the new flag, or `None` when no todo has `id`.
    pub fn toggle_todo(&mut self, id: u64) -> DomainResult<Option<bool>> {
        let Some(index) = self.todos.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let completed = !self.todos[index].completed;
        self.todos[index].completed = completed;

        if let Err(e) = self.persist() {
            self.todos[index].completed = !completed;
            log::warn!("[TodoStore] Reverted toggle of todo {}: {}", id, e);
            return Err(e);
        }

        log::debug!("[TodoStore] Todo {} completed={}", id, completed);
        Ok(Some(completed))
    }

    /// All todos in insertion order
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Id the next `add` will assign, `None` when ids are exhausted
    pub fn next_id(&self) -> Option<u64> {
        self.next_id
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn persist(&mut self) -> DomainResult<()> {
        write_todos(&mut self.storage, &self.key, &self.todos)
    }
}

fn next_id_after(todos: &[Todo]) -> Option<u64> {
    match todos.iter().map(|t| t.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
