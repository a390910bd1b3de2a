//! FileYourFacts to-do store
//!
//! Layered architecture:
//! - domain: Todo entity, status derivation and calendar ranges
//! - repository: Durable key/value storage and the collection codec
//! - store: The in-memory collection with write-through persistence
//! - app: Composition root wiring config, logging and storage

mod app;
mod config;
mod domain;
mod repository;
mod route;
mod store;

pub use app::{App, View};
pub use config::{AppConfig, APP_NAME, DEFAULT_STORAGE_KEY};
pub use domain::{
    day_range, month_range, year_range, DateRange, DomainError, DomainResult, Todo, TodoStatus,
};
pub use repository::{read_todos, write_todos, FileStore, KeyValueStore, MemoryStore};
pub use route::Route;
pub use store::{Clock, FixedClock, StatusSummary, SystemClock, TodoStore};
