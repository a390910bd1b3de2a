//! Domain Layer
//!
//! Contains the todo entity, its derived status and calendar ranges.
//! This layer has no storage or I/O dependencies.

mod calendar;
mod error;
mod todo;

pub use calendar::{day_range, month_range, year_range, DateRange};
pub use error::{DomainError, DomainResult};
pub(crate) use todo::ensure_storable;
pub use todo::{Todo, TodoStatus};
