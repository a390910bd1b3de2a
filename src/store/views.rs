//! Derived views
//!
//! Read-only filtered subsets of the collection, recomputed on every call.
//! Calendar queries use the local time zone.

use chrono::{DateTime, Local, Month, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{day_range, month_range, year_range, DateRange, Todo, TodoStatus};
use crate::repository::KeyValueStore;
use super::{Clock, TodoStore};

/// Per-status counts for the overview page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub on_time: usize,
    pub late: usize,
}

impl<S: KeyValueStore, C: Clock> TodoStore<S, C> {
    /// Todos due on the local calendar day `date`
    pub fn todos_for_date(&self, date: NaiveDate) -> Vec<&Todo> {
        self.todos_in(day_range(&Local, date))
    }

    /// Todos due in `month` of `year`, local time
    pub fn todos_for_month(&self, year: i32, month: Month) -> Vec<&Todo> {
        self.todos_in(month_range(&Local, year, month))
    }

    /// Todos due in the calendar `year`, local time
    pub fn todos_for_year(&self, year: i32) -> Vec<&Todo> {
        self.todos_in(year_range(&Local, year))
    }

    /// Todos whose due date lies inside `range`, bounds included
    pub fn todos_in_range(&self, range: &DateRange) -> Vec<&Todo> {
        self.todos.iter().filter(|t| t.is_due_within(range)).collect()
    }

    fn todos_in(&self, range: Option<DateRange>) -> Vec<&Todo> {
        range.map(|r| self.todos_in_range(&r)).unwrap_or_default()
    }

    pub fn completed_todos(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| t.completed).collect()
    }

    pub fn pending_todos(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| !t.completed).collect()
    }

    /// Uncompleted todos whose deadline is still ahead
    pub fn on_time_todos(&self) -> Vec<&Todo> {
        self.todos_with_status(TodoStatus::OnTime, self.clock.now())
    }

    /// Uncompleted todos whose deadline has passed
    pub fn late_todos(&self) -> Vec<&Todo> {
        self.todos_with_status(TodoStatus::Late, self.clock.now())
    }

    pub fn todos_with_status(&self, status: TodoStatus, now: DateTime<Utc>) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|t| t.status_at(now) == status)
            .collect()
    }

    pub fn summary(&self) -> StatusSummary {
        let now = self.clock.now();
        self.todos.iter().fold(
            StatusSummary {
                total: self.todos.len(),
                ..Default::default()
            },
            |mut acc, todo| {
                if todo.completed {
                    acc.completed += 1;
                } else {
                    acc.pending += 1;
                }
                match todo.status_at(now) {
                    TodoStatus::OnTime => acc.on_time += 1,
                    TodoStatus::Late => acc.late += 1,
                    TodoStatus::Completed | TodoStatus::Pending => {}
                }
                acc
            },
        )
    }
}
