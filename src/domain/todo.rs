//! Todo Entity
//!
//! A single task record with an optional deadline and a completion flag.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::DateRange;
use super::error::{DomainError, DomainResult};

/// Years a timestamp can carry without the extended `±YYYYYY` ISO form
const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Derived status of a todo relative to a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// Marked done, regardless of deadline
    Completed,
    /// Not done, deadline still ahead
    OnTime,
    /// Not done, deadline already passed
    Late,
    /// Not done, no deadline or due exactly now
    Pending,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Completed => "completed",
            TodoStatus::OnTime => "ontime",
            TodoStatus::Late => "late",
            TodoStatus::Pending => "pending",
        }
    }
}

/// A todo as persisted in the storage slot
///
/// Field names serialize in camelCase (`dueDate`, `createdAt`) and
/// timestamps as ISO-8601 strings with millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique, never reused
    pub id: u64,
    pub title: String,
    /// Free-form body, empty when not given
    #[serde(default)]
    pub text: String,
    /// `None` means no deadline
    #[serde(default, with = "iso_millis::option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    /// Set at creation, immutable thereafter
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Create an uncompleted todo. Timestamps are truncated to milliseconds.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        text: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
            due_date: due_date.map(|d| d.trunc_subsecs(3)),
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    pub fn has_deadline(&self) -> bool {
        self.due_date.is_some()
    }

    /// Whether the deadline falls inside `range`. Todos without one never match.
    pub fn is_due_within(&self, range: &DateRange) -> bool {
        self.due_date.is_some_and(|due| range.contains(due))
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> TodoStatus {
        if self.completed {
            return TodoStatus::Completed;
        }
        match self.due_date {
            Some(due) if due > now => TodoStatus::OnTime,
            Some(due) if due < now => TodoStatus::Late,
            _ => TodoStatus::Pending,
        }
    }
}

/// Reject timestamps whose ISO-8601 form could not be read back on load.
pub(crate) fn ensure_storable(field: &str, ts: DateTime<Utc>) -> DomainResult<()> {
    if STORABLE_YEARS.contains(&ts.year()) {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!(
            "{} {} is outside years 0000-9999",
            field, ts
        )))
    }
}

/// Serde adapter for `DateTime<Utc>` as `2024-05-01T12:00:00.000Z`.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc).trunc_subsecs(3))
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_str(&super::format(ts)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw).map(Some).map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
