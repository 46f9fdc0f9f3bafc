//! Task types shared between the remote service and the client.
//!
//! The remote service owns every task; the client holds a typed,
//! validated copy. Optional schedule fields use calendar-day dates
//! (`YYYY-MM-DD`) and minute-resolution times (`HH:MM`) on the wire.
//!
//! ## Ordering semantics
//!
//! `order` is meaningful only among tasks with neither `date` nor
//! `time` set; scheduled tasks sort by their combined date+time (see
//! [`ordering`]). `created_at` is the fallback key when `order` is
//! absent.

pub mod ordering;
pub mod views;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Serde helper for optional `HH:MM` times.
///
/// The service emits minute-resolution times; `HH:MM:SS` is accepted
/// on input for tolerance.
pub(crate) mod hm_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const MINUTE_FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, MINUTE_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.format(MINUTE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// Parse a `HH:MM` (or `HH:MM:SS`) time-of-day string.
pub fn parse_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    hm_time::parse(raw)
}

/// A read-only breakdown item attached to a task.
///
/// Subtasks are produced by the external breakdown service and never
/// edited by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Estimated minutes for this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

/// A task as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque stable identifier, unique across the remote store.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calendar date, no time component.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Time of day, meaningful alongside `date` semantics.
    #[serde(default, with = "hm_time")]
    pub time: Option<NaiveTime>,
    pub is_done: bool,
    /// Estimated minutes for the whole task.
    #[serde(default)]
    pub total_estimated_time: Option<u32>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    /// Manual position among unscheduled, incomplete tasks.
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Whether the task carries any schedule signal.
    pub fn has_schedule(&self) -> bool {
        self.date.is_some() || self.time.is_some()
    }

    /// Combined date+time sort key for scheduled tasks.
    ///
    /// A missing date counts as the epoch day, a missing time as
    /// midnight, so partially scheduled tasks still order
    /// deterministically.
    pub fn schedule_key(&self) -> NaiveDateTime {
        let date = self
            .date
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.date_naive());
        let time = self.time.unwrap_or(NaiveTime::MIN);
        date.and_time(time)
    }

    /// Creation-time sort key; tasks without one count as epoch
    /// (oldest).
    pub fn created_key(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Sum of subtask estimates, falling back to the task's own
    /// estimate when there are no subtasks (or their estimates sum
    /// to zero).
    pub fn effective_estimated_time(&self) -> u32 {
        let subtask_total: u32 = self
            .sub_tasks
            .iter()
            .filter_map(|s| s.estimated_time)
            .sum();
        if subtask_total > 0 {
            subtask_total
        } else {
            self.total_estimated_time.unwrap_or(0)
        }
    }

    /// Boundary validation applied to tasks received from the
    /// service. Typed deserialization already rejects malformed
    /// dates and times; this catches shape-valid but nonsensical
    /// records.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Payload for creating a task. Title is the only required field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(with = "hm_time", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_time: Option<u32>,
}

impl NewTask {
    /// Build a creation payload, rejecting an empty title locally so
    /// no request is sent for it.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            title: title.trim().to_string(),
            description: None,
            date: None,
            time: None,
            total_estimated_time: None,
        })
    }
}

/// Full-replace payload for `PUT /api/tasks/{id}`.
///
/// The service expects every editable field plus explicit
/// `hasDate`/`hasTime` flags; a cleared schedule field is sent as
/// `null`, not omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    #[serde(with = "hm_time")]
    pub time: Option<NaiveTime>,
    pub has_date: bool,
    pub has_time: bool,
    pub total_estimated_time: Option<u32>,
}

impl TaskUpdate {
    /// Start from a task's current editable fields.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            date: task.date,
            time: task.time,
            has_date: task.date.is_some(),
            has_time: task.time.is_some(),
            total_estimated_time: task.total_estimated_time,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Bare unscheduled task for unit tests across the task modules.
#[cfg(test)]
pub(crate) fn sample_task(id: &str) -> Task {
    Task {
        id: id.into(),
        title: format!("task {id}"),
        description: None,
        date: None,
        time: None,
        is_done: false,
        total_estimated_time: None,
        sub_tasks: Vec::new(),
        order: None,
        created_at: None,
    }
}
