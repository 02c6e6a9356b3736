//! Task data structure.
//!
//! A task is one to-do entry: name, due date, priority, and a completion flag.
//! The `id` is assigned at creation time and is the task's sole identifier for
//! toggle/delete; it never changes and is never reused within a store file
//! (ids are allocated as max-existing + 1).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    /// Due date, day granularity only. Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new open task.
    pub fn new(id: u64, name: impl Into<String>, date: NaiveDate, priority: Priority) -> Self {
        Task {
            id,
            name: name.into(),
            date,
            priority,
            completed: false,
        }
    }
}
