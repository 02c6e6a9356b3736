//! Enumerations and field types for the to-do board.
//!
//! Defines the closed priority set, the three display buckets, and the typed
//! row actions the UI dispatches on.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task priority. Closed set; serialized lowercase in the store file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

/// The three display groupings a task can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Today,
    Upcoming,
    Completed,
}

/// Row-level actions the UI can dispatch on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    Delete,
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

/// Format a bucket heading for display.
pub fn format_bucket(b: Bucket) -> &'static str {
    match b {
        Bucket::Today => "Today",
        Bucket::Upcoming => "Upcoming",
        Bucket::Completed => "Completed",
    }
}
