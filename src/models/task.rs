use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::worker::Zone;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            other => Err(format!("unsupported task status: {other}")),
        }
    }
}

/// A recurring task as configured for one space of the household.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub id: String,
    pub space_id: String,
    pub name: String,
    pub estimated_minutes: Option<u32>,
}

/// One historical execution of a task instance, as produced by the scheduling system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletionRecord {
    pub task_id: String,
    pub space_id: String,
    pub worker_id: Option<String>,
    pub scheduled_date: NaiveDate,
    /// Configured estimate of the task at read time, when the task defines one.
    pub estimated_minutes: Option<u32>,
    pub actual_minutes: Option<u32>,
    pub rating: Option<u8>,
    pub status: TaskStatus,
}

impl TaskCompletionRecord {
    /// Completed with a recorded duration, zero included.
    pub fn measured_minutes(&self) -> Option<u32> {
        if !self.status.is_completed() {
            return None;
        }
        self.actual_minutes
    }

    /// Completed with a positive duration; safe as a ratio denominator.
    pub fn timed_minutes(&self) -> Option<u32> {
        if !self.status.is_completed() {
            return None;
        }
        self.actual_minutes.filter(|minutes| *minutes > 0)
    }

    /// Ratings outside 1..=5 are treated as unrated.
    pub fn valid_rating(&self) -> Option<u8> {
        self.rating.filter(|rating| (1..=5).contains(rating))
    }
}

/// A task instance scheduled for a given date, assigned or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub task_id: String,
    pub space_id: String,
    pub worker_id: Option<String>,
    pub zone: Zone,
}

impl ScheduledTask {
    pub fn unassigned(task_id: impl Into<String>, space_id: impl Into<String>, zone: Zone) -> Self {
        Self {
            task_id: task_id.into(),
            space_id: space_id.into(),
            worker_id: None,
            zone,
        }
    }
}
