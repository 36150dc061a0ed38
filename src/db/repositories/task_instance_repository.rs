use std::convert::TryFrom;

use chrono::{NaiveDate, Utc};
use rusqlite::{named_params, Connection, Row};
use uuid::Uuid;

use crate::db::repositories::space_repository::positive_minutes;
use crate::error::{AppError, AppResult};
use crate::models::task::{ScheduledTask, TaskCompletionRecord, TaskStatus};
use crate::models::worker::Zone;

const DATE_FORMAT: &str = "%Y-%m-%d";

const HISTORY_SELECT: &str = r#"
    SELECT
        ti.task_id,
        ti.space_id,
        ti.worker_id,
        ti.scheduled_date,
        t.estimated_minutes,
        ti.actual_minutes,
        ti.quality_rating,
        ti.status
    FROM task_instances ti
    LEFT JOIN space_tasks t ON t.id = ti.task_id AND t.space_id = ti.space_id
"#;

#[derive(Debug, Clone)]
pub struct TaskHistoryRow {
    pub task_id: String,
    pub space_id: String,
    pub worker_id: Option<String>,
    pub scheduled_date: String,
    pub estimated_minutes: Option<i64>,
    pub actual_minutes: Option<i64>,
    pub quality_rating: Option<i64>,
    pub status: String,
}

impl TaskHistoryRow {
    pub fn into_record(self) -> AppResult<TaskCompletionRecord> {
        Ok(TaskCompletionRecord {
            task_id: self.task_id,
            space_id: self.space_id,
            worker_id: self.worker_id,
            scheduled_date: parse_date(&self.scheduled_date)?,
            estimated_minutes: positive_minutes(self.estimated_minutes),
            actual_minutes: self
                .actual_minutes
                .filter(|minutes| *minutes >= 0)
                .and_then(|minutes| u32::try_from(minutes).ok()),
            rating: self
                .quality_rating
                .and_then(|rating| u8::try_from(rating).ok()),
            status: TaskStatus::try_from(self.status.as_str()).map_err(AppError::validation)?,
        })
    }
}

impl TryFrom<&Row<'_>> for TaskHistoryRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            task_id: row.get("task_id")?,
            space_id: row.get("space_id")?,
            worker_id: row.get("worker_id")?,
            scheduled_date: row.get("scheduled_date")?,
            estimated_minutes: row.get("estimated_minutes")?,
            actual_minutes: row.get("actual_minutes")?,
            quality_rating: row.get("quality_rating")?,
            status: row.get("status")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScheduledTaskRow {
    pub task_id: String,
    pub space_id: String,
    pub worker_id: Option<String>,
    pub zone: String,
}

impl ScheduledTaskRow {
    pub fn into_record(self) -> AppResult<ScheduledTask> {
        Ok(ScheduledTask {
            task_id: self.task_id,
            space_id: self.space_id,
            worker_id: self.worker_id,
            zone: Zone::try_from(self.zone.as_str()).map_err(AppError::validation)?,
        })
    }
}

impl TryFrom<&Row<'_>> for ScheduledTaskRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            task_id: row.get("task_id")?,
            space_id: row.get("space_id")?,
            worker_id: row.get("worker_id")?,
            zone: row.get("zone")?,
        })
    }
}

/// A task instance as written by the scheduling system.
#[derive(Debug, Clone)]
pub struct TaskInstanceInsert {
    pub household_id: String,
    pub task_id: String,
    pub space_id: String,
    pub worker_id: Option<String>,
    pub scheduled_date: NaiveDate,
    pub status: TaskStatus,
    pub actual_minutes: Option<u32>,
    pub rating: Option<u8>,
    /// RFC 3339; defaults to now for completed instances.
    pub completed_at: Option<String>,
}

impl TaskInstanceInsert {
    pub fn scheduled(
        household_id: impl Into<String>,
        task_id: impl Into<String>,
        space_id: impl Into<String>,
        worker_id: Option<&str>,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            household_id: household_id.into(),
            task_id: task_id.into(),
            space_id: space_id.into(),
            worker_id: worker_id.map(str::to_string),
            scheduled_date,
            status: TaskStatus::Pending,
            actual_minutes: None,
            rating: None,
            completed_at: None,
        }
    }

    pub fn completed(mut self, actual_minutes: Option<u32>, rating: Option<u8>) -> Self {
        self.status = TaskStatus::Completed;
        self.actual_minutes = actual_minutes;
        self.rating = rating;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn completed_at(mut self, completed_at: impl Into<String>) -> Self {
        self.completed_at = Some(completed_at.into());
        self
    }
}

pub struct TaskInstanceRepository;

impl TaskInstanceRepository {
    pub fn insert(conn: &Connection, input: &TaskInstanceInsert) -> AppResult<String> {
        if let Some(rating) = input.rating {
            if !(1..=5).contains(&rating) {
                return Err(AppError::validation("quality rating must be between 1 and 5"));
            }
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let completed_at = match (&input.completed_at, input.status) {
            (Some(value), _) => Some(value.clone()),
            (None, TaskStatus::Completed) => Some(now.clone()),
            (None, _) => None,
        };

        conn.execute(
            r#"
                INSERT INTO task_instances (
                    id,
                    household_id,
                    task_id,
                    space_id,
                    worker_id,
                    scheduled_date,
                    status,
                    actual_minutes,
                    quality_rating,
                    completed_at,
                    created_at
                ) VALUES (
                    :id,
                    :household_id,
                    :task_id,
                    :space_id,
                    :worker_id,
                    :scheduled_date,
                    :status,
                    :actual_minutes,
                    :quality_rating,
                    :completed_at,
                    :created_at
                )
            "#,
            named_params! {
                ":id": &id,
                ":household_id": &input.household_id,
                ":task_id": &input.task_id,
                ":space_id": &input.space_id,
                ":worker_id": &input.worker_id,
                ":scheduled_date": input.scheduled_date.format(DATE_FORMAT).to_string(),
                ":status": input.status.as_str(),
                ":actual_minutes": &input.actual_minutes,
                ":quality_rating": &input.rating,
                ":completed_at": &completed_at,
                ":created_at": &now,
            },
        )?;

        Ok(id)
    }

    /// Completed, timed executions of a task in a space, newest first.
    pub fn list_completions(
        conn: &Connection,
        task_id: &str,
        space_id: &str,
        limit: usize,
    ) -> AppResult<Vec<TaskCompletionRecord>> {
        let mut stmt = conn.prepare(&format!(
            r#"
                {HISTORY_SELECT}
                WHERE ti.task_id = :task_id
                  AND ti.space_id = :space_id
                  AND ti.status = 'completed'
                  AND ti.actual_minutes IS NOT NULL
                ORDER BY ti.completed_at DESC, ti.scheduled_date DESC, ti.rowid DESC
                LIMIT :limit
            "#
        ))?;

        let rows = collect_history(stmt.query_map(
            named_params! {
                ":task_id": task_id,
                ":space_id": space_id,
                ":limit": limit as i64,
            },
            |row| TaskHistoryRow::try_from(row),
        )?);
        rows
    }

    /// Every instance ever assigned to a worker, newest first, any status.
    pub fn list_for_worker(
        conn: &Connection,
        worker_id: &str,
        limit: usize,
    ) -> AppResult<Vec<TaskCompletionRecord>> {
        let mut stmt = conn.prepare(&format!(
            r#"
                {HISTORY_SELECT}
                WHERE ti.worker_id = :worker_id
                ORDER BY ti.scheduled_date DESC, ti.rowid DESC
                LIMIT :limit
            "#
        ))?;

        let rows = collect_history(stmt.query_map(
            named_params! {":worker_id": worker_id, ":limit": limit as i64},
            |row| TaskHistoryRow::try_from(row),
        )?);
        rows
    }

    /// Instances planned for a date. Skipped instances take no time and are left out.
    pub fn list_scheduled(
        conn: &Connection,
        household_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ScheduledTask>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    ti.task_id,
                    ti.space_id,
                    ti.worker_id,
                    COALESCE(s.zone, 'both') AS zone
                FROM task_instances ti
                LEFT JOIN spaces s ON s.id = ti.space_id
                WHERE ti.household_id = :household_id
                  AND ti.scheduled_date = :scheduled_date
                  AND ti.status != 'skipped'
                ORDER BY ti.rowid
            "#,
        )?;

        let tasks = stmt
            .query_map(
                named_params! {
                    ":household_id": household_id,
                    ":scheduled_date": date.format(DATE_FORMAT).to_string(),
                },
                |row| ScheduledTaskRow::try_from(row),
            )?
            .map(|row| row.map_err(AppError::from).and_then(|row| row.into_record()))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(tasks)
    }
}

fn collect_history<I>(rows: I) -> AppResult<Vec<TaskCompletionRecord>>
where
    I: Iterator<Item = Result<TaskHistoryRow, rusqlite::Error>>,
{
    rows.map(|row| row.map_err(AppError::from).and_then(|row| row.into_record()))
        .collect()
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| AppError::validation(format!("invalid scheduled date {value}: {err}")))
}
