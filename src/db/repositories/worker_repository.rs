use std::convert::TryFrom;

use chrono::Utc;
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::worker::{Worker, WorkerSpacePreference, Zone};

const BASE_SELECT: &str = r#"
    SELECT
        id,
        name,
        zone,
        schedule_hours
    FROM workers
"#;

#[derive(Debug, Clone)]
pub struct WorkerRow {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub schedule_hours: Option<f64>,
}

impl WorkerRow {
    pub fn into_record(self) -> AppResult<Worker> {
        Ok(Worker {
            id: self.id,
            name: self.name,
            zone: Zone::try_from(self.zone.as_str()).map_err(AppError::validation)?,
            schedule_hours: self.schedule_hours.filter(|hours| *hours >= 0.0),
        })
    }
}

impl TryFrom<&Row<'_>> for WorkerRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            zone: row.get("zone")?,
            schedule_hours: row.get("schedule_hours")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WorkerInsert {
    pub id: Option<String>,
    pub household_id: String,
    pub name: String,
    pub zone: Zone,
    pub schedule_hours: Option<f64>,
    pub is_active: bool,
}

impl WorkerInsert {
    pub fn new(household_id: impl Into<String>, name: impl Into<String>, zone: Zone) -> Self {
        Self {
            id: None,
            household_id: household_id.into(),
            name: name.into(),
            zone,
            schedule_hours: None,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkerSpacePreferenceRow {
    pub worker_id: String,
    pub space_id: String,
    pub is_primary: bool,
    pub priority_order: i64,
}

impl WorkerSpacePreferenceRow {
    pub fn into_record(self) -> AppResult<WorkerSpacePreference> {
        let priority_order = u32::try_from(self.priority_order)
            .map_err(|_| AppError::validation("priority order must not be negative"))?;
        Ok(WorkerSpacePreference {
            worker_id: self.worker_id,
            space_id: self.space_id,
            is_primary: self.is_primary,
            priority_order,
        })
    }
}

impl TryFrom<&Row<'_>> for WorkerSpacePreferenceRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            worker_id: row.get("worker_id")?,
            space_id: row.get("space_id")?,
            is_primary: row.get("is_primary")?,
            priority_order: row.get("priority_order")?,
        })
    }
}

pub struct WorkerRepository;

impl WorkerRepository {
    pub fn insert(conn: &Connection, input: &WorkerInsert) -> AppResult<String> {
        let id = input
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        conn.execute(
            r#"
                INSERT INTO workers (
                    id,
                    household_id,
                    name,
                    zone,
                    schedule_hours,
                    is_active,
                    created_at
                ) VALUES (
                    :id,
                    :household_id,
                    :name,
                    :zone,
                    :schedule_hours,
                    :is_active,
                    :created_at
                )
            "#,
            named_params! {
                ":id": &id,
                ":household_id": &input.household_id,
                ":name": input.name.trim(),
                ":zone": input.zone.as_str(),
                ":schedule_hours": &input.schedule_hours,
                ":is_active": input.is_active,
                ":created_at": Utc::now().to_rfc3339(),
            },
        )?;

        Ok(id)
    }

    pub fn find_by_id(conn: &Connection, id: &str) -> AppResult<Option<Worker>> {
        let mut stmt = conn.prepare(&format!("{BASE_SELECT} WHERE id = :id"))?;
        let row = stmt
            .query_row(named_params! {":id": id}, |row| WorkerRow::try_from(row))
            .optional()?;

        row.map(|row| row.into_record()).transpose()
    }

    pub fn list_active(conn: &Connection, household_id: &str) -> AppResult<Vec<Worker>> {
        let mut stmt = conn.prepare(&format!(
            "{BASE_SELECT} WHERE household_id = :household_id AND is_active = 1 ORDER BY created_at, id"
        ))?;

        let workers = stmt
            .query_map(named_params! {":household_id": household_id}, |row| {
                WorkerRow::try_from(row)
            })?
            .map(|row| row.map_err(AppError::from).and_then(|row| row.into_record()))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(workers)
    }

    pub fn set_active(conn: &Connection, id: &str, is_active: bool) -> AppResult<()> {
        let updated = conn.execute(
            "UPDATE workers SET is_active = :is_active WHERE id = :id",
            named_params! {":id": id, ":is_active": is_active},
        )?;
        if updated == 0 {
            return Err(AppError::not_found());
        }
        Ok(())
    }

    pub fn upsert_space_preference(
        conn: &Connection,
        household_id: &str,
        preference: &WorkerSpacePreference,
    ) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO worker_space_assignments (
                    worker_id,
                    space_id,
                    household_id,
                    is_primary,
                    priority_order
                ) VALUES (
                    :worker_id,
                    :space_id,
                    :household_id,
                    :is_primary,
                    :priority_order
                )
                ON CONFLICT(worker_id, space_id) DO UPDATE SET
                    is_primary = excluded.is_primary,
                    priority_order = excluded.priority_order
            "#,
            named_params! {
                ":worker_id": &preference.worker_id,
                ":space_id": &preference.space_id,
                ":household_id": household_id,
                ":is_primary": preference.is_primary,
                ":priority_order": preference.priority_order,
            },
        )?;

        Ok(())
    }

    pub fn list_space_preferences(
        conn: &Connection,
        household_id: &str,
    ) -> AppResult<Vec<WorkerSpacePreference>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    worker_id,
                    space_id,
                    is_primary,
                    priority_order
                FROM worker_space_assignments
                WHERE household_id = :household_id
                ORDER BY priority_order, worker_id, space_id
            "#,
        )?;

        let preferences = stmt
            .query_map(named_params! {":household_id": household_id}, |row| {
                WorkerSpacePreferenceRow::try_from(row)
            })?
            .map(|row| row.map_err(AppError::from).and_then(|row| row.into_record()))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(preferences)
    }
}
