use std::convert::TryFrom;

use chrono::Utc;
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::task::TaskDefinition;
use crate::models::worker::Zone;

#[derive(Debug, Clone)]
pub struct TaskDefinitionRow {
    pub id: String,
    pub space_id: String,
    pub name: String,
    pub estimated_minutes: Option<i64>,
}

impl TaskDefinitionRow {
    pub fn into_record(self) -> AppResult<TaskDefinition> {
        Ok(TaskDefinition {
            id: self.id,
            space_id: self.space_id,
            name: self.name,
            estimated_minutes: positive_minutes(self.estimated_minutes),
        })
    }
}

impl TryFrom<&Row<'_>> for TaskDefinitionRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            space_id: row.get("space_id")?,
            name: row.get("name")?,
            estimated_minutes: row.get("estimated_minutes")?,
        })
    }
}

pub struct SpaceRepository;

impl SpaceRepository {
    pub fn insert_space(
        conn: &Connection,
        household_id: &str,
        name: &str,
        zone: Zone,
    ) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        Self::insert_space_with_id(conn, &id, household_id, name, zone)?;
        Ok(id)
    }

    pub fn insert_space_with_id(
        conn: &Connection,
        id: &str,
        household_id: &str,
        name: &str,
        zone: Zone,
    ) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("space name must not be empty"));
        }

        conn.execute(
            r#"
                INSERT INTO spaces (id, household_id, name, zone, created_at)
                VALUES (:id, :household_id, :name, :zone, :created_at)
            "#,
            named_params! {
                ":id": id,
                ":household_id": household_id,
                ":name": name,
                ":zone": zone.as_str(),
                ":created_at": Utc::now().to_rfc3339(),
            },
        )?;

        Ok(())
    }

    pub fn upsert_task_definition(conn: &Connection, definition: &TaskDefinition) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO space_tasks (id, space_id, name, estimated_minutes)
                VALUES (:id, :space_id, :name, :estimated_minutes)
                ON CONFLICT(id, space_id) DO UPDATE SET
                    name = excluded.name,
                    estimated_minutes = excluded.estimated_minutes
            "#,
            named_params! {
                ":id": &definition.id,
                ":space_id": &definition.space_id,
                ":name": definition.name.trim(),
                ":estimated_minutes": &definition.estimated_minutes,
            },
        )?;

        Ok(())
    }

    pub fn find_task_definition(
        conn: &Connection,
        task_id: &str,
        space_id: &str,
    ) -> AppResult<Option<TaskDefinition>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT id, space_id, name, estimated_minutes
                FROM space_tasks
                WHERE id = :id AND space_id = :space_id
            "#,
        )?;

        let row = stmt
            .query_row(named_params! {":id": task_id, ":space_id": space_id}, |row| {
                TaskDefinitionRow::try_from(row)
            })
            .optional()?;

        row.map(|row| row.into_record()).transpose()
    }

    pub fn list_household_tasks(
        conn: &Connection,
        household_id: &str,
    ) -> AppResult<Vec<TaskDefinition>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT t.id, t.space_id, t.name, t.estimated_minutes
                FROM space_tasks t
                INNER JOIN spaces s ON s.id = t.space_id
                WHERE s.household_id = :household_id
                ORDER BY s.name, t.name, t.id
            "#,
        )?;

        let definitions = stmt
            .query_map(named_params! {":household_id": household_id}, |row| {
                TaskDefinitionRow::try_from(row)
            })?
            .map(|row| row.map_err(AppError::from).and_then(|row| row.into_record()))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(definitions)
    }
}

pub(crate) fn positive_minutes(value: Option<i64>) -> Option<u32> {
    value
        .filter(|minutes| *minutes > 0)
        .and_then(|minutes| u32::try_from(minutes).ok())
}
