use rusqlite::Connection;
use tracing::info;

use crate::error::AppResult;

pub const USER_VERSION: i32 = 1;

/// Brings an existing database up to `USER_VERSION`. Tables come from schema.sql.
pub fn run(conn: &Connection) -> AppResult<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version < 1 {
        info!(target: "app::db", version = current_version, "running migration v1");
        migrate_to_v1(conn)?;
        conn.execute(&format!("PRAGMA user_version = {}", USER_VERSION), [])?;
    }

    Ok(())
}

fn migrate_to_v1(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_task_instances_completions
            ON task_instances(task_id, space_id, status, completed_at);
        CREATE INDEX IF NOT EXISTS idx_task_instances_worker
            ON task_instances(worker_id, scheduled_date);
        CREATE INDEX IF NOT EXISTS idx_task_instances_schedule
            ON task_instances(household_id, scheduled_date);
        "#,
    )?;
    Ok(())
}
