use chrono::NaiveDate;
use tracing::debug;

use crate::db::repositories::space_repository::SpaceRepository;
use crate::db::repositories::task_instance_repository::TaskInstanceRepository;
use crate::db::repositories::worker_repository::WorkerRepository;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::task::{ScheduledTask, TaskCompletionRecord, TaskDefinition};
use crate::models::worker::{Worker, WorkerSpacePreference};
use crate::services::data_access::IntelligenceStore;

/// SQLite-backed implementation of the engine's data-access collaborator.
#[derive(Clone, Debug)]
pub struct SqliteIntelligenceStore {
    db: DbPool,
}

impl SqliteIntelligenceStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &DbPool {
        &self.db
    }
}

impl IntelligenceStore for SqliteIntelligenceStore {
    fn get_completions(
        &self,
        task_id: &str,
        space_id: &str,
        limit: usize,
    ) -> AppResult<Vec<TaskCompletionRecord>> {
        let records = self.db.with_connection(|conn| {
            TaskInstanceRepository::list_completions(conn, task_id, space_id, limit)
        })?;
        debug!(
            target: "app::db",
            task_id,
            space_id,
            count = records.len(),
            "loaded completion samples"
        );
        Ok(records)
    }

    fn get_worker_history(
        &self,
        worker_id: &str,
        limit: usize,
    ) -> AppResult<Vec<TaskCompletionRecord>> {
        self.db
            .with_connection(|conn| TaskInstanceRepository::list_for_worker(conn, worker_id, limit))
    }

    fn get_active_workers(&self, household_id: &str) -> AppResult<Vec<Worker>> {
        self.db
            .with_connection(|conn| WorkerRepository::list_active(conn, household_id))
    }

    fn get_worker(&self, worker_id: &str) -> AppResult<Option<Worker>> {
        self.db
            .with_connection(|conn| WorkerRepository::find_by_id(conn, worker_id))
    }

    fn get_scheduled_tasks(
        &self,
        household_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ScheduledTask>> {
        self.db
            .with_connection(|conn| TaskInstanceRepository::list_scheduled(conn, household_id, date))
    }

    fn get_worker_space_preferences(
        &self,
        household_id: &str,
    ) -> AppResult<Vec<WorkerSpacePreference>> {
        self.db
            .with_connection(|conn| WorkerRepository::list_space_preferences(conn, household_id))
    }

    fn get_task_definition(
        &self,
        task_id: &str,
        space_id: &str,
    ) -> AppResult<Option<TaskDefinition>> {
        self.db
            .with_connection(|conn| SpaceRepository::find_task_definition(conn, task_id, space_id))
    }

    fn list_household_tasks(&self, household_id: &str) -> AppResult<Vec<TaskDefinition>> {
        self.db
            .with_connection(|conn| SpaceRepository::list_household_tasks(conn, household_id))
    }
}
