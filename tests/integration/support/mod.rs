#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use household_intel_lib::db::repositories::space_repository::SpaceRepository;
use household_intel_lib::db::repositories::task_instance_repository::{
    TaskInstanceInsert, TaskInstanceRepository,
};
use household_intel_lib::db::repositories::worker_repository::{WorkerInsert, WorkerRepository};
use household_intel_lib::db::store::SqliteIntelligenceStore;
use household_intel_lib::db::DbPool;
use household_intel_lib::models::settings::IntelligenceSettings;
use household_intel_lib::models::task::{TaskDefinition, TaskStatus};
use household_intel_lib::models::worker::{WorkerSpacePreference, Zone};
use household_intel_lib::IntelligenceService;
use tempfile::TempDir;

pub const HOUSEHOLD: &str = "casa-1";

/// A seeded SQLite household. Keep `_dir` alive for the duration of the test.
pub struct TestHousehold {
    pub _dir: TempDir,
    pub pool: DbPool,
    pub service: IntelligenceService,
}

pub fn setup() -> TestHousehold {
    setup_with(IntelligenceSettings::default())
}

pub fn setup_with(settings: IntelligenceSettings) -> TestHousehold {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = DbPool::new(dir.path().join("household.sqlite")).expect("db pool");
    let store = Arc::new(SqliteIntelligenceStore::new(pool.clone()));
    let service = IntelligenceService::new(store, settings);
    TestHousehold {
        _dir: dir,
        pool,
        service,
    }
}

pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date") + Duration::days(offset)
}

impl TestHousehold {
    pub fn add_worker(&self, id: &str, name: &str, zone: Zone, schedule_hours: Option<f64>) {
        let mut insert = WorkerInsert::new(HOUSEHOLD, name, zone);
        insert.id = Some(id.to_string());
        insert.schedule_hours = schedule_hours;
        self.pool
            .with_connection(|conn| WorkerRepository::insert(conn, &insert))
            .expect("insert worker");
    }

    pub fn add_space(&self, id: &str, name: &str, zone: Zone) {
        self.pool
            .with_connection(|conn| SpaceRepository::insert_space_with_id(conn, id, HOUSEHOLD, name, zone))
            .expect("insert space");
    }

    pub fn add_task(&self, task_id: &str, space_id: &str, name: &str, minutes: Option<u32>) {
        let definition = TaskDefinition {
            id: task_id.to_string(),
            space_id: space_id.to_string(),
            name: name.to_string(),
            estimated_minutes: minutes,
        };
        self.pool
            .with_connection(|conn| SpaceRepository::upsert_task_definition(conn, &definition))
            .expect("insert task definition");
    }

    /// `completed_at` orders samples: later timestamps are newer.
    pub fn complete(
        &self,
        task_id: &str,
        space_id: &str,
        worker_id: &str,
        scheduled: NaiveDate,
        actual_minutes: Option<u32>,
        rating: Option<u8>,
        completed_at: &str,
    ) {
        let insert = TaskInstanceInsert::scheduled(HOUSEHOLD, task_id, space_id, Some(worker_id), scheduled)
            .completed(actual_minutes, rating)
            .completed_at(completed_at);
        self.pool
            .with_connection(|conn| TaskInstanceRepository::insert(conn, &insert))
            .expect("insert completion");
    }

    pub fn record_status(
        &self,
        task_id: &str,
        space_id: &str,
        worker_id: &str,
        scheduled: NaiveDate,
        status: TaskStatus,
    ) {
        let insert = TaskInstanceInsert::scheduled(HOUSEHOLD, task_id, space_id, Some(worker_id), scheduled)
            .with_status(status);
        self.pool
            .with_connection(|conn| TaskInstanceRepository::insert(conn, &insert))
            .expect("insert instance");
    }

    pub fn schedule(&self, task_id: &str, space_id: &str, worker_id: Option<&str>, date: NaiveDate) {
        let insert = TaskInstanceInsert::scheduled(HOUSEHOLD, task_id, space_id, worker_id, date);
        self.pool
            .with_connection(|conn| TaskInstanceRepository::insert(conn, &insert))
            .expect("schedule instance");
    }

    pub fn prefer(&self, worker_id: &str, space_id: &str, is_primary: bool, priority_order: u32) {
        let preference = WorkerSpacePreference {
            worker_id: worker_id.to_string(),
            space_id: space_id.to_string(),
            is_primary,
            priority_order,
        };
        self.pool
            .with_connection(|conn| WorkerRepository::upsert_space_preference(conn, HOUSEHOLD, &preference))
            .expect("insert preference");
    }
}
