// Error propagation and malformed data tests

mod support;

use std::io::Write;

use household_intel_lib::db::repositories::task_instance_repository::{
    TaskInstanceInsert, TaskInstanceRepository,
};
use household_intel_lib::models::worker::Zone;
use household_intel_lib::services::settings_service::{SettingsService, CONFIG_ENV_VAR};
use household_intel_lib::AppError;
use rusqlite::params;
use support::{day, setup, HOUSEHOLD};

#[test]
fn unreachable_database_is_retryable() {
    let support::TestHousehold { _dir, service, .. } = setup();
    drop(_dir);

    let err = service.estimate("barrer", "sala").unwrap_err();
    assert!(matches!(err, AppError::Database { .. }));
    assert!(err.is_retryable());
    assert!(service.summarize(HOUSEHOLD).unwrap_err().is_retryable());
}

#[test]
fn unknown_status_in_history_is_a_validation_error() {
    let household = setup();
    household.add_worker("w-rosa", "Rosa", Zone::Interior, None);
    household
        .pool
        .with_connection(|conn| {
            conn.execute(
                "INSERT INTO task_instances (id, household_id, task_id, space_id, worker_id, scheduled_date, status, created_at)
                 VALUES ('ti-1', ?1, 'barrer', 'sala', 'w-rosa', '2025-06-01', 'archived', '2025-06-01T00:00:00Z')",
                params![HOUSEHOLD],
            )?;
            Ok(())
        })
        .unwrap();

    let err = household.service.score("w-rosa").unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(!err.is_retryable());
}

#[test]
fn unknown_worker_zone_is_a_validation_error() {
    let household = setup();
    household
        .pool
        .with_connection(|conn| {
            conn.execute(
                "INSERT INTO workers (id, household_id, name, zone, is_active, created_at)
                 VALUES ('w-x', ?1, 'Equis', 'attic', 1, '2025-06-01T00:00:00Z')",
                params![HOUSEHOLD],
            )?;
            Ok(())
        })
        .unwrap();

    let err = household.service.balance(HOUSEHOLD, day(0), None).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
fn out_of_range_rating_is_rejected_on_insert() {
    let household = setup();
    let insert = TaskInstanceInsert::scheduled(HOUSEHOLD, "barrer", "sala", Some("w-rosa"), day(0))
        .completed(Some(20), Some(9));

    let err = household
        .pool
        .with_connection(|conn| TaskInstanceRepository::insert(conn, &insert))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
fn settings_file_from_environment_is_validated() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "balance:").unwrap();
    writeln!(file, "  overloadPercent: 40").unwrap();
    writeln!(file, "  underloadPercent: 60").unwrap();

    std::env::set_var(CONFIG_ENV_VAR, file.path());
    let service = SettingsService::from_env();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(service.source(), Some(file.path()));
    let err = service.get().unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}
