mod support;

use household_intel_lib::db::repositories::worker_repository::WorkerRepository;
use household_intel_lib::models::task::TaskStatus;
use household_intel_lib::models::worker::Zone;
use household_intel_lib::services::workload_balancer::HoursOverride;
use support::{day, setup, HOUSEHOLD};

fn seed_heavy_day(household: &support::TestHousehold) {
    household.add_worker("w-rosa", "Rosa", Zone::Interior, None);
    household.add_space("cocina", "Cocina", Zone::Interior);
    household.add_space("banos", "Baños", Zone::Interior);
    household.add_task("cocina-profunda", "cocina", "Limpieza profunda", Some(200));
    household.add_task("banos-completo", "banos", "Baños completos", Some(250));
    household.add_task("vidrios", "cocina", "Vidrios", Some(150));

    household.schedule("cocina-profunda", "cocina", Some("w-rosa"), day(0));
    household.schedule("banos-completo", "banos", Some("w-rosa"), day(0));
    household.schedule("vidrios", "cocina", Some("w-rosa"), day(0));
}

#[test]
fn six_hundred_minutes_on_a_default_day() {
    let household = setup();
    seed_heavy_day(&household);

    let balances = household.service.balance(HOUSEHOLD, day(0), None).unwrap();
    assert_eq!(balances.len(), 1);
    let rosa = &balances[0];
    assert_eq!(rosa.assigned_minutes, 600);
    assert_eq!(rosa.available_minutes, 480);
    assert_eq!(rosa.utilization_percent, 125);
    assert!(rosa.is_overloaded);
    assert_eq!(rosa.tasks.len(), 3);
}

#[test]
fn override_hours_replace_the_default_day() {
    let household = setup();
    seed_heavy_day(&household);

    let overrides: HoursOverride = [("w-rosa".to_string(), 10.0)].into_iter().collect();
    let balances = household
        .service
        .balance(HOUSEHOLD, day(0), Some(&overrides))
        .unwrap();
    assert_eq!(balances[0].available_minutes, 600);
    assert_eq!(balances[0].utilization_percent, 100);
    assert!(!balances[0].is_overloaded);
}

#[test]
fn schedule_hours_set_availability() {
    let household = setup();
    household.add_worker("w-ana", "Ana", Zone::Exterior, Some(6.0));
    household.add_space("jardin", "Jardín", Zone::Exterior);
    household.add_task("cortar", "jardin", "Cortar pasto", Some(90));
    household.schedule("cortar", "jardin", Some("w-ana"), day(0));

    let balances = household.service.balance(HOUSEHOLD, day(0), None).unwrap();
    assert_eq!(balances[0].available_minutes, 360);
    assert_eq!(balances[0].utilization_percent, 25);
    assert!(balances[0].is_underloaded);
}

#[test]
fn learned_durations_drive_assigned_minutes() {
    let household = setup();
    household.add_worker("w-rosa", "Rosa", Zone::Interior, None);
    household.add_space("sala", "Sala", Zone::Interior);
    household.add_task("trapear", "sala", "Trapear", Some(20));
    household.complete("trapear", "sala", "w-rosa", day(-1), Some(40), None, "2025-06-01T09:00:00Z");
    household.schedule("trapear", "sala", Some("w-rosa"), day(0));

    let balances = household.service.balance(HOUSEHOLD, day(0), None).unwrap();
    assert_eq!(balances[0].assigned_minutes, 40);
}

#[test]
fn skipped_instances_and_inactive_workers_are_ignored() {
    let household = setup();
    seed_heavy_day(&household);
    household.add_worker("w-old", "Antigua", Zone::Interior, None);
    household
        .pool
        .with_connection(|conn| WorkerRepository::set_active(conn, "w-old", false))
        .unwrap();
    household.record_status("vidrios", "cocina", "w-rosa", day(0), TaskStatus::Skipped);

    let balances = household.service.balance(HOUSEHOLD, day(0), None).unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].worker_id, "w-rosa");
    assert_eq!(balances[0].assigned_minutes, 600);
}

#[test]
fn household_without_workers_is_empty() {
    let household = setup();
    let balances = household.service.balance(HOUSEHOLD, day(0), None).unwrap();
    assert!(balances.is_empty());
}

#[test]
fn idle_worker_is_never_flagged_underloaded() {
    let household = setup();
    household.add_worker("w-rosa", "Rosa", Zone::Interior, Some(0.0));

    let balances = household.service.balance(HOUSEHOLD, day(0), None).unwrap();
    assert_eq!(balances[0].available_minutes, 0);
    assert_eq!(balances[0].utilization_percent, 0);
    assert!(!balances[0].is_underloaded);
    assert!(!balances[0].is_overloaded);
}
