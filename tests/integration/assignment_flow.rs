mod support;

use household_intel_lib::models::task::ScheduledTask;
use household_intel_lib::models::worker::Zone;
use household_intel_lib::models::workload::AssignmentReason;
use support::{day, setup, HOUSEHOLD};

fn seed_team(household: &support::TestHousehold) {
    household.add_worker("w-a-rosa", "Rosa", Zone::Interior, None);
    household.add_worker("w-b-luis", "Luis", Zone::Exterior, None);
    household.add_worker("w-c-ana", "Ana", Zone::Both, None);

    household.add_space("cocina", "Cocina", Zone::Interior);
    household.add_space("jardin", "Jardín", Zone::Exterior);
    household.add_space("sala", "Sala", Zone::Interior);

    household.add_task("cocina-limpieza", "cocina", "Limpiar cocina", Some(120));
    household.add_task("cortar", "jardin", "Cortar pasto", Some(90));
    household.add_task("barrer", "sala", "Barrer", Some(30));
}

#[test]
fn primary_assignee_is_preferred() {
    let household = setup();
    seed_team(&household);
    household.prefer("w-c-ana", "cocina", true, 0);

    let suggestions = household
        .service
        .suggest(
            HOUSEHOLD,
            day(0),
            &[ScheduledTask::unassigned("cocina-limpieza", "cocina", Zone::Interior)],
        )
        .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].worker_id, "w-c-ana");
    assert_eq!(suggestions[0].reason, AssignmentReason::PrimaryAssignee);
    assert!(suggestions[0].justification.contains("Ana"));
}

#[test]
fn exterior_work_never_goes_to_interior_only_staff() {
    let household = setup();
    seed_team(&household);
    // Luis is already busy, Ana is the only other exterior-capable worker
    household.add_task("poda", "jardin", "Poda", Some(400));
    household.schedule("poda", "jardin", Some("w-b-luis"), day(0));

    let suggestions = household
        .service
        .suggest(
            HOUSEHOLD,
            day(0),
            &[ScheduledTask::unassigned("cortar", "jardin", Zone::Exterior)],
        )
        .unwrap();
    assert_eq!(suggestions[0].worker_id, "w-c-ana");
    assert_ne!(suggestions[0].worker_id, "w-a-rosa");
    assert_eq!(suggestions[0].reason, AssignmentReason::LowerLoad);
}

#[test]
fn batch_is_deterministic_and_spreads_load() {
    let household = setup();
    seed_team(&household);
    let batch = vec![
        ScheduledTask::unassigned("cocina-limpieza", "cocina", Zone::Interior),
        ScheduledTask::unassigned("barrer", "sala", Zone::Interior),
        ScheduledTask::unassigned("cortar", "jardin", Zone::Exterior),
    ];

    let first = household.service.suggest(HOUSEHOLD, day(0), &batch).unwrap();
    let second = household.service.suggest(HOUSEHOLD, day(0), &batch).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);

    // tie on the first task keeps the first eligible worker; the running load
    // then moves the second interior task to Ana
    assert_eq!(first[0].worker_id, "w-a-rosa");
    assert_eq!(first[1].worker_id, "w-c-ana");
    assert_eq!(first[2].worker_id, "w-b-luis");
}

#[test]
fn preference_record_makes_out_of_zone_worker_eligible() {
    let household = setup();
    household.add_worker("w-a-rosa", "Rosa", Zone::Interior, None);
    household.add_space("jardin", "Jardín", Zone::Exterior);
    household.add_task("regar", "jardin", "Regar", Some(20));

    let task = [ScheduledTask::unassigned("regar", "jardin", Zone::Exterior)];
    assert!(household.service.suggest(HOUSEHOLD, day(0), &task).unwrap().is_empty());

    household.prefer("w-a-rosa", "jardin", false, 1);
    let suggestions = household.service.suggest(HOUSEHOLD, day(0), &task).unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].worker_id, "w-a-rosa");
    assert_eq!(suggestions[0].reason, AssignmentReason::TeamBalance);
}

#[test]
fn no_workers_means_no_suggestions() {
    let household = setup();
    let suggestions = household
        .service
        .suggest(
            HOUSEHOLD,
            day(0),
            &[ScheduledTask::unassigned("barrer", "sala", Zone::Interior)],
        )
        .unwrap();
    assert!(suggestions.is_empty());
}
