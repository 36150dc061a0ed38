mod support;

use household_intel_lib::models::task::TaskStatus;
use household_intel_lib::models::worker::Zone;
use support::{day, setup};

#[test]
fn new_worker_gets_the_neutral_profile() {
    let household = setup();
    household.add_worker("w-ana", "Ana", Zone::Exterior, None);

    let score = household.service.score("w-ana").unwrap();
    assert_eq!(score.worker_name, "Ana");
    assert_eq!(score.overall_score, 50);
    assert_eq!(score.reliability_score, 0.0);
    assert_eq!(score.speed_score, 50.0);
    assert_eq!(score.consistency_score, 50.0);
    assert_eq!(score.avg_rating, 0.0);
}

#[test]
fn steady_on_time_worker_scores_high() {
    let household = setup();
    household.add_worker("w-rosa", "Rosa", Zone::Interior, None);
    household.add_space("sala", "Sala", Zone::Interior);
    household.add_task("barrer", "sala", "Barrer", Some(30));

    for offset in 1..=4 {
        let completed_at = format!("2025-06-0{}T12:00:00Z", 5 - offset);
        household.complete("barrer", "sala", "w-rosa", day(-offset), Some(30), Some(5), &completed_at);
    }

    let score = household.service.score("w-rosa").unwrap();
    assert_eq!(score.avg_rating, 5.0);
    assert_eq!(score.speed_score, 50.0);
    assert_eq!(score.reliability_score, 100.0);
    assert_eq!(score.consistency_score, 100.0);
    assert_eq!(score.overall_score, 88);
    assert_eq!(score.total_tasks_completed, 4);
    assert_eq!(score.total_minutes_worked, 120);
}

#[test]
fn skipped_work_lowers_reliability() {
    let household = setup();
    household.add_worker("w-luis", "Luis", Zone::Exterior, None);
    household.add_space("jardin", "Jardín", Zone::Exterior);
    household.add_task("regar", "jardin", "Regar", Some(20));

    household.complete("regar", "jardin", "w-luis", day(-1), Some(20), None, "2025-06-01T08:00:00Z");
    household.record_status("regar", "jardin", "w-luis", day(-2), TaskStatus::Skipped);
    household.record_status("regar", "jardin", "w-luis", day(-3), TaskStatus::Skipped);
    household.complete("regar", "jardin", "w-luis", day(-4), Some(20), None, "2025-05-29T08:00:00Z");

    let score = household.service.score("w-luis").unwrap();
    assert_eq!(score.reliability_score, 50.0);
    assert_eq!(score.total_tasks_completed, 2);
}

#[test]
fn fast_worker_maxes_speed() {
    let household = setup();
    household.add_worker("w-rosa", "Rosa", Zone::Interior, None);
    household.add_space("sala", "Sala", Zone::Interior);
    household.add_task("barrer", "sala", "Barrer", Some(30));

    household.complete("barrer", "sala", "w-rosa", day(-1), Some(15), None, "2025-06-01T08:00:00Z");
    household.complete("barrer", "sala", "w-rosa", day(-2), Some(15), None, "2025-05-31T08:00:00Z");

    let score = household.service.score("w-rosa").unwrap();
    assert_eq!(score.speed_score, 100.0);
    // two timed samples are not enough for consistency
    assert_eq!(score.consistency_score, 50.0);
}

#[test]
fn unknown_worker_is_scored_under_its_id() {
    let household = setup();
    let score = household.service.score("w-nadie").unwrap();
    assert_eq!(score.worker_name, "w-nadie");
    assert_eq!(score.overall_score, 50);
}
