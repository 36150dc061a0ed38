mod support;

use household_intel_lib::models::worker::Zone;
use household_intel_lib::models::workload::{PredictionKind, PredictionSeverity};
use support::{day, setup, HOUSEHOLD};

#[test]
fn week_pinned_at_one_fifty_percent_gives_seven_high_overloads() {
    let household = setup();
    household.add_worker("w-rosa", "Rosa", Zone::Interior, None);
    household.add_space("casa", "Casa", Zone::Interior);
    household.add_task("jornada", "casa", "Jornada completa", Some(720));
    for offset in 0..7 {
        household.schedule("jornada", "casa", Some("w-rosa"), day(offset));
    }

    let predictions = household.service.predict(HOUSEHOLD, day(0), 7).unwrap();
    assert_eq!(predictions.len(), 7);
    for (offset, prediction) in predictions.iter().enumerate() {
        assert_eq!(prediction.kind, PredictionKind::Overload);
        assert_eq!(prediction.severity, PredictionSeverity::High);
        assert_eq!(prediction.date, day(offset as i64));
        assert_eq!(prediction.worker_id.as_deref(), Some("w-rosa"));
        assert!(prediction.message.contains("150%"));
    }
}

#[test]
fn uneven_team_reports_imbalance_before_underload() {
    let household = setup();
    household.add_worker("w-a-rosa", "Rosa", Zone::Interior, None);
    household.add_worker("w-b-ana", "Ana", Zone::Interior, None);
    household.add_space("sala", "Sala", Zone::Interior);
    household.add_task("profunda", "sala", "Limpieza profunda", Some(420));
    household.add_task("barrer", "sala", "Barrer", Some(30));
    household.schedule("profunda", "sala", Some("w-a-rosa"), day(0));
    household.schedule("barrer", "sala", Some("w-b-ana"), day(0));

    let predictions = household.service.predict(HOUSEHOLD, day(0), 1).unwrap();
    let kinds: Vec<_> = predictions
        .iter()
        .map(|prediction| (prediction.kind, prediction.severity))
        .collect();
    // 88% vs 6%
    assert_eq!(
        kinds,
        vec![
            (PredictionKind::Imbalance, PredictionSeverity::High),
            (PredictionKind::Underload, PredictionSeverity::Low),
        ]
    );
}

#[test]
fn whole_team_over_capacity_is_a_bottleneck() {
    let household = setup();
    household.add_worker("w-a-rosa", "Rosa", Zone::Interior, None);
    household.add_worker("w-b-ana", "Ana", Zone::Interior, None);
    household.add_space("sala", "Sala", Zone::Interior);
    household.add_task("mudanza-1", "sala", "Mudanza", Some(700));
    household.add_task("mudanza-2", "sala", "Mudanza", Some(700));
    household.schedule("mudanza-1", "sala", Some("w-a-rosa"), day(2));
    household.schedule("mudanza-2", "sala", Some("w-b-ana"), day(2));

    let predictions = household.service.predict(HOUSEHOLD, day(0), 3).unwrap();
    assert!(predictions.iter().all(|prediction| prediction.date == day(2)));
    assert_eq!(
        predictions
            .iter()
            .filter(|prediction| prediction.kind == PredictionKind::Bottleneck)
            .count(),
        1
    );
    assert!(predictions
        .iter()
        .all(|prediction| prediction.severity == PredictionSeverity::High));
}

#[test]
fn quiet_week_and_empty_household_predict_nothing() {
    let household = setup();
    assert!(household.service.predict(HOUSEHOLD, day(0), 7).unwrap().is_empty());

    household.add_worker("w-rosa", "Rosa", Zone::Interior, None);
    household.add_space("sala", "Sala", Zone::Interior);
    household.add_task("barrer", "sala", "Barrer", Some(240));
    household.schedule("barrer", "sala", Some("w-rosa"), day(1));
    assert!(household.service.predict(HOUSEHOLD, day(0), 7).unwrap().is_empty());
}
