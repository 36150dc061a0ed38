use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::AppResult;
use crate::models::settings::IntelligenceSettings;
use crate::models::workload::IntelligenceSummary;
use crate::services::data_access::DataScope;
use crate::services::duration_estimator::DurationEstimator;
use crate::services::employee_scorer::EmployeeScorer;
use crate::services::issue_predictor::IssuePredictor;
use crate::utils::stats::mean;

pub struct SummaryAggregator<'a> {
    settings: &'a IntelligenceSettings,
    estimator: DurationEstimator<'a>,
    scorer: EmployeeScorer<'a>,
    predictor: IssuePredictor<'a>,
}

impl<'a> SummaryAggregator<'a> {
    pub fn new(settings: &'a IntelligenceSettings) -> Self {
        Self {
            settings,
            estimator: DurationEstimator::new(settings),
            scorer: EmployeeScorer::new(settings),
            predictor: IssuePredictor::new(settings),
        }
    }

    pub fn summarize(&self, scope: &DataScope<'_>, household_id: &str) -> AppResult<IntelligenceSummary> {
        self.summarize_as_of(scope, household_id, Utc::now().date_naive())
    }

    /// Week-ahead predictions start at `today`.
    pub fn summarize_as_of(
        &self,
        scope: &DataScope<'_>,
        household_id: &str,
        today: NaiveDate,
    ) -> AppResult<IntelligenceSummary> {
        let mut confidence_weights = Vec::new();
        for task in scope.store().list_household_tasks(household_id)? {
            let estimate = self.estimator.estimate(scope, &task.id, &task.space_id)?;
            if estimate.is_learned() {
                confidence_weights.push(self.settings.confidence_weights.weight(estimate.confidence));
            }
        }

        let workers = scope.active_workers(household_id)?;
        let employee_scores = workers
            .iter()
            .map(|worker| self.scorer.score(scope, worker))
            .collect::<AppResult<Vec<_>>>()?;

        let weekly_predictions =
            self.predictor
                .predict(scope, household_id, today, self.settings.summary_days_ahead)?;

        let summary = IntelligenceSummary {
            household_id: household_id.to_string(),
            generated_on: today,
            learned_task_count: confidence_weights.len(),
            avg_confidence_score: mean(&confidence_weights).unwrap_or(0.0),
            employee_scores,
            weekly_predictions,
        };

        info!(
            target: "app::intelligence::summary",
            household_id,
            %today,
            learned_tasks = summary.learned_task_count,
            avg_confidence = summary.avg_confidence_score,
            workers = summary.employee_scores.len(),
            predictions = summary.weekly_predictions.len(),
            "built intelligence summary"
        );

        Ok(summary)
    }
}
