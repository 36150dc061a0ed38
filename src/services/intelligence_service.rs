use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::AppResult;
use crate::models::duration::TaskDurationEstimate;
use crate::models::employee::EmployeeScore;
use crate::models::settings::IntelligenceSettings;
use crate::models::task::ScheduledTask;
use crate::models::workload::{
    AssignmentSuggestion, IntelligenceSummary, WorkloadBalance, WorkloadPrediction,
};
use crate::services::assignment_suggester::AssignmentSuggester;
use crate::services::data_access::{DataScope, IntelligenceStore};
use crate::services::duration_estimator::DurationEstimator;
use crate::services::employee_scorer::EmployeeScorer;
use crate::services::intelligence_summary::SummaryAggregator;
use crate::services::issue_predictor::IssuePredictor;
use crate::services::workload_balancer::{HoursOverride, WorkloadBalancer};

/// Entry point for callers. Every operation reads through a fresh [`DataScope`],
/// so nothing is reused between calls.
#[derive(Clone)]
pub struct IntelligenceService {
    store: Arc<dyn IntelligenceStore>,
    settings: Arc<IntelligenceSettings>,
}

impl IntelligenceService {
    pub fn new(store: Arc<dyn IntelligenceStore>, settings: IntelligenceSettings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
        }
    }

    pub fn with_defaults(store: Arc<dyn IntelligenceStore>) -> Self {
        Self::new(store, IntelligenceSettings::default())
    }

    pub fn settings(&self) -> &IntelligenceSettings {
        &self.settings
    }

    fn scope(&self) -> DataScope<'_> {
        DataScope::new(self.store.as_ref())
    }

    pub fn estimate(&self, task_id: &str, space_id: &str) -> AppResult<TaskDurationEstimate> {
        DurationEstimator::new(&self.settings).estimate(&self.scope(), task_id, space_id)
    }

    pub fn score(&self, worker_id: &str) -> AppResult<EmployeeScore> {
        EmployeeScorer::new(&self.settings).score_by_id(&self.scope(), worker_id)
    }

    pub fn balance(
        &self,
        household_id: &str,
        date: NaiveDate,
        hours_override: Option<&HoursOverride>,
    ) -> AppResult<Vec<WorkloadBalance>> {
        WorkloadBalancer::new(&self.settings).balance(&self.scope(), household_id, date, hours_override)
    }

    pub fn suggest(
        &self,
        household_id: &str,
        date: NaiveDate,
        unassigned: &[ScheduledTask],
    ) -> AppResult<Vec<AssignmentSuggestion>> {
        AssignmentSuggester::new(&self.settings).suggest(&self.scope(), household_id, date, unassigned)
    }

    pub fn predict(
        &self,
        household_id: &str,
        start_date: NaiveDate,
        days_ahead: u32,
    ) -> AppResult<Vec<WorkloadPrediction>> {
        IssuePredictor::new(&self.settings).predict(&self.scope(), household_id, start_date, days_ahead)
    }

    pub fn summarize(&self, household_id: &str) -> AppResult<IntelligenceSummary> {
        SummaryAggregator::new(&self.settings).summarize(&self.scope(), household_id)
    }

    pub fn summarize_as_of(&self, household_id: &str, today: NaiveDate) -> AppResult<IntelligenceSummary> {
        SummaryAggregator::new(&self.settings).summarize_as_of(&self.scope(), household_id, today)
    }
}
