use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::settings::IntelligenceSettings;
use crate::models::task::ScheduledTask;
use crate::models::worker::Worker;
use crate::models::workload::{BalancedTask, WorkloadBalance};
use crate::services::data_access::DataScope;
use crate::services::duration_estimator::DurationEstimator;
use crate::utils::stats::{round_to_u32, utilization_percent};

/// Available hours per worker id, overriding schedules for one call.
pub type HoursOverride = HashMap<String, f64>;

/// Computes per-worker utilization for a single day.
pub struct WorkloadBalancer<'a> {
    settings: &'a IntelligenceSettings,
    estimator: DurationEstimator<'a>,
}

impl<'a> WorkloadBalancer<'a> {
    pub fn new(settings: &'a IntelligenceSettings) -> Self {
        Self {
            settings,
            estimator: DurationEstimator::new(settings),
        }
    }

    pub fn balance(
        &self,
        scope: &DataScope<'_>,
        household_id: &str,
        date: NaiveDate,
        overrides: Option<&HoursOverride>,
    ) -> AppResult<Vec<WorkloadBalance>> {
        let workers = scope.active_workers(household_id)?;
        if workers.is_empty() {
            debug!(target: "app::intelligence::balance", household_id, %date, "no active workers");
            return Ok(Vec::new());
        }

        let scheduled = scope.store().get_scheduled_tasks(household_id, date)?;
        let balances = self.balance_for(scope, &workers, &scheduled, date, overrides)?;

        info!(
            target: "app::intelligence::balance",
            household_id,
            %date,
            workers = balances.len(),
            overloaded = balances.iter().filter(|b| b.is_overloaded).count(),
            underloaded = balances.iter().filter(|b| b.is_underloaded).count(),
            "computed workload balance"
        );

        Ok(balances)
    }

    /// One balance per worker, in worker order. Tasks assigned to anyone else are ignored.
    pub fn balance_for(
        &self,
        scope: &DataScope<'_>,
        workers: &[Worker],
        scheduled: &[ScheduledTask],
        date: NaiveDate,
        overrides: Option<&HoursOverride>,
    ) -> AppResult<Vec<WorkloadBalance>> {
        workers
            .iter()
            .map(|worker| -> AppResult<WorkloadBalance> {
                let mut tasks = Vec::new();
                for task in scheduled
                    .iter()
                    .filter(|task| task.worker_id.as_deref() == Some(worker.id.as_str()))
                {
                    let estimate = self.estimator.estimate(scope, &task.task_id, &task.space_id)?;
                    tasks.push(BalancedTask {
                        task_id: task.task_id.clone(),
                        space_id: task.space_id.clone(),
                        minutes: estimate.learned_minutes,
                    });
                }
                let available = self.available_minutes(worker, overrides);
                Ok(self.evaluate(worker, date, available, tasks))
            })
            .collect()
    }

    /// Override hours, else the worker's schedule, else the default day.
    pub fn available_minutes(&self, worker: &Worker, overrides: Option<&HoursOverride>) -> u32 {
        overrides
            .and_then(|hours| hours.get(&worker.id).copied())
            .or(worker.schedule_hours)
            .filter(|hours| hours.is_finite() && *hours >= 0.0)
            .map(|hours| round_to_u32(hours * 60.0))
            .unwrap_or(self.settings.default_available_minutes)
    }

    pub fn evaluate(
        &self,
        worker: &Worker,
        date: NaiveDate,
        available_minutes: u32,
        tasks: Vec<BalancedTask>,
    ) -> WorkloadBalance {
        let assigned_minutes = tasks
            .iter()
            .fold(0_u32, |total, task| total.saturating_add(task.minutes));
        let utilization = utilization_percent(assigned_minutes, available_minutes);
        let thresholds = &self.settings.balance;

        WorkloadBalance {
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            date,
            assigned_minutes,
            available_minutes,
            utilization_percent: utilization,
            is_overloaded: utilization > thresholds.overload_percent,
            // an idle day is not flagged
            is_underloaded: !tasks.is_empty() && utilization < thresholds.underload_percent,
            tasks,
        }
    }
}
