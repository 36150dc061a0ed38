use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::settings::IntelligenceSettings;
use crate::models::workload::{PredictionKind, PredictionSeverity, WorkloadBalance, WorkloadPrediction};
use crate::services::data_access::DataScope;
use crate::services::workload_balancer::WorkloadBalancer;

/// Scans upcoming days for overload, underload, imbalance and bottlenecks.
pub struct IssuePredictor<'a> {
    settings: &'a IntelligenceSettings,
    balancer: WorkloadBalancer<'a>,
}

impl<'a> IssuePredictor<'a> {
    pub fn new(settings: &'a IntelligenceSettings) -> Self {
        Self {
            settings,
            balancer: WorkloadBalancer::new(settings),
        }
    }

    /// Findings sorted by date, then severity high to low. Same-rank findings keep
    /// detection order.
    pub fn predict(
        &self,
        scope: &DataScope<'_>,
        household_id: &str,
        start_date: NaiveDate,
        days_ahead: u32,
    ) -> AppResult<Vec<WorkloadPrediction>> {
        let mut predictions = Vec::new();

        for offset in 0..days_ahead {
            let Some(date) = start_date.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            let balances = self.balancer.balance(scope, household_id, date, None)?;
            if balances.is_empty() {
                debug!(target: "app::intelligence::prediction", household_id, %date, "no workers, skipping day");
                continue;
            }
            predictions.extend(self.predict_day(date, &balances));
        }

        predictions.sort_by_key(|prediction| (prediction.date, prediction.severity.rank()));

        info!(
            target: "app::intelligence::prediction",
            household_id,
            %start_date,
            days_ahead,
            findings = predictions.len(),
            high = predictions
                .iter()
                .filter(|prediction| prediction.severity == PredictionSeverity::High)
                .count(),
            "predicted workload issues"
        );

        Ok(predictions)
    }

    /// Findings for one day, unsorted.
    pub fn predict_day(&self, date: NaiveDate, balances: &[WorkloadBalance]) -> Vec<WorkloadPrediction> {
        let thresholds = &self.settings.prediction;
        let mut findings = Vec::new();

        for balance in balances {
            if balance.utilization_percent > thresholds.overload_percent {
                let severity = if balance.utilization_percent > thresholds.severe_overload_percent {
                    PredictionSeverity::High
                } else {
                    PredictionSeverity::Medium
                };
                let heaviest = balance.tasks.iter().max_by_key(|task| task.minutes);
                findings.push(WorkloadPrediction {
                    date,
                    kind: PredictionKind::Overload,
                    severity,
                    message: format!(
                        "{} is scheduled at {}% of available time ({} of {} minutes)",
                        balance.worker_name,
                        balance.utilization_percent,
                        balance.assigned_minutes,
                        balance.available_minutes
                    ),
                    worker_id: Some(balance.worker_id.clone()),
                    space_id: heaviest.map(|task| task.space_id.clone()),
                    suggested_action: match heaviest {
                        Some(task) => format!(
                            "Move {} ({} min) to another worker or day",
                            task.task_id, task.minutes
                        ),
                        None => "Reassign some of this worker's tasks".to_string(),
                    },
                });
            } else if !balance.tasks.is_empty()
                && balance.utilization_percent < thresholds.underload_percent
            {
                findings.push(WorkloadPrediction {
                    date,
                    kind: PredictionKind::Underload,
                    severity: PredictionSeverity::Low,
                    message: format!(
                        "{} is scheduled at only {}% of available time",
                        balance.worker_name, balance.utilization_percent
                    ),
                    worker_id: Some(balance.worker_id.clone()),
                    space_id: None,
                    suggested_action: "Assign pending tasks to this worker".to_string(),
                });
            }
        }

        if let Some(finding) = self.imbalance(date, balances) {
            findings.push(finding);
        }
        if let Some(finding) = self.bottleneck(date, balances) {
            findings.push(finding);
        }

        findings
    }

    fn imbalance(&self, date: NaiveDate, balances: &[WorkloadBalance]) -> Option<WorkloadPrediction> {
        let thresholds = &self.settings.prediction;
        let busiest = balances.iter().max_by_key(|balance| balance.utilization_percent)?;
        let idlest = balances.iter().min_by_key(|balance| balance.utilization_percent)?;
        let spread = busiest.utilization_percent - idlest.utilization_percent;

        let severity = if spread > thresholds.severe_imbalance_spread {
            PredictionSeverity::High
        } else if spread > thresholds.imbalance_spread {
            PredictionSeverity::Medium
        } else {
            return None;
        };

        Some(WorkloadPrediction {
            date,
            kind: PredictionKind::Imbalance,
            severity,
            message: format!(
                "Load spread of {spread} points between {} ({}%) and {} ({}%)",
                busiest.worker_name,
                busiest.utilization_percent,
                idlest.worker_name,
                idlest.utilization_percent
            ),
            worker_id: Some(busiest.worker_id.clone()),
            space_id: None,
            suggested_action: format!(
                "Shift work from {} to {}",
                busiest.worker_name, idlest.worker_name
            ),
        })
    }

    /// Every worker over capacity: rebalancing alone cannot fix the day.
    fn bottleneck(&self, date: NaiveDate, balances: &[WorkloadBalance]) -> Option<WorkloadPrediction> {
        let loaded = balances.iter().filter(|balance| !balance.tasks.is_empty()).count();
        if loaded < 2 || !balances.iter().all(|balance| balance.is_overloaded) {
            return None;
        }

        let assigned: u64 = balances
            .iter()
            .map(|balance| u64::from(balance.assigned_minutes))
            .sum();
        let available: u64 = balances
            .iter()
            .map(|balance| u64::from(balance.available_minutes))
            .sum();
        Some(WorkloadPrediction {
            date,
            kind: PredictionKind::Bottleneck,
            severity: PredictionSeverity::High,
            message: format!(
                "All {} workers are over capacity ({assigned} of {available} minutes)",
                balances.len()
            ),
            worker_id: None,
            space_id: None,
            suggested_action: "Postpone tasks or add available hours".to_string(),
        })
    }
}
