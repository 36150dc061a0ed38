use tracing::debug;

use crate::error::AppResult;
use crate::models::duration::TaskDurationEstimate;
use crate::models::settings::IntelligenceSettings;
use crate::services::data_access::DataScope;
use crate::utils::stats::{decayed_weighted_average, round_to_u32};

/// Learns how long a task really takes in a given space from its completion history.
pub struct DurationEstimator<'a> {
    settings: &'a IntelligenceSettings,
}

impl<'a> DurationEstimator<'a> {
    pub fn new(settings: &'a IntelligenceSettings) -> Self {
        Self { settings }
    }

    /// Never fails on missing metadata or history; only store failures propagate.
    pub fn estimate(
        &self,
        scope: &DataScope<'_>,
        task_id: &str,
        space_id: &str,
    ) -> AppResult<TaskDurationEstimate> {
        let estimated_minutes = self.configured_minutes(scope, task_id, space_id)?;
        let records = scope.completions(task_id, space_id, self.settings.completion_sample_limit)?;

        let samples: Vec<u32> = records
            .iter()
            .filter_map(|record| record.measured_minutes())
            .take(self.settings.completion_sample_limit)
            .collect();

        let estimate = self.from_samples(task_id, space_id, estimated_minutes, &samples);

        debug!(
            target: "app::intelligence::duration",
            task_id,
            space_id,
            estimated = estimate.estimated_minutes,
            learned = estimate.learned_minutes,
            samples = estimate.sample_count,
            confidence = %estimate.confidence,
            "estimated task duration"
        );

        Ok(estimate)
    }

    /// Estimate from samples already ordered newest first.
    pub fn from_samples(
        &self,
        task_id: &str,
        space_id: &str,
        estimated_minutes: u32,
        samples: &[u32],
    ) -> TaskDurationEstimate {
        match decayed_weighted_average(samples) {
            None => TaskDurationEstimate::unlearned(task_id, space_id, estimated_minutes),
            Some(average) => TaskDurationEstimate {
                task_id: task_id.to_string(),
                space_id: space_id.to_string(),
                estimated_minutes,
                learned_minutes: round_to_u32(average),
                sample_count: samples.len(),
                confidence: self.settings.confidence_tier(samples.len()),
            },
        }
    }

    /// Task's own estimate, else the named default, else the global default.
    fn configured_minutes(
        &self,
        scope: &DataScope<'_>,
        task_id: &str,
        space_id: &str,
    ) -> AppResult<u32> {
        let definition = scope.task_definition(task_id, space_id)?;
        Ok(match definition {
            Some(definition) => definition
                .estimated_minutes
                .unwrap_or_else(|| self.settings.fallback_minutes(Some(definition.name.as_str()))),
            None => self.settings.fallback_minutes(None),
        })
    }
}
