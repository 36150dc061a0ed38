use tracing::debug;

use crate::error::AppResult;
use crate::models::employee::{EmployeeScore, ScoreBreakdown, NEUTRAL_SUB_SCORE};
use crate::models::settings::IntelligenceSettings;
use crate::models::task::TaskCompletionRecord;
use crate::models::worker::Worker;
use crate::services::data_access::DataScope;
use crate::utils::stats::{mean, population_std_dev, round_to_u32};

/// Scores workers on rating, speed, reliability and consistency from their
/// recent assignment history.
pub struct EmployeeScorer<'a> {
    settings: &'a IntelligenceSettings,
}

impl<'a> EmployeeScorer<'a> {
    pub fn new(settings: &'a IntelligenceSettings) -> Self {
        Self { settings }
    }

    /// Unknown workers get the neutral profile under their id.
    pub fn score_by_id(&self, scope: &DataScope<'_>, worker_id: &str) -> AppResult<EmployeeScore> {
        let name = scope
            .store()
            .get_worker(worker_id)?
            .map(|worker| worker.name)
            .unwrap_or_else(|| worker_id.to_string());
        let history = scope.worker_history(worker_id, self.settings.worker_history_limit)?;
        Ok(self.from_history(worker_id, &name, &history))
    }

    pub fn score(&self, scope: &DataScope<'_>, worker: &Worker) -> AppResult<EmployeeScore> {
        let history = scope.worker_history(&worker.id, self.settings.worker_history_limit)?;
        Ok(self.from_history(&worker.id, &worker.name, &history))
    }

    pub fn from_history(
        &self,
        worker_id: &str,
        worker_name: &str,
        history: &[TaskCompletionRecord],
    ) -> EmployeeScore {
        let history = &history[..history.len().min(self.settings.worker_history_limit)];
        if history.is_empty() {
            debug!(target: "app::intelligence::score", worker_id, "no history, neutral score");
            return EmployeeScore::neutral(worker_id, worker_name);
        }

        let completed: Vec<&TaskCompletionRecord> = history
            .iter()
            .filter(|record| record.status.is_completed())
            .collect();
        let timed: Vec<(&TaskCompletionRecord, u32)> = completed
            .iter()
            .filter_map(|record| record.timed_minutes().map(|minutes| (*record, minutes)))
            .collect();

        let avg_rating = self.average_rating(&completed);
        let speed_score = self.speed_score(&timed);
        let reliability_score = completed.len() as f64 / history.len() as f64 * 100.0;
        let consistency_score = self.consistency_score(&timed);

        let breakdown = self.breakdown(avg_rating, speed_score, reliability_score, consistency_score);
        let overall_score = round_to_u32(breakdown.total()).min(100);

        debug!(
            target: "app::intelligence::score",
            worker_id,
            overall = overall_score,
            rating = avg_rating,
            speed = speed_score,
            reliability = reliability_score,
            consistency = consistency_score,
            "scored worker"
        );

        EmployeeScore {
            worker_id: worker_id.to_string(),
            worker_name: worker_name.to_string(),
            overall_score,
            avg_rating,
            speed_score,
            reliability_score,
            consistency_score,
            total_tasks_completed: completed.len(),
            total_minutes_worked: timed.iter().map(|(_, minutes)| u64::from(*minutes)).sum(),
        }
    }

    pub fn breakdown(
        &self,
        avg_rating: f64,
        speed_score: f64,
        reliability_score: f64,
        consistency_score: f64,
    ) -> ScoreBreakdown {
        let weights = &self.settings.score_weights;
        ScoreBreakdown {
            rating_component: avg_rating / 5.0 * weights.rating_points,
            speed_component: speed_score * weights.speed,
            reliability_component: reliability_score * weights.reliability,
            consistency_component: consistency_score * weights.consistency,
        }
    }

    fn average_rating(&self, completed: &[&TaskCompletionRecord]) -> f64 {
        let ratings: Vec<f64> = completed
            .iter()
            .filter_map(|record| record.valid_rating())
            .map(f64::from)
            .collect();
        mean(&ratings).unwrap_or(0.0)
    }

    /// Half the expected pace scores 0, expected pace 50, 1.5x or better 100.
    fn speed_score(&self, timed: &[(&TaskCompletionRecord, u32)]) -> f64 {
        let ratios: Vec<f64> = timed
            .iter()
            .map(|(record, actual)| {
                let estimated = record
                    .estimated_minutes
                    .unwrap_or(self.settings.default_task_minutes);
                f64::from(estimated) / f64::from(*actual)
            })
            .collect();

        match mean(&ratios) {
            Some(avg_ratio) => ((avg_ratio - 0.5) * 100.0).clamp(0.0, 100.0),
            None => NEUTRAL_SUB_SCORE,
        }
    }

    fn consistency_score(&self, timed: &[(&TaskCompletionRecord, u32)]) -> f64 {
        if timed.len() < self.settings.min_consistency_samples {
            return NEUTRAL_SUB_SCORE;
        }

        let durations: Vec<f64> = timed.iter().map(|(_, minutes)| f64::from(*minutes)).collect();
        match (mean(&durations), population_std_dev(&durations)) {
            (Some(avg), Some(std_dev)) if avg > 0.0 => {
                let variation = std_dev / avg;
                (100.0 - variation * 100.0).max(0.0)
            }
            _ => NEUTRAL_SUB_SCORE,
        }
    }
}
