use serde::{Deserialize, Serialize};

/// Neutral values reported for a worker without any task history.
pub const NEUTRAL_OVERALL_SCORE: u32 = 50;
pub const NEUTRAL_SUB_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeScore {
    pub worker_id: String,
    pub worker_name: String,
    pub overall_score: u32,
    /// 0-5, 0 when nothing was rated.
    pub avg_rating: f64,
    pub speed_score: f64,
    pub reliability_score: f64,
    pub consistency_score: f64,
    pub total_tasks_completed: usize,
    pub total_minutes_worked: u64,
}

impl EmployeeScore {
    pub fn neutral(worker_id: &str, worker_name: &str) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            worker_name: worker_name.to_string(),
            overall_score: NEUTRAL_OVERALL_SCORE,
            avg_rating: 0.0,
            speed_score: NEUTRAL_SUB_SCORE,
            reliability_score: 0.0,
            consistency_score: NEUTRAL_SUB_SCORE,
            total_tasks_completed: 0,
            total_minutes_worked: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub rating_component: f64,
    pub speed_component: f64,
    pub reliability_component: f64,
    pub consistency_component: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.rating_component
            + self.speed_component
            + self.reliability_component
            + self.consistency_component
    }
}
