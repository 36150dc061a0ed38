use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Tier for `sample_count` given the inclusive lower bounds of the medium and high tiers.
    pub fn for_samples(sample_count: usize, medium_from: usize, high_from: usize) -> Self {
        if sample_count >= high_from {
            ConfidenceTier::High
        } else if sample_count >= medium_from {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ConfidenceTier {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "low" => Ok(ConfidenceTier::Low),
            "medium" => Ok(ConfidenceTier::Medium),
            "high" => Ok(ConfidenceTier::High),
            other => Err(format!("unsupported confidence tier: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDurationEstimate {
    pub task_id: String,
    pub space_id: String,
    pub estimated_minutes: u32,
    pub learned_minutes: u32,
    pub sample_count: usize,
    pub confidence: ConfidenceTier,
}

impl TaskDurationEstimate {
    /// Estimate for a task nobody has timed yet.
    pub fn unlearned(task_id: &str, space_id: &str, estimated_minutes: u32) -> Self {
        Self {
            task_id: task_id.to_string(),
            space_id: space_id.to_string(),
            estimated_minutes,
            learned_minutes: estimated_minutes,
            sample_count: 0,
            confidence: ConfidenceTier::Low,
        }
    }

    pub fn is_learned(&self) -> bool {
        self.sample_count > 0
    }
}
