use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::duration::ConfidenceTier;

/// Every tunable constant of the intelligence engine. Missing keys in a
/// settings file take the default value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IntelligenceSettings {
    pub default_task_minutes: u32,
    /// Fallback durations keyed by task name, used when a task has no configured estimate.
    pub task_duration_defaults: BTreeMap<String, u32>,
    pub completion_sample_limit: usize,
    pub worker_history_limit: usize,
    pub medium_confidence_samples: usize,
    pub high_confidence_samples: usize,
    pub confidence_weights: ConfidenceWeights,
    pub score_weights: ScoreWeights,
    pub min_consistency_samples: usize,
    pub default_available_minutes: u32,
    pub balance: BalanceThresholds,
    pub prediction: PredictionThresholds,
    pub assignment: AssignmentWeights,
    pub summary_days_ahead: u32,
}

impl Default for IntelligenceSettings {
    fn default() -> Self {
        Self {
            default_task_minutes: 30,
            task_duration_defaults: default_task_durations(),
            completion_sample_limit: 50,
            worker_history_limit: 100,
            medium_confidence_samples: 5,
            high_confidence_samples: 15,
            confidence_weights: ConfidenceWeights::default(),
            score_weights: ScoreWeights::default(),
            min_consistency_samples: 3,
            default_available_minutes: 480,
            balance: BalanceThresholds::default(),
            prediction: PredictionThresholds::default(),
            assignment: AssignmentWeights::default(),
            summary_days_ahead: 7,
        }
    }
}

impl IntelligenceSettings {
    /// Configured fallback for a task without its own estimate.
    pub fn fallback_minutes(&self, task_name: Option<&str>) -> u32 {
        task_name
            .and_then(|name| self.task_duration_defaults.get(name).copied())
            .unwrap_or(self.default_task_minutes)
    }

    pub fn confidence_tier(&self, sample_count: usize) -> ConfidenceTier {
        ConfidenceTier::for_samples(
            sample_count,
            self.medium_confidence_samples,
            self.high_confidence_samples,
        )
    }
}

fn default_task_durations() -> BTreeMap<String, u32> {
    [
        ("Barrer", 20),
        ("Trapear", 30),
        ("Aspirar", 25),
        ("Limpiar baño", 40),
        ("Lavar platos", 20),
        ("Lavar ropa", 45),
        ("Planchar", 60),
        ("Regar plantas", 15),
        ("Cortar césped", 90),
        ("Limpiar ventanas", 45),
        ("Sacar basura", 10),
    ]
    .into_iter()
    .map(|(name, minutes)| (name.to_string(), minutes))
    .collect()
}

/// Weights used to turn confidence tiers into a 0-1 average.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceWeights {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            high: 1.0,
            medium: 0.5,
            low: 0.2,
        }
    }
}

impl ConfidenceWeights {
    pub fn weight(&self, tier: ConfidenceTier) -> f64 {
        match tier {
            ConfidenceTier::High => self.high,
            ConfidenceTier::Medium => self.medium,
            ConfidenceTier::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    /// Points awarded for a perfect 5/5 average rating.
    pub rating_points: f64,
    pub speed: f64,
    pub reliability: f64,
    pub consistency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating_points: 25.0,
            speed: 0.25,
            reliability: 0.30,
            consistency: 0.20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BalanceThresholds {
    pub overload_percent: u32,
    pub underload_percent: u32,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            overload_percent: 100,
            underload_percent: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictionThresholds {
    pub overload_percent: u32,
    pub severe_overload_percent: u32,
    pub underload_percent: u32,
    pub imbalance_spread: u32,
    pub severe_imbalance_spread: u32,
}

impl Default for PredictionThresholds {
    fn default() -> Self {
        Self {
            overload_percent: 110,
            severe_overload_percent: 130,
            underload_percent: 40,
            imbalance_spread: 40,
            severe_imbalance_spread: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentWeights {
    pub load_weight: f64,
    /// Projected load ratio beyond which workers stop losing points.
    pub load_cap: f64,
    pub primary_bonus: f64,
    pub priority_base: f64,
    pub priority_step: f64,
    pub performance_weight: f64,
}

impl Default for AssignmentWeights {
    fn default() -> Self {
        Self {
            load_weight: 40.0,
            load_cap: 1.5,
            primary_bonus: 25.0,
            priority_base: 20.0,
            priority_step: 5.0,
            performance_weight: 15.0,
        }
    }
}
