use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::employee::EmployeeScore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalancedTask {
    pub task_id: String,
    pub space_id: String,
    pub minutes: u32,
}

/// Load of one worker on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadBalance {
    pub worker_id: String,
    pub worker_name: String,
    pub date: NaiveDate,
    pub assigned_minutes: u32,
    pub available_minutes: u32,
    pub utilization_percent: u32,
    pub is_overloaded: bool,
    pub is_underloaded: bool,
    pub tasks: Vec<BalancedTask>,
}

impl WorkloadBalance {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentReason {
    PrimaryAssignee,
    LowerLoad,
    TeamBalance,
}

impl AssignmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentReason::PrimaryAssignee => "primary_assignee",
            AssignmentReason::LowerLoad => "lower_load",
            AssignmentReason::TeamBalance => "team_balance",
        }
    }
}

impl fmt::Display for AssignmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSuggestion {
    pub task_id: String,
    pub space_id: String,
    pub worker_id: String,
    pub worker_name: String,
    pub reason: AssignmentReason,
    pub justification: String,
    pub score: f64,
    pub projected_utilization_percent: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PredictionKind {
    Overload,
    Underload,
    Imbalance,
    Bottleneck,
}

impl PredictionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionKind::Overload => "overload",
            PredictionKind::Underload => "underload",
            PredictionKind::Imbalance => "imbalance",
            PredictionKind::Bottleneck => "bottleneck",
        }
    }
}

impl fmt::Display for PredictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSeverity {
    Low,
    Medium,
    High,
}

impl PredictionSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSeverity::Low => "low",
            PredictionSeverity::Medium => "medium",
            PredictionSeverity::High => "high",
        }
    }

    /// Sort rank, most severe first.
    pub fn rank(&self) -> u8 {
        match self {
            PredictionSeverity::High => 0,
            PredictionSeverity::Medium => 1,
            PredictionSeverity::Low => 2,
        }
    }
}

impl fmt::Display for PredictionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadPrediction {
    pub date: NaiveDate,
    pub kind: PredictionKind,
    pub severity: PredictionSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    pub suggested_action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceSummary {
    pub household_id: String,
    pub generated_on: NaiveDate,
    pub learned_task_count: usize,
    /// 0-1, weighted by confidence tier.
    pub avg_confidence_score: f64,
    pub employee_scores: Vec<EmployeeScore>,
    pub weekly_predictions: Vec<WorkloadPrediction>,
}
