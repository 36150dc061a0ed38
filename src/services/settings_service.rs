use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::json;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::settings::IntelligenceSettings;

/// Names a YAML settings file to load instead of the built-in defaults.
pub const CONFIG_ENV_VAR: &str = "HOUSEHOLD_INTEL_CONFIG";

/// Loads, validates and caches engine settings.
pub struct SettingsService {
    source: Option<PathBuf>,
    cache: RwLock<Option<IntelligenceSettings>>,
}

impl SettingsService {
    /// `None` means built-in defaults.
    pub fn new(source: Option<PathBuf>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    /// Uses the file named by `HOUSEHOLD_INTEL_CONFIG`, if set and non-empty.
    pub fn from_env() -> Self {
        let source = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::new(source)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn get(&self) -> AppResult<IntelligenceSettings> {
        if let Ok(guard) = self.cache.read() {
            if let Some(settings) = guard.as_ref() {
                return Ok(settings.clone());
            }
        }

        let settings = self.load()?;
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(settings.clone());
        }
        Ok(settings)
    }

    /// Drops the cached copy and reads the source again.
    pub fn reload(&self) -> AppResult<IntelligenceSettings> {
        if let Ok(mut guard) = self.cache.write() {
            *guard = None;
        }
        self.get()
    }

    fn load(&self) -> AppResult<IntelligenceSettings> {
        match &self.source {
            Some(path) => Self::load_from_path(path),
            None => {
                info!(target: "app::settings", "no settings file, using defaults");
                Ok(IntelligenceSettings::default())
            }
        }
    }

    pub fn load_from_path(path: &Path) -> AppResult<IntelligenceSettings> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            warn!(target: "app::settings", path = %path.display(), error = %err, "cannot read settings file");
            AppError::from(err)
        })?;
        let settings = Self::parse_yaml(&raw)?;
        info!(target: "app::settings", path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    /// Empty documents yield the defaults.
    pub fn parse_yaml(raw: &str) -> AppResult<IntelligenceSettings> {
        let settings = if raw.trim().is_empty() {
            IntelligenceSettings::default()
        } else {
            serde_yaml::from_str(raw)?
        };
        validate(&settings)?;
        Ok(settings)
    }
}

pub fn validate(settings: &IntelligenceSettings) -> AppResult<()> {
    if settings.default_task_minutes == 0 {
        return Err(invalid("defaultTaskMinutes", "must be greater than zero"));
    }
    if let Some((name, _)) = settings
        .task_duration_defaults
        .iter()
        .find(|(_, minutes)| **minutes == 0)
    {
        return Err(invalid(
            "taskDurationDefaults",
            &format!("default for \"{name}\" must be greater than zero"),
        ));
    }
    if settings.completion_sample_limit == 0 {
        return Err(invalid("completionSampleLimit", "must be greater than zero"));
    }
    if settings.worker_history_limit == 0 {
        return Err(invalid("workerHistoryLimit", "must be greater than zero"));
    }
    if settings.default_available_minutes == 0 {
        return Err(invalid("defaultAvailableMinutes", "must be greater than zero"));
    }
    if settings.summary_days_ahead == 0 {
        return Err(invalid("summaryDaysAhead", "must be greater than zero"));
    }
    if settings.medium_confidence_samples == 0
        || settings.high_confidence_samples <= settings.medium_confidence_samples
    {
        return Err(invalid(
            "highConfidenceSamples",
            "tier thresholds must satisfy 0 < medium < high",
        ));
    }

    let weights = &settings.confidence_weights;
    if [weights.high, weights.medium, weights.low]
        .iter()
        .any(|weight| !weight.is_finite() || !(0.0..=1.0).contains(weight))
    {
        return Err(invalid("confidenceWeights", "weights must lie within 0..=1"));
    }

    let score = &settings.score_weights;
    if [score.rating_points, score.speed, score.reliability, score.consistency]
        .iter()
        .any(|weight| !weight.is_finite() || *weight < 0.0)
    {
        return Err(invalid("scoreWeights", "weights must be finite and non-negative"));
    }

    if settings.balance.underload_percent >= settings.balance.overload_percent {
        return Err(invalid(
            "balance",
            "underloadPercent must be below overloadPercent",
        ));
    }

    let prediction = &settings.prediction;
    if prediction.severe_overload_percent < prediction.overload_percent {
        return Err(invalid(
            "prediction.severeOverloadPercent",
            "must not be below overloadPercent",
        ));
    }
    if prediction.severe_imbalance_spread < prediction.imbalance_spread {
        return Err(invalid(
            "prediction.severeImbalanceSpread",
            "must not be below imbalanceSpread",
        ));
    }

    let assignment = &settings.assignment;
    if [
        assignment.load_weight,
        assignment.load_cap,
        assignment.primary_bonus,
        assignment.priority_base,
        assignment.priority_step,
        assignment.performance_weight,
    ]
    .iter()
    .any(|weight| !weight.is_finite() || *weight < 0.0)
    {
        return Err(invalid("assignment", "weights must be finite and non-negative"));
    }

    Ok(())
}

fn invalid(field: &str, reason: &str) -> AppError {
    AppError::validation_with_details(
        format!("invalid setting {field}: {reason}"),
        json!({ "field": field, "reason": reason }),
    )
}
