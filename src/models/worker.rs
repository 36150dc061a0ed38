use std::fmt;

use serde::{Deserialize, Serialize};

/// A worker's (or a task's) area of responsibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Interior,
    Exterior,
    Both,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Interior => "interior",
            Zone::Exterior => "exterior",
            Zone::Both => "both",
        }
    }

    /// `Both` on either side matches anything.
    pub fn covers(&self, other: Zone) -> bool {
        *self == Zone::Both || other == Zone::Both || *self == other
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Zone {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "interior" => Ok(Zone::Interior),
            "exterior" => Ok(Zone::Exterior),
            "both" => Ok(Zone::Both),
            other => Err(format!("unsupported zone: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub zone: Zone,
    /// Daily hours from the worker's schedule, when one is configured.
    pub schedule_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSpacePreference {
    pub worker_id: String,
    pub space_id: String,
    pub is_primary: bool,
    pub priority_order: u32,
}
