use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Accuracy tier requested from the platform location service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    Low,
    Balanced,
    #[default]
    High,
}

impl Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Accuracy::Low => "low",
                Accuracy::Balanced => "balanced",
                Accuracy::High => "high",
            }
        )
    }
}

/// A single reported position. Every new fix supersedes the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub accuracy: Accuracy,
}

impl LocationFix {
    pub fn new(coordinate: Coordinate, accuracy: Accuracy) -> Self {
        Self {
            coordinate,
            accuracy,
        }
    }
}
