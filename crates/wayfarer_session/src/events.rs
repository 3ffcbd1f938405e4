use std::time::Duration;

use serde::Serialize;
use serde_with::{DurationMilliSeconds, serde_as};
use wayfarer_directions::error::RouteError;
use wayfarer_geo::{coordinate::Coordinate, error::GeoError};
use wayfarer_location::error::LocationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-facing message. Every recovered error ends up as one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&LocationError> for Notice {
    fn from(error: &LocationError) -> Self {
        match error {
            // Not an error for the user: the map falls back to the default region
            LocationError::AcquisitionTimeout(_) => {
                Notice::info("Unable to obtain your location. Showing the default region.")
            }
            other => Notice::error(other.to_string()),
        }
    }
}

impl From<&RouteError> for Notice {
    fn from(error: &RouteError) -> Self {
        Notice::error(error.to_string())
    }
}

impl From<&GeoError> for Notice {
    fn from(error: &GeoError) -> Self {
        Notice::error(format!("Invalid destination: {error}"))
    }
}

/// Visible map area: a center and the span in degrees on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub const fn around(center: Coordinate, delta: f64) -> Self {
        Self {
            center,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CameraCommand {
    CenterOn {
        region: Region,
        #[serde_as(as = "DurationMilliSeconds<u64>")]
        animation: Duration,
    },
}

/// Everything the session pushes to the map rendering surface besides frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiEvent {
    Notice(Notice),
    Camera(CameraCommand),
}
