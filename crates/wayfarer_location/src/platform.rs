use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::sync::mpsc;
use wayfarer_geo::{
    location_fix::{Accuracy, LocationFix},
    meters::Meters,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Thresholds for a position stream: a fix is reported at most every
/// `time_interval`, and only once the device moved `distance_interval`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    pub accuracy: Accuracy,
    pub time_interval: Duration,
    pub distance_interval: Meters,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            time_interval: Duration::from_secs(1),
            distance_interval: Meters::new(1.0),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Location services are disabled")]
    ServicesDisabled,
}

/// The device location service.
///
/// `watch_position` streams fixes into the returned receiver until the
/// receiver is dropped, which ends the subscription on the platform side.
pub trait LocationPlatform: Send + Sync + 'static {
    fn request_foreground_permission(&self) -> impl Future<Output = PermissionStatus> + Send;

    fn current_position(
        &self,
        accuracy: Accuracy,
    ) -> impl Future<Output = Result<LocationFix, PlatformError>> + Send;

    fn watch_position(
        &self,
        options: WatchOptions,
    ) -> impl Future<Output = Result<mpsc::Receiver<LocationFix>, PlatformError>> + Send;
}
