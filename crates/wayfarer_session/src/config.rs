use std::time::Duration;

use wayfarer_geo::coordinate::Coordinate;
use wayfarer_location::{platform::WatchOptions, provider::AcquireOptions};

use crate::events::Region;

/// Shown when the initial fix cannot be obtained (Morocco).
pub const DEFAULT_REGION: Region = Region::around(Coordinate::new(31.7917, -7.0926), 5.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Span in degrees used when following the user
    pub follow_delta: f64,
    pub animation: Duration,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_delta: 0.01,
            animation: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub acquire: AcquireOptions,
    pub watch: WatchOptions,
    pub camera: CameraConfig,
    pub default_region: Region,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            acquire: AcquireOptions::default(),
            watch: WatchOptions::default(),
            camera: CameraConfig::default(),
            default_region: DEFAULT_REGION,
        }
    }
}
