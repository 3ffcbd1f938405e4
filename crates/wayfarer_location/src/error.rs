use std::time::Duration;

use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied.")]
    PermissionDenied,

    #[error("Unable to obtain a location fix within {0:?}.")]
    AcquisitionTimeout(Duration),

    #[error("Problem retrieving the location: {0}")]
    Unavailable(#[from] PlatformError),
}
