use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    #[error("Latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("Invalid coordinate '{0}', expected '<lat>,<lon>'")]
    Parse(String),
}
