use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{distance::haversine_distance, error::GeoError, meters::Meters};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::try_new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Builds a coordinate without range checks, for values reported by trusted
    /// collaborators (platform fixes, directions geometry).
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }

        Ok(Self::new(latitude, longitude))
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn haversine_distance(&self, to: &Coordinate) -> Meters {
        Meters::new(haversine_distance(
            self.latitude,
            self.longitude,
            to.latitude,
            to.longitude,
        ))
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = GeoError;

    /// Parses `"<lat>,<lon>"`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = input
            .split_once(',')
            .ok_or_else(|| GeoError::Parse(input.to_string()))?;

        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Parse(input.to_string()))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Parse(input.to_string()))?;

        Coordinate::try_new(latitude, longitude)
    }
}

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Point::new(coordinate.longitude, coordinate.latitude)
    }
}

impl From<&Coordinate> for geo_types::Point<f64> {
    fn from(coordinate: &Coordinate) -> Self {
        (*coordinate).into()
    }
}

impl From<Coordinate> for geo_types::Coord<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Coord {
            x: coordinate.longitude,
            y: coordinate.latitude,
        }
    }
}

impl From<geo_types::Point<f64>> for Coordinate {
    fn from(point: geo_types::Point<f64>) -> Self {
        Coordinate::new(point.y(), point.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert_eq!(
            Coordinate::try_new(90.5, 0.0),
            Err(GeoError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinate::try_new(0.0, -180.1),
            Err(GeoError::LongitudeOutOfRange(-180.1))
        );
        assert!(Coordinate::try_new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::try_new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_parse() {
        let coordinate: Coordinate = "31.79, -7.09".parse().unwrap();

        assert_eq!(coordinate.latitude(), 31.79);
        assert_eq!(coordinate.longitude(), -7.09);

        assert!("31.79".parse::<Coordinate>().is_err());
        assert!("abc,1".parse::<Coordinate>().is_err());
        assert!("95,1".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_geo_types_axis_order() {
        let coordinate = Coordinate::new(31.79, -7.09);
        let point: geo_types::Point = coordinate.into();

        assert_eq!(point.x(), -7.09);
        assert_eq!(point.y(), 31.79);
        assert_eq!(Coordinate::from(point), coordinate);
    }

    #[test]
    fn test_deserialize_validates() {
        let coordinate: Coordinate =
            serde_json::from_str(r#"{"latitude": 31.8, "longitude": -7.1}"#).unwrap();
        assert_eq!(coordinate, Coordinate::new(31.8, -7.1));

        let invalid = serde_json::from_str::<Coordinate>(r#"{"latitude": 120, "longitude": 0}"#);
        assert!(invalid.is_err());
    }
}
