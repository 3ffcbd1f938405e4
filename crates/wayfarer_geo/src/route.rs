use serde::{Deserialize, Serialize};

use crate::{coordinate::Coordinate, meters::Meters};

/// Ordered path from start to end. An empty route means "no route": nothing
/// fetched yet, a fetch in flight, or a failed fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the haversine length of every leg of the polyline.
    pub fn length(&self) -> Meters {
        self.points
            .windows(2)
            .map(|leg| leg[0].haversine_distance(&leg[1]))
            .sum()
    }
}

impl FromIterator<Coordinate> for Route {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Route::new(iter.into_iter().collect())
    }
}

impl From<&Route> for geo_types::LineString<f64> {
    fn from(route: &Route) -> Self {
        route
            .points
            .iter()
            .map(|&coordinate| geo_types::Coord::from(coordinate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_route() {
        let route = Route::empty();

        assert!(route.is_empty());
        assert_eq!(route.len(), 0);
        assert_eq!(route.length(), Meters::ZERO);
    }

    #[test]
    fn test_length_sums_legs() {
        let route: Route = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ]
        .into_iter()
        .collect();

        assert!((route.length().value() - 2.0 * 111_194.93).abs() < 1.0);
    }

    #[test]
    fn test_line_string_uses_lon_lat() {
        let route = Route::new(vec![Coordinate::new(31.79, -7.09), Coordinate::new(31.8, -7.1)]);
        let line: geo_types::LineString = (&route).into();

        assert_eq!(line.0.len(), 2);
        assert_eq!(line.0[0].x, -7.09);
        assert_eq!(line.0[0].y, 31.79);
    }

    #[test]
    fn test_serializes_as_array() {
        let route = Route::new(vec![Coordinate::new(1.0, 2.0)]);
        let json = serde_json::to_string(&route).unwrap();

        assert_eq!(json, r#"[{"latitude":1.0,"longitude":2.0}]"#);
    }
}
