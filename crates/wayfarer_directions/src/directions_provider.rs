use std::future::Future;

use wayfarer_geo::{coordinate::Coordinate, route::Route};

use crate::error::DirectionsError;

/// A directions service returning the path of its first route alternative.
pub trait DirectionsProvider: Send + Sync + 'static {
    fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Result<Route, DirectionsError>> + Send;
}
