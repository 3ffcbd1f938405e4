use tracing::{debug, warn};
use wayfarer_geo::{coordinate::Coordinate, route::Route};

use crate::{directions_provider::DirectionsProvider, error::RouteError};

/// Single-shot route lookups: no retry, no caching, no cancellation.
pub struct RouteFetcher<D> {
    provider: D,
}

impl<D> RouteFetcher<D>
where
    D: DirectionsProvider,
{
    pub fn new(provider: D) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &D {
        &self.provider
    }

    /// Fetches a route from `origin` to `destination`. A missing origin fails
    /// with [`RouteError::InvalidOrigin`] before any request is issued.
    pub async fn fetch_route(
        &self,
        origin: Option<Coordinate>,
        destination: Coordinate,
    ) -> Result<Route, RouteError> {
        let Some(origin) = origin else {
            warn!("RouteFetcher: no origin for destination {}", destination);
            return Err(RouteError::InvalidOrigin);
        };

        match self.provider.directions(origin, destination).await {
            Ok(route) if route.is_empty() => {
                warn!("RouteFetcher: provider returned an empty geometry");
                Err(RouteError::NoRouteFound)
            }
            Ok(route) => {
                debug!(
                    "RouteFetcher: {} -> {} resolved with {} positions",
                    origin,
                    destination,
                    route.len()
                );
                Ok(route)
            }
            Err(error) => {
                warn!("RouteFetcher: {} -> {} failed: {}", origin, destination, error);
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::DirectionsError;

    enum Answer {
        Route(Vec<Coordinate>),
        NoRoute,
        Api(u16),
    }

    struct FakeDirections {
        answer: Answer,
        calls: AtomicUsize,
    }

    impl FakeDirections {
        fn new(answer: Answer) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DirectionsProvider for FakeDirections {
        async fn directions(
            &self,
            _start: Coordinate,
            _end: Coordinate,
        ) -> Result<Route, DirectionsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            match &self.answer {
                Answer::Route(points) => Ok(Route::new(points.clone())),
                Answer::NoRoute => Err(DirectionsError::NoRouteFound),
                Answer::Api(status) => Err(DirectionsError::Api {
                    status: *status,
                    message: "upstream failure".to_string(),
                }),
            }
        }
    }

    const ORIGIN: Coordinate = Coordinate::new(31.79, -7.09);
    const DESTINATION: Coordinate = Coordinate::new(31.80, -7.10);

    #[tokio::test]
    async fn test_missing_origin_issues_no_request() {
        let fetcher = RouteFetcher::new(FakeDirections::new(Answer::Route(vec![ORIGIN])));

        let result = fetcher.fetch_route(None, DESTINATION).await;

        assert_eq!(result, Err(RouteError::InvalidOrigin));
        assert_eq!(fetcher.provider().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_route_is_returned() {
        let fetcher = RouteFetcher::new(FakeDirections::new(Answer::Route(vec![
            ORIGIN,
            DESTINATION,
        ])));

        let route = fetcher.fetch_route(Some(ORIGIN), DESTINATION).await.unwrap();

        assert_eq!(route.points(), &[ORIGIN, DESTINATION]);
        assert_eq!(fetcher.provider().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_route_found() {
        let fetcher = RouteFetcher::new(FakeDirections::new(Answer::NoRoute));

        let result = fetcher.fetch_route(Some(ORIGIN), DESTINATION).await;

        assert_eq!(result, Err(RouteError::NoRouteFound));
    }

    #[tokio::test]
    async fn test_empty_geometry_is_no_route() {
        let fetcher = RouteFetcher::new(FakeDirections::new(Answer::Route(vec![])));

        let result = fetcher.fetch_route(Some(ORIGIN), DESTINATION).await;

        assert_eq!(result, Err(RouteError::NoRouteFound));
    }

    #[tokio::test]
    async fn test_api_failure_is_fetch_error() {
        let fetcher = RouteFetcher::new(FakeDirections::new(Answer::Api(502)));

        let result = fetcher.fetch_route(Some(ORIGIN), DESTINATION).await;

        assert!(matches!(
            result,
            Err(RouteError::RouteFetchError(message)) if message.contains("502")
        ));
        assert_eq!(fetcher.provider().calls.load(Ordering::SeqCst), 1);
    }
}
