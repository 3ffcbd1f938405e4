use thiserror::Error;

/// Failures of a single directions request, as seen by a provider.
#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Malformed geometry: position {0} is not a [lon, lat] pair")]
    MalformedGeometry(usize),

    #[error("The response contains no route")]
    NoRouteFound,
}

/// Outcome of a failed route fetch. Every variant is terminal for the fetch
/// that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid starting position.")]
    InvalidOrigin,

    #[error("Unable to retrieve the route.")]
    NoRouteFound,

    #[error("Error while retrieving the route: {0}")]
    RouteFetchError(String),
}

impl From<DirectionsError> for RouteError {
    fn from(error: DirectionsError) -> Self {
        match error {
            DirectionsError::NoRouteFound => RouteError::NoRouteFound,
            other => RouteError::RouteFetchError(other.to_string()),
        }
    }
}
