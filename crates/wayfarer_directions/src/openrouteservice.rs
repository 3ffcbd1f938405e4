use serde::Deserialize;
use tracing::debug;
use wayfarer_geo::{coordinate::Coordinate, route::Route};

use crate::{
    directions_provider::DirectionsProvider, error::DirectionsError, profile::DirectionsProfile,
};

pub const OPENROUTESERVICE_API_URL: &str = "https://api.openrouteservice.org";
pub const DIRECTIONS_API_PATH: &str = "/v2/directions/";

pub const API_KEY_ENV_VAR: &str = "ORS_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "ORS_BASE_URL";

#[derive(Deserialize)]
struct DirectionsResponse {
    features: Option<Vec<DirectionsFeature>>,
}

#[derive(Deserialize)]
struct DirectionsFeature {
    geometry: DirectionsGeometry,
}

#[derive(Deserialize)]
struct DirectionsGeometry {
    /// [lon, lat] or [lon, lat, elevation]
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct OpenRouteServiceClientParams {
    pub api_key: String,
    pub base_url: String,
    pub profile: DirectionsProfile,
}

impl OpenRouteServiceClientParams {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENROUTESERVICE_API_URL.to_string(),
            profile: DirectionsProfile::default(),
        }
    }

    /// Reads `ORS_API_KEY` and, when set, `ORS_BASE_URL`.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let mut params = Self::new(std::env::var(API_KEY_ENV_VAR)?);

        if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR) {
            params.base_url = base_url;
        }

        Ok(params)
    }

    pub fn with_profile(mut self, profile: DirectionsProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// The provider expects positions as `<lon>,<lat>`.
pub fn lon_lat_param(coordinate: &Coordinate) -> String {
    format!("{},{}", coordinate.longitude(), coordinate.latitude())
}

/// Decodes the first route alternative of a directions response, swapping
/// the provider's [lon, lat] positions back to latitude/longitude.
pub fn decode_route(body: &[u8]) -> Result<Route, DirectionsError> {
    let response: DirectionsResponse = serde_json::from_slice(body)?;
    first_route(response)
}

/// Classifies a directions reply by status and body. The provider reports
/// unroutable requests as a JSON error document without `features`, whatever
/// the status, so any JSON reply is decoded and only non-JSON error bodies
/// are kept as [`DirectionsError::Api`].
pub fn classify_response(status: u16, body: &[u8]) -> Result<Route, DirectionsError> {
    if (200..300).contains(&status) {
        return decode_route(body);
    }

    match serde_json::from_slice::<DirectionsResponse>(body) {
        Ok(response) => first_route(response),
        Err(_) => Err(DirectionsError::Api {
            status,
            message: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}

fn first_route(response: DirectionsResponse) -> Result<Route, DirectionsError> {
    let feature = response
        .features
        .and_then(|features| features.into_iter().next())
        .ok_or(DirectionsError::NoRouteFound)?;

    feature
        .geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(index, position)| match position.as_slice() {
            [lon, lat, ..] => Ok(Coordinate::new(*lat, *lon)),
            _ => Err(DirectionsError::MalformedGeometry(index)),
        })
        .collect()
}

pub struct OpenRouteServiceClient {
    params: OpenRouteServiceClientParams,
    client: reqwest::Client,
}

impl OpenRouteServiceClient {
    pub fn new(params: OpenRouteServiceClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    fn directions_url(&self) -> String {
        let mut url = self.params.base_url.trim_end_matches('/').to_string();
        url.push_str(DIRECTIONS_API_PATH);
        url.push_str(&self.params.profile.to_string());
        url
    }

    pub fn build_request(
        &self,
        start: &Coordinate,
        end: &Coordinate,
    ) -> Result<reqwest::Request, DirectionsError> {
        let request = self
            .client
            .get(self.directions_url())
            .header(
                reqwest::header::ACCEPT,
                "application/json, application/geo+json",
            )
            .query(&[
                ("api_key", self.params.api_key.clone()),
                ("start", lon_lat_param(start)),
                ("end", lon_lat_param(end)),
            ])
            .build()?;

        Ok(request)
    }

    async fn handle_response(response: reqwest::Response) -> Result<Route, DirectionsError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("OpenRouteService: status {}, {} bytes", status, body.len());

        classify_response(status, &body)
    }
}

impl DirectionsProvider for OpenRouteServiceClient {
    async fn directions(&self, start: Coordinate, end: Coordinate) -> Result<Route, DirectionsError> {
        let request = self.build_request(&start, &end)?;

        debug!(
            "OpenRouteService: requesting {} route {} -> {}",
            self.params.profile, start, end
        );

        let response = self.client.execute(request).await?;
        let route = Self::handle_response(response).await?;

        debug!("OpenRouteService: route with {} positions", route.len());

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_value(request: &reqwest::Request, key: &str) -> Option<String> {
        request
            .url()
            .query_pairs()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    #[test]
    fn test_request_uses_lon_lat_order() {
        let client = OpenRouteServiceClient::new(OpenRouteServiceClientParams::new("secret"));

        let request = client
            .build_request(&Coordinate::new(31.79, -7.09), &Coordinate::new(31.80, -7.10))
            .unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(
            request.url().path(),
            "/v2/directions/driving-car"
        );
        assert_eq!(request.url().host_str(), Some("api.openrouteservice.org"));
        assert_eq!(query_value(&request, "start").as_deref(), Some("-7.09,31.79"));
        assert_eq!(query_value(&request, "end").as_deref(), Some("-7.1,31.8"));
        assert_eq!(query_value(&request, "api_key").as_deref(), Some("secret"));
    }

    #[test]
    fn test_request_honours_base_url_and_profile() {
        let mut params =
            OpenRouteServiceClientParams::new("key").with_profile(DirectionsProfile::FootWalking);
        params.base_url = "http://localhost:8082/ors/".to_string();
        let client = OpenRouteServiceClient::new(params);

        let request = client
            .build_request(&Coordinate::new(0.0, 0.0), &Coordinate::new(1.0, 1.0))
            .unwrap();

        assert_eq!(request.url().port(), Some(8082));
        assert_eq!(request.url().path(), "/ors/v2/directions/foot-walking");
    }

    #[test]
    fn test_decode_swaps_axes() {
        let body = br#"{
            "type": "FeatureCollection",
            "features": [
                { "geometry": { "coordinates": [[-7.09, 31.79], [-7.095, 31.795], [-7.1, 31.8]], "type": "LineString" } },
                { "geometry": { "coordinates": [[0.0, 0.0]] } }
            ]
        }"#;

        let route = decode_route(body).unwrap();

        assert_eq!(route.len(), 3);
        assert_eq!(route.points()[0], Coordinate::new(31.79, -7.09));
        assert_eq!(route.points()[1], Coordinate::new(31.795, -7.095));
        assert_eq!(route.points()[2], Coordinate::new(31.8, -7.1));
    }

    #[test]
    fn test_decode_ignores_elevation() {
        let body = br#"{ "features": [ { "geometry": { "coordinates": [[2.0, 1.0, 120.5]] } } ] }"#;

        let route = decode_route(body).unwrap();

        assert_eq!(route.points(), &[Coordinate::new(1.0, 2.0)]);
    }

    #[test]
    fn test_decode_empty_features_is_no_route() {
        assert!(matches!(
            decode_route(br#"{ "features": [] }"#),
            Err(DirectionsError::NoRouteFound)
        ));
        assert!(matches!(
            decode_route(br#"{ "type": "FeatureCollection" }"#),
            Err(DirectionsError::NoRouteFound)
        ));
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            decode_route(b"<html>Bad gateway</html>"),
            Err(DirectionsError::Deserialize(_))
        ));
        assert!(matches!(
            decode_route(br#"{ "features": [ { "geometry": { "coordinates": [[1.0, 2.0], [3.0]] } } ] }"#),
            Err(DirectionsError::MalformedGeometry(1))
        ));
        assert!(matches!(
            decode_route(br#"{ "features": [ { "properties": {} } ] }"#),
            Err(DirectionsError::Deserialize(_))
        ));
    }

    #[test]
    fn test_unroutable_error_document_is_no_route() {
        let body = br#"{
            "error": { "code": 2010, "message": "Could not find routable point within a radius of 350.0 meters of specified coordinate 0: -7.0900000 31.7900000." },
            "info": { "engine": { "version": "9.0.0" } }
        }"#;

        assert!(matches!(
            classify_response(404, body),
            Err(DirectionsError::NoRouteFound)
        ));
        assert!(matches!(
            classify_response(400, br#"{ "features": [] }"#),
            Err(DirectionsError::NoRouteFound)
        ));
    }

    #[test]
    fn test_non_json_error_body_is_api_error() {
        let result = classify_response(502, b"<html>Bad gateway</html>");

        match result {
            Err(DirectionsError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "<html>Bad gateway</html>");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_success_status_decodes_route() {
        let body = br#"{ "features": [ { "geometry": { "coordinates": [[-7.09, 31.79], [-7.1, 31.8]] } } ] }"#;

        let route = classify_response(200, body).unwrap();

        assert_eq!(route.points(), &[Coordinate::new(31.79, -7.09), Coordinate::new(31.8, -7.1)]);
        assert!(matches!(
            classify_response(200, b"not json"),
            Err(DirectionsError::Deserialize(_))
        ));
    }
}
