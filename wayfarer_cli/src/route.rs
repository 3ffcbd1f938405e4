use clap::Args;
use serde::Serialize;
use tracing::info;
use wayfarer_directions::{
    openrouteservice::{OpenRouteServiceClient, OpenRouteServiceClientParams},
    profile::DirectionsProfile,
    route_fetcher::RouteFetcher,
};
use wayfarer_geo::{coordinate::Coordinate, meters::Meters, route::Route};

use crate::parsers::parse_coordinate;

#[derive(Args)]
pub struct RouteArgs {
    /// Start position as `<lat>,<lon>`
    #[arg(short, long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    from: Coordinate,

    /// Destination as `<lat>,<lon>`
    #[arg(short, long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    to: Coordinate,

    #[arg(short, long, default_value = "driving-car")]
    profile: DirectionsProfile,
}

#[derive(Serialize)]
struct RouteOutput {
    straight_line: Meters,
    route_length: Meters,
    route: Route,
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let params = OpenRouteServiceClientParams::from_env()?.with_profile(args.profile);
    let fetcher = RouteFetcher::new(OpenRouteServiceClient::new(params));

    let route = fetcher.fetch_route(Some(args.from), args.to).await?;

    info!(
        "{} positions, {} along the route",
        route.len(),
        route.length()
    );

    let output = RouteOutput {
        straight_line: args.from.haversine_distance(&args.to),
        route_length: route.length(),
        route,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
