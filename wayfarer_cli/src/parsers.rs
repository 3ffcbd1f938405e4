use jiff::SpanRelativeTo;
use wayfarer_geo::coordinate::Coordinate;

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(millis) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_millis(millis.abs()));
    }

    Err(String::from("Invalid duration"))
}

pub fn parse_coordinate(input: &str) -> Result<Coordinate, String> {
    input.parse::<Coordinate>().map_err(|error| error.to_string())
}

/// Converts a parsed CLI duration into the std duration tokio expects.
pub fn to_std_duration(duration: jiff::SignedDuration) -> anyhow::Result<std::time::Duration> {
    Ok(std::time::Duration::try_from(duration)?)
}
