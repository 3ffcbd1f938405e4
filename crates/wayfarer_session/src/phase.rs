use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Fetching,
    Routed,
    RouteFailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    LocatingInitial,
    LocatedNoDestination,
    DestinationSelected(RouteStatus),
}

impl Phase {
    pub fn is_fetching(&self) -> bool {
        matches!(self, Phase::DestinationSelected(RouteStatus::Fetching))
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Phase::Idle => "idle",
                Phase::LocatingInitial => "locating",
                Phase::LocatedNoDestination => "located",
                Phase::DestinationSelected(RouteStatus::Fetching) => "fetching",
                Phase::DestinationSelected(RouteStatus::Routed) => "routed",
                Phase::DestinationSelected(RouteStatus::RouteFailed) => "route failed",
            }
        )
    }
}
