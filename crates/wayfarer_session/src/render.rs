use serde::Serialize;
use wayfarer_geo::{
    coordinate::Coordinate, location_fix::LocationFix, meters::Meters, route::Route,
};

use crate::{phase::Phase, state::SessionState};

/// Inputs of the map rendering surface: markers, polyline, spinner and the
/// distance banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderFrame {
    pub fix: Option<LocationFix>,
    pub destination: Option<Coordinate>,
    pub route: Route,
    pub loading: bool,
    pub distance: Option<Meters>,
    pub phase: Phase,
}

impl From<&SessionState> for RenderFrame {
    fn from(state: &SessionState) -> Self {
        Self {
            fix: state.fix().copied(),
            destination: state.destination(),
            route: state.route().clone(),
            loading: state.loading(),
            distance: state.distance(),
            phase: state.phase(),
        }
    }
}
