use wayfarer_directions::error::RouteError;
use wayfarer_geo::{
    coordinate::Coordinate, location_fix::LocationFix, meters::Meters, route::Route,
};

use crate::phase::{Phase, RouteStatus};

/// Identifies the destination selection a route fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTag {
    pub generation: u64,
    pub destination: Coordinate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Applied,
    Failed(RouteError),
    /// The destination changed since the fetch was issued
    Stale,
}

/// The aggregate the map screen renders from. Only mutated through the
/// transitions below.
#[derive(Debug, Default)]
pub struct SessionState {
    fix: Option<LocationFix>,
    destination: Option<Coordinate>,
    route: Route,
    distance: Meters,
    loading: bool,
    phase: Phase,
    fetch_generation: u64,
    subscription: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fix(&self) -> Option<&LocationFix> {
        self.fix.as_ref()
    }

    pub fn current_location(&self) -> Option<Coordinate> {
        self.fix.map(|fix| fix.coordinate)
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Distance to the destination, `None` while no destination is set. Stays
    /// at its last value until a fix is available to recompute it.
    pub fn distance(&self) -> Option<Meters> {
        self.destination.map(|_| self.distance)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn begin_locating(&mut self) {
        self.phase = Phase::LocatingInitial;
        self.loading = true;
    }

    /// Ends the initial acquisition, with or without a fix. Loading is cleared
    /// on every path.
    pub fn finish_locating(&mut self, fix: Option<LocationFix>) {
        self.loading = false;

        if let Some(fix) = fix {
            self.apply_fix(fix);
        }

        if self.phase == Phase::LocatingInitial {
            self.phase = Phase::LocatedNoDestination;
        }
    }

    pub fn apply_fix(&mut self, fix: LocationFix) {
        self.fix = Some(fix);
        self.recompute_distance();
    }

    fn recompute_distance(&mut self) {
        if let (Some(fix), Some(destination)) = (self.fix, self.destination) {
            self.distance = fix.coordinate.haversine_distance(&destination);
        }
    }

    /// Replaces the destination, discards the current route and returns the
    /// tag the route fetch for this destination must carry.
    pub fn select_destination(&mut self, destination: Coordinate) -> FetchTag {
        self.fetch_generation += 1;
        self.destination = Some(destination);
        self.route = Route::empty();
        self.phase = Phase::DestinationSelected(RouteStatus::Fetching);
        self.recompute_distance();

        FetchTag {
            generation: self.fetch_generation,
            destination,
        }
    }

    pub fn is_current(&self, tag: &FetchTag) -> bool {
        tag.generation == self.fetch_generation && self.destination == Some(tag.destination)
    }

    pub fn apply_route(&mut self, tag: &FetchTag, result: Result<Route, RouteError>) -> RouteOutcome {
        if !self.is_current(tag) {
            return RouteOutcome::Stale;
        }

        match result {
            Ok(route) => {
                self.route = route;
                self.phase = Phase::DestinationSelected(RouteStatus::Routed);
                RouteOutcome::Applied
            }
            Err(error) => {
                self.phase = Phase::DestinationSelected(RouteStatus::RouteFailed);
                RouteOutcome::Failed(error)
            }
        }
    }

    /// Starts a new watch subscription id; fixes tagged with older ids are
    /// ignored from now on.
    pub fn next_subscription(&mut self) -> u64 {
        self.subscription += 1;
        self.subscription
    }

    pub fn is_current_subscription(&self, subscription: u64) -> bool {
        self.subscription == subscription
    }
}
