pub mod directions_provider;
pub mod error;
pub mod openrouteservice;
pub mod profile;
pub mod route_fetcher;
