pub mod coordinate;
pub mod distance;
pub mod error;
pub mod location_fix;
pub mod meters;
pub mod route;
