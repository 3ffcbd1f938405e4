pub mod error;
pub mod platform;
pub mod provider;
pub mod simulated;
