pub mod config;
pub mod events;
pub mod phase;
pub mod render;
pub mod session;
pub mod state;
