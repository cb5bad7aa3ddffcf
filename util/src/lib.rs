pub mod cache;
pub mod config;
pub mod period;
pub mod state;
pub mod validation;
