pub mod config;
pub mod error;
pub mod profiles;
pub mod scoring;
pub mod telemetry;
