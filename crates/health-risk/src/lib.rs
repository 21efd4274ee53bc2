pub mod config;
pub mod error;
pub mod narrative;
pub mod regions;
pub mod telemetry;
