pub mod commands;
pub mod engine;
pub mod imageio;
pub mod telemetry;
