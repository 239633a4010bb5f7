pub mod commands;
pub mod error;
pub mod telemetry;

pub use error::ToolError;
