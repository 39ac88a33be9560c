//! MCP server exposing National Weather Service alerts and forecasts.

pub mod constants;
pub mod formatters;
pub mod models;
pub mod prompts;
pub mod service;

pub use service::{Weather, WeatherConfig};
