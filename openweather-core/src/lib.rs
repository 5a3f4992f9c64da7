//! Core library for the `openweather` CLI.
//!
//! This crate defines:
//! - Client configuration, with an optional TOML file on disk
//! - URL construction for the `weather` and `forecast` endpoints
//! - A single-shot HTTP client and a generic JSON decoder
//! - The record shapes both endpoints return
//!
//! It is used by `openweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod provider;
pub mod request;

pub use config::{ClientConfig, Config};
pub use error::ApiError;
pub use model::{Coordinates, CurrentConditions, Forecast, ForecastItem};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient};
pub use request::{Endpoint, build_url};
