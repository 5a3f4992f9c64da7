use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    model::{CurrentConditions, Forecast},
};

pub mod openweather;

/// Source of the two records the CLI prints. Each call is independent of
/// the other and is made exactly once.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self) -> Result<CurrentConditions>;

    async fn forecast(&self) -> Result<Forecast>;
}
