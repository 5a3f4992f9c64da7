use anyhow::{Context, Result};
use openweather_core::{CurrentConditions, Forecast, WeatherProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty `Debug` rendering of both records.
    Debug,
    /// Two pretty-printed JSON documents, one per record.
    Json,
}

/// Both records of one run. Only built once both calls have succeeded, so a
/// failing forecast never leaves half a report on stdout.
#[derive(Debug)]
pub struct Report {
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

impl Report {
    pub async fn collect(provider: &dyn WeatherProvider) -> Result<Self> {
        let current = provider
            .current()
            .await
            .context("Failed to fetch current conditions")?;

        let forecast = provider.forecast().await.context("Failed to fetch forecast")?;

        Ok(Self { current, forecast })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Debug => Ok(format!("{:#?}\n{:#?}\n", self.current, self.forecast)),
            OutputFormat::Json => {
                let current = serde_json::to_string_pretty(&self.current)
                    .context("Failed to serialize current conditions")?;
                let forecast = serde_json::to_string_pretty(&self.forecast)
                    .context("Failed to serialize forecast")?;
                Ok(format!("{current}\n{forecast}\n"))
            }
        }
    }
}
