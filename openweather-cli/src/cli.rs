use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use openweather_core::{Config, OpenWeatherClient};
use std::{ffi::OsString, io::Write, path::PathBuf};

use crate::report::{OutputFormat, Report};

/// Long flag names that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "baseurl",
    "appid",
    "latitude",
    "longitude",
    "config",
    "json",
    "save-config",
    "help",
    "version",
];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "openweather",
    version,
    about = "Print current conditions and forecast for a coordinate"
)]
pub struct Cli {
    /// Base URL for weather service, ending in '/'.
    #[arg(long = "baseurl", value_name = "URL")]
    pub base_url: Option<String>,

    /// APPID token.
    #[arg(long = "appid", value_name = "KEY")]
    pub app_id: Option<String>,

    /// Latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Config file to read instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print both records as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write the effective settings back to the config file.
    #[arg(long)]
    pub save_config: bool,
}

/// Rewrite `-flag` / `-flag=value` into `--flag` / `--flag=value` for known
/// long flags. Anything else, including negative numbers, passes through.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            if s == "--" {
                return None;
            }
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split('=').next().unwrap_or(rest);
            LONG_FLAGS.contains(&name).then(|| OsString::from(format!("-{s}")))
        });

        if arg == "--" {
            passthrough = true;
        }
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

impl Cli {
    /// Settings given on the command line, as a config overlay.
    pub fn overrides(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            app_id: self.app_id.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            timeout_secs: None,
        }
    }

    pub fn format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { OutputFormat::Debug }
    }

    fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }

        match Config::config_file_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("{e}; continuing without a config file");
                None
            }
        }
    }

    /// Resolve the settings for this run: file first, flags on top.
    pub fn settings(&self) -> Result<Config> {
        let path = self.config_path();

        let file = match &path {
            Some(path) => Config::load_from(path)?,
            None => Config::default(),
        };
        let merged = file.merge(self.overrides());

        if self.save_config {
            let path = path.context("No config file location to save to; pass --config")?;
            merged.save_to(&path)?;
            info!("saved settings to {}", path.display());
        }

        Ok(merged)
    }

    pub async fn run(self) -> Result<()> {
        let settings = self.settings()?;
        let client = OpenWeatherClient::new(settings.client_config())
            .context("Failed to set up HTTP client")?;

        let report = Report::collect(&client).await?;
        let rendered = report.render(self.format())?;

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(rendered.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;

        Ok(())
    }
}
