//! Binary crate for the `openweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments, Go-style single-dash flags included
//! - Merging flags over the optional config file
//! - Fetching both records and printing them

use clap::Parser;

mod cli;
mod report;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::init_from_env(env);

    let cmd = cli::Cli::parse_from(cli::normalize_args(std::env::args_os()));
    cmd.run().await
}
