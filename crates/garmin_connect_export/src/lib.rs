//! Command-line front end: log in, fetch one date range, write one file.

use anyhow::Context;
use clap::Parser;
use garmin_connect_client::config::{DEFAULT_BASE_URL, DEFAULT_SSO_URL};
use garmin_connect_client::http_client::ReqwestGarminClient;
use garmin_connect_client::utils::validate_date;
use garmin_connect_client::{
    Credentials, DateRange, ExportFormat, GarminClient, GarminConfig, GarminError,
    download_activities,
};
use std::path::PathBuf;

pub mod logging;

#[derive(Parser)]
#[command(
    name = "garmin-connect-export",
    version,
    about = "Export Garmin Connect activities for a date range to JSON or CSV"
)]
pub struct Cli {
    /// Garmin Connect account name
    #[arg(long, env = "GARMIN_CONNECT_USERNAME")]
    pub username: String,

    #[arg(long, env = "GARMIN_CONNECT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// First day, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = validate_date)]
    pub start: String,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = validate_date)]
    pub end: String,

    /// Existing directory that receives `<start>_to_<end>.<format>`
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// json or csv
    #[arg(long, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Log headers, cookies and redirects of every response
    #[arg(
        long,
        env = "GARMIN_CONNECT_LOG_RESPONSES",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub log_responses: bool,

    #[arg(long, env = "GARMIN_CONNECT_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    #[arg(long, env = "GARMIN_CONNECT_SSO_URL", default_value = DEFAULT_SSO_URL, hide = true)]
    pub sso_url: String,
}

impl Cli {
    pub fn config(&self) -> GarminConfig {
        GarminConfig {
            log_responses: self.log_responses,
            ..GarminConfig::with_urls(&self.base_url, &self.sso_url)
        }
    }

    pub fn range(&self) -> Result<DateRange, GarminError> {
        DateRange::parse(&self.start, &self.end)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

/// Log in, fetch the range and write it. Returns the written file.
pub async fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    let client = ReqwestGarminClient::new(cli.config())?;
    client
        .login(&cli.credentials())
        .await
        .context("login failed")?;

    let range = cli.range()?;
    let path = download_activities(&client, &range, &cli.output_dir, cli.format)
        .await
        .with_context(|| format!("exporting activities for {range} failed"))?;
    Ok(path)
}
