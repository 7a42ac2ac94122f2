//! Export a whole year as one file per month.
//!
//! The activity search silently truncates wide ranges, so long periods have
//! to be split by the caller.

use chrono::NaiveDate;
use garmin_connect_client::{
    Credentials, DateRange, ExportFormat, GarminClient, GarminConfig, download_activities,
    http_client::ReqwestGarminClient,
};
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects GARMIN_CONNECT_USERNAME and GARMIN_CONNECT_PASSWORD in env
    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let year = std::env::var("GARMIN_CONNECT_YEAR")
        .ok()
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(2018);
    let dir = std::env::var("GARMIN_CONNECT_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    let client = ReqwestGarminClient::new(GarminConfig::from_env()?)?;
    client.login(&credentials).await?;

    for month in 1..=12 {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or("invalid month")?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or("invalid month")?;
        let end = next.pred_opt().ok_or("invalid month")?;
        let range = DateRange::new(start, end);
        let path = download_activities(&client, &range, &dir, ExportFormat::Csv).await?;
        println!("{} -> {}", start.format("%B"), path.display());
    }
    Ok(())
}
