//! JSON and CSV writers for fetched activity payloads.
//!
//! Files are opened truncate-or-create in place. Missing parent directories
//! are an error, not created.

use crate::{ActivityRecord, DateRange, GarminClient, GarminError};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// `<dir>/<start>_to_<end>.<ext>`
    pub fn file_path(self, dir: &Path, range: &DateRange) -> PathBuf {
        dir.join(format!("{}.{}", range.file_stem(), self.extension()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = GarminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(GarminError::InvalidInput(format!(
                "unknown export format {other:?}, expected json or csv"
            ))),
        }
    }
}

/// Parse `payload` and write it back out as JSON.
pub async fn export_json(payload: &str, path: &Path) -> Result<(), GarminError> {
    let value: Value = serde_json::from_str(payload)?;
    let bytes = serde_json::to_vec(&value)?;
    write_file(path, &bytes).await
}

/// Parse `payload` as an array of objects and write it as CSV.
pub async fn export_csv(payload: &str, path: &Path) -> Result<(), GarminError> {
    let value: Value = serde_json::from_str(payload)?;
    let bytes = render_csv(&value)?;
    write_file(path, &bytes).await
}

/// Render an array of objects as CSV with CRLF line endings.
///
/// The header is the first record's keys in their original order. A later
/// record missing one of those keys gets an empty cell; a later record with
/// a key outside the header is a [`GarminError::SchemaMismatch`].
pub fn render_csv(value: &Value) -> Result<Vec<u8>, GarminError> {
    let records = value.as_array().ok_or_else(|| {
        GarminError::SchemaMismatch("expected a json array of activities".into())
    })?;
    let records = records
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_object().ok_or_else(|| {
                GarminError::SchemaMismatch(format!("record {i} is not a json object"))
            })
        })
        .collect::<Result<Vec<&ActivityRecord>, _>>()?;
    let first = records.first().ok_or(GarminError::EmptyPayload)?;
    let header: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(&header)?;
    for (i, record) in records.iter().enumerate() {
        if let Some(extra) = record.keys().find(|k| !first.contains_key(*k)) {
            return Err(GarminError::SchemaMismatch(format!(
                "record {i} has field {extra:?} not present in the first record"
            )));
        }
        let row = header
            .iter()
            .map(|key| record.get(*key).map(cell).unwrap_or_default());
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| GarminError::Csv(e.into_error().into()))
}

/// Fetch `range` and write it to `<dir>/<start>_to_<end>.<ext>`.
pub async fn download_activities<C>(
    client: &C,
    range: &DateRange,
    dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, GarminError>
where
    C: GarminClient + ?Sized,
{
    let path = format.file_path(dir, range);
    let payload = client.get_activities(range).await?;
    match format {
        ExportFormat::Json => export_json(&payload, &path).await?,
        ExportFormat::Csv => export_csv(&payload, &path).await?,
    }
    tracing::info!("wrote {}", path.display());
    Ok(path)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), GarminError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| GarminError::fs(path, e))
}
