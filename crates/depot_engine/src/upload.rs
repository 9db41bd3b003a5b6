//! Parsing and storing user file uploads.

use chrono::Utc;
use depot_core::{DataSource, NewExternalData};
use depot_error::{DepotResult, UploadError, UploadErrorKind};
use depot_interface::ExternalDataStore;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::str::FromStr;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Records shown in an upload preview.
pub const PREVIEW_RECORDS: usize = 3;

/// Supported upload formats, named by the multipart `type` field.
///
/// # Examples
///
/// ```
/// use depot_engine::UploadKind;
/// use std::str::FromStr;
///
/// assert_eq!(UploadKind::from_str("csv").unwrap(), UploadKind::Csv);
/// assert!(UploadKind::from_str("xlsx").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UploadKind {
    /// Comma-separated values with a header row
    Csv,
    /// Any JSON document
    Json,
}

impl UploadKind {
    /// Resolve the multipart `type` field.
    #[track_caller]
    pub fn resolve(field: &str) -> Result<Self, UploadError> {
        Self::from_str(field.trim())
            .map_err(|_| UploadError::new(UploadErrorKind::UnsupportedType(field.to_string())))
    }

    /// Parse file content in this format.
    pub fn parse(self, content: &str) -> Result<Value, UploadError> {
        match self {
            Self::Csv => parse_csv(content),
            Self::Json => parse_json(content),
        }
    }
}

/// Parse CSV into `{headers, data, rowCount}`.
///
/// Every row becomes an object keyed by header. Fields are trimmed,
/// short rows are padded with empty strings, extra fields are ignored
/// and rows with no non-empty field are dropped.
pub fn parse_csv(content: &str) -> Result<Value, UploadError> {
    let parse_error = |e: csv::Error| {
        UploadError::new(UploadErrorKind::Parse {
            format: UploadKind::Csv.to_string(),
            message: e.to_string(),
        })
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row: Map<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let field = record.get(i).unwrap_or_default();
                (header.clone(), Value::String(field.to_string()))
            })
            .collect();
        rows.push(Value::Object(row));
    }

    Ok(json!({
        "headers": headers,
        "rowCount": rows.len(),
        "data": rows,
    }))
}

/// Parse a JSON document.
pub fn parse_json(content: &str) -> Result<Value, UploadError> {
    serde_json::from_str(content).map_err(|e| {
        UploadError::new(UploadErrorKind::Parse {
            format: UploadKind::Json.to_string(),
            message: e.to_string(),
        })
    })
}

/// The record list inside parsed content, if it has one.
///
/// CSV content and JSON shaped like `{"data": [...]}` keep their records
/// under `data`; a top-level JSON array is its own record list.
fn records(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(items) => Some(items),
        other => other.get("data").and_then(Value::as_array),
    }
}

/// Number of records in parsed content; documents without a record list count as one.
pub fn record_count(raw: &Value) -> usize {
    records(raw).map_or(1, Vec::len)
}

/// The first few records of parsed content, or the whole document when it has no record list.
///
/// # Examples
///
/// ```
/// use depot_engine::preview_of;
/// use serde_json::json;
///
/// let raw = json!({"data": [1, 2, 3, 4, 5]});
/// assert_eq!(preview_of(&raw), json!([1, 2, 3]));
///
/// let raw = json!({"supplier": "Acme"});
/// assert_eq!(preview_of(&raw), raw);
/// ```
pub fn preview_of(raw: &Value) -> Value {
    match records(raw) {
        Some(items) => Value::Array(items.iter().take(PREVIEW_RECORDS).cloned().collect()),
        None => raw.clone(),
    }
}

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name
    pub filename: String,
    /// Declared format (`csv` or `json`)
    pub kind: String,
    /// File content as text
    pub content: String,
}

/// What the client is told about a stored upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    /// Stored record identifier
    pub id: Uuid,
    /// Original file name
    pub filename: String,
    /// Parsed format
    #[serde(rename = "type")]
    pub kind: UploadKind,
    /// Number of records parsed
    pub record_count: usize,
    /// First few records
    pub preview: Value,
}

/// Parse an upload and store it as a `user_upload` context record.
///
/// Parse failures are [`UploadError`]s; store failures pass through.
#[instrument(skip(store, upload), fields(filename = %upload.filename, kind = %upload.kind))]
pub async fn store_upload(
    store: &dyn ExternalDataStore,
    upload: FileUpload,
) -> DepotResult<UploadSummary> {
    let kind = UploadKind::resolve(&upload.kind)?;
    let raw = kind.parse(&upload.content)?;
    let count = record_count(&raw);
    let preview = preview_of(&raw);

    let metadata = json!({
        "filename": upload.filename,
        "fileSize": upload.content.len(),
        "uploadedAt": Utc::now(),
        "recordCount": count,
    });
    let stored = store
        .insert_external(NewExternalData::new(
            DataSource::UserUpload,
            kind.as_ref(),
            raw,
            metadata,
        ))
        .await?;

    debug!(id = %stored.id, records = count, "Stored upload");

    Ok(UploadSummary {
        id: stored.id,
        filename: upload.filename,
        kind,
        record_count: count,
        preview,
    })
}
