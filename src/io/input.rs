use anyhow::{bail, Context, Result};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::record::{Record, RecordSet};

/// Attribute names each record field is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBindings {
    pub id: String,
    pub longitude: String,
    pub latitude: String,
    pub timestamp: String,
}

impl Default for FieldBindings {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            longitude: "longitude".to_string(),
            latitude: "latitude".to_string(),
            timestamp: "timestamp".to_string(),
        }
    }
}

/// Records of one input document plus a fingerprint of its raw bytes
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: RecordSet,
    /// SHA-256 of the input text, hex encoded
    pub input_sha256: String,
}

impl Dataset {
    pub fn parse(text: &str, bindings: &FieldBindings) -> Result<Self> {
        Ok(Self {
            records: parse_records(text, bindings)?,
            input_sha256: sha256_hex(text.as_bytes()),
        })
    }
}

/// Load a JSON array of objects from disk
pub fn load_dataset(path: &Path, bindings: &FieldBindings) -> Result<Dataset> {
    let text = fs::read_to_string(path)
        .context(format!("Failed to read input file: {}", path.display()))?;
    Dataset::parse(&text, bindings)
        .context(format!("Failed to parse records from {}", path.display()))
}

/// Parse records from JSON text
///
/// Numbers are taken as they are. A string timestamp is read as RFC 3339 and
/// converted to milliseconds since the Unix epoch. Absent or `null`
/// attributes leave the field missing.
pub fn parse_records(text: &str, bindings: &FieldBindings) -> Result<RecordSet> {
    let document: Value = serde_json::from_str(text).context("Input is not valid JSON")?;

    let Value::Array(rows) = document else {
        bail!("Expected a JSON array of records");
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let Value::Object(object) = row else {
                bail!("Record {} is not a JSON object", i);
            };
            read_record(object, bindings).context(format!("Invalid record {}", i))
        })
        .collect()
}

fn read_record(object: &Map<String, Value>, bindings: &FieldBindings) -> Result<Record> {
    Ok(Record {
        id: read_id(object.get(&bindings.id)),
        longitude: read_number(object.get(&bindings.longitude), &bindings.longitude)?,
        latitude: read_number(object.get(&bindings.latitude), &bindings.latitude)?,
        timestamp: read_timestamp(object.get(&bindings.timestamp), &bindings.timestamp)?,
    })
}

fn read_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn read_number(value: Option<&Value>, field: &str) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .context(format!("Field '{}' is not a number: {:?}", field, s)),
        Some(other) => bail!("Field '{}' has unsupported value {}", field, other),
    }
}

fn read_timestamp(value: Option<&Value>, field: &str) -> Result<Option<f64>> {
    match value {
        Some(Value::String(s)) if s.trim().parse::<f64>().is_err() => {
            let parsed = DateTime::parse_from_rfc3339(s.trim())
                .context(format!("Field '{}' is not an RFC 3339 timestamp: {:?}", field, s))?;
            Ok(Some(parsed.timestamp_millis() as f64))
        }
        other => read_number(other, field),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
