//! Whole records: `{"data": {...}, <metadata>...}`.

use recnorm_core::{AirbyteType, OutputRecord, Value};
use serde_json::Value as Json;

use crate::error::InterchangeError;
use crate::value::{value_from_json, value_to_json};

const DATA_KEY: &str = "data";

/// Decode a record envelope. `data` must be an object and is decoded
/// under `schema`; every other key is kept verbatim as metadata.
pub fn record_from_json(
    json: &Json,
    schema: &AirbyteType,
) -> Result<OutputRecord, InterchangeError> {
    let envelope = json
        .as_object()
        .ok_or_else(|| InterchangeError::InvalidRecord("record must be a JSON object".into()))?;
    let data = envelope
        .get(DATA_KEY)
        .ok_or_else(|| InterchangeError::InvalidRecord(format!("missing '{}'", DATA_KEY)))?;
    if !data.is_object() {
        return Err(InterchangeError::InvalidRecord(format!(
            "'{}' must be a JSON object",
            DATA_KEY
        )));
    }

    let metadata = envelope
        .iter()
        .filter(|(k, _)| k.as_str() != DATA_KEY)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(OutputRecord {
        data: value_from_json(data, schema)?,
        metadata,
    })
}

/// Decode a bare data object (a fixture line with no envelope).
pub fn bare_record_from_json(
    json: &Json,
    schema: &AirbyteType,
) -> Result<OutputRecord, InterchangeError> {
    match value_from_json(json, schema)? {
        data @ Value::Object(_) => Ok(OutputRecord {
            data,
            metadata: serde_json::Map::new(),
        }),
        other => Err(InterchangeError::InvalidRecord(format!(
            "record data must be a JSON object, found {}",
            other.type_name()
        ))),
    }
}

/// Encode a record envelope with `data` first, then metadata in its
/// original order.
pub fn record_to_json(record: &OutputRecord) -> Json {
    let mut envelope = serde_json::Map::with_capacity(record.metadata.len() + 1);
    envelope.insert(DATA_KEY.to_string(), value_to_json(&record.data));
    for (k, v) in &record.metadata {
        envelope.insert(k.clone(), v.clone());
    }
    Json::Object(envelope)
}
