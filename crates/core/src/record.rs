//! Records as seen by the comparison harness.

use crate::value::{ObjectValue, Value};

/// One destination record: a data tree plus metadata this crate never
/// interprets (raw id, extraction time, generation id, change log, ...).
///
/// `data` is expected to hold [`Value::Object`]; mappers treat anything
/// else as a caller error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub data: Value,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl OutputRecord {
    pub fn new(data: ObjectValue) -> Self {
        Self {
            data: Value::Object(data),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_metadata(
        data: ObjectValue,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            data: Value::Object(data),
            metadata,
        }
    }

    /// Copy of this record with `data` replaced; metadata is carried over.
    pub fn with_data(&self, data: Value) -> Self {
        Self {
            data,
            metadata: self.metadata.clone(),
        }
    }
}
