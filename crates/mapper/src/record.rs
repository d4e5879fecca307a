//! Record adapter: runs a mapper over a record's data and rewraps it.

use recnorm_core::{AirbyteType, OutputRecord, Value};

use crate::context::{Diagnostic, MapContext};
use crate::identity::ValueMapper;

/// Errors that make a single record unmappable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// Record data (or what a mapper turned it into) is not an object.
    #[error("record data must be an Object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Map `record` against `schema`, returning a new record with only `data`
/// replaced. The input record is not modified.
pub fn map_record<M: ValueMapper + ?Sized>(
    record: &OutputRecord,
    schema: &AirbyteType,
    mapper: &M,
) -> Result<OutputRecord, MapError> {
    map_record_reporting(record, schema, mapper).map(|(mapped, _)| mapped)
}

/// Like [`map_record`], also returning the anomalies the mapper reported.
pub fn map_record_reporting<M: ValueMapper + ?Sized>(
    record: &OutputRecord,
    schema: &AirbyteType,
    mapper: &M,
) -> Result<(OutputRecord, Vec<Diagnostic>), MapError> {
    ensure_object(&record.data)?;
    let (data, ctx) = mapper.map(&record.data, schema, MapContext::new());
    ensure_object(&data)?;
    Ok((record.with_data(data), ctx.into_diagnostics()))
}

fn ensure_object(value: &Value) -> Result<(), MapError> {
    match value {
        Value::Object(_) => Ok(()),
        other => Err(MapError::NotAnObject {
            found: other.type_name(),
        }),
    }
}
