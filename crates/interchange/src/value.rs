//! JSON ↔ [`Value`] under a schema.
//!
//! Decoding is lenient: a JSON value whose kind does not fit its declared
//! type is decoded by its own kind instead of being rejected, so fixtures
//! that deliberately hold wrong-shaped data still load and reach the
//! mappers. Only numbers that fit neither `i64` nor `Decimal` fail.

use std::str::FromStr;

use recnorm_core::{AirbyteType, ObjectValue, Value};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value as Json;

use crate::error::InterchangeError;

/// Decode `json` as a value of type `ty`.
pub fn value_from_json(json: &Json, ty: &AirbyteType) -> Result<Value, InterchangeError> {
    decode(json, Some(ty), "$")
}

/// Encode `value` as plain JSON. Temporal values become strings; object
/// key order is kept.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(i) => Json::from(*i),
        Value::Number(d) => decimal_to_json(d),
        Value::String(s) | Value::Date(s) | Value::Time(s) | Value::Timestamp(s) => {
            Json::String(s.clone())
        }
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Object(fields) => Json::Object(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), value_to_json(v)))
                .collect(),
        ),
    }
}

fn decode(json: &Json, ty: Option<&AirbyteType>, path: &str) -> Result<Value, InterchangeError> {
    let ty = match ty {
        Some(AirbyteType::Union(options)) => options.iter().find(|option| accepts(option, json)),
        other => other,
    };

    match (json, ty) {
        (Json::Null, _) => Ok(Value::Null),
        (Json::Bool(b), _) => Ok(Value::Boolean(*b)),
        (Json::Number(n), Some(AirbyteType::Number)) => decode_decimal(n, path).map(Value::Number),
        (Json::Number(n), _) => decode_number(n, path),
        (Json::String(s), Some(AirbyteType::Date)) => Ok(Value::Date(s.clone())),
        (
            Json::String(s),
            Some(AirbyteType::TimeWithTimezone | AirbyteType::TimeWithoutTimezone),
        ) => Ok(Value::Time(s.clone())),
        (
            Json::String(s),
            Some(AirbyteType::TimestampWithTimezone | AirbyteType::TimestampWithoutTimezone),
        ) => Ok(Value::Timestamp(s.clone())),
        (Json::String(s), _) => Ok(Value::String(s.clone())),
        (Json::Array(items), Some(AirbyteType::Array(element))) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode(item, Some(&element.ty), &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (Json::Array(items), _) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode(item, None, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (Json::Object(fields), ty) => {
            let schema = ty.and_then(|t| t.as_object());
            let mut obj = ObjectValue::with_capacity(fields.len());
            for (name, field) in fields {
                let field_ty = schema.and_then(|s| s.get(name)).map(|f| &f.ty);
                let value = decode(field, field_ty, &format!("{}.{}", path, name))?;
                obj.insert(name.clone(), value);
            }
            Ok(Value::Object(obj))
        }
    }
}

/// Whether a union option can hold this JSON kind.
fn accepts(option: &AirbyteType, json: &Json) -> bool {
    match (option, json) {
        (AirbyteType::Unknown(_), _) => true,
        (AirbyteType::Boolean, Json::Bool(_)) => true,
        (AirbyteType::Integer, Json::Number(n)) => n.is_i64(),
        (AirbyteType::Number, Json::Number(_)) => true,
        (ty, Json::String(_)) => ty.is_temporal() || *ty == AirbyteType::String,
        (AirbyteType::Array(_) | AirbyteType::ArrayWithoutSchema, Json::Array(_)) => true,
        (
            AirbyteType::Object(_)
            | AirbyteType::ObjectWithoutSchema
            | AirbyteType::ObjectWithEmptySchema,
            Json::Object(_),
        ) => true,
        _ => false,
    }
}

fn decode_number(n: &serde_json::Number, path: &str) -> Result<Value, InterchangeError> {
    match n.as_i64() {
        Some(i) => Ok(Value::Integer(i)),
        None => decode_decimal(n, path).map(Value::Number),
    }
}

fn decode_decimal(n: &serde_json::Number, path: &str) -> Result<Decimal, InterchangeError> {
    let text = n.to_string();
    parse_decimal(&text).ok_or_else(|| InterchangeError::InvalidNumber {
        path: path.to_string(),
        number: text,
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str(text)
    };
    parsed.ok()
}

fn decimal_to_json(d: &Decimal) -> Json {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return Json::from(i);
        }
    }
    let text = d.normalize().to_string();
    match serde_json::Number::from_str(&text) {
        Ok(n) if parse_decimal(&n.to_string()).as_ref() == Some(d) => Json::Number(n),
        // An f64 cannot hold this decimal exactly; keep its digits as text.
        _ => Json::String(text),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
