//! Stream JSON schema → [`AirbyteType`].
//!
//! Understands the subset of JSON Schema that sync catalogs use:
//! `type` (string or array), `format`, the `airbyte_type` refinement,
//! `properties`, `items`, `oneOf`/`anyOf`, and the legacy
//! `WellKnownTypes.json` `$ref` definitions. Anything else becomes
//! [`AirbyteType::Unknown`] carrying the raw fragment.

use recnorm_core::{AirbyteType, FieldType, ObjectType};
use serde_json::Value as Json;

use crate::error::InterchangeError;

/// Parse a stream's JSON schema.
pub fn schema_from_json(schema: &Json) -> Result<AirbyteType, InterchangeError> {
    parse_field(schema, "$").map(|field| field.ty)
}

fn invalid(path: &str, message: impl Into<String>) -> InterchangeError {
    InterchangeError::InvalidSchema {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Parse one fragment, reporting whether it admits `null`.
fn parse_field(schema: &Json, path: &str) -> Result<FieldType, InterchangeError> {
    let Some(obj) = schema.as_object() else {
        return Ok(FieldType::nullable(AirbyteType::Unknown(schema.clone())));
    };

    if let Some(reference) = obj.get("$ref").and_then(|r| r.as_str()) {
        return Ok(FieldType::nullable(parse_reference(reference, schema)));
    }

    for keyword in ["oneOf", "anyOf"] {
        if let Some(options) = obj.get(keyword) {
            let options = options
                .as_array()
                .ok_or_else(|| invalid(path, format!("'{}' must be an array", keyword)))?;
            let mut parsed = Vec::with_capacity(options.len());
            let mut nullable = false;
            for (i, option) in options.iter().enumerate() {
                if is_null_only(option) {
                    nullable = true;
                    continue;
                }
                let field = parse_field(option, &format!("{}.{}[{}]", path, keyword, i))?;
                nullable |= field.nullable;
                parsed.push(field.ty);
            }
            return Ok(FieldType::new(collapse_union(parsed, schema), nullable));
        }
    }

    match obj.get("type") {
        Some(Json::String(name)) => Ok(FieldType::new(
            parse_named(name, schema, path)?,
            name == "null",
        )),
        Some(Json::Array(names)) => {
            let mut nullable = false;
            let mut parsed = Vec::with_capacity(names.len());
            for name in names {
                let name = name
                    .as_str()
                    .ok_or_else(|| invalid(path, "'type' entries must be strings"))?;
                if name == "null" {
                    nullable = true;
                } else {
                    parsed.push(parse_named(name, schema, path)?);
                }
            }
            Ok(FieldType::new(collapse_union(parsed, schema), nullable))
        }
        Some(_) => Err(invalid(path, "'type' must be a string or an array")),
        None if obj.contains_key("properties") => {
            Ok(FieldType::nullable(parse_named("object", schema, path)?))
        }
        None => Ok(FieldType::nullable(AirbyteType::Unknown(schema.clone()))),
    }
}

fn is_null_only(schema: &Json) -> bool {
    schema.get("type").and_then(|t| t.as_str()) == Some("null")
}

fn collapse_union(mut options: Vec<AirbyteType>, schema: &Json) -> AirbyteType {
    match options.len() {
        0 => AirbyteType::Unknown(schema.clone()),
        1 => options.remove(0),
        _ => AirbyteType::Union(options),
    }
}

fn parse_named(name: &str, schema: &Json, path: &str) -> Result<AirbyteType, InterchangeError> {
    let format = schema.get("format").and_then(|f| f.as_str());
    let airbyte_type = schema.get("airbyte_type").and_then(|t| t.as_str());

    let ty = match name {
        "boolean" => AirbyteType::Boolean,
        "integer" => AirbyteType::Integer,
        "number" if airbyte_type == Some("integer") => AirbyteType::Integer,
        "number" => AirbyteType::Number,
        "string" => match format {
            Some("date") => AirbyteType::Date,
            Some("time") if airbyte_type == Some("time_without_timezone") => {
                AirbyteType::TimeWithoutTimezone
            }
            Some("time") => AirbyteType::TimeWithTimezone,
            Some("date-time") if airbyte_type == Some("timestamp_without_timezone") => {
                AirbyteType::TimestampWithoutTimezone
            }
            Some("date-time") => AirbyteType::TimestampWithTimezone,
            _ => AirbyteType::String,
        },
        "object" => parse_object(schema, path)?,
        "array" => parse_array(schema, path)?,
        _ => AirbyteType::Unknown(schema.clone()),
    };
    Ok(ty)
}

fn parse_object(schema: &Json, path: &str) -> Result<AirbyteType, InterchangeError> {
    let Some(properties) = schema.get("properties") else {
        return Ok(AirbyteType::ObjectWithoutSchema);
    };
    let properties = properties
        .as_object()
        .ok_or_else(|| invalid(path, "'properties' must be an object"))?;
    if properties.is_empty() {
        return Ok(AirbyteType::ObjectWithEmptySchema);
    }

    let mut obj = ObjectType::new();
    for (name, property) in properties {
        let field = parse_field(property, &format!("{}.{}", path, name))?;
        obj.insert(name.clone(), field);
    }
    Ok(AirbyteType::Object(obj))
}

fn parse_array(schema: &Json, path: &str) -> Result<AirbyteType, InterchangeError> {
    match schema.get("items") {
        Some(items @ Json::Object(_)) => {
            let field = parse_field(items, &format!("{}[]", path))?;
            Ok(AirbyteType::Array(Box::new(field)))
        }
        // Tuple-style `items` arrays carry no single element type.
        _ => Ok(AirbyteType::ArrayWithoutSchema),
    }
}

fn parse_reference(reference: &str, schema: &Json) -> AirbyteType {
    let name = reference.rsplit('/').next().unwrap_or(reference);
    match name {
        "String" | "BinaryData" => AirbyteType::String,
        "Boolean" => AirbyteType::Boolean,
        "Integer" => AirbyteType::Integer,
        "Number" => AirbyteType::Number,
        "Date" => AirbyteType::Date,
        "TimeWithTimezone" => AirbyteType::TimeWithTimezone,
        "TimeWithoutTimezone" => AirbyteType::TimeWithoutTimezone,
        "TimestampWithTimezone" => AirbyteType::TimestampWithTimezone,
        "TimestampWithoutTimezone" => AirbyteType::TimestampWithoutTimezone,
        _ => AirbyteType::Unknown(schema.clone()),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn temporal_formats_and_refinements() {
        let cases = [
            (json!({"type": "string", "format": "date"}), AirbyteType::Date),
            (
                json!({"type": "string", "format": "time"}),
                AirbyteType::TimeWithTimezone,
            ),
            (
                json!({"type": "string", "format": "time", "airbyte_type": "time_without_timezone"}),
                AirbyteType::TimeWithoutTimezone,
            ),
            (
                json!({"type": "string", "format": "date-time", "airbyte_type": "timestamp_with_timezone"}),
                AirbyteType::TimestampWithTimezone,
            ),
            (
                json!({"type": "string", "format": "date-time", "airbyte_type": "timestamp_without_timezone"}),
                AirbyteType::TimestampWithoutTimezone,
            ),
            (json!({"type": "string"}), AirbyteType::String),
        ];
        for (schema, expected) in cases {
            assert_eq!(schema_from_json(&schema).unwrap(), expected, "{}", schema);
        }
    }

    #[test]
    fn numeric_and_boolean_types() {
        assert_eq!(
            schema_from_json(&json!({"type": "integer"})).unwrap(),
            AirbyteType::Integer
        );
        assert_eq!(
            schema_from_json(&json!({"type": "number", "airbyte_type": "integer"})).unwrap(),
            AirbyteType::Integer
        );
        assert_eq!(
            schema_from_json(&json!({"type": "number"})).unwrap(),
            AirbyteType::Number
        );
        assert_eq!(
            schema_from_json(&json!({"type": "boolean"})).unwrap(),
            AirbyteType::Boolean
        );
    }

    #[test]
    fn object_properties_keep_order_and_nullability() {
        let schema = json!({
            "type": "object",
            "properties": {
                "zeta": {"type": ["null", "integer"]},
                "alpha": {"type": "string", "format": "date"}
            }
        });
        let ty = schema_from_json(&schema).unwrap();
        let obj = ty.as_object().unwrap();

        assert_eq!(
            obj.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["zeta", "alpha"]
        );
        assert_eq!(
            obj.get("zeta"),
            Some(&FieldType::new(AirbyteType::Integer, true))
        );
        assert_eq!(
            obj.get("alpha"),
            Some(&FieldType::new(AirbyteType::Date, false))
        );
    }

    #[test]
    fn schemaless_objects_and_arrays() {
        assert_eq!(
            schema_from_json(&json!({"type": "object"})).unwrap(),
            AirbyteType::ObjectWithoutSchema
        );
        assert_eq!(
            schema_from_json(&json!({"type": "object", "properties": {}})).unwrap(),
            AirbyteType::ObjectWithEmptySchema
        );
        assert_eq!(
            schema_from_json(&json!({"type": "array"})).unwrap(),
            AirbyteType::ArrayWithoutSchema
        );
        assert_eq!(
            schema_from_json(&json!({"type": "array", "items": {"type": "string", "format": "date"}}))
                .unwrap(),
            AirbyteType::array_of(AirbyteType::Date)
        );
    }

    #[test]
    fn unions_from_type_arrays_and_one_of() {
        assert_eq!(
            schema_from_json(&json!({"type": ["string", "integer"]})).unwrap(),
            AirbyteType::Union(vec![AirbyteType::String, AirbyteType::Integer])
        );
        assert_eq!(
            schema_from_json(&json!({"oneOf": [
                {"type": "null"},
                {"type": "string", "format": "time", "airbyte_type": "time_with_timezone"}
            ]}))
            .unwrap(),
            AirbyteType::TimeWithTimezone
        );
        assert_eq!(
            schema_from_json(&json!({"anyOf": [{"type": "boolean"}, {"type": "number"}]}))
                .unwrap(),
            AirbyteType::Union(vec![AirbyteType::Boolean, AirbyteType::Number])
        );
    }

    #[test]
    fn well_known_type_references() {
        assert_eq!(
            schema_from_json(&json!({
                "$ref": "WellKnownTypes.json#/definitions/TimeWithoutTimezone"
            }))
            .unwrap(),
            AirbyteType::TimeWithoutTimezone
        );
        let odd = json!({"$ref": "#/definitions/Custom"});
        assert_eq!(
            schema_from_json(&odd).unwrap(),
            AirbyteType::Unknown(odd.clone())
        );
    }

    #[test]
    fn unrecognized_fragments_are_unknown() {
        let fragment = json!({"type": "geometry"});
        assert_eq!(
            schema_from_json(&fragment).unwrap(),
            AirbyteType::Unknown(fragment.clone())
        );
        assert_eq!(
            schema_from_json(&json!(true)).unwrap(),
            AirbyteType::Unknown(json!(true))
        );
    }

    #[test]
    fn malformed_keywords_are_errors() {
        let err = schema_from_json(&json!({
            "type": "object",
            "properties": {"a": {"type": 5}}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            InterchangeError::InvalidSchema {
                path: "$.a".to_string(),
                message: "'type' must be a string or an array".to_string(),
            }
        );
        assert!(schema_from_json(&json!({"type": "object", "properties": []})).is_err());
    }
}
