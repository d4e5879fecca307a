//! Policy for destinations with no temporal types at all (JSON lines,
//! CSV and the like). Dates, times and timestamps are written there as
//! plain strings, so expected records are rewritten the same way.

use recnorm_core::{AirbyteType, Value};

use crate::context::{DiagnosticKind, MapContext};
use crate::identity::{Mapped, ValueMapper};

/// Turns every Date, Time and Timestamp value into a String with the same
/// text. Keyed on the value's own variant: the declared type only steers
/// the recursion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringifyTemporal;

impl ValueMapper for StringifyTemporal {
    fn map_leaf(&self, value: &Value, _ty: &AirbyteType, ctx: MapContext) -> Mapped {
        (stringify(value), ctx)
    }

    fn map_union(&self, value: &Value, _options: &[AirbyteType], ctx: MapContext) -> Mapped {
        (stringify_tree(value), ctx)
    }

    fn map_schemaless(&self, value: &Value, _ty: &AirbyteType, ctx: MapContext) -> Mapped {
        (stringify_tree(value), ctx)
    }

    fn map_mismatch(&self, value: &Value, ty: &AirbyteType, ctx: MapContext) -> Mapped {
        let message = format!("expected {}, found {}", ty, value.type_name());
        (
            stringify_tree(value),
            ctx.report(DiagnosticKind::ShapeMismatch, message),
        )
    }

    fn map_undeclared(&self, value: &Value, ctx: MapContext) -> Mapped {
        (stringify_tree(value), ctx)
    }
}

fn stringify(value: &Value) -> Value {
    match value.temporal_text() {
        Some(text) => Value::String(text.to_string()),
        None => value.clone(),
    }
}

/// Value-only recursion for positions the schema does not describe.
fn stringify_tree(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(stringify_tree).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), stringify_tree(v)))
                .collect(),
        ),
        other => stringify(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recnorm_core::{FieldType, ObjectType, ObjectValue};

    #[test]
    fn temporal_leaves_become_strings() {
        let cases = [
            (Value::Date("2024-01-01".into()), AirbyteType::Date),
            (Value::Time("10:00:00".into()), AirbyteType::TimeWithoutTimezone),
            (Value::Time("10:00:00Z".into()), AirbyteType::TimeWithTimezone),
            (
                Value::Timestamp("2024-01-01T00:00:00".into()),
                AirbyteType::TimestampWithoutTimezone,
            ),
        ];
        for (value, ty) in cases {
            let (mapped, _) = StringifyTemporal.map(&value, &ty, MapContext::new());
            assert_eq!(
                mapped,
                Value::String(value.temporal_text().unwrap().to_string())
            );
        }
    }

    #[test]
    fn non_temporal_leaves_untouched() {
        for (value, ty) in [
            (Value::Integer(1), AirbyteType::Integer),
            (Value::Boolean(false), AirbyteType::Boolean),
            (Value::String("2024-01-01".into()), AirbyteType::String),
        ] {
            let (mapped, _) = StringifyTemporal.map(&value, &ty, MapContext::new());
            assert_eq!(mapped, value);
        }
    }

    #[test]
    fn schemaless_and_undeclared_positions_are_stringified() {
        let mut inner = ObjectValue::new();
        inner.insert("d", Value::Date("2024-03-01".into()));
        let mut obj = ObjectValue::new();
        obj.insert("free", Value::Object(inner));
        obj.insert("extra", Value::Array(vec![Value::Time("01:02:03".into())]));

        let schema = AirbyteType::Object(
            ObjectType::new().with("free", FieldType::new(AirbyteType::ObjectWithoutSchema, true)),
        );
        let (mapped, _) = StringifyTemporal.map(&Value::Object(obj), &schema, MapContext::new());

        let mapped = mapped.as_object().unwrap();
        assert_eq!(
            mapped.get("free").and_then(|v| v.as_object()).and_then(|o| o.get("d")),
            Some(&Value::String("2024-03-01".into()))
        );
        assert_eq!(
            mapped.get("extra"),
            Some(&Value::Array(vec![Value::String("01:02:03".into())]))
        );
    }

    #[test]
    fn union_positions_are_stringified() {
        let ty = AirbyteType::Union(vec![AirbyteType::Date, AirbyteType::Integer]);
        let (mapped, _) =
            StringifyTemporal.map(&Value::Date("2024-01-01".into()), &ty, MapContext::new());
        assert_eq!(mapped, Value::String("2024-01-01".into()));
    }

    #[test]
    fn mismatched_composite_is_stringified_and_reported() {
        let mut held = ObjectValue::new();
        held.insert("d", Value::Date("2024-03-01".into()));
        held.insert("n", Value::Integer(2));
        let mut obj = ObjectValue::new();
        obj.insert("days", Value::Object(held));

        let schema = AirbyteType::Object(ObjectType::new().with(
            "days",
            FieldType::nullable(AirbyteType::array_of(AirbyteType::Date)),
        ));
        let (mapped, ctx) =
            StringifyTemporal.map(&Value::Object(obj), &schema, MapContext::new());

        let days = mapped
            .as_object()
            .and_then(|o| o.get("days"))
            .and_then(|v| v.as_object())
            .unwrap();
        assert_eq!(days.get("d"), Some(&Value::String("2024-03-01".into())));
        assert_eq!(days.get("n"), Some(&Value::Integer(2)));
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(ctx.diagnostics()[0].path, "$.days");
        assert_eq!(ctx.diagnostics()[0].kind, DiagnosticKind::ShapeMismatch);
    }
}
