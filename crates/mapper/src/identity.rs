//! The identity mapper: lockstep traversal of a schema and a value tree.
//!
//! [`ValueMapper`] is a hook table. [`walk`] looks at the declared type of
//! each position and calls the matching hook; the hooks for composite
//! types recurse through [`walk_object`] and [`walk_array`]. Every hook
//! defaults to returning its input unchanged, so an implementation
//! overrides only the (type, value) combinations its destination cannot
//! represent.
//!
//! Overrides that still want the default recursion call the `walk_*`
//! functions themselves.
//!
//! Null values are passed through at every position without reaching a
//! hook.
//!
//! Structural mismatches are tolerated. A composite type over a value of
//! another shape, and object keys the schema does not declare, are routed
//! to [`ValueMapper::map_mismatch`] and [`ValueMapper::map_undeclared`],
//! which by default pass the value through and only log it, leaving the
//! context as it was. The bundled policies override `map_mismatch` to
//! also record a [`DiagnosticKind::ShapeMismatch`]. Schema fields missing
//! from the value are not synthesized.
//!
//! [`DiagnosticKind::ShapeMismatch`]: crate::DiagnosticKind::ShapeMismatch

use recnorm_core::{AirbyteType, FieldType, ObjectType, ObjectValue, Value};

use crate::context::MapContext;

/// Result of every hook: the replacement value and the updated context.
pub type Mapped = (Value, MapContext);

pub trait ValueMapper: Send + Sync {
    /// Map `value`, declared as `ty`. Entry point for the whole tree and
    /// for every child.
    fn map(&self, value: &Value, ty: &AirbyteType, ctx: MapContext) -> Mapped {
        walk(self, value, ty, ctx)
    }

    // ── Composite and schemaless positions ──────────────────────────

    fn map_object(&self, value: &Value, schema: &ObjectType, ctx: MapContext) -> Mapped {
        walk_object(self, value, schema, ctx)
    }

    fn map_array(&self, value: &Value, items: &FieldType, ctx: MapContext) -> Mapped {
        walk_array(self, value, items, ctx)
    }

    fn map_union(&self, value: &Value, _options: &[AirbyteType], ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    /// Positions declared as `ArrayWithoutSchema`, `ObjectWithoutSchema`,
    /// `ObjectWithEmptySchema` or `Unknown`.
    fn map_schemaless(&self, value: &Value, _ty: &AirbyteType, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    /// A composite type declared over a value of a different shape. The
    /// default logs a warning and adds no diagnostic.
    fn map_mismatch(&self, value: &Value, ty: &AirbyteType, ctx: MapContext) -> Mapped {
        tracing::warn!(
            path = %ctx.path(),
            expected = %ty,
            found = value.type_name(),
            "value shape does not match schema, passing through"
        );
        (value.clone(), ctx)
    }

    /// An object field the schema does not declare.
    fn map_undeclared(&self, value: &Value, ctx: MapContext) -> Mapped {
        tracing::debug!(path = %ctx.path(), "field not declared in schema, passing through");
        (value.clone(), ctx)
    }

    // ── Leaves ──────────────────────────────────────────────────────

    /// Called for every leaf type before the per-type hooks. Override to
    /// treat all leaves alike.
    fn map_leaf(&self, value: &Value, ty: &AirbyteType, ctx: MapContext) -> Mapped {
        walk_leaf(self, value, ty, ctx)
    }

    fn map_boolean(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_integer(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_number(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_string(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_date(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_time_with_timezone(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_time_without_timezone(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_timestamp_with_timezone(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }

    fn map_timestamp_without_timezone(&self, value: &Value, ctx: MapContext) -> Mapped {
        (value.clone(), ctx)
    }
}

/// A mapper that overrides nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl ValueMapper for IdentityMapper {}

// ──────────────────────────────────────────────
// Default traversal
// ──────────────────────────────────────────────

/// Dispatch on the declared type.
pub fn walk<M: ValueMapper + ?Sized>(
    mapper: &M,
    value: &Value,
    ty: &AirbyteType,
    ctx: MapContext,
) -> Mapped {
    if value.is_null() {
        return (Value::Null, ctx);
    }
    match ty {
        AirbyteType::Object(schema) => mapper.map_object(value, schema, ctx),
        AirbyteType::Array(items) => mapper.map_array(value, items, ctx),
        AirbyteType::Union(options) => mapper.map_union(value, options, ctx),
        AirbyteType::ArrayWithoutSchema
        | AirbyteType::ObjectWithoutSchema
        | AirbyteType::ObjectWithEmptySchema
        | AirbyteType::Unknown(_) => mapper.map_schemaless(value, ty, ctx),
        _ => mapper.map_leaf(value, ty, ctx),
    }
}

/// Map each field against its declared type, in the value's key order.
pub fn walk_object<M: ValueMapper + ?Sized>(
    mapper: &M,
    value: &Value,
    schema: &ObjectType,
    ctx: MapContext,
) -> Mapped {
    let Value::Object(fields) = value else {
        return mapper.map_mismatch(value, &AirbyteType::Object(schema.clone()), ctx);
    };

    let mut mapped = ObjectValue::with_capacity(fields.len());
    let mut ctx = ctx;
    for (name, field_value) in fields.iter() {
        let inner = ctx.enter_field(name);
        let (v, inner) = match schema.get(name) {
            Some(field) => mapper.map(field_value, &field.ty, inner),
            None => mapper.map_undeclared(field_value, inner),
        };
        ctx = inner.leave();
        mapped.insert(name, v);
    }
    (Value::Object(mapped), ctx)
}

/// Map each element against the element type, in order.
pub fn walk_array<M: ValueMapper + ?Sized>(
    mapper: &M,
    value: &Value,
    items: &FieldType,
    ctx: MapContext,
) -> Mapped {
    let Value::Array(elements) = value else {
        return mapper.map_mismatch(value, &AirbyteType::Array(Box::new(items.clone())), ctx);
    };

    let mut mapped = Vec::with_capacity(elements.len());
    let mut ctx = ctx;
    for (i, element) in elements.iter().enumerate() {
        let (v, inner) = mapper.map(element, &items.ty, ctx.enter_index(i));
        ctx = inner.leave();
        mapped.push(v);
    }
    (Value::Array(mapped), ctx)
}

/// Route a leaf to its per-type hook.
pub fn walk_leaf<M: ValueMapper + ?Sized>(
    mapper: &M,
    value: &Value,
    ty: &AirbyteType,
    ctx: MapContext,
) -> Mapped {
    match ty {
        AirbyteType::Boolean => mapper.map_boolean(value, ctx),
        AirbyteType::Integer => mapper.map_integer(value, ctx),
        AirbyteType::Number => mapper.map_number(value, ctx),
        AirbyteType::String => mapper.map_string(value, ctx),
        AirbyteType::Date => mapper.map_date(value, ctx),
        AirbyteType::TimeWithTimezone => mapper.map_time_with_timezone(value, ctx),
        AirbyteType::TimeWithoutTimezone => mapper.map_time_without_timezone(value, ctx),
        AirbyteType::TimestampWithTimezone => mapper.map_timestamp_with_timezone(value, ctx),
        AirbyteType::TimestampWithoutTimezone => {
            mapper.map_timestamp_without_timezone(value, ctx)
        }
        // Not a leaf; hand it back to the dispatcher.
        _ => walk(mapper, value, ty, ctx),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
