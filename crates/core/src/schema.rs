//! Logical type schema.
//!
//! Mirrors [`crate::Value`] but is finer-grained for temporal types:
//! time and timestamp positions record whether the destination should
//! see an offset.

use std::fmt;

/// Expected logical type at one position of a value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirbyteType {
    Boolean,
    Integer,
    Number,
    String,
    Date,
    TimeWithTimezone,
    TimeWithoutTimezone,
    TimestampWithTimezone,
    TimestampWithoutTimezone,
    Array(Box<FieldType>),
    /// Array with no `items` declaration.
    ArrayWithoutSchema,
    Object(ObjectType),
    /// Object with no `properties` declaration.
    ObjectWithoutSchema,
    /// Object declared with an empty `properties` map.
    ObjectWithEmptySchema,
    Union(Vec<AirbyteType>),
    /// A schema fragment that could not be interpreted; carries the raw
    /// fragment for diagnostics.
    Unknown(serde_json::Value),
}

impl AirbyteType {
    pub fn type_name(&self) -> &'static str {
        match self {
            AirbyteType::Boolean => "Boolean",
            AirbyteType::Integer => "Integer",
            AirbyteType::Number => "Number",
            AirbyteType::String => "String",
            AirbyteType::Date => "Date",
            AirbyteType::TimeWithTimezone => "TimeWithTimezone",
            AirbyteType::TimeWithoutTimezone => "TimeWithoutTimezone",
            AirbyteType::TimestampWithTimezone => "TimestampWithTimezone",
            AirbyteType::TimestampWithoutTimezone => "TimestampWithoutTimezone",
            AirbyteType::Array(_) => "Array",
            AirbyteType::ArrayWithoutSchema => "ArrayWithoutSchema",
            AirbyteType::Object(_) => "Object",
            AirbyteType::ObjectWithoutSchema => "ObjectWithoutSchema",
            AirbyteType::ObjectWithEmptySchema => "ObjectWithEmptySchema",
            AirbyteType::Union(_) => "Union",
            AirbyteType::Unknown(_) => "Unknown",
        }
    }

    /// Shorthand for an array of non-nullable `items`.
    pub fn array_of(items: AirbyteType) -> Self {
        AirbyteType::Array(Box::new(FieldType::new(items, false)))
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            AirbyteType::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// True for the types whose values are Date, Time or Timestamp.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            AirbyteType::Date
                | AirbyteType::TimeWithTimezone
                | AirbyteType::TimeWithoutTimezone
                | AirbyteType::TimestampWithTimezone
                | AirbyteType::TimestampWithoutTimezone
        )
    }
}

impl fmt::Display for AirbyteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirbyteType::Array(items) => write!(f, "Array<{}>", items.ty),
            AirbyteType::Union(options) => {
                write!(f, "Union<")?;
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", option)?;
                }
                write!(f, ">")
            }
            other => f.write_str(other.type_name()),
        }
    }
}

/// A type plus its nullability, as declared for an object property or
/// array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub ty: AirbyteType,
    pub nullable: bool,
}

impl FieldType {
    pub fn new(ty: AirbyteType, nullable: bool) -> Self {
        Self { ty, nullable }
    }

    pub fn nullable(ty: AirbyteType) -> Self {
        Self::new(ty, true)
    }
}

/// Ordered property declarations of an object type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectType {
    properties: Vec<(String, FieldType)>,
}

impl ObjectType {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Builder form of [`ObjectType::insert`].
    pub fn with(mut self, name: impl Into<String>, field: FieldType) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: FieldType) {
        let name = name.into();
        if let Some(entry) = self.properties.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = field;
        } else {
            self.properties.push((name, field));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.properties.iter().map(|(k, f)| (k.as_str(), f))
    }
}

impl From<ObjectType> for AirbyteType {
    fn from(obj: ObjectType) -> Self {
        AirbyteType::Object(obj)
    }
}
