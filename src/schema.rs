use crate::error::{ConversionError, Result};
use serde_json::Value;

/// An Avro type descriptor, parsed from its JSON form.
///
/// Bare strings become [`Primitive`](AvroType::Primitive) or
/// [`Named`](AvroType::Named), objects become the complex variants, and
/// JSON lists become [`Union`](AvroType::Union).
#[derive(Debug, Clone, PartialEq)]
pub enum AvroType {
    Primitive(Primitive),
    Logical(LogicalKind),
    Record(RecordType),
    Enum(EnumType),
    Array(Box<AvroType>),
    Map(Box<AvroType>),
    Union(Vec<AvroType>),
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

/// Recognized `logicalType` annotations. The underlying primitive is
/// irrelevant for type mapping and is not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKind {
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Uuid,
    Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<FieldType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldType {
    pub name: String,
    pub ty: AvroType,
    /// `Some(Value::Null)` is a declared `null` default; `None` means the
    /// field declares no default at all. The two render differently.
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub symbols: Vec<String>,
}

impl AvroType {
    /// Parse an Avro type descriptor from its JSON representation.
    pub fn parse(value: &Value) -> Result<AvroType> {
        match value {
            Value::String(s) => Ok(parse_type_name(s)),
            Value::Object(_) => parse_object(value),
            Value::Array(members) => parse_union(members),
            other => Err(ConversionError::UnsupportedType(other.to_string())),
        }
    }
}

fn parse_type_name(s: &str) -> AvroType {
    match s {
        "null" => AvroType::Primitive(Primitive::Null),
        "boolean" => AvroType::Primitive(Primitive::Boolean),
        "int" => AvroType::Primitive(Primitive::Int),
        "long" => AvroType::Primitive(Primitive::Long),
        "float" => AvroType::Primitive(Primitive::Float),
        "double" => AvroType::Primitive(Primitive::Double),
        "bytes" => AvroType::Primitive(Primitive::Bytes),
        "string" => AvroType::Primitive(Primitive::String),
        // Anything else is a reference to a named type; whether it actually
        // resolves is checked against the registry during conversion.
        name => AvroType::Named(name.to_string()),
    }
}

fn parse_object(value: &Value) -> Result<AvroType> {
    // logicalType takes precedence over the type tag when recognized.
    if let Some(logical) = value.get("logicalType").and_then(Value::as_str) {
        match logical {
            "date" => return Ok(AvroType::Logical(LogicalKind::Date)),
            "time-millis" => return Ok(AvroType::Logical(LogicalKind::TimeMillis)),
            "time-micros" => return Ok(AvroType::Logical(LogicalKind::TimeMicros)),
            "timestamp-millis" => return Ok(AvroType::Logical(LogicalKind::TimestampMillis)),
            "timestamp-micros" => return Ok(AvroType::Logical(LogicalKind::TimestampMicros)),
            "uuid" => return Ok(AvroType::Logical(LogicalKind::Uuid)),
            "decimal" => return Ok(AvroType::Logical(LogicalKind::Decimal)),
            // Unrecognized annotations fall back to the underlying type tag.
            _ => {}
        }
    }

    let Some(tag) = value.get("type").and_then(Value::as_str) else {
        return Err(ConversionError::UnsupportedType(value.to_string()));
    };

    match tag {
        "record" => parse_record(value),
        "enum" => parse_enum(value),
        "array" => parse_array(value),
        "map" => parse_map(value),
        // Primitives may also appear in object form, e.g. {"type": "string"}.
        "null" | "boolean" | "int" | "long" | "float" | "double" | "bytes" | "string" => {
            Ok(parse_type_name(tag))
        }
        _ => Err(ConversionError::UnsupportedType(value.to_string())),
    }
}

fn parse_record(value: &Value) -> Result<AvroType> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ConversionError::MissingName)?
        .to_string();

    let fields = value
        .get("fields")
        .and_then(Value::as_array)
        .ok_or(ConversionError::MissingFields)?;

    let fields = fields
        .iter()
        .map(parse_field)
        .collect::<Result<Vec<FieldType>>>()?;

    Ok(AvroType::Record(RecordType { name, fields }))
}

fn parse_field(value: &Value) -> Result<FieldType> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ConversionError::MissingName)?
        .to_string();

    let ty = value
        .get("type")
        .ok_or_else(|| ConversionError::UnsupportedType(value.to_string()))
        .and_then(AvroType::parse)?;

    // "default": null and an absent default are distinct declarations.
    let default = value
        .as_object()
        .and_then(|obj| obj.get("default"))
        .cloned();

    Ok(FieldType { name, ty, default })
}

fn parse_enum(value: &Value) -> Result<AvroType> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ConversionError::MissingName)?
        .to_string();

    let symbols = value
        .get("symbols")
        .and_then(Value::as_array)
        .ok_or_else(|| ConversionError::UnsupportedType(value.to_string()))?;

    let symbols = symbols
        .iter()
        .map(|s| {
            s.as_str()
                .map(str::to_string)
                .ok_or_else(|| ConversionError::UnsupportedType(s.to_string()))
        })
        .collect::<Result<Vec<String>>>()?;

    Ok(AvroType::Enum(EnumType { name, symbols }))
}

fn parse_array(value: &Value) -> Result<AvroType> {
    let items = value
        .get("items")
        .ok_or_else(|| ConversionError::UnsupportedType(value.to_string()))?;

    Ok(AvroType::Array(Box::new(AvroType::parse(items)?)))
}

fn parse_map(value: &Value) -> Result<AvroType> {
    let values = match value.get("values") {
        Some(Value::Null) | None => return Err(ConversionError::MissingMapValues),
        Some(values) => values,
    };

    Ok(AvroType::Map(Box::new(AvroType::parse(values)?)))
}

fn parse_union(members: &[Value]) -> Result<AvroType> {
    if members.is_empty() {
        return Err(ConversionError::UnsupportedType("[]".to_string()));
    }

    let members = members
        .iter()
        .map(AvroType::parse)
        .collect::<Result<Vec<AvroType>>>()?;

    Ok(AvroType::Union(members))
}
