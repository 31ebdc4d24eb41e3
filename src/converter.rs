use crate::error::{ConversionError, Result};
use crate::schema::{AvroType, EnumType, FieldType, LogicalKind, Primitive, RecordType};
use serde_json::Value;
use std::collections::HashSet;

/// Compiles an Avro record schema into pydantic class definitions.
///
/// Nested records and enums are registered once under their name, in the
/// order they are first resolved, so every definition precedes the classes
/// that reference it and the root class comes last.
#[derive(Clone)]
pub struct SchemaConverter {
    definitions: Vec<String>,
    registered: HashSet<String>,
}

impl SchemaConverter {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            registered: HashSet::new(),
        }
    }

    /// Convert a top-level Avro record schema into pydantic source.
    ///
    /// Returns the definition blocks only; the import preamble is added by
    /// [`convert_schema_to_source`](crate::convert_schema_to_source).
    pub fn convert(&self, schema: &Value) -> Result<String> {
        let mut converter = self.clone();

        let root = AvroType::parse(schema)?;
        let AvroType::Record(record) = &root else {
            return Err(ConversionError::UnsupportedType(schema.to_string()));
        };

        converter.record_definition(record)?;
        Ok(converter.definitions.join("\n\n"))
    }

    /// Resolve a type descriptor to the expression used in a field
    /// declaration, registering any named definitions it contains.
    fn resolve_type(&mut self, ty: &AvroType) -> Result<String> {
        match ty {
            AvroType::Primitive(primitive) => python_primitive(*primitive)
                .map(str::to_string)
                .ok_or_else(|| ConversionError::UnsupportedType("null".to_string())),
            AvroType::Logical(kind) => Ok(python_logical(*kind).to_string()),
            AvroType::Record(record) => {
                self.record_definition(record)?;
                Ok(record.name.clone())
            }
            AvroType::Enum(definition) => {
                self.enum_definition(definition);
                Ok(definition.name.clone())
            }
            AvroType::Array(items) => Ok(format!("List[{}]", self.resolve_type(items)?)),
            AvroType::Map(values) => Ok(format!("Dict[str, {}]", self.resolve_type(values)?)),
            AvroType::Union(members) => self.resolve_union(members),
            AvroType::Named(name) => {
                if self.registered.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(ConversionError::UnsupportedType(name.clone()))
                }
            }
        }
    }

    fn resolve_union(&mut self, members: &[AvroType]) -> Result<String> {
        let optional = members
            .iter()
            .any(|member| *member == AvroType::Primitive(Primitive::Null));

        let non_null: Vec<&AvroType> = members
            .iter()
            .filter(|member| **member != AvroType::Primitive(Primitive::Null))
            .collect();

        let expression = match non_null.len() {
            0 => {
                return Err(ConversionError::UnsupportedType(
                    "union with no non-null members".to_string(),
                ));
            }
            1 => self.resolve_type(non_null[0])?,
            _ => {
                let resolved = non_null
                    .into_iter()
                    .map(|member| self.resolve_type(member))
                    .collect::<Result<Vec<String>>>()?;
                format!("Union[{}]", resolved.join(","))
            }
        };

        if optional {
            Ok(format!("Optional[{expression}]"))
        } else {
            Ok(expression)
        }
    }

    fn record_definition(&mut self, record: &RecordType) -> Result<()> {
        if self.registered.contains(&record.name) {
            return Ok(());
        }

        let mut block = format!("class {}(BaseModel):\n", record.name);
        for field in &record.fields {
            block.push_str(&self.field_line(field)?);
        }
        if record.fields.is_empty() {
            block.push_str("    pass\n");
        }

        self.register(record.name.clone(), block);
        Ok(())
    }

    fn enum_definition(&mut self, definition: &EnumType) {
        if self.registered.contains(&definition.name) {
            return;
        }

        let mut block = format!("class {}(str, Enum):\n", definition.name);
        for symbol in &definition.symbols {
            block.push_str(&format!("    {symbol} = \"{symbol}\"\n"));
        }

        self.register(definition.name.clone(), block);
    }

    fn field_line(&mut self, field: &FieldType) -> Result<String> {
        let ty = self.resolve_type(&field.ty)?;

        // Avro int is 32-bit; the bound is attached to the field because the
        // expression for both int and long is plain `int`.
        let line = if field.ty == AvroType::Primitive(Primitive::Int) {
            match &field.default {
                Some(default) => format!(
                    "    {}: {} = Field({}, ge=-2**31, le=(2**31 - 1))\n",
                    field.name,
                    ty,
                    default_literal(default),
                ),
                None => format!(
                    "    {}: {} = Field(..., ge=-2**31, le=(2**31 - 1))\n",
                    field.name, ty,
                ),
            }
        } else {
            match &field.default {
                Some(default) => {
                    format!("    {}: {} = {}\n", field.name, ty, default_literal(default))
                }
                None => format!("    {}: {}\n", field.name, ty),
            }
        };

        Ok(line)
    }

    fn register(&mut self, name: String, definition: String) {
        if self.registered.insert(name) {
            self.definitions.push(definition);
        }
    }
}

fn python_primitive(primitive: Primitive) -> Option<&'static str> {
    match primitive {
        // null only has meaning inside a union
        Primitive::Null => None,
        Primitive::Boolean => Some("bool"),
        Primitive::Int | Primitive::Long => Some("int"),
        Primitive::Float | Primitive::Double => Some("float"),
        Primitive::Bytes => Some("bytes"),
        Primitive::String => Some("str"),
    }
}

fn python_logical(kind: LogicalKind) -> &'static str {
    match kind {
        LogicalKind::Date => "date",
        LogicalKind::TimeMillis | LogicalKind::TimeMicros => "time",
        LogicalKind::TimestampMillis | LogicalKind::TimestampMicros => "datetime",
        LogicalKind::Uuid => "UUID",
        LogicalKind::Decimal => "Decimal",
    }
}

/// Render a declared default by its own JSON shape, independent of the
/// field's resolved type. Top-level null and booleans become Python
/// literals; everything else stays JSON text.
fn default_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => json_literal(other),
    }
}

// JSON literal text with json.dumps separators (", " between items, ": "
// after keys), so generated defaults match what the schema declared.
fn json_literal(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(json_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(key, value)| {
                    format!("{}: {}", Value::String(key.clone()), json_literal(value))
                })
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        scalar => scalar.to_string(),
    }
}

impl Default for SchemaConverter {
    fn default() -> Self {
        Self::new()
    }
}
