pub mod converter;
pub mod error;
pub mod schema;

pub use converter::SchemaConverter;
pub use error::{ConversionError, Result};
pub use schema::AvroType;

/// Imports emitted at the top of every generated module.
pub const MODULE_IMPORTS: &str = "
from datetime import date, datetime, time
from decimal import Decimal
from enum import Enum
from typing import List, Optional, Dict, Union
from uuid import UUID

from pydantic import BaseModel, Field


";

/// Convert an Avro schema string to pydantic class definitions
pub fn convert_schema(avro_schema: &str) -> Result<String> {
    let schema: serde_json::Value = serde_json::from_str(avro_schema)
        .map_err(|e| ConversionError::ParseError(e.to_string()))?;

    let converter = SchemaConverter::new();
    converter.convert(&schema)
}

/// Convert an Avro schema string to a complete Python module, prefixed with
/// the import preamble the generated classes rely on
pub fn convert_schema_to_source(avro_schema: &str) -> Result<String> {
    Ok(format!("{}{}", MODULE_IMPORTS, convert_schema(avro_schema)?))
}
