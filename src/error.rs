use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversionError>;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to parse Avro schema: {0}")]
    ParseError(String),

    #[error("Type not supported: {0}")]
    UnsupportedType(String),

    #[error("Name is required")]
    MissingName,

    #[error("Fields are required")]
    MissingFields,

    #[error("Values are required for map type")]
    MissingMapValues,
}
