use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::tree::Object;

/// Errors that can occur while reading a JSON document into an [`Object`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input was not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Input parsed, but the root value is not an object.
    #[error("JSON root is {found}, expected an object")]
    NotAnObject { found: &'static str },
    /// Failed to read input file.
    #[error("failed to read JSON file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse JSON text into an ordered [`Object`].
pub fn parse(json: &str) -> Result<Object, ParseError> {
    into_object(serde_json::from_str::<Value>(json)?)
}

fn into_object(value: Value) -> Result<Object, ParseError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(ParseError::NotAnObject {
            found: kind_name(&other),
        }),
    }
}

/// Parse UTF-8 JSON bytes into an ordered [`Object`].
pub fn parse_bytes(json: &[u8]) -> Result<Object, ParseError> {
    into_object(serde_json::from_slice::<Value>(json)?)
}

/// Parse a JSON file into an ordered [`Object`].
pub fn parse_file(path: &Path) -> Result<Object, ParseError> {
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
