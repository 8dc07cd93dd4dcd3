//! Request decoder
//!
//! Turns the text payload of a message into a [`Request`]. Only the JSON parse and the
//! object check happen here, the individual fields are read lazily by [`Request`].

use crate::protocol::charset::Charset;
use crate::protocol::{ParseError, Request};
use serde_json::Value;

/// Settings applied to every decoded request.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Charset used to measure a body when the request declares none.
    pub default_charset: Charset,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct RequestDecoder {
    config: DecoderConfig,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` with the default configuration
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Parses `text` as a JSON object and wraps it into a [`Request`]
    ///
    /// # Errors
    ///
    /// - [`ParseError::MalformedJson`] when `text` is not JSON
    /// - [`ParseError::NotAnObject`] when the JSON is not an object
    pub fn decode(&self, text: &str) -> Result<Request, ParseError> {
        let value = serde_json::from_str::<Value>(text)?;
        self.decode_value(value)
    }

    pub fn decode_value(&self, value: Value) -> Result<Request, ParseError> {
        match value {
            Value::Object(json) => Ok(Request::with_default_charset(json, self.config.default_charset)),
            other => Err(ParseError::NotAnObject { found: json_type(&other) }),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
