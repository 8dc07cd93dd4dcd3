//! HTTP response builder that accumulates a JSON object.
//!
//! The builder starts from `{}` and each setter writes fixed properties. Whatever
//! was set is written in this order, unset properties are omitted:
//!
//! ```json
//! {
//!   "version": "HTTP/1.1",
//!   "status-code": 201,
//!   "status-message": "Created",
//!   "headers": { "Content-Type": "text/plain", "Content-Length": 13 },
//!   "body": "Response-text"
//! }
//! ```
//!
//! Only one [`Entity`] can be set and each of its headers may carry only one value.

use crate::ensure;
use crate::protocol::entity::Entity;
use crate::protocol::header::HeaderName;
use crate::protocol::header_map::value_text;
use crate::protocol::version::{parse_version, version_text};
use crate::protocol::{ParseError, SendError};
use http::{StatusCode, Version};
use serde_json::{Map, Value};
use std::fmt;
use std::fmt::Display;

const VERSION: &str = "version";
const STATUS_CODE: &str = "status-code";
const STATUS_MESSAGE: &str = "status-message";
const HEADERS: &str = "headers";
const BODY: &str = "body";

const PROPERTY_ORDER: [&str; 5] = [VERSION, STATUS_CODE, STATUS_MESSAGE, HEADERS, BODY];

/// A status code together with the message sent along with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatus {
    code: StatusCode,
    message: String,
}

impl HttpStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Uses the canonical reason phrase as the message, empty for unregistered codes.
impl From<StatusCode> for HttpStatus {
    fn from(code: StatusCode) -> Self {
        Self::new(code, code.canonical_reason().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Response {
    object: Map<String, Value>,
}

impl Response {
    /// Creates a response whose JSON form is `{}`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overwrites the version, the last call wins.
    pub fn set_version(&mut self, version: Version) {
        self.set(VERSION, Value::from(version_text(version)));
    }

    pub fn version(&self) -> Result<Option<Version>, ParseError> {
        match self.object.get(VERSION) {
            Some(Value::String(version)) => parse_version(version).map(Some),
            Some(_) => Err(ParseError::invalid_field(VERSION, "a string")),
            None => Ok(None),
        }
    }

    /// Overwrites both the status code and the status message, the last call wins.
    pub fn set_status(&mut self, code: StatusCode, message: impl Into<String>) {
        self.set(STATUS_CODE, Value::from(code.as_u16()));
        self.set(STATUS_MESSAGE, Value::from(message.into()));
    }

    pub fn status(&self) -> Result<Option<HttpStatus>, ParseError> {
        let Some(code) = self.object.get(STATUS_CODE) else {
            return Ok(None);
        };

        let code = code.as_u64().ok_or_else(|| ParseError::invalid_field(STATUS_CODE, "a number"))?;
        let code = u16::try_from(code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .ok_or(ParseError::InvalidStatus { code })?;

        let message = match self.object.get(STATUS_MESSAGE) {
            Some(Value::String(message)) => message.clone(),
            Some(_) => return Err(ParseError::invalid_field(STATUS_MESSAGE, "a string")),
            None => return Err(ParseError::missing_field(STATUS_MESSAGE)),
        };

        Ok(Some(HttpStatus::new(code, message)))
    }

    /// Writes the headers and body of `entity`.
    ///
    /// Fails with [`SendError::EntityAlreadySet`] once an entity with headers or a body
    /// was written, and with [`SendError::MultiValueHeaderUnsupported`] if a header has
    /// more than one value. Headers without a value are skipped. Each value is rendered
    /// by its header's own parser, so `"1"` given for `Content-Length` is written as the
    /// number `1`, and a value the header cannot parse fails with
    /// [`SendError::InvalidHeaderValue`]. On failure the response is left untouched.
    pub fn set_entity(&mut self, entity: Entity) -> Result<(), SendError> {
        ensure!(!self.object.contains_key(HEADERS) && !self.object.contains_key(BODY), SendError::EntityAlreadySet);

        let mut headers = Map::new();
        for (name, values) in entity.headers() {
            match values {
                [] => {}
                [value] => {
                    let value = name
                        .parse_value(&value.header_text())
                        .map_err(|e| SendError::invalid_header_value(name, e))?;
                    headers.insert(name.as_str().to_string(), value.to_json());
                }
                _ => return Err(SendError::multi_value_header(name, values.len())),
            }
        }

        if !headers.is_empty() {
            self.set(HEADERS, Value::Object(headers));
        }

        if !entity.body_text().is_empty() {
            self.set(BODY, Value::from(entity.body_text()));
        }

        Ok(())
    }

    /// Reads back the entity, `None` when neither headers nor a body were written.
    pub fn entities(&self) -> Result<Option<Entity>, ParseError> {
        let mut entity = Entity::empty();

        match self.object.get(HEADERS) {
            Some(Value::Object(headers)) => {
                for (key, value) in headers {
                    let name = HeaderName::from_name(key)?;
                    let value = name.parse_value(&value_text(key, value)?)?;
                    entity = entity.add_header(name, value);
                }
            }
            Some(_) => return Err(ParseError::invalid_field(HEADERS, "an object")),
            None => {}
        }

        match self.object.get(BODY) {
            Some(Value::String(body)) => entity = entity.set_body_text(body.as_str()),
            Some(_) => return Err(ParseError::invalid_field(BODY, "a string")),
            None => {}
        }

        Ok(if entity.is_empty() { None } else { Some(entity) })
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.object
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.object)
    }

    fn set(&mut self, name: &'static str, value: Value) {
        self.object = with_property(std::mem::take(&mut self.object), name, value);
    }
}

/// Returns `object` with `name` set to `value`, properties kept in [`PROPERTY_ORDER`].
fn with_property(object: Map<String, Value>, name: &'static str, value: Value) -> Map<String, Value> {
    let mut properties = object.into_iter().filter(|(key, _)| key != name).collect::<Vec<_>>();
    properties.push((name.to_string(), value));
    properties.sort_by_key(|(key, _)| PROPERTY_ORDER.iter().position(|p| p == key).unwrap_or(PROPERTY_ORDER.len()));
    properties.into_iter().collect()
}

impl Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.object.clone()))
    }
}
