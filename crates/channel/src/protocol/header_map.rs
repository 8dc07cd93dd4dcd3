//! Read-only, case-insensitive view over the `headers` object of a JSON request.
//!
//! Every JSON property is one header holding exactly one value. Lookups scan the
//! properties linearly, header counts are small enough that no folded index is kept.

use crate::protocol::ParseError;
use crate::protocol::header::{HeaderName, HeaderValue};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;
use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
pub struct HeaderView<'a> {
    headers: Option<&'a Map<String, Value>>,
}

impl<'a> HeaderView<'a> {
    pub fn new(headers: &'a Map<String, Value>) -> Self {
        Self { headers: Some(headers) }
    }

    /// A view without any header, used when a request has no `headers` property.
    pub fn empty() -> Self {
        Self { headers: None }
    }

    fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + use<'a> {
        self.headers.into_iter().flat_map(|map| map.iter())
    }

    /// Returns the value of the first property whose name matches `name` ignoring case,
    /// parsed by that header's value parser.
    pub fn get(&self, name: &HeaderName) -> Result<Option<HeaderValue>, ParseError> {
        match self.entries().find(|(key, _)| name.matches(key)) {
            Some((_, value)) => name.parse_value(&value_text(name.as_str(), value)?).map(Some),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, name: &HeaderName) -> bool {
        self.entries().any(|(key, _)| name.matches(key))
    }

    /// Number of properties in the underlying object, names differing only by case count twice.
    pub fn len(&self) -> usize {
        self.headers.map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Yields one entry per property, the name resolved against the header registry.
    pub fn iter(&self) -> impl Iterator<Item = Result<(HeaderName, HeaderValue), ParseError>> + use<'a> {
        self.entries().map(|(key, value)| {
            let name = HeaderName::from_name(key)?;
            let value = name.parse_value(&value_text(key, value)?)?;
            Ok((name, value))
        })
    }
}

/// Header values on the wire are JSON strings or JSON numbers.
///
/// Integral numbers written in float form such as `1.0` are read as integers.
pub(crate) fn value_text<'v>(name: &str, value: &'v Value) -> Result<Cow<'v, str>, ParseError> {
    match value {
        Value::String(s) => Ok(Cow::Borrowed(s)),
        Value::Number(n) => Ok(Cow::Owned(number_text(n))),
        other => Err(ParseError::invalid_header(format!("{name}: expected a string or number but found {other}"))),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

impl Display for HeaderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.headers {
            Some(map) => write!(f, "{}", Value::Object(map.clone())),
            None => f.write_str("{}"),
        }
    }
}
