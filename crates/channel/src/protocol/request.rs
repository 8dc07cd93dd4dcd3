//! HTTP request view over a JSON object.
//!
//! A request arrives as a JSON object like the following, only `version` and `url`
//! are required:
//!
//! ```json
//! {
//!   "version": "HTTP/1.0",
//!   "method": "POST",
//!   "url": "/path?x=1",
//!   "headers": { "Content-Type": "text/plain", "Content-Length": 123 },
//!   "body": "text"
//! }
//! ```
//!
//! [`Request`] never copies the fields out of the object, every accessor reads the
//! JSON again, so a missing or malformed field only fails the accessor that needs it.

use crate::protocol::charset::Charset;
use crate::protocol::header::{CONTENT_TYPE, HeaderValue};
use crate::protocol::header_map::HeaderView;
use crate::protocol::version::parse_version;
use crate::protocol::ParseError;
use http::{Method, Uri, Version};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;

const VERSION: &str = "version";
const METHOD: &str = "method";
const URL: &str = "url";
const HEADERS: &str = "headers";
const BODY: &str = "body";

/// How the request reached the server. A message channel never carries TLS.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    Secured,
    Unsecured,
}

/// An immutable HTTP request backed by the JSON object it was decoded from.
#[derive(Debug, Clone)]
pub struct Request {
    json: Map<String, Value>,
    default_charset: Charset,
}

impl Request {
    /// Wraps `json`, measuring bodies with UTF-8 unless a `Content-Type` charset says otherwise.
    pub fn new(json: Map<String, Value>) -> Self {
        Self::with_default_charset(json, Charset::default())
    }

    pub fn with_default_charset(json: Map<String, Value>, default_charset: Charset) -> Self {
        Self { json, default_charset }
    }

    pub fn transport(&self) -> Transport {
        Transport::Unsecured
    }

    pub fn version(&self) -> Result<Version, ParseError> {
        let version = self.string_property(VERSION)?.ok_or_else(|| ParseError::missing_field(VERSION))?;
        parse_version(version)
    }

    /// Returns the method, `GET` when the property is absent.
    pub fn method(&self) -> Result<Method, ParseError> {
        match self.string_property(METHOD)? {
            Some(method) => Method::from_bytes(method.as_bytes())
                .ok()
                .ok_or_else(|| ParseError::InvalidMethod { method: method.to_string() }),
            None => Ok(Method::GET),
        }
    }

    /// Returns the relative url, absolute urls are rejected.
    pub fn url(&self) -> Result<Uri, ParseError> {
        let url = self.string_property(URL)?.ok_or_else(|| ParseError::missing_field(URL))?;
        let uri = url.parse::<Uri>().map_err(|e| ParseError::malformed_url(url, e))?;

        if uri.scheme().is_some() || uri.authority().is_some() {
            return Err(ParseError::malformed_url(url, "expected a relative url"));
        }

        Ok(uri)
    }

    /// Returns the headers, an empty view when the property is absent.
    pub fn headers(&self) -> Result<HeaderView<'_>, ParseError> {
        match self.json.get(HEADERS) {
            Some(Value::Object(headers)) => Ok(HeaderView::new(headers)),
            Some(_) => Err(ParseError::invalid_field(HEADERS, "an object")),
            None => Ok(HeaderView::empty()),
        }
    }

    /// Binary bodies cannot be carried by the JSON format, this always fails.
    pub fn body(&self) -> Result<&[u8], ParseError> {
        Err(ParseError::unsupported("binary request body"))
    }

    /// Returns the body text, empty when the property is absent.
    pub fn body_text(&self) -> Result<&str, ParseError> {
        Ok(self.string_property(BODY)?.unwrap_or_default())
    }

    /// Byte length of the body text once encoded with the charset of the `Content-Type`
    /// header, or the default charset when there is no such header or it has no charset.
    pub fn body_length(&self) -> Result<u64, ParseError> {
        let charset = self.charset()?;
        Ok(charset.encoded_len(self.body_text()?))
    }

    fn charset(&self) -> Result<Charset, ParseError> {
        let content_type = self.headers()?.get(&CONTENT_TYPE)?;
        let Some(HeaderValue::MediaType(media_type)) = content_type else {
            return Ok(self.default_charset);
        };

        match media_type.get_param(mime::CHARSET) {
            Some(label) => Charset::from_label(label.as_str())
                .ok_or_else(|| ParseError::UnsupportedCharset { charset: label.as_str().to_string() }),
            None => Ok(self.default_charset),
        }
    }

    /// Query and form parameters are not extracted, this always fails.
    pub fn parameters(&self) -> Result<HashMap<String, Vec<String>>, ParseError> {
        Err(ParseError::unsupported("request parameters"))
    }

    pub fn parameter_values(&self, name: &str) -> Result<Vec<String>, ParseError> {
        Ok(self.parameters()?.remove(name).unwrap_or_default())
    }

    /// The JSON object this request reads from.
    pub fn as_json(&self) -> &Map<String, Value> {
        &self.json
    }

    fn string_property(&self, field: &'static str) -> Result<Option<&str>, ParseError> {
        match self.json.get(field) {
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(ParseError::invalid_field(field, "a string")),
            None => Ok(None),
        }
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.json.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::header::CONTENT_LENGTH;

    fn parse(json: &str) -> Request {
        match serde_json::from_str::<Value>(json).unwrap() {
            Value::Object(map) => Request::new(map),
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn method() {
        assert_eq!(parse(r#"{ "method": "GET" }"#).method().unwrap(), Method::GET);
        assert_eq!(parse(r#"{ "method": "POST" }"#).method().unwrap(), Method::POST);
        assert_eq!(parse(r#"{ "method": "CustomMethod" }"#).method().unwrap().as_str(), "CustomMethod");
    }

    #[test]
    fn method_missing_defaults_get() {
        assert_eq!(parse("{}").method().unwrap(), Method::GET);
    }

    #[test]
    fn invalid_method() {
        assert!(matches!(parse(r#"{ "method": "BAD METHOD" }"#).method(), Err(ParseError::InvalidMethod { .. })));
        assert!(matches!(parse(r#"{ "method": 1 }"#).method(), Err(ParseError::InvalidField { field: "method", .. })));
    }

    #[test]
    fn url() {
        let request = parse(r#"{ "url": "/path/to/file" }"#);
        assert_eq!(request.url().unwrap().path(), "/path/to/file");
    }

    #[test]
    fn url_with_query_parameters() {
        let uri = parse(r#"{ "url": "/path/with/query?query1=value1" }"#).url().unwrap();
        assert_eq!(uri.path(), "/path/with/query");
        assert_eq!(uri.query(), Some("query1=value1"));
    }

    #[test]
    fn url_missing() {
        assert!(matches!(parse("{}").url(), Err(ParseError::MissingField { field: "url" })));
    }

    #[test]
    fn url_absolute_or_malformed() {
        assert!(matches!(parse(r#"{ "url": "http://example.com/a" }"#).url(), Err(ParseError::MalformedUrl { .. })));
        assert!(matches!(parse(r#"{ "url": "/a b" }"#).url(), Err(ParseError::MalformedUrl { .. })));
    }

    #[test]
    fn version() {
        assert_eq!(parse(r#"{ "version": "HTTP/1.0" }"#).version().unwrap(), Version::HTTP_10);
        assert_eq!(parse(r#"{ "version": "HTTP/1.1" }"#).version().unwrap(), Version::HTTP_11);
    }

    #[test]
    fn version_missing() {
        assert!(matches!(parse("{}").version(), Err(ParseError::MissingField { field: "version" })));
    }

    #[test]
    fn headers_missing() {
        let request = parse("{}");
        assert_eq!(request.headers().unwrap().get(&CONTENT_TYPE).unwrap(), None);
    }

    #[test]
    fn headers_not_object() {
        assert!(matches!(parse(r#"{ "headers": [] }"#).headers(), Err(ParseError::InvalidField { field: "headers", .. })));
    }

    #[test]
    fn headers() {
        let request =
            parse(r#"{ "method": "POST", "headers": {"Content-Type": "text/plain", "Content-Length": 123}}"#);
        assert_eq!(request.method().unwrap(), Method::POST);

        let headers = request.headers().unwrap();
        assert_eq!(headers.get(&CONTENT_TYPE).unwrap(), Some(HeaderValue::MediaType(mime::TEXT_PLAIN)));
        assert_eq!(headers.get(&CONTENT_LENGTH).unwrap(), Some(HeaderValue::Number(123)));
    }

    #[test]
    fn body_text() {
        assert_eq!(parse(r#"{ "body": "abc123" }"#).body_text().unwrap(), "abc123");
        assert_eq!(parse("{}").body_text().unwrap(), "");
    }

    #[test]
    fn binary_body_unsupported() {
        assert!(matches!(parse(r#"{ "body": "abc123" }"#).body(), Err(ParseError::Unsupported { .. })));
    }

    #[test]
    fn body_length() {
        assert_eq!(parse(r#"{"headers": {}, "body": "abc123"}"#).body_length().unwrap(), 6);
    }

    #[test]
    fn body_length_content_type_utf8() {
        let request = parse(r#"{"headers": {"Content-Type": "text/plain;charset=UTF8"}, "body": "abc123"}"#);
        assert_eq!(request.body_length().unwrap(), 6);
    }

    #[test]
    fn body_length_content_type_utf16() {
        let request = parse(r#"{"headers": {"Content-Type": "text/plain;charset=UTF16"}, "body": "abc123"}"#);
        assert_eq!(request.body_length().unwrap(), 14);
    }

    #[test]
    fn body_length_content_type_utf32_and_windows_1252() {
        let request = parse(r#"{"headers": {"Content-Type": "text/plain;charset=UTF-32"}, "body": "abc123"}"#);
        assert_eq!(request.body_length().unwrap(), 24);

        let request = parse(r#"{"headers": {"Content-Type": "text/plain;charset=windows-1252"}, "body": "café"}"#);
        assert_eq!(request.body_length().unwrap(), 4);
    }

    #[test]
    fn body_length_default_charset() {
        let json = match serde_json::json!({"body": "abc"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let request = Request::with_default_charset(json, Charset::Utf16Le);
        assert_eq!(request.body_length().unwrap(), 6);
    }

    #[test]
    fn body_length_unknown_charset() {
        let request = parse(r#"{"headers": {"Content-Type": "text/plain;charset=EBCDIC"}, "body": "abc"}"#);
        assert!(matches!(request.body_length(), Err(ParseError::UnsupportedCharset { .. })));
    }

    #[test]
    fn parameters_unsupported() {
        let request = parse("{}");
        assert!(matches!(request.parameters(), Err(ParseError::Unsupported { .. })));
        assert!(matches!(request.parameter_values("a"), Err(ParseError::Unsupported { .. })));
    }

    #[test]
    fn transport() {
        assert_eq!(parse("{}").transport(), Transport::Unsecured);
    }

    #[test]
    fn to_string_keeps_property_order() {
        let request = parse(
            r#"{ "method": "POST", "headers": {"Content-Type": "text/plain", "Content-Length": 123}, "body": "abc123"}"#,
        );
        assert_eq!(
            request.to_string(),
            r#"{"method":"POST","headers":{"Content-Type":"text/plain","Content-Length":123},"body":"abc123"}"#
        );
    }
}
