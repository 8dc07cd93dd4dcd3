//! Header names and typed header values.
//!
//! JSON messages carry at most one value per header, either as a JSON string or
//! a JSON number. Each [`HeaderName`] knows its canonical spelling (used when
//! writing a response) and how to parse its value text into a [`HeaderValue`].
//!
//! Names are resolved against a small registry of well-known headers; any
//! other valid token is accepted and keeps the spelling it was given.

use crate::protocol::ParseError;
use mime::Mime;
use std::borrow::Cow;
use std::fmt;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// How the value text of a header is parsed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// A non negative integer, e.g. `Content-Length`.
    Number,
    /// A media type, e.g. `Content-Type`.
    MediaType,
    /// Anything else is kept as text.
    Text,
}

/// A case-insensitive header name that remembers its canonical spelling.
#[derive(Debug, Clone)]
pub struct HeaderName {
    name: Cow<'static, str>,
    kind: ValueKind,
}

macro_rules! known_headers {
    ($(($konst:ident, $name:literal, $kind:ident),)+) => {
        $(
            #[doc = concat!("The `", $name, "` header.")]
            pub const $konst: HeaderName = HeaderName::from_static($name, ValueKind::$kind);
        )+

        static KNOWN_HEADERS: &[HeaderName] = &[$($konst),+];
    };
}

known_headers! {
    (ACCEPT, "Accept", Text),
    (ACCEPT_CHARSET, "Accept-Charset", Text),
    (ACCEPT_ENCODING, "Accept-Encoding", Text),
    (ACCEPT_LANGUAGE, "Accept-Language", Text),
    (AGE, "Age", Number),
    (AUTHORIZATION, "Authorization", Text),
    (CACHE_CONTROL, "Cache-Control", Text),
    (CONNECTION, "Connection", Text),
    (CONTENT_ENCODING, "Content-Encoding", Text),
    (CONTENT_LANGUAGE, "Content-Language", Text),
    (CONTENT_LENGTH, "Content-Length", Number),
    (CONTENT_TYPE, "Content-Type", MediaType),
    (COOKIE, "Cookie", Text),
    (DATE, "Date", Text),
    (ETAG, "ETag", Text),
    (HOST, "Host", Text),
    (LAST_MODIFIED, "Last-Modified", Text),
    (LOCATION, "Location", Text),
    (MAX_FORWARDS, "Max-Forwards", Number),
    (ORIGIN, "Origin", Text),
    (REFERER, "Referer", Text),
    (SERVER, "Server", Text),
    (SET_COOKIE, "Set-Cookie", Text),
    (USER_AGENT, "User-Agent", Text),
}

impl HeaderName {
    const fn from_static(name: &'static str, kind: ValueKind) -> Self {
        Self { name: Cow::Borrowed(name), kind }
    }

    /// Resolves `name` against the registry of well-known headers.
    ///
    /// Unknown names are accepted when they are valid header tokens and are
    /// parsed as text.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        if let Some(known) = Self::lookup(name) {
            return Ok(known);
        }

        http::HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ParseError::invalid_header(format!("invalid header name {name:?}: {e}")))?;

        Ok(Self { name: Cow::Owned(name.to_string()), kind: ValueKind::Text })
    }

    fn lookup(name: &str) -> Option<Self> {
        KNOWN_HEADERS.iter().find(|known| known.name.eq_ignore_ascii_case(name)).cloned()
    }

    /// The canonical spelling, e.g. `Content-Length`.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Case-insensitive comparison against a raw name.
    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Parses the text of a header value into its typed form.
    pub fn parse_value(&self, text: &str) -> Result<HeaderValue, ParseError> {
        match self.kind {
            ValueKind::Number => text.trim().parse::<u64>().map(HeaderValue::Number).map_err(|e| {
                ParseError::invalid_header(format!("{}: {text:?} is not a number, {e}", self.name))
            }),
            ValueKind::MediaType => text.trim().parse::<Mime>().map(HeaderValue::MediaType).map_err(|e| {
                ParseError::invalid_header(format!("{}: {text:?} is not a media type, {e}", self.name))
            }),
            ValueKind::Text => Ok(HeaderValue::Text(text.to_string())),
        }
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.name)
    }
}

impl Eq for HeaderName {}

impl Hash for HeaderName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.name.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Names from the `http` crate are always valid, only the canonical spelling is looked up.
impl From<&http::HeaderName> for HeaderName {
    fn from(name: &http::HeaderName) -> Self {
        Self::lookup(name.as_str())
            .unwrap_or_else(|| Self { name: Cow::Owned(name.as_str().to_string()), kind: ValueKind::Text })
    }
}

impl From<http::HeaderName> for HeaderName {
    fn from(name: http::HeaderName) -> Self {
        Self::from(&name)
    }
}

/// A parsed header value.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Number(u64),
    MediaType(Mime),
    Text(String),
}

impl HeaderValue {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            HeaderValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_media_type(&self) -> Option<&Mime> {
        match self {
            HeaderValue::MediaType(mime) => Some(mime),
            _ => None,
        }
    }

    /// The text form of this value, as it would appear in an HTTP header line.
    pub fn header_text(&self) -> String {
        match self {
            HeaderValue::Number(n) => n.to_string(),
            HeaderValue::MediaType(mime) => mime.to_string(),
            HeaderValue::Text(text) => text.clone(),
        }
    }

    /// Numbers are written as JSON numbers, everything else as JSON strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            HeaderValue::Number(n) => serde_json::Value::from(*n),
            other => serde_json::Value::String(other.header_text()),
        }
    }
}

impl Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Number(n) => write!(f, "{n}"),
            HeaderValue::MediaType(mime) => write!(f, "{mime}"),
            HeaderValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for HeaderValue {
    fn from(n: u64) -> Self {
        HeaderValue::Number(n)
    }
}

impl From<Mime> for HeaderValue {
    fn from(mime: Mime) -> Self {
        HeaderValue::MediaType(mime)
    }
}

impl From<&str> for HeaderValue {
    fn from(text: &str) -> Self {
        HeaderValue::Text(text.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(text: String) -> Self {
        HeaderValue::Text(text)
    }
}
