use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },

    #[error("handler error: {source}")]
    HandlerError { source: Box<dyn Error + Send + Sync> },
}

impl HttpError {
    /// Converts an error returned by a handler.
    ///
    /// An [`HttpError`], [`ParseError`] or [`SendError`] keeps its own variant, so a
    /// handler propagating a request accessor failure with `?` still yields
    /// [`HttpError::RequestError`]. Anything else becomes [`HttpError::HandlerError`].
    pub fn handler<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        let source = match e.into().downcast::<HttpError>() {
            Ok(e) => return *e,
            Err(source) => source,
        };
        let source = match source.downcast::<ParseError>() {
            Ok(e) => return Self::from(*e),
            Err(source) => source,
        };
        match source.downcast::<SendError>() {
            Ok(e) => Self::from(*e),
            Err(source) => Self::HandlerError { source },
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed json: {source}")]
    MalformedJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("expected a json object but found {found}")]
    NotAnObject { found: &'static str },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid field {field}: expected {expected}")]
    InvalidField { field: &'static str, expected: &'static str },

    #[error("malformed url {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("invalid http method: {method:?}")]
    InvalidMethod { method: String },

    #[error("invalid http version: {version:?}")]
    InvalidVersion { version: String },

    #[error("invalid http status code: {code}")]
    InvalidStatus { code: u64 },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("unsupported charset: {charset:?}")]
    UnsupportedCharset { charset: String },

    #[error("unsupported operation: {operation}")]
    Unsupported { operation: &'static str },
}

impl ParseError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid_field(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidField { field, expected }
    }

    pub fn malformed_url<S: ToString, R: ToString>(url: S, reason: R) -> Self {
        Self::MalformedUrl { url: url.to_string(), reason: reason.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("only one entity is supported per response")]
    EntityAlreadySet,

    #[error("header {name} contains {count} values, only 1 supported")]
    MultiValueHeaderUnsupported { name: String, count: usize },

    #[error("invalid value for header {name}: {reason}")]
    InvalidHeaderValue { name: String, reason: String },

    #[error("serialize response error: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

impl SendError {
    pub fn multi_value_header<S: ToString>(name: S, count: usize) -> Self {
        Self::MultiValueHeaderUnsupported { name: name.to_string(), count }
    }

    pub fn invalid_header_value<S: ToString, R: ToString>(name: S, reason: R) -> Self {
        Self::InvalidHeaderValue { name: name.to_string(), reason: reason.to_string() }
    }
}

/// Lifecycle misuse of a [`ChannelServer`](crate::server::ChannelServer).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerError {
    #[error("server already running")]
    AlreadyRunning,

    #[error("server not running")]
    NotRunning,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn handler_keeps_http_error() {
        let e = HttpError::handler(HttpError::from(ParseError::missing_field("url")));
        assert!(matches!(e, HttpError::RequestError { source: ParseError::MissingField { field: "url" } }));
    }

    #[test]
    fn handler_maps_parse_and_send_errors() {
        let e = HttpError::handler(ParseError::unsupported("binary request body"));
        assert!(matches!(e, HttpError::RequestError { source: ParseError::Unsupported { .. } }));

        let e = HttpError::handler(SendError::EntityAlreadySet);
        assert!(matches!(e, HttpError::ResponseError { source: SendError::EntityAlreadySet }));
    }

    #[test]
    fn handler_wraps_other_errors() {
        let e = HttpError::handler(io::Error::other("disk full"));
        let HttpError::HandlerError { source } = e else {
            panic!("expected a handler error");
        };
        assert_eq!(source.to_string(), "disk full");
    }
}
