//! Conversion between `http::Version` and its wire token, e.g. `HTTP/1.1`.

use crate::protocol::ParseError;
use http::Version;

pub fn parse_version(text: &str) -> Result<Version, ParseError> {
    match text.trim() {
        "HTTP/0.9" => Ok(Version::HTTP_09),
        "HTTP/1.0" => Ok(Version::HTTP_10),
        "HTTP/1.1" => Ok(Version::HTTP_11),
        "HTTP/2" | "HTTP/2.0" => Ok(Version::HTTP_2),
        "HTTP/3" | "HTTP/3.0" => Ok(Version::HTTP_3),
        other => Err(ParseError::InvalidVersion { version: other.to_string() }),
    }
}

pub fn version_text(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        // Version is an opaque struct, HTTP/1.1 lands here
        _ => "HTTP/1.1",
    }
}
