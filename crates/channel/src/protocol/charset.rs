//! Character sets used to measure request bodies.
//!
//! Bodies travel as JSON strings, so the byte length of a body is not observable
//! on the wire. It is computed instead by encoding the body text with the charset
//! declared by the `Content-Type` header, or the decoder's default charset.

use std::fmt;
use std::fmt::Display;

/// The charsets a body length can be computed for.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
    /// Big-endian with a leading byte order mark.
    Utf16,
    Utf16Be,
    Utf16Le,
    /// Big-endian without a byte order mark.
    Utf32,
    Utf32Be,
    Utf32Le,
    UsAscii,
    Iso8859_1,
    Windows1252,
}

impl Charset {
    /// Resolves a charset label such as `UTF-8`, `utf8` or `UTF16`.
    ///
    /// Matching ignores case, hyphens and underscores.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .trim_matches('"')
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>();

        match normalized.as_str() {
            "utf8" => Some(Charset::Utf8),
            "utf16" => Some(Charset::Utf16),
            "utf16be" => Some(Charset::Utf16Be),
            "utf16le" => Some(Charset::Utf16Le),
            "utf32" => Some(Charset::Utf32),
            "utf32be" => Some(Charset::Utf32Be),
            "utf32le" => Some(Charset::Utf32Le),
            "usascii" | "ascii" => Some(Charset::UsAscii),
            "iso88591" | "latin1" => Some(Charset::Iso8859_1),
            "windows1252" | "cp1252" => Some(Charset::Windows1252),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf32 => "UTF-32",
            Charset::Utf32Be => "UTF-32BE",
            Charset::Utf32Le => "UTF-32LE",
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Windows1252 => "windows-1252",
        }
    }

    /// Number of bytes `text` occupies once encoded with this charset.
    ///
    /// Single byte charsets replace unmappable characters, so every char counts once.
    pub fn encoded_len(&self, text: &str) -> u64 {
        let len = match self {
            Charset::Utf8 => text.len(),
            Charset::Utf16 if text.is_empty() => 0,
            Charset::Utf16 => 2 + text.encode_utf16().count() * 2,
            Charset::Utf16Be | Charset::Utf16Le => text.encode_utf16().count() * 2,
            Charset::Utf32 | Charset::Utf32Be | Charset::Utf32Le => text.chars().count() * 4,
            Charset::UsAscii | Charset::Iso8859_1 | Charset::Windows1252 => text.chars().count(),
        };
        len as u64
    }
}

impl Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
