//! HTTP values carried by JSON messages.
//!
//! - **Request** ([`request`]): [`Request`], an immutable view over the JSON object of
//!   an inbound message, reading `version`, `method`, `url`, `headers` and `body`
//! - **Headers** ([`header`], [`header_map`]): [`HeaderName`] with its canonical
//!   spelling and value parser, [`HeaderValue`], and the case-insensitive [`HeaderView`]
//! - **Response** ([`response`], [`entity`]): [`Response`], a builder accumulating the
//!   JSON object posted back, and the single [`Entity`] it can hold
//! - **Charsets** ([`charset`]): measuring body text in bytes
//! - **Errors** ([`error`]): [`ParseError`] for requests, [`SendError`] for responses,
//!   [`ServerError`] for lifecycle misuse and [`HttpError`] for the whole pipeline

pub mod charset;
pub mod entity;
pub mod header;
pub mod header_map;
pub mod request;
pub mod response;

mod version;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
pub use error::ServerError;

pub use charset::Charset;
pub use entity::Entity;
pub use header::{HeaderName, HeaderValue};
pub use header_map::HeaderView;
pub use request::{Request, Transport};
pub use response::{HttpStatus, Response};
