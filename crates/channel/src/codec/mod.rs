//! JSON codec for HTTP messages carried over a channel
//!
//! - [`RequestDecoder`]: parses the text payload of an inbound message into a [`Request`](crate::protocol::Request)
//! - [`ResponseEncoder`]: serializes a [`Response`](crate::protocol::Response) into the text posted back
//!
//! # Example
//!
//! ```
//! use micro_channel::codec::{RequestDecoder, ResponseEncoder};
//! use micro_channel::protocol::Response;
//! use http::StatusCode;
//!
//! let decoder = RequestDecoder::new();
//! let request = decoder.decode(r#"{"version": "HTTP/1.1", "url": "/index.html"}"#).unwrap();
//! assert_eq!(request.url().unwrap().path(), "/index.html");
//!
//! let mut response = Response::empty();
//! response.set_status(StatusCode::OK, "OK");
//! let text = ResponseEncoder::new().encode(&response).unwrap();
//! assert_eq!(text, r#"{"status-code":200,"status-message":"OK"}"#);
//! ```

mod request_decoder;
mod response_encoder;

pub use request_decoder::DecoderConfig;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
