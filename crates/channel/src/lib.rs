//! HTTP over a message channel
//!
//! This crate answers HTTP requests that arrive as messages instead of over a socket.
//! Each inbound message carries a JSON encoded request, the request is handed to a
//! handler together with an empty response, and the encoded response is posted back
//! to the sender of the message.
//!
//! # Features
//!
//! - JSON wire format for requests and responses
//! - Lazy request view, fields are only validated when read
//! - Case-insensitive header lookup with typed header values
//! - Message filters to ignore echoes and foreign origins
//! - Start and stop lifecycle around a single channel listener
//! - In-process channel for tests and demos, tokio senders as reply targets
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use micro_channel::filter::first_message_only;
//! use micro_channel::handler::make_handler;
//! use micro_channel::protocol::{Entity, HttpError, Request, Response};
//! use micro_channel::server::ChannelServer;
//! use micro_channel::transport::local::LocalChannel;
//! use micro_channel::transport::ReplyTarget;
//!
//! let channel = LocalChannel::new("https://example.com");
//!
//! let handler = make_handler(|request: &Request, response: &mut Response| -> Result<(), HttpError> {
//!     response.set_status(StatusCode::OK, "OK");
//!     response.set_entity(Entity::empty().set_body_text(format!("echo {}", request.body_text()?)))?;
//!     Ok(())
//! });
//!
//! let mut server = ChannelServer::builder()
//!     .handler(handler)
//!     .channel(channel.clone())
//!     .message_filter(first_message_only())
//!     .target_origin("*")
//!     .build()
//!     .unwrap();
//! server.start().unwrap();
//!
//! // the window posts a request to itself, the reply comes back as a second message
//! channel.post_message(r#"{"version": "HTTP/1.1", "url": "/", "body": "hi"}"#.to_string(), "*");
//! assert_eq!(channel.run_pending(), 2);
//!
//! server.stop().unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`server`]: [`server::ChannelServer`] lifecycle and the per message pipeline
//! - [`filter`]: [`filter::MessageFilter`] and stock filters
//! - [`codec`]: JSON decoding of requests and encoding of responses
//! - [`protocol`]: request, response, header and error types
//! - [`handler`]: the [`handler::Handler`] trait and [`handler::make_handler`]
//! - [`transport`]: the [`transport::Channel`] and [`transport::ReplyTarget`] abstractions
//!
//! # Error Handling
//!
//! - [`protocol::HttpError`]: error of the whole message pipeline
//! - [`protocol::ParseError`]: malformed or missing request fields
//! - [`protocol::SendError`]: responses that cannot be encoded
//! - [`protocol::ServerError`]: starting a running server or stopping a stopped one
//!
//! A message whose pipeline fails gets no reply, the error is logged and the server
//! keeps serving later messages.
//!
//! # Limitations
//!
//! - Text bodies only, binary bodies are not supported
//! - One value per header
//! - No query or form parameter extraction
//! - Body lengths can be computed for UTF-8, UTF-16, UTF-32, US-ASCII, ISO-8859-1 and
//!   windows-1252 only, other `Content-Type` charsets fail with
//!   [`protocol::ParseError::UnsupportedCharset`]
//! - Single threaded, one message is handled at a time

pub mod codec;
pub mod filter;
pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;

mod utils;
pub(crate) use utils::ensure;
