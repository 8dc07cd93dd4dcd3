//! The server side of a message channel.
//!
//! [`ChannelServer`] listens on a [`Channel`](crate::transport::Channel) and answers
//! every accepted message by posting the encoded response back to the message's source.

mod channel_server;

pub use channel_server::ChannelServer;
pub use channel_server::ServerBuildError;
pub use channel_server::ServerBuilder;
