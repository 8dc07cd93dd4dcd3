use crate::codec::{DecoderConfig, RequestDecoder, ResponseEncoder};
use crate::ensure;
use crate::filter::MessageFilter;
use crate::handler::Handler;
use crate::protocol::{HttpError, Request, Response, ServerError};
use crate::transport::{Channel, Listener, ListenerId, MessageEvent};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, error, info, trace};

type BoxHandler = Box<dyn Fn(&Request, &mut Response) -> Result<(), HttpError>>;

pub struct ServerBuilder {
    handler: Option<BoxHandler>,
    channel: Option<Rc<dyn Channel>>,
    message_filter: Option<Box<dyn MessageFilter>>,
    target_origin: Option<String>,
    decoder_config: DecoderConfig,
}

impl ServerBuilder {
    fn new() -> Self {
        Self {
            handler: None,
            channel: None,
            message_filter: None,
            target_origin: None,
            decoder_config: DecoderConfig::default(),
        }
    }

    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.handler = Some(Box::new(move |request: &Request, response: &mut Response| {
            handler.call(request, response).map_err(HttpError::handler)
        }));
        self
    }

    /// The channel the server listens on once started.
    pub fn channel(mut self, channel: Rc<dyn Channel>) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn message_filter(mut self, message_filter: impl MessageFilter + 'static) -> Self {
        self.message_filter = Some(Box::new(message_filter));
        self
    }

    /// The origin every reply is posted with, `*` to allow any receiver.
    pub fn target_origin(mut self, target_origin: impl Into<String>) -> Self {
        self.target_origin = Some(target_origin.into());
        self
    }

    pub fn decoder_config(mut self, decoder_config: DecoderConfig) -> Self {
        self.decoder_config = decoder_config;
        self
    }

    pub fn build(self) -> Result<ChannelServer, ServerBuildError> {
        let handler = self.handler.ok_or(ServerBuildError::MissingHandler)?;
        let channel = self.channel.ok_or(ServerBuildError::MissingChannel)?;
        let message_filter = self.message_filter.ok_or(ServerBuildError::MissingMessageFilter)?;
        let target_origin = self.target_origin.ok_or(ServerBuildError::MissingTargetOrigin)?;
        ensure!(!target_origin.is_empty(), ServerBuildError::EmptyTargetOrigin);

        let dispatcher = Dispatcher {
            handler,
            message_filter: RefCell::new(message_filter),
            decoder: RequestDecoder::with_config(self.decoder_config),
            encoder: ResponseEncoder::new(),
            target_origin,
        };

        Ok(ChannelServer { dispatcher: Rc::new(dispatcher), channel, listener_id: None })
    }
}

impl fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("handler", &self.handler.is_some())
            .field("channel", &self.channel.is_some())
            .field("message_filter", &self.message_filter.is_some())
            .field("target_origin", &self.target_origin)
            .field("decoder_config", &self.decoder_config)
            .finish()
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerBuildError {
    #[error("handler must be set")]
    MissingHandler,
    #[error("channel must be set")]
    MissingChannel,
    #[error("message filter must be set")]
    MissingMessageFilter,
    #[error("target origin must be set")]
    MissingTargetOrigin,
    #[error("target origin must not be empty")]
    EmptyTargetOrigin,
}

/// An HTTP server answering requests carried by channel messages.
///
/// Two states: stopped (initial) and running. [`start`](Self::start) adds one listener
/// to the channel and [`stop`](Self::stop) removes exactly that listener again.
///
/// For every message the channel delivers while running:
///
/// 1. the message filter decides whether the message is a request, ignored messages
///    get no reply
/// 2. the payload is decoded into a [`Request`]
/// 3. the handler fills in an empty [`Response`]
/// 4. the response is encoded and posted to the message's source with the configured
///    target origin
///
/// A failure in any step means no reply is posted for that message, the server keeps
/// running. Messages are handled one at a time in the order the channel delivers them,
/// a handler that never returns stalls every later message.
pub struct ChannelServer {
    dispatcher: Rc<Dispatcher>,
    channel: Rc<dyn Channel>,
    listener_id: Option<ListenerId>,
}

impl ChannelServer {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Starts the server by adding the message listener to the channel.
    pub fn start(&mut self) -> Result<(), ServerError> {
        ensure!(self.listener_id.is_none(), ServerError::AlreadyRunning);

        let dispatcher = Rc::clone(&self.dispatcher);
        let listener: Listener = Rc::new(move |event: &MessageEvent| {
            if let Err(e) = dispatcher.handle_message(event) {
                error!(cause = %e, origin = event.origin(), "failed to handle message, no reply posted");
            }
        });

        self.listener_id = Some(self.channel.add_listener(listener));
        info!(target_origin = %self.dispatcher.target_origin, "channel server started");
        Ok(())
    }

    /// Stops the server by removing the message listener from the channel.
    pub fn stop(&mut self) -> Result<(), ServerError> {
        let listener_id = self.listener_id.take().ok_or(ServerError::NotRunning)?;
        self.channel.remove_listener(listener_id);
        info!("channel server stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.listener_id.is_some()
    }

    /// Runs the message pipeline for `event`, whether or not the server is running.
    ///
    /// Returns the error of the first failing step, in which case nothing was posted.
    pub fn handle_message(&self, event: &MessageEvent) -> Result<(), HttpError> {
        self.dispatcher.handle_message(event)
    }
}

impl Drop for ChannelServer {
    fn drop(&mut self) {
        if let Some(listener_id) = self.listener_id.take() {
            self.channel.remove_listener(listener_id);
            debug!("channel server dropped while running, listener removed");
        }
    }
}

impl fmt::Debug for ChannelServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelServer")
            .field("target_origin", &self.dispatcher.target_origin)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

/// The part of the server shared with the channel listener.
struct Dispatcher {
    handler: BoxHandler,
    message_filter: RefCell<Box<dyn MessageFilter>>,
    decoder: RequestDecoder,
    encoder: ResponseEncoder,
    target_origin: String,
}

impl Dispatcher {
    fn handle_message(&self, event: &MessageEvent) -> Result<(), HttpError> {
        if !self.message_filter.borrow_mut().accept(event) {
            trace!(origin = event.origin(), "message ignored by filter");
            return Ok(());
        }

        // inputs
        let request = self.decoder.decode(event.data())?;
        let mut response = Response::empty();

        // process
        (self.handler)(&request, &mut response)?;

        // outputs
        let text = self.encoder.encode(&response)?;
        debug!(origin = event.origin(), reply_len = text.len(), "posting reply");
        event.source().post_message(text, &self.target_origin);
        Ok(())
    }
}
