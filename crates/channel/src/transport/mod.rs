//! Message channel abstractions.
//!
//! A [`Channel`] delivers [`MessageEvent`]s to registered listeners, the way a browser
//! window, worker or `MessagePort` delivers `message` events. Each event carries its
//! text payload, the origin it came from and the [`ReplyTarget`] that sent it, which
//! is where the response is posted back.
//!
//! Everything here is single threaded: events are delivered one at a time on the
//! thread that owns the channel, so listeners and reply targets are `Rc` based.
//!
//! - [`local::LocalChannel`]: an in-process channel with a queue of posted messages
//! - [`mpsc`]: lets a tokio unbounded sender receive replies

pub mod local;
pub mod mpsc;

use std::fmt;
use std::rc::Rc;

/// Something a message can be posted to.
#[cfg_attr(test, mockall::automock)]
pub trait ReplyTarget {
    /// Posts `message` without waiting for it to be delivered.
    ///
    /// `target_origin` restricts who may receive it, `*` means anyone.
    fn post_message(&self, message: String, target_origin: &str);
}

/// An inbound message.
#[derive(Clone)]
pub struct MessageEvent {
    data: String,
    origin: String,
    source: Rc<dyn ReplyTarget>,
}

impl MessageEvent {
    pub fn new(data: impl Into<String>, origin: impl Into<String>, source: Rc<dyn ReplyTarget>) -> Self {
        Self { data: data.into(), origin: origin.into(), source }
    }

    /// The text payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The origin of the sender.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Where replies to this message go.
    pub fn source(&self) -> &Rc<dyn ReplyTarget> {
        &self.source
    }
}

impl fmt::Debug for MessageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageEvent").field("data", &self.data).field("origin", &self.origin).finish_non_exhaustive()
    }
}

/// Callback invoked for every message a channel delivers.
pub type Listener = Rc<dyn Fn(&MessageEvent)>;

/// Handle returned when a listener is added, used to remove exactly that listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A source of inbound messages.
pub trait Channel {
    fn add_listener(&self, listener: Listener) -> ListenerId;

    /// Removes the listener registered under `id`, unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
