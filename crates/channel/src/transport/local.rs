//! An in-process message channel.
//!
//! [`LocalChannel`] behaves like a browser window: messages posted to it are queued and
//! later delivered to every listener by [`LocalChannel::run_pending`], which plays the
//! part of the event loop. A message the channel posts to itself (for example a
//! response sent back to the window that sent the request) is queued like any other,
//! so listeners also see their own echoes.

use crate::transport::{Channel, Listener, ListenerId, MessageEvent, ReplyTarget};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

pub struct LocalChannel {
    origin: String,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<MessageEvent>>,
    this: Weak<LocalChannel>,
}

impl LocalChannel {
    /// Creates a channel whose own messages are stamped with `origin`.
    pub fn new(origin: impl Into<String>) -> Rc<Self> {
        let origin = origin.into();
        Rc::new_cyclic(|this| Self {
            origin,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            pending: RefCell::new(VecDeque::new()),
            this: this.clone(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Queues a message sent by `source` from `origin`.
    pub fn post_from(&self, data: impl Into<String>, origin: impl Into<String>, source: Rc<dyn ReplyTarget>) {
        self.pending.borrow_mut().push_back(MessageEvent::new(data, origin, source));
    }

    /// Delivers queued messages, including those queued while delivering, until the
    /// queue is empty. Returns how many messages were delivered.
    pub fn run_pending(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(event) = next else {
                return delivered;
            };
            self.dispatch(&event);
            delivered += 1;
        }
    }

    /// Delivers `event` to every listener now, in registration order.
    pub fn dispatch(&self, event: &MessageEvent) {
        // listeners may add or remove listeners while handling the event
        let listeners = self.listeners.borrow().iter().map(|(_, listener)| Rc::clone(listener)).collect::<Vec<_>>();
        trace!(listeners = listeners.len(), origin = event.origin(), "dispatch message");
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Channel for LocalChannel {
    fn add_listener(&self, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(id.value() + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }
}

/// Posting to the channel itself, as a window posting to itself.
///
/// The message is dropped when `target_origin` is neither `*` nor this channel's origin.
impl ReplyTarget for LocalChannel {
    fn post_message(&self, message: String, target_origin: &str) {
        if target_origin != "*" && target_origin != self.origin {
            trace!(target_origin, origin = %self.origin, "target origin mismatch, message dropped");
            return;
        }

        let Some(this) = self.this.upgrade() else {
            return;
        };
        self.post_from(message, self.origin.clone(), this);
    }
}

impl fmt::Debug for LocalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalChannel")
            .field("origin", &self.origin)
            .field("listeners", &self.listener_count())
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Listener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let listener_seen = Rc::clone(&seen);
        let listener: Listener = Rc::new(move |event: &MessageEvent| {
            listener_seen.borrow_mut().push(event.data().to_string());
        });
        (seen, listener)
    }

    #[test]
    fn delivers_posted_messages_in_order() {
        let channel = LocalChannel::new("https://example.com");
        let (seen, listener) = recorder();
        channel.add_listener(listener);

        channel.post_message("a".to_string(), "*");
        channel.post_message("b".to_string(), "https://example.com");
        assert_eq!(channel.pending_count(), 2);

        assert_eq!(channel.run_pending(), 2);
        assert_eq!(*seen.borrow(), vec!["a", "b"]);
        assert_eq!(channel.pending_count(), 0);
    }

    #[test]
    fn target_origin_mismatch_drops_message() {
        let channel = LocalChannel::new("https://example.com");
        channel.post_message("a".to_string(), "https://other.com");
        assert_eq!(channel.pending_count(), 0);
    }

    #[test]
    fn removed_listener_sees_nothing() {
        let channel = LocalChannel::new("https://example.com");
        let (seen, listener) = recorder();
        let id = channel.add_listener(listener);
        let (other_seen, other) = recorder();
        channel.add_listener(other);

        channel.remove_listener(id);
        assert_eq!(channel.listener_count(), 1);

        channel.post_message("a".to_string(), "*");
        channel.run_pending();
        assert!(seen.borrow().is_empty());
        assert_eq!(*other_seen.borrow(), vec!["a"]);
    }

    #[test]
    fn messages_posted_while_dispatching_are_delivered() {
        let channel = LocalChannel::new("https://example.com");
        let echo_channel = Rc::downgrade(&channel);
        let listener: Listener = Rc::new(move |event: &MessageEvent| {
            if event.data() == "ping" {
                if let Some(channel) = echo_channel.upgrade() {
                    channel.post_message("pong".to_string(), "*");
                }
            }
        });
        channel.add_listener(listener);
        let (seen, recorder) = recorder();
        channel.add_listener(recorder);

        channel.post_message("ping".to_string(), "*");
        assert_eq!(channel.run_pending(), 2);
        assert_eq!(*seen.borrow(), vec!["ping", "pong"]);
    }

    #[test]
    fn self_posted_event_carries_own_origin_and_source() {
        let channel = LocalChannel::new("https://example.com");
        let origins = Rc::new(RefCell::new(Vec::new()));
        let listener_origins = Rc::clone(&origins);
        channel.add_listener(Rc::new(move |event: &MessageEvent| {
            listener_origins.borrow_mut().push(event.origin().to_string());
            event.source().post_message(format!("re:{}", event.data()), "https://nowhere.com");
        }));

        channel.post_message("a".to_string(), "*");
        assert_eq!(channel.run_pending(), 1);
        assert_eq!(*origins.borrow(), vec!["https://example.com"]);
    }
}
