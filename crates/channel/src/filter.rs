//! Message filters decide which inbound messages are requests.
//!
//! A channel delivers every message to the server, including messages that are
//! not requests: replies the server posted to its own window, messages from
//! foreign origins, and so on. A [`MessageFilter`] is consulted once per message,
//! in arrival order, and only accepted messages are decoded and handled.
//!
//! Filters may keep private state, [`first_message_only`] counts the messages it
//! has seen so the echo of a reply is ignored.
//!
//! # Examples
//!
//! ```
//! use micro_channel::filter::{all_filter, first_message_only, origin_filter};
//!
//! // accept the first message, and only when it comes from our own origin
//! let mut filter = all_filter();
//! filter.and(origin_filter("https://example.com")).and(first_message_only());
//! ```

use crate::transport::MessageEvent;

/// Core trait for message filtering.
pub trait MessageFilter {
    /// Returns `true` if the message should be handled as a request, `false` to ignore it.
    fn accept(&mut self, event: &MessageEvent) -> bool;
}

impl<F> MessageFilter for F
where
    F: FnMut(&MessageEvent) -> bool,
{
    fn accept(&mut self, event: &MessageEvent) -> bool {
        self(event)
    }
}

/// Creates a new filter from a closure.
pub fn fn_filter<F>(f: F) -> impl MessageFilter
where
    F: FnMut(&MessageEvent) -> bool,
{
    f
}

/// Creates a filter that accepts every message.
pub fn accept_all() -> AcceptAll {
    AcceptAll
}

/// Creates a filter that ignores every message.
pub fn reject_all() -> RejectAll {
    RejectAll
}

/// A filter that always returns true.
#[derive(Debug, Copy, Clone)]
pub struct AcceptAll;
impl MessageFilter for AcceptAll {
    #[inline]
    fn accept(&mut self, _event: &MessageEvent) -> bool {
        true
    }
}

/// A filter that always returns false.
#[derive(Debug, Copy, Clone)]
pub struct RejectAll;
impl MessageFilter for RejectAll {
    #[inline]
    fn accept(&mut self, _event: &MessageEvent) -> bool {
        false
    }
}

/// Creates a filter that accepts the first message it sees and ignores the rest.
pub fn first_message_only() -> FirstMessageOnly {
    FirstMessageOnly { seen: 0 }
}

/// Accepts only the first message.
///
/// A server posting its reply to the window the request came from receives that reply
/// as the next message, this filter keeps it from being handled as another request.
#[derive(Debug, Clone)]
pub struct FirstMessageOnly {
    seen: u64,
}

impl FirstMessageOnly {
    /// Number of messages tested so far.
    pub fn seen(&self) -> u64 {
        self.seen
    }
}

impl MessageFilter for FirstMessageOnly {
    fn accept(&mut self, _event: &MessageEvent) -> bool {
        self.seen += 1;
        self.seen == 1
    }
}

/// Creates a filter that accepts messages whose origin equals `origin`.
pub fn origin_filter(origin: impl Into<String>) -> OriginFilter {
    OriginFilter { origin: origin.into() }
}

/// A filter that matches the sender's origin exactly.
#[derive(Debug, Clone)]
pub struct OriginFilter {
    origin: String,
}

impl MessageFilter for OriginFilter {
    fn accept(&mut self, event: &MessageEvent) -> bool {
        event.origin() == self.origin
    }
}

/// Creates a new OR-composed filter chain.
pub fn any_filter() -> AnyFilter {
    AnyFilter::new()
}

/// Compose filters with OR logic.
///
/// Filters are tested in order and testing stops at the first that accepts, later
/// filters do not see the message. An empty filter chain returns true by default.
pub struct AnyFilter {
    filters: Vec<Box<dyn MessageFilter>>,
}

impl AnyFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a new filter to the OR chain.
    pub fn or<F: MessageFilter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl MessageFilter for AnyFilter {
    fn accept(&mut self, event: &MessageEvent) -> bool {
        if self.filters.is_empty() {
            return true;
        }

        self.filters.iter_mut().any(|filter| filter.accept(event))
    }
}

/// Creates a new AND-composed filter chain.
pub fn all_filter() -> AllFilter {
    AllFilter::new()
}

/// Compose filters with AND logic.
///
/// Filters are tested in order and testing stops at the first that rejects, so a
/// stateful filter placed last only counts messages the earlier filters accepted.
/// An empty filter chain returns true by default.
pub struct AllFilter {
    filters: Vec<Box<dyn MessageFilter>>,
}

impl AllFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a new filter to the AND chain.
    pub fn and<F: MessageFilter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl MessageFilter for AllFilter {
    fn accept(&mut self, event: &MessageEvent) -> bool {
        self.filters.iter_mut().all(|filter| filter.accept(event))
    }
}

impl std::fmt::Debug for AnyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyFilter").field("filters", &self.filters.len()).finish()
    }
}

impl std::fmt::Debug for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllFilter").field("filters", &self.filters.len()).finish()
    }
}
