//! Replies delivered into a tokio channel.
//!
//! Sending on an unbounded channel never waits, which matches the fire-and-forget
//! contract of [`ReplyTarget::post_message`]. The target origin is not checked, the
//! receiver is whoever holds the other end.

use crate::transport::ReplyTarget;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

impl ReplyTarget for UnboundedSender<String> {
    fn post_message(&self, message: String, _target_origin: &str) {
        if let Err(e) = self.send(message) {
            warn!(cause = %e, "reply receiver dropped, message discarded");
        }
    }
}
