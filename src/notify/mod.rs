//! Notification sinks.
//!
//! A [`Notifier`] is told about one matching post at a time.  The only
//! implementation is [`WebhookNotifier`], which POSTs a small JSON payload.

mod webhook;

pub use webhook::WebhookNotifier;

use async_trait::async_trait;

use crate::error::Result;
use crate::source::Post;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification for `post`.
    ///
    /// An `Err` means delivery did not happen.  The polling cycle stops at the
    /// first failure and does not record the post as notified.
    async fn notify(&self, post: &Post) -> Result<()>;
}
