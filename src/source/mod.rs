//! Feed source abstraction.
//!
//! This module defines the [`DataSource`] trait and the [`Post`] type.  The
//! only concrete source is [`RedditSource`], which reads a subreddit's
//! `/new` listing.
//!
//! The polling cycle only ever talks to a `Box<dyn DataSource>`, so tests can
//! hand it a fixed list of posts instead of a live HTTP endpoint.

mod post;
mod reddit;

pub use post::Post;
pub use reddit::RedditSource;

use async_trait::async_trait;

use crate::error::Result;

/// Something that can produce the current snapshot of a feed.
///
/// ## Implementing a new source
///
/// ```ignore
/// pub struct MySource { /* config fields */ }
///
/// #[async_trait]
/// impl DataSource for MySource {
///     fn name(&self) -> &str { "my-source" }
///
///     async fn fetch(&self) -> Result<Vec<Post>> {
///         // Perform HTTP / IO, then convert into Post values.
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Fetch the latest batch of posts, in the order the feed returns them.
    ///
    /// Any transport or parse failure is returned as-is; callers do not
    /// retry.
    async fn fetch(&self) -> Result<Vec<Post>>;
}
