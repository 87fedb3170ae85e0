//! A single post from the feed.
//!
//! Posts are rebuilt from the feed on every cycle.  Only the `id` outlives
//! the cycle, by being written to the history file once a notification for
//! it has been sent.

use serde::Deserialize;

/// A feed entry, reduced to the three fields the notifier cares about.
///
/// Deserializes straight from the `data` object of a Reddit listing child;
/// every other field in that object is ignored.  All three fields are
/// required, so a child missing any of them fails the whole parse.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Post {
    /// Base-36 post id, e.g. `1abc23`.  Used as the de-duplication key.
    pub id: String,

    /// Headline, matched against the title filter.
    pub title: String,

    /// Link target of the post.  For self posts this is the comments page.
    pub url: String,
}
