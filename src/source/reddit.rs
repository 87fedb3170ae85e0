//! Reddit `/new` listing source.
//!
//! Requests `GET {base}/r/{subreddit}/new/.json?count=100` and reads the
//! first page only.  The response looks like:
//!
//! ```text
//! { "data": { "children": [ { "data": { "id", "title", "url", ... } }, ... ] } }
//! ```
//!
//! Children are returned in listing order (newest first); nothing is
//! re-sorted.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{DataSource, Post};
use crate::error::{Error, Result};

/// How many posts the listing is asked for.  There is no pagination.
const PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

/// Polls one subreddit's newest posts.
pub struct RedditSource {
    client: Client,
    url: String,
    label: String,
}

impl RedditSource {
    /// Create a source for `subreddit` on the host at `base_url`
    /// (e.g. `https://www.reddit.com`).
    ///
    /// The client is shared with the webhook notifier so both use the same
    /// connection pool and `User-Agent`.
    pub fn new(client: Client, base_url: &str, subreddit: &str) -> Self {
        Self {
            client,
            url: listing_url(base_url, subreddit),
            label: format!("r/{subreddit}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse a listing body into posts.
    ///
    /// This is a pure function (no I/O) so tests can exercise the parsing
    /// without a server.
    pub fn parse_listing(body: &str) -> Result<Vec<Post>> {
        let listing: Listing = serde_json::from_str(body)?;
        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .collect())
    }
}

fn listing_url(base_url: &str, subreddit: &str) -> String {
    format!(
        "{}/r/{subreddit}/new/.json?count={PAGE_SIZE}",
        base_url.trim_end_matches('/')
    )
}

#[async_trait]
impl DataSource for RedditSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<Vec<Post>> {
        let fetch_failed = |source: reqwest::Error| Error::Fetch {
            url: self.url.clone(),
            source,
        };

        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(fetch_failed)?
            .text()
            .await
            .map_err(fetch_failed)?;

        Self::parse_listing(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
