//! Webhook notifier.
//!
//! Sends `POST {url}` with a JSON body of `{"id", "url", "title"}`, which is
//! what a Home Assistant webhook trigger expects.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::Notifier;
use crate::error::{Error, Result};
use crate::source::Post;

/// Body sent for every matching post.
#[derive(Debug, Serialize)]
struct Payload<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
}

impl<'a> From<&'a Post> for Payload<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            id: &post.id,
            url: &post.url,
            title: &post.title,
        }
    }
}

pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    /// Only a transport failure is an error.  The response status and body
    /// are not inspected beyond a warning for non-2xx replies.
    async fn notify(&self, post: &Post) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&Payload::from(post))
            .send()
            .await
            .map_err(|source| Error::Notify {
                id: post.id.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(post_id = %post.id, %status, "webhook returned non-success status");
        }

        Ok(())
    }
}
