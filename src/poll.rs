//! The polling loop.
//!
//! Each cycle runs fetch → filter → diff against history → notify → persist,
//! strictly in sequence.  Cycles never overlap: the next one starts only after
//! the previous one has finished and the poll interval has elapsed.
//!
//! ## Failure behaviour
//!
//! Any error ends the cycle and is returned from [`Poller::run`], which stops
//! the loop.  Nothing is retried.  When a webhook send fails part-way through
//! a batch, the ids that were already delivered are still persisted before
//! the error is returned, so they are not sent again after a restart.
//!
//! ## Shutdown
//!
//! The [`CancellationToken`] is checked before each cycle and raced against
//! the inter-cycle sleep.  A cycle that has started always runs to
//! completion.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::Result;
use crate::filter::TitleFilter;
use crate::history::HistoryStore;
use crate::notify::Notifier;
use crate::source::{DataSource, Post};

/// What one cycle did, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Posts returned by the feed.
    pub fetched: usize,
    /// Ids notified this cycle, in the order they were sent.
    pub notified: Vec<String>,
}

pub struct Poller {
    source: Box<dyn DataSource>,
    notifier: Box<dyn Notifier>,
    store: HistoryStore,
    title_pattern: String,
    max_tracked: usize,
    interval: Duration,
}

impl Poller {
    pub fn new(
        source: Box<dyn DataSource>,
        notifier: Box<dyn Notifier>,
        store: HistoryStore,
        title_pattern: impl Into<String>,
        max_tracked: usize,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            store,
            title_pattern: title_pattern.into(),
            max_tracked,
            interval,
        }
    }

    /// Run cycles until `shutdown` is cancelled or a cycle fails.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        while !shutdown.is_cancelled() {
            let report = self.run_cycle().await?;
            debug!(
                source = self.source.name(),
                fetched = report.fetched,
                notified = report.notified.len(),
                "cycle complete"
            );

            debug!("Sleeping for {} seconds", self.interval.as_secs());
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Finished");
        Ok(())
    }

    /// Perform a single fetch → filter → notify → persist cycle.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let posts = self.source.fetch().await?;
        let filter = TitleFilter::new(&self.title_pattern)?;
        let mut history = self.store.load()?;

        let candidates: Vec<&Post> = posts
            .iter()
            .filter(|post| !history.contains(&post.id) && filter.matches(&post.title))
            .collect();

        let mut notified = Vec::with_capacity(candidates.len());
        let mut outcome = Ok(());
        for post in candidates {
            info!("{} - {}", post.title, post.url);
            if let Err(e) = self.notifier.notify(post).await {
                outcome = Err(e);
                break;
            }
            history.push(post.id.clone());
            notified.push(post.id.clone());
        }

        history.truncate_front(self.max_tracked);
        self.store.save(&history)?;
        outcome?;

        Ok(CycleReport {
            fetched: posts.len(),
            notified,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
