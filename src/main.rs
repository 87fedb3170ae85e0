//! subreddit-notifier — watch a subreddit's newest posts and ping a webhook.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ Vec<Post> ┌──────────┐  &Post   ┌────────────┐
//! │ source/   │ ────────► │ poll.rs  │ ───────► │ notify/    │
//! │ (reddit)  │           │ (cycle)  │          │ (webhook)  │
//! └───────────┘           └──────────┘          └────────────┘
//!                           │      ▲
//!               save()      ▼      │ load()
//!                         ┌──────────┐
//!                         │history.rs│
//!                         └──────────┘
//! ```
//!
//! * **`source/`** — the `DataSource` trait, the `Post` type, and the Reddit
//!   listing implementation.
//! * **`notify/`** — the `Notifier` trait and the webhook implementation.
//! * **`history`** — the flat-file record of already-notified post ids.
//! * **`filter`** — case-insensitive title matching.
//! * **`poll`** — runs fetch → filter → notify → persist on a timer.
//! * **`config`** — reads settings from the environment.
//! * **`main`** — wires everything together, installs logging and signal
//!   handling, and turns any error into a non-zero exit.

mod config;
mod error;
mod filter;
mod history;
mod notify;
mod poll;
mod source;

use std::process::ExitCode;

use anyhow::Result;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use history::HistoryStore;
use notify::WebhookNotifier;
use poll::Poller;
use source::RedditSource;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Shutdown signals
// ---------------------------------------------------------------------------

/// Resolve once SIGINT or (on Unix) SIGTERM arrives.
///
/// If a handler cannot be installed, that signal is simply never observed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, shutting down after the current cycle"),
        _ = terminate => info!("SIGTERM received, shutting down after the current cycle"),
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting subreddit-notifier");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Unhandled error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // -- shutdown handling ---------------------------------------------------
    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        on_signal.cancel();
    });
    info!("Shutdown handler registered");

    // -- configuration -------------------------------------------------------
    info!("Loading configuration");
    let config = Config::from_env()?;
    info!(
        subreddit = %config.subreddit,
        pattern = %config.title_pattern,
        interval_secs = config.polling_interval.as_secs(),
        max_tracked = config.max_tracked,
        "Configuration loaded"
    );

    // -- wire up the cycle ---------------------------------------------------
    // One client for both directions: shared pool, one User-Agent.
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(error::Error::HttpClient)?;

    let source = RedditSource::new(client.clone(), &config.feed_base_url, &config.subreddit);
    info!(url = source.url(), "Polling feed");

    let store = HistoryStore::new(config.registry_path);
    info!(path = %store.path().display(), "Tracking notified posts");

    let poller = Poller::new(
        Box::new(source),
        Box::new(WebhookNotifier::new(client, config.webhook_url)),
        store,
        config.title_pattern,
        config.max_tracked,
        config.polling_interval,
    );

    poller.run(shutdown).await?;
    Ok(())
}
