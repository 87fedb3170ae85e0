//! Runtime configuration, resolved once at startup from the environment.
//!
//! | Variable             | Default                  |
//! |----------------------|--------------------------|
//! | `SUBREDDIT`          | required                 |
//! | `HA_WEBHOOK_URL`     | required                 |
//! | `REGEX`              | `.*`                     |
//! | `POLLING_FREQUENCY`  | `60` (seconds)           |
//! | `MAX_TRACKING_COUNT` | `200`                    |
//! | `REGISTRY_PATH`      | `notifiedPosts.txt`      |
//! | `FEED_BASE_URL`      | `https://www.reddit.com` |
//!
//! An empty value is treated the same as an unset one.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_PATTERN: &str = ".*";
const DEFAULT_POLLING_SECS: u64 = 60;
const DEFAULT_MAX_TRACKED: usize = 200;
const DEFAULT_REGISTRY_PATH: &str = "notifiedPosts.txt";
const DEFAULT_FEED_BASE_URL: &str = "https://www.reddit.com";

/// Immutable operating parameters for the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Subreddit name, without the `r/` prefix.
    pub subreddit: String,
    /// Where matching posts are POSTed.
    pub webhook_url: String,
    /// Case-insensitive regular expression applied to post titles.
    pub title_pattern: String,
    /// Delay between the end of one cycle and the start of the next.
    pub polling_interval: Duration,
    /// Maximum number of ids kept in the history file.
    pub max_tracked: usize,
    /// Location of the history file.
    pub registry_path: PathBuf,
    /// Scheme and host of the feed, e.g. `https://www.reddit.com`.
    pub feed_base_url: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead of
    /// mutating the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let subreddit = get("SUBREDDIT").ok_or(Error::MissingConfig("SUBREDDIT"))?;
        let webhook_url = get("HA_WEBHOOK_URL").ok_or(Error::MissingConfig("HA_WEBHOOK_URL"))?;

        let polling_secs = match get("POLLING_FREQUENCY") {
            Some(v) => parse_number("POLLING_FREQUENCY", v)?,
            None => DEFAULT_POLLING_SECS,
        };
        let max_tracked = match get("MAX_TRACKING_COUNT") {
            Some(v) => parse_number("MAX_TRACKING_COUNT", v)?,
            None => DEFAULT_MAX_TRACKED,
        };

        Ok(Self {
            subreddit,
            webhook_url,
            title_pattern: get("REGEX").unwrap_or_else(|| DEFAULT_PATTERN.into()),
            polling_interval: Duration::from_secs(polling_secs),
            max_tracked,
            registry_path: get("REGISTRY_PATH")
                .unwrap_or_else(|| DEFAULT_REGISTRY_PATH.into())
                .into(),
            feed_base_url: get("FEED_BASE_URL").unwrap_or_else(|| DEFAULT_FEED_BASE_URL.into()),
        })
    }
}

fn parse_number<T>(key: &'static str, value: String) -> Result<T>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|source| Error::InvalidConfig { key, value, source })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn required_only_uses_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("SUBREDDIT", "mechmarket"),
            ("HA_WEBHOOK_URL", "http://hass.local/api/webhook/abc"),
        ]))
        .unwrap();

        assert_eq!(cfg.subreddit, "mechmarket");
        assert_eq!(cfg.webhook_url, "http://hass.local/api/webhook/abc");
        assert_eq!(cfg.title_pattern, ".*");
        assert_eq!(cfg.polling_interval, Duration::from_secs(60));
        assert_eq!(cfg.max_tracked, 200);
        assert_eq!(cfg.registry_path, PathBuf::from("notifiedPosts.txt"));
        assert_eq!(cfg.feed_base_url, "https://www.reddit.com");
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = Config::from_lookup(lookup(&[
            ("SUBREDDIT", "hardwareswap"),
            ("HA_WEBHOOK_URL", "http://hook"),
            ("REGEX", r"^\[F4\]"),
            ("POLLING_FREQUENCY", "15"),
            ("MAX_TRACKING_COUNT", " 5 "),
            ("REGISTRY_PATH", "/data/seen.txt"),
            ("FEED_BASE_URL", "http://localhost:8080"),
        ]))
        .unwrap();

        assert_eq!(cfg.title_pattern, r"^\[F4\]");
        assert_eq!(cfg.polling_interval, Duration::from_secs(15));
        assert_eq!(cfg.max_tracked, 5);
        assert_eq!(cfg.registry_path, PathBuf::from("/data/seen.txt"));
        assert_eq!(cfg.feed_base_url, "http://localhost:8080");
    }

    #[test]
    fn missing_subreddit_is_rejected() {
        let err = Config::from_lookup(lookup(&[("HA_WEBHOOK_URL", "http://hook")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfig("SUBREDDIT")));
    }

    #[test]
    fn missing_webhook_is_rejected() {
        let err = Config::from_lookup(lookup(&[("SUBREDDIT", "rust")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfig("HA_WEBHOOK_URL")));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("SUBREDDIT", ""), ("HA_WEBHOOK_URL", "http://hook")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingConfig("SUBREDDIT")));
    }

    #[test]
    fn non_numeric_frequency_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("SUBREDDIT", "rust"),
            ("HA_WEBHOOK_URL", "http://hook"),
            ("POLLING_FREQUENCY", "soon"),
        ]))
        .unwrap_err();

        match err {
            Error::InvalidConfig { key, value, .. } => {
                assert_eq!(key, "POLLING_FREQUENCY");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_tracking_count_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("SUBREDDIT", "rust"),
            ("HA_WEBHOOK_URL", "http://hook"),
            ("MAX_TRACKING_COUNT", "-1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { key: "MAX_TRACKING_COUNT", .. }));
    }
}
