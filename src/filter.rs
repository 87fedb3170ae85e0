//! Title matching.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Case-insensitive regular expression applied to post titles.
#[derive(Debug, Clone)]
pub struct TitleFilter {
    regex: Regex,
}

impl TitleFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { regex })
    }

    /// True if the pattern matches anywhere in `title`.
    pub fn matches(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}
