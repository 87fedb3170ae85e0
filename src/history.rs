//! Persistent record of posts that have already been notified.
//!
//! The file is plain text, one post id per line, oldest first.  It is read in
//! full at the start of every cycle and rewritten in full at the end.  The
//! rewrite is not atomic: a crash mid-write can leave a truncated file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ordered list of notified post ids, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    ids: Vec<String>,
}

impl History {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|seen| seen == id)
    }

    /// Record a newly notified id at the end of the list.
    pub fn push(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }

    /// Drop the oldest entries until at most `max` remain.
    ///
    /// Relative order of the surviving entries is unchanged.
    pub fn truncate_front(&mut self, max: usize) {
        if self.ids.len() > max {
            let excess = self.ids.len() - max;
            self.ids.drain(..excess);
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

impl<S: Into<String>> FromIterator<S> for History {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// File-backed store for [`History`].
///
/// Assumes a single writer; there is no locking.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line of the file in order.
    ///
    /// A missing file is an error, not an empty history.
    pub fn load(&self) -> Result<History> {
        let text = fs::read_to_string(&self.path).map_err(|source| Error::HistoryLoad {
            path: self.path.clone(),
            source,
        })?;
        Ok(text.lines().collect())
    }

    /// Replace the file contents with `history`, one id per line.
    pub fn save(&self, history: &History) -> Result<()> {
        let ids = history.ids();
        let mut text = String::with_capacity(ids.iter().map(|id| id.len() + 1).sum());
        for id in ids {
            text.push_str(id);
            text.push('\n');
        }
        fs::write(&self.path, text).map_err(|source| Error::HistorySave {
            path: self.path.clone(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn history(ids: &[&str]) -> History {
        ids.iter().copied().collect()
    }

    // -- History -------------------------------------------------------------

    #[test]
    fn truncate_front_drops_oldest() {
        let mut h = history(&["a", "b", "c", "d"]);
        h.truncate_front(2);
        assert_eq!(h.ids(), ["c", "d"]);
    }

    #[test]
    fn truncate_front_below_capacity_is_noop() {
        let mut h = history(&["a", "b"]);
        h.truncate_front(5);
        assert_eq!(h.ids(), ["a", "b"]);
    }

    #[test]
    fn truncate_front_to_zero_empties() {
        let mut h = history(&["a", "b"]);
        h.truncate_front(0);
        assert!(h.ids().is_empty());
    }

    #[test]
    fn push_appends_in_order() {
        let mut h = history(&["a"]);
        h.push("b");
        h.push(String::from("c"));
        assert_eq!(h.ids(), ["a", "b", "c"]);
        assert!(h.contains("b"));
        assert!(!h.contains("z"));
    }

    // -- HistoryStore --------------------------------------------------------

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("absent.txt"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::HistoryLoad { .. }));
    }

    #[test]
    fn load_empty_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.txt");
        fs::write(&path, "").unwrap();

        let h = HistoryStore::new(&path).load().unwrap();
        assert!(h.ids().is_empty());
    }

    #[test]
    fn load_reads_lines_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.txt");
        fs::write(&path, "x1\ny2\nz3\n").unwrap();

        let h = HistoryStore::new(&path).load().unwrap();
        assert_eq!(h.ids(), ["x1", "y2", "z3"]);
    }

    #[test]
    fn load_accepts_crlf_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.txt");
        fs::write(&path, "a\r\nb\r\n").unwrap();

        let h = HistoryStore::new(&path).load().unwrap();
        assert_eq!(h.ids(), ["a", "b"]);
    }

    #[test]
    fn save_writes_one_id_per_line_and_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.txt");
        fs::write(&path, "old1\nold2\nold3\n").unwrap();

        let store = HistoryStore::new(&path);
        store.save(&history(&["b", "c"])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "b\nc\n");
        assert_eq!(store.load().unwrap().ids(), ["b", "c"]);
    }

    #[test]
    fn save_into_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("nope").join("seen.txt"));

        let err = store.save(&history(&["a"])).unwrap_err();
        assert!(matches!(err, Error::HistorySave { .. }));
    }
}
