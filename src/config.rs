//! Configuration for building a chat from raw records.
//!
//! # Example
//!
//! ```rust
//! use chatlog::config::IngestConfig;
//!
//! let config = IngestConfig::new()
//!     .with_merge_duplicates(true)
//!     .with_skip_empty(true);
//! ```

use serde::{Deserialize, Serialize};

/// Options for [`ChatBuilder`](crate::ingest::ChatBuilder).
///
/// Exports split long conversations into several chunks, each listing the
/// same participants. With `merge_duplicates` those chunks end up as one
/// thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Fold records with an already seen participant label into that thread (default: true)
    pub merge_duplicates: bool,

    /// Renumber a thread after folding a record into it (default: true)
    pub renumber_merged: bool,

    /// Drop messages whose text is empty or whitespace-only (default: false)
    pub skip_empty: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            merge_duplicates: true,
            renumber_merged: true,
            skip_empty: false,
        }
    }
}

impl IngestConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps every record as its own thread, numbered independently.
    pub fn verbatim() -> Self {
        Self {
            merge_duplicates: false,
            renumber_merged: false,
            ..Self::default()
        }
    }

    /// Sets whether duplicate threads are merged.
    #[must_use]
    pub fn with_merge_duplicates(mut self, merge: bool) -> Self {
        self.merge_duplicates = merge;
        self
    }

    /// Sets whether merged threads are renumbered.
    #[must_use]
    pub fn with_renumber_merged(mut self, renumber: bool) -> Self {
        self.renumber_merged = renumber;
        self
    }

    /// Sets whether empty messages are dropped.
    #[must_use]
    pub fn with_skip_empty(mut self, skip: bool) -> Self {
        self.skip_empty = skip;
        self
    }
}
