//! Building a [`Chat`] from already parsed records.
//!
//! Markup parsing happens elsewhere; this module takes its output, one
//! [`ThreadRecord`] per thread block in the export, and turns it into the
//! query model:
//!
//! 1. messages of each record are numbered 1, 2, 3, … in record order and
//!    stamped with the record's participant label;
//! 2. a record whose label was already seen is merged into the earlier
//!    thread (exports split long conversations into chunks), which is then
//!    renumbered;
//! 3. the resulting threads go to [`Chat::new`].
//!
//! Step 2 is controlled by [`IngestConfig`].
//!
//! # Example
//!
//! ```
//! use chatlog::ingest::{ChatBuilder, RawMessage, ThreadRecord};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let chunk = |text: &str| ThreadRecord {
//!     participants: vec!["Me".into(), "Alice".into()],
//!     messages: vec![RawMessage { author: "Alice".into(), timestamp: ts, text: text.into() }],
//! };
//!
//! let mut builder = ChatBuilder::new("Me");
//! builder.add_thread(chunk("part one"));
//! builder.add_thread(chunk("part two"));
//! let chat = builder.build();
//!
//! assert_eq!(chat.len(), 1);
//! assert_eq!(chat.total_messages(), 2);
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::chat::Chat;
use crate::config::IngestConfig;
use crate::message::Message;
use crate::thread::Thread;

/// One message as produced by the export parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Display name of the sender.
    pub author: String,

    /// Send time as it appears in the export.
    pub timestamp: NaiveDateTime,

    /// Message body, export escaping intact.
    pub text: String,
}

/// One thread block as produced by the export parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRecord {
    /// Participants in export order, owner included.
    pub participants: Vec<String>,

    /// Messages in export order.
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

impl ThreadRecord {
    /// The label the resulting thread will carry.
    pub fn label(&self) -> String {
        self.participants.join(", ")
    }
}

/// A full parsed export: the account holder plus every thread block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExport {
    /// Name of the account holder.
    pub owner: String,

    /// Thread blocks in export order, duplicates included.
    #[serde(default)]
    pub threads: Vec<ThreadRecord>,
}

impl ChatExport {
    /// Reads an export from JSON.
    ///
    /// ```
    /// use chatlog::ingest::ChatExport;
    /// use chatlog::config::IngestConfig;
    ///
    /// # fn main() -> chatlog::Result<()> {
    /// let json = r#"{
    ///     "owner": "Me",
    ///     "threads": [{
    ///         "participants": ["Me", "Alice"],
    ///         "messages": [
    ///             {"author": "Alice", "timestamp": "2015-03-01T12:00:00", "text": "Hi"}
    ///         ]
    ///     }]
    /// }"#;
    ///
    /// let chat = ChatExport::from_json(json)?.into_chat(&IngestConfig::default());
    /// assert_eq!(chat.thread_by_label("Me, Alice")?.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the chat with the given options.
    pub fn into_chat(self, config: &IngestConfig) -> Chat {
        let mut builder = ChatBuilder::new(self.owner).with_config(config.clone());
        builder.extend(self.threads);
        builder.build()
    }
}

/// Accumulates thread records and produces a [`Chat`].
#[derive(Debug, Clone)]
pub struct ChatBuilder {
    owner: String,
    config: IngestConfig,
    threads: Vec<Thread>,
    by_label: HashMap<String, usize>,
}

impl ChatBuilder {
    /// Creates a builder with default options.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            config: IngestConfig::default(),
            threads: Vec::new(),
            by_label: HashMap::new(),
        }
    }

    /// Replaces the ingest options.
    #[must_use]
    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of threads collected so far.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Adds one record, merging it into an earlier thread when configured.
    pub fn add_thread(&mut self, record: ThreadRecord) -> &mut Self {
        let label = record.label();
        let messages = self.number(&label, record.messages);

        let existing = self
            .by_label
            .get(&label)
            .copied()
            .filter(|_| self.config.merge_duplicates);

        match existing {
            Some(position) => {
                debug!("Folding duplicate thread '{}' into earlier chunk", label);
                let thread = &mut self.threads[position];
                thread.merge(messages);
                if self.config.renumber_merged {
                    thread.renumber();
                }
            }
            None => {
                self.by_label.insert(label, self.threads.len());
                self.threads.push(Thread::new(record.participants, messages));
            }
        }
        self
    }

    /// Numbers a record's messages 1, 2, 3, … and stamps the thread label.
    fn number(&self, label: &str, raw: Vec<RawMessage>) -> Vec<Message> {
        let skip_empty = self.config.skip_empty;
        raw.into_iter()
            .filter(|m| !skip_empty || !m.text.trim().is_empty())
            .zip(1..)
            .map(|(m, sequence_number)| Message {
                thread_label: label.to_string(),
                author: m.author,
                timestamp: m.timestamp,
                text: m.text,
                sequence_number,
            })
            .collect()
    }

    /// Finishes the chat.
    pub fn build(self) -> Chat {
        Chat::new(self.owner, self.threads)
    }
}

impl Extend<ThreadRecord> for ChatBuilder {
    fn extend<I: IntoIterator<Item = ThreadRecord>>(&mut self, records: I) {
        for record in records {
            self.add_thread(record);
        }
    }
}
