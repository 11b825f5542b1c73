//! # Chatlog
//!
//! A Rust library for querying exported chat histories.
//!
//! ## Overview
//!
//! Chatlog takes the output of an export parser (thread participants plus
//! author, timestamp and text of every message) and builds an in-memory model
//! of the account holder's conversations:
//!
//! - [`Message`] — one text record, ordered by timestamp and thread-local
//!   sequence number
//! - [`Thread`] — participants and their messages, always sorted
//! - [`Chat`] — every thread, largest first, with lookup by position or by
//!   participant label
//!
//! Queries filter by sender, date range or substring and return borrowed
//! messages in global chronological order.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlog::prelude::*;
//! use chrono::NaiveDate;
//!
//! fn main() -> Result<()> {
//!     let day = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
//!     let record = ThreadRecord {
//!         participants: vec!["Me".into(), "Alice".into()],
//!         messages: vec![
//!             RawMessage { author: "Alice".into(), timestamp: day.and_hms_opt(9, 0, 0).unwrap(), text: "Hello!".into() },
//!             RawMessage { author: "Me".into(), timestamp: day.and_hms_opt(9, 1, 0).unwrap(), text: "hello :)".into() },
//!         ],
//!     };
//!
//!     let mut builder = ChatBuilder::new("Me");
//!     builder.add_thread(record);
//!     let chat = builder.build();
//!
//!     // Everything Alice wrote, anywhere
//!     assert_eq!(chat.all_from("Alice").len(), 1);
//!
//!     // Everything sent on 1 March 2015
//!     assert_eq!(chat.sent_between((2015, 3, 1), None)?.len(), 2);
//!
//!     // Case-insensitive search
//!     assert_eq!(chat.search("HELLO", true).len(), 2);
//!
//!     // Lookup by participant label
//!     let thread = chat.thread_by_label("Me, Alice")?;
//!     assert_eq!(thread.by("Me").len(), 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Date arguments
//!
//! Date-accepting queries take anything convertible into
//! [`DateInput`](date::DateInput): a `chrono` value or a calendar tuple
//! `(year, month, day[, hour[, minute]])`. Impossible dates surface as
//! [`ChatlogError::InvalidDate`].
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `json` | [`ChatExport::from_json`](ingest::ChatExport::from_json) | ✅ |
//!
//! ## Modules
//!
//! - [`message`] — [`Message`] and its ordering rules
//! - [`thread`] — [`Thread`]
//! - [`chat`] — [`Chat`]
//! - [`date`] — date argument normalization
//! - [`ingest`] — building a chat from parsed records
//! - [`config`] — [`IngestConfig`](config::IngestConfig)
//! - [`stats`] — [`ChatStats`](stats::ChatStats)
//! - [`error`] — unified error types ([`ChatlogError`], [`Result`])
//! - [`prelude`] — convenient re-exports

pub mod chat;
pub mod config;
pub mod date;
pub mod error;
pub mod ingest;
pub mod message;
pub mod stats;
pub mod thread;

// Re-export the main types at the crate root for convenience
pub use chat::Chat;
pub use error::{ChatlogError, Result};
pub use message::Message;
pub use thread::Thread;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlog::prelude::*;
/// ```
pub mod prelude {
    // Model
    pub use crate::{Chat, Message, Thread};

    // Error types
    pub use crate::error::{ChatlogError, Result};

    // Dates
    pub use crate::date::DateInput;

    // Building
    pub use crate::config::IngestConfig;
    pub use crate::ingest::{ChatBuilder, ChatExport, RawMessage, ThreadRecord};

    // Statistics
    pub use crate::stats::{AuthorStats, ChatStats};
}
