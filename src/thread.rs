//! A conversation between a fixed set of participants.
//!
//! A [`Thread`] keeps its messages sorted under the [`Message`] order at all
//! times: on construction and again after every [`merge`](Thread::merge).
//! Query methods return borrowed messages in that order.
//!
//! # Examples
//!
//! ```
//! use chatlog::{Message, Thread};
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatlog::Result<()> {
//! let day = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
//! let label = "Alice, Bob";
//!
//! let thread = Thread::new(
//!     ["Alice", "Bob"],
//!     vec![
//!         Message::new(label, "Bob", day.and_hms_opt(18, 0, 0).unwrap(), "Evening", 2),
//!         Message::new(label, "Alice", day.and_hms_opt(9, 0, 0).unwrap(), "Morning", 1),
//!     ],
//! );
//!
//! assert_eq!(thread.label(), "Alice, Bob");
//! assert_eq!(thread.messages()[0].text(), "Morning");
//! assert_eq!(thread.sent_between((2015, 3, 1, 12), None)?.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use log::debug;

use crate::date::{self, DateInput};
use crate::error::Result;
use crate::message::Message;

/// Participants and their chronologically sorted messages.
///
/// Mutating operations ([`merge`](Self::merge), [`renumber`](Self::renumber))
/// take `&mut self`; share a thread across threads of execution only behind
/// external synchronization.
#[derive(Debug, Clone)]
pub struct Thread {
    participants: Vec<String>,
    label: String,
    messages: Vec<Message>,
}

impl Thread {
    /// Creates a thread and sorts its messages.
    ///
    /// The label is the participants joined with `", "` in the given order.
    pub fn new<P, S>(participants: P, messages: impl IntoIterator<Item = Message>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let participants: Vec<String> = participants.into_iter().map(Into::into).collect();
        let label = participants.join(", ");
        let mut messages: Vec<Message> = messages.into_iter().collect();
        messages.sort();

        Self {
            participants,
            label,
            messages,
        }
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the participants in their original order.
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Returns the participant label used as the chat index key.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns all messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the message at `position` (0-based) in sorted order.
    ///
    /// Sequence numbers start at 1, so `get(0)` of a freshly numbered thread
    /// is message number 1.
    pub fn get(&self, position: usize) -> Option<&Message> {
        self.messages.get(position)
    }

    /// Returns an iterator over the messages in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the thread has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns `true` if `name` is one of the participants.
    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Appends messages and re-sorts the thread.
    ///
    /// Duplicates are kept. Sequence numbers of the merged messages are left
    /// as they were; call [`renumber`](Self::renumber) afterwards so that
    /// same-minute messages from different numbering runs order correctly.
    pub fn merge(&mut self, new_messages: impl IntoIterator<Item = Message>) {
        let before = self.messages.len();
        self.messages.extend(new_messages);
        self.messages.sort();
        debug!(
            "Merged {} messages into thread '{}' ({} total)",
            self.messages.len() - before,
            self.label,
            self.messages.len()
        );
    }

    /// Reassigns sequence numbers 1, 2, 3, … in current order.
    pub fn renumber(&mut self) {
        for (number, message) in (1..).zip(self.messages.iter_mut()) {
            message.sequence_number = number;
        }
        debug!(
            "Renumbered {} messages in thread '{}'",
            self.messages.len(),
            self.label
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Messages sent by `name`.
    pub fn by(&self, name: &str) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.sent_by(name)).collect()
    }

    /// Messages sent strictly before `date`.
    pub fn sent_before(&self, date: impl Into<DateInput>) -> Result<Vec<&Message>> {
        let date = date.into().normalize()?;
        Ok(self.messages.iter().filter(|m| m.sent_before(date)).collect())
    }

    /// Messages sent strictly after `date`.
    pub fn sent_after(&self, date: impl Into<DateInput>) -> Result<Vec<&Message>> {
        let date = date.into().normalize()?;
        Ok(self.messages.iter().filter(|m| m.sent_after(date)).collect())
    }

    /// Messages sent between `start` and `end`, both inclusive.
    ///
    /// Without an `end`, the window is the 24 hours starting at `start`.
    pub fn sent_between(
        &self,
        start: impl Into<DateInput>,
        end: Option<DateInput>,
    ) -> Result<Vec<&Message>> {
        let (start, end) = date::window(&start.into(), end.as_ref())?;
        Ok(self
            .messages
            .iter()
            .filter(|m| m.sent_between(start, end))
            .collect())
    }

    /// Messages whose text contains `needle`.
    pub fn search(&self, needle: &str, ignore_case: bool) -> Vec<&Message> {
        let mut found: Vec<&Message> = self
            .messages
            .iter()
            .filter(|m| m.contains(needle, ignore_case))
            .collect();
        found.sort();
        found
    }
}

impl<'a> IntoIterator for &'a Thread {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<THREAD: PEOPLE={}, MESSAGE_COUNT={}>",
            self.label,
            self.messages.len()
        )
    }
}
