//! A single chat message and its ordering rules.
//!
//! A [`Message`] carries its author, its timestamp (minute precision, no
//! timezone), its text, the label of the thread it belongs to, and a
//! thread-local sequence number assigned at ingest time.
//!
//! # Ordering
//!
//! Messages sort by timestamp. Messages sent in the same minute fall back to
//! their sequence numbers, smaller first, with one exception: when the two
//! numbers are more than [`WRAP_AROUND_GAP`] apart, the larger number sorts
//! first. Exports number messages in blocks that restart, so a huge gap at an
//! equal timestamp marks a restart boundary where the small number is really
//! the later message.
//!
//! ```
//! use chatlog::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//!
//! let early = Message::new("Alice, Bob", "Alice", ts, "first", 1);
//! let late = Message::new("Alice, Bob", "Bob", ts, "second", 2);
//! assert!(early < late);
//!
//! // Across a numbering restart the larger number comes first
//! let before_restart = Message::new("Alice, Bob", "Alice", ts, "end of block", 9999);
//! let after_restart = Message::new("Alice, Bob", "Bob", ts, "new block", 3);
//! assert!(before_restart < after_restart);
//! ```
//!
//! # Export artifacts
//!
//! Stored text keeps the escaping applied by the export step: line breaks as
//! the literal token `<|NEWLINE|>` and quotes doubled. [`Message::text_len`]
//! undoes both before counting.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sequence-number gap above which equal-time messages are treated as
/// straddling a numbering restart.
pub const WRAP_AROUND_GAP: u64 = 9000;

/// Token the export step substitutes for line breaks inside message text.
pub const NEWLINE_TOKEN: &str = "<|NEWLINE|>";

/// A message in a chat thread.
///
/// Equality compares sequence number, author, timestamp and text; the thread
/// label is not part of a message's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Label of the owning thread (its participants joined with `", "`).
    pub thread_label: String,

    /// Display name of the sender.
    pub author: String,

    /// When the message was sent.
    pub timestamp: NaiveDateTime,

    /// Message body, with export escaping intact.
    pub text: String,

    /// Position within the thread, starting at 1.
    ///
    /// Threads keep it as given; [`Thread::renumber`](crate::Thread::renumber)
    /// rewrites it to match sorted order. Writing it directly can leave a
    /// thread out of order until the next merge.
    pub sequence_number: u64,
}

impl Message {
    /// Creates a message.
    pub fn new(
        thread_label: impl Into<String>,
        author: impl Into<String>,
        timestamp: NaiveDateTime,
        text: impl Into<String>,
        sequence_number: u64,
    ) -> Self {
        Self {
            thread_label: thread_label.into(),
            author: author.into(),
            timestamp,
            text: text.into(),
            sequence_number,
        }
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the owning thread's label.
    pub fn thread_label(&self) -> &str {
        &self.thread_label
    }

    /// Returns the sender name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the stored text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the thread-local sequence number.
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Returns `true` if `name` sent this message (exact match).
    pub fn sent_by(&self, name: &str) -> bool {
        self.author == name
    }

    /// Returns `true` if the message was sent strictly before `date`.
    pub fn sent_before(&self, date: NaiveDateTime) -> bool {
        self.timestamp < date
    }

    /// Returns `true` if the message was sent strictly after `date`.
    pub fn sent_after(&self, date: NaiveDateTime) -> bool {
        self.timestamp > date
    }

    /// Returns `true` if `start <= timestamp <= end`.
    pub fn sent_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.timestamp && self.timestamp <= end
    }

    /// Returns `true` if the text contains `needle`.
    ///
    /// With `ignore_case`, both sides are lowercased before matching.
    ///
    /// ```
    /// use chatlog::Message;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let msg = Message::new("Alice, Bob", "Bob", ts, "hello there", 1);
    ///
    /// assert!(!msg.contains("Hello", false));
    /// assert!(msg.contains("Hello", true));
    /// ```
    pub fn contains(&self, needle: &str, ignore_case: bool) -> bool {
        if ignore_case {
            self.text.to_lowercase().contains(&needle.to_lowercase())
        } else {
            self.text.contains(needle)
        }
    }

    /// Returns `true` if the text is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    // =========================================================================
    // Display helpers
    // =========================================================================

    /// Number of characters in the text once export escaping is undone.
    ///
    /// `<|NEWLINE|>` counts as one line break and `""` as one quote.
    ///
    /// ```
    /// use chatlog::Message;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let msg = Message::new("A, B", "A", ts, r#"He said ""hi""<|NEWLINE|>bye"#, 1);
    ///
    /// assert_eq!(msg.text_len(), "He said \"hi\"\nbye".chars().count());
    /// ```
    pub fn text_len(&self) -> usize {
        self.text
            .replace(NEWLINE_TOKEN, "\n")
            .replace("\"\"", "\"")
            .chars()
            .count()
    }

    /// The canonical single-line record for this message.
    ///
    /// Five double-quoted fields separated by commas: thread label, sequence
    /// number, author, timestamp (`YYYY-MM-DD HH:MM:SS`) and text, followed
    /// by `\n`. Fields are written verbatim; quote escaping in the text is
    /// expected to be done already.
    pub fn to_csv_line(&self) -> String {
        format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"\n",
            self.thread_label,
            self.sequence_number,
            self.author,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.text
        )
    }

    /// Compares sequence numbers of two same-time messages.
    fn sequence_cmp(&self, other: &Self) -> Ordering {
        let gap = self.sequence_number.abs_diff(other.sequence_number);
        if gap > WRAP_AROUND_GAP {
            // Restart boundary: the larger number is the earlier message
            other.sequence_number.cmp(&self.sequence_number)
        } else {
            self.sequence_number.cmp(&other.sequence_number)
        }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.sequence_number == other.sequence_number
            && self.author == other.author
            && self.timestamp == other.timestamp
            && self.text == other.text
    }
}

impl Eq for Message {}

impl Ord for Message {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.sequence_cmp(other))
            // Only reached for distinct messages sharing time and number,
            // e.g. overlapping chunks merged without renumbering.
            .then_with(|| self.author.cmp(&other.author))
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for Message {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<MESSAGE: THREAD={} NUMBER={} TIMESTAMP={} AUTHOR={} MESSAGE=\"{}\">",
            self.thread_label, self.sequence_number, self.timestamp, self.author, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn msg(author: &str, ts: NaiveDateTime, text: &str, seq: u64) -> Message {
        Message::new("Alice, Bob", author, ts, text, seq)
    }

    #[test]
    fn test_message_new() {
        let m = msg("Alice", at(12, 0), "Hello", 1);
        assert_eq!(m.thread_label(), "Alice, Bob");
        assert_eq!(m.author(), "Alice");
        assert_eq!(m.timestamp(), at(12, 0));
        assert_eq!(m.text(), "Hello");
        assert_eq!(m.sequence_number(), 1);
    }

    #[test]
    fn test_order_by_timestamp_first() {
        let earlier = msg("Alice", at(11, 59), "a", 500);
        let later = msg("Bob", at(12, 0), "b", 1);
        assert!(earlier < later);
        assert!(later > earlier);
    }

    #[test]
    fn test_same_time_uses_sequence_number() {
        let a = msg("Alice", at(12, 0), "a", 7);
        let b = msg("Bob", at(12, 0), "b", 8);
        assert!(a < b);
        assert!(!(a > b));
        assert!(b > a);
    }

    #[test]
    fn test_wrap_around_inverts_order() {
        let big = msg("Alice", at(12, 0), "a", 10_000);
        let small = msg("Bob", at(12, 0), "b", 5);
        assert!(big < small);
        assert!(small > big);
        assert!(!(small < big));
    }

    #[test]
    fn test_gap_of_exactly_threshold_is_plain() {
        let low = msg("Alice", at(12, 0), "a", 1);
        let high = msg("Bob", at(12, 0), "b", 1 + WRAP_AROUND_GAP);
        assert!(low < high);

        let beyond = msg("Bob", at(12, 0), "b", 2 + WRAP_AROUND_GAP);
        assert!(beyond < low);
    }

    #[test]
    fn test_wrap_around_ignored_when_times_differ() {
        let a = msg("Alice", at(12, 0), "a", 10_000);
        let b = msg("Bob", at(12, 1), "b", 5);
        assert!(a < b);
    }

    #[test]
    fn test_equality_ignores_thread_label() {
        let a = msg("Alice", at(12, 0), "Hello", 3);
        let mut b = a.clone();
        b.thread_label = "Someone else".to_string();
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_distinct_messages_never_compare_equal() {
        let a = msg("Alice", at(12, 0), "Hello", 3);
        let b = msg("Bob", at(12, 0), "Hello", 3);
        assert_ne!(a, b);
        assert!((a < b) ^ (a > b));
    }

    #[test]
    fn test_date_predicates_are_strict() {
        let m = msg("Alice", at(12, 0), "x", 1);
        assert!(!m.sent_before(at(12, 0)));
        assert!(!m.sent_after(at(12, 0)));
        assert!(m.sent_before(at(12, 1)));
        assert!(m.sent_after(at(11, 59)));
    }

    #[test]
    fn test_sent_between_inclusive() {
        let m = msg("Alice", at(12, 0), "x", 1);
        assert!(m.sent_between(at(12, 0), at(13, 0)));
        assert!(m.sent_between(at(11, 0), at(12, 0)));
        assert!(!m.sent_between(at(12, 1), at(13, 0)));
    }

    #[test]
    fn test_sent_by_is_exact() {
        let m = msg("Alice", at(12, 0), "x", 1);
        assert!(m.sent_by("Alice"));
        assert!(!m.sent_by("alice"));
    }

    #[test]
    fn test_contains_case_modes() {
        let m = msg("Alice", at(12, 0), "well hello there", 1);
        assert!(!m.contains("Hello", false));
        assert!(m.contains("Hello", true));
        assert!(m.contains("hello", false));
    }

    #[test]
    fn test_text_len_strips_artifacts() {
        let m = msg("Alice", at(12, 0), r#"He said ""hi""<|NEWLINE|>bye"#, 1);
        assert_eq!(m.text_len(), "He said \"hi\"\nbye".chars().count());
        assert_eq!(m.text_len(), 16);
    }

    #[test]
    fn test_text_len_counts_chars_not_bytes() {
        let m = msg("Иван", at(12, 0), "Привет", 1);
        assert_eq!(m.text_len(), 6);
    }

    #[test]
    fn test_is_empty() {
        assert!(msg("Alice", at(12, 0), "", 1).is_empty());
        assert!(msg("Alice", at(12, 0), "   ", 1).is_empty());
        assert!(!msg("Alice", at(12, 0), "Hi", 1).is_empty());
    }

    #[test]
    fn test_csv_line() {
        let m = msg("Alice", at(9, 5), "Hi", 42);
        assert_eq!(
            m.to_csv_line(),
            "\"Alice, Bob\",\"42\",\"Alice\",\"2015-03-01 09:05:00\",\"Hi\"\n"
        );
    }

    #[test]
    fn test_display() {
        let m = msg("Alice", at(9, 5), "Hi", 42);
        let display = m.to_string();
        assert!(display.starts_with("<MESSAGE: THREAD=Alice, Bob NUMBER=42"));
        assert!(display.contains("AUTHOR=Alice"));
        assert!(display.ends_with("MESSAGE=\"Hi\">"));
    }

    #[test]
    fn test_serialization() {
        let m = msg("Alice", at(9, 5), "Hi", 42);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"sequence_number\":42"));
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
        assert_eq!(parsed.thread_label, m.thread_label);
    }
}
