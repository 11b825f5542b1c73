//! The whole chat history of one account.
//!
//! A [`Chat`] owns its [`Thread`]s, largest first, and answers queries across
//! all of them. Results are borrowed messages in global chronological order.
//!
//! # Lookup
//!
//! | Method | Key | Missing key |
//! |--------|-----|-------------|
//! | [`thread`](Chat::thread) | position in the size-sorted list | `None` |
//! | [`thread_by_label`](Chat::thread_by_label) | participant label, e.g. `"Alice, Bob"` | [`ChatlogError::NotFound`] |
//!
//! # Cached message count
//!
//! The total message count is computed once at construction. Merging into a
//! thread through [`thread_mut`](Chat::thread_mut) or
//! [`thread_by_label_mut`](Chat::thread_by_label_mut) leaves it stale until
//! [`recount`](Chat::recount) is called.
//!
//! # Examples
//!
//! ```
//! use chatlog::{Chat, Message, Thread};
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatlog::Result<()> {
//! let ts = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//!
//! let chat = Chat::new(
//!     "Alice",
//!     vec![
//!         Thread::new(["Alice", "Bob"], vec![Message::new("Alice, Bob", "Bob", ts, "Hi", 1)]),
//!         Thread::new(["Alice", "Carol"], vec![]),
//!     ],
//! );
//!
//! assert_eq!(chat.total_messages(), 1);
//! assert_eq!(chat.thread_by_label("Alice, Bob")?.len(), 1);
//! assert!(chat.thread_by_label("Bob, Alice").is_err());
//! assert_eq!(chat.all_from("Bob").len(), 1);
//! # Ok(())
//! # }
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};
use std::fmt;

use log::debug;

use crate::date::DateInput;
use crate::error::{ChatlogError, Result};
use crate::message::Message;
use crate::stats::ChatStats;
use crate::thread::Thread;

/// Threads, participants and a cached message count for one account holder.
#[derive(Debug, Clone)]
pub struct Chat {
    owner_name: String,
    threads: Vec<Thread>,
    index: HashMap<String, usize>,
    people: BTreeSet<String>,
    total_messages: usize,
}

impl Chat {
    /// Builds a chat from its owner's name and threads.
    ///
    /// Threads are ordered by descending message count; threads of equal size
    /// keep their input order. When two threads share a label, the index
    /// points at the one that comes later in that order.
    pub fn new(owner_name: impl Into<String>, threads: impl IntoIterator<Item = Thread>) -> Self {
        let owner_name = owner_name.into();
        let threads: Vec<Thread> = threads.into_iter().collect();

        let mut people = BTreeSet::new();
        people.insert(owner_name.clone());
        for thread in &threads {
            people.extend(thread.participants().iter().cloned());
        }

        let mut chat = Self {
            owner_name,
            threads,
            index: HashMap::new(),
            people,
            total_messages: 0,
        };
        chat.reorder();
        chat.total_messages = chat.count_messages();

        debug!(
            "Built chat for '{}': {} threads, {} messages, {} people",
            chat.owner_name,
            chat.threads.len(),
            chat.total_messages,
            chat.people.len()
        );
        chat
    }

    /// Stable sort by descending size, then rebuild the label index.
    fn reorder(&mut self) {
        self.threads.sort_by_key(|t| Reverse(t.len()));
        self.index = self
            .threads
            .iter()
            .enumerate()
            .map(|(position, thread)| (thread.label().to_string(), position))
            .collect();
    }

    fn count_messages(&self) -> usize {
        self.threads.iter().map(Thread::len).sum()
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the account holder's name.
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Returns the threads, largest first.
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Returns every known person: the owner and all participants.
    pub fn people(&self) -> &BTreeSet<String> {
        &self.people
    }

    /// Returns the cached total message count.
    pub fn total_messages(&self) -> usize {
        self.total_messages
    }

    /// Number of threads.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Returns `true` if the chat has no threads.
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Returns an iterator over the threads, largest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Thread> {
        self.threads.iter()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns the thread at `position` in the size-sorted order.
    pub fn thread(&self, position: usize) -> Option<&Thread> {
        self.threads.get(position)
    }

    /// Mutable variant of [`thread`](Self::thread).
    ///
    /// Call [`recount`](Self::recount) after changing the thread's messages.
    pub fn thread_mut(&mut self, position: usize) -> Option<&mut Thread> {
        self.threads.get_mut(position)
    }

    /// Returns the thread whose participant label is exactly `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlogError::NotFound`] if no thread has that label.
    pub fn thread_by_label(&self, label: &str) -> Result<&Thread> {
        self.index
            .get(label)
            .map(|&position| &self.threads[position])
            .ok_or_else(|| ChatlogError::not_found(label))
    }

    /// Mutable variant of [`thread_by_label`](Self::thread_by_label).
    ///
    /// Call [`recount`](Self::recount) after changing the thread's messages.
    pub fn thread_by_label_mut(&mut self, label: &str) -> Result<&mut Thread> {
        let position = *self
            .index
            .get(label)
            .ok_or_else(|| ChatlogError::not_found(label))?;
        Ok(&mut self.threads[position])
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Recomputes the cached message count.
    ///
    /// Also restores the largest-first thread order, which may have shifted
    /// if threads grew since construction, and rebuilds the label index to
    /// match. Positions returned by [`thread`](Self::thread) can change.
    pub fn recount(&mut self) {
        let stale = self.total_messages;
        self.reorder();
        self.total_messages = self.count_messages();
        debug!(
            "Recounted chat for '{}': {} -> {} messages",
            self.owner_name, stale, self.total_messages
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every message in the chat, in global chronological order.
    pub fn all_messages(&self) -> Vec<&Message> {
        merge_runs(self.threads.iter().map(|t| t.iter().collect()).collect())
    }

    /// Messages sent by `name` in any thread.
    ///
    /// For a single conversation use [`Thread::by`] on that thread.
    pub fn all_from(&self, name: &str) -> Vec<&Message> {
        merge_runs(self.threads.iter().map(|t| t.by(name)).collect())
    }

    /// Messages sent strictly before `date`.
    pub fn sent_before(&self, date: impl Into<DateInput>) -> Result<Vec<&Message>> {
        let date = date.into().normalize()?;
        Ok(merge_runs(
            self.threads
                .iter()
                .map(|t| t.iter().filter(|m| m.sent_before(date)).collect())
                .collect(),
        ))
    }

    /// Messages sent strictly after `date`.
    pub fn sent_after(&self, date: impl Into<DateInput>) -> Result<Vec<&Message>> {
        let date = date.into().normalize()?;
        Ok(merge_runs(
            self.threads
                .iter()
                .map(|t| t.iter().filter(|m| m.sent_after(date)).collect())
                .collect(),
        ))
    }

    /// Messages sent between `start` and `end`, both inclusive.
    ///
    /// Without an `end`, the window is the 24 hours starting at `start`:
    /// the whole calendar day when `start` has no time of day.
    pub fn sent_between(
        &self,
        start: impl Into<DateInput>,
        end: Option<DateInput>,
    ) -> Result<Vec<&Message>> {
        let (start, end) = crate::date::window(&start.into(), end.as_ref())?;
        Ok(merge_runs(
            self.threads
                .iter()
                .map(|t| t.iter().filter(|m| m.sent_between(start, end)).collect())
                .collect(),
        ))
    }

    /// Messages containing `needle` in any thread.
    pub fn search(&self, needle: &str, ignore_case: bool) -> Vec<&Message> {
        merge_runs(
            self.threads
                .iter()
                .map(|t| t.search(needle, ignore_case))
                .collect(),
        )
    }

    /// Aggregate statistics over every message.
    pub fn stats(&self) -> ChatStats {
        let mut stats = ChatStats::from_messages(self.all_messages());
        stats.threads = self.threads.len();
        stats.people = self.people.len();
        stats
    }
}

/// K-way merge of per-thread runs that are each already sorted.
///
/// Equal messages come out in thread order.
fn merge_runs(runs: Vec<Vec<&Message>>) -> Vec<&Message> {
    let total = runs.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);

    let mut heap = BinaryHeap::with_capacity(runs.len());
    for (run, messages) in runs.iter().enumerate() {
        if let Some(&first) = messages.first() {
            heap.push(Reverse((first, run, 0)));
        }
    }

    while let Some(Reverse((message, run, position))) = heap.pop() {
        merged.push(message);
        if let Some(&next) = runs[run].get(position + 1) {
            heap.push(Reverse((next, run, position + 1)));
        }
    }

    merged
}

impl<'a> IntoIterator for &'a Chat {
    type Item = &'a Thread;
    type IntoIter = std::slice::Iter<'a, Thread>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}'s CHAT LOG: TOTAL_THREADS={} TOTAL_MESSAGES={}>",
            self.owner_name,
            self.threads.len(),
            self.total_messages
        )
    }
}
