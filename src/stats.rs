//! Message statistics.
//!
//! Character counts use [`Message::text_len`], so export escaping does not
//! inflate them.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Per-author totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub messages: usize,
    pub characters: usize,
}

/// Totals over a set of messages.
///
/// `threads` and `people` are filled in by [`Chat::stats`](crate::Chat::stats);
/// [`from_messages`](Self::from_messages) leaves them at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatStats {
    pub threads: usize,
    pub people: usize,
    pub messages: usize,
    pub characters: usize,
    pub first_message: Option<NaiveDateTime>,
    pub last_message: Option<NaiveDateTime>,
    pub by_author: BTreeMap<String, AuthorStats>,
}

impl ChatStats {
    /// Accumulates statistics from any collection of messages.
    pub fn from_messages<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Self {
        let mut stats = Self::default();
        for message in messages {
            let characters = message.text_len();
            stats.messages += 1;
            stats.characters += characters;

            let ts = message.timestamp;
            stats.first_message = Some(stats.first_message.map_or(ts, |first| first.min(ts)));
            stats.last_message = Some(stats.last_message.map_or(ts, |last| last.max(ts)));

            let author = stats.by_author.entry(message.author.clone()).or_default();
            author.messages += 1;
            author.characters += characters;
        }
        stats
    }

    /// Mean characters per message, or `0.0` with no messages.
    pub fn average_length(&self) -> f64 {
        if self.messages == 0 {
            return 0.0;
        }
        self.characters as f64 / self.messages as f64
    }

    /// The author with the most messages; ties go to the alphabetically first.
    pub fn most_active(&self) -> Option<(&str, AuthorStats)> {
        self.by_author
            .iter()
            .max_by(|(a_name, a), (b_name, b)| {
                a.messages.cmp(&b.messages).then_with(|| b_name.cmp(a_name))
            })
            .map(|(name, stats)| (name.as_str(), *stats))
    }
}
