//! Edge case tests for chatlog
//!
//! These tests cover boundary conditions that the unit and integration tests
//! only touch in passing.

use chatlog::date::DateInput;
use chatlog::message::WRAP_AROUND_GAP;
use chatlog::prelude::*;
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2015, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// =========================================================================
// Numbering restarts
// =========================================================================

#[test]
fn test_restart_boundary_orders_old_block_first() {
    // A chunk numbered up to ~10000 followed by a chunk restarting at 1,
    // all within the same minute.
    let label = "Me, Alice";
    let messages = vec![
        Message::new(label, "Alice", noon(), "new block 2", 2),
        Message::new(label, "Alice", noon(), "old block end", 9_998),
        Message::new(label, "Alice", noon(), "new block 1", 1),
        Message::new(label, "Alice", noon(), "old block end + 1", 9_999),
    ];
    let thread = Thread::new(["Me", "Alice"], messages);
    let texts: Vec<&str> = thread.iter().map(|m| m.text()).collect();
    assert_eq!(
        texts,
        vec!["old block end", "old block end + 1", "new block 1", "new block 2"]
    );
}

#[test]
fn test_threshold_is_exclusive() {
    let a = Message::new("L", "A", noon(), "a", 100);
    let at_gap = Message::new("L", "A", noon(), "b", 100 + WRAP_AROUND_GAP);
    let past_gap = Message::new("L", "A", noon(), "c", 101 + WRAP_AROUND_GAP);

    assert!(a < at_gap);
    assert!(past_gap < a);
}

// =========================================================================
// Unicode and artifacts
// =========================================================================

#[test]
fn test_unicode_search_ignore_case() {
    let thread = Thread::new(
        ["Иван", "Мария"],
        vec![Message::new("Иван, Мария", "Мария", noon(), "ПРИВЕТ мир", 1)],
    );
    assert_eq!(thread.search("привет", false).len(), 0);
    assert_eq!(thread.search("привет", true).len(), 1);
    assert_eq!(thread.label(), "Иван, Мария");
}

#[test]
fn test_text_len_multiple_artifacts() {
    let msg = Message::new(
        "L",
        "A",
        noon(),
        "<|NEWLINE|><|NEWLINE|>\"\"\"\"🎉",
        1,
    );
    // two line breaks, two quotes, one emoji
    assert_eq!(msg.text_len(), 5);
}

#[test]
fn test_empty_search_needle_matches_everything() {
    let thread = Thread::new(
        ["A", "B"],
        vec![
            Message::new("A, B", "A", noon(), "", 1),
            Message::new("A, B", "B", noon(), "x", 2),
        ],
    );
    assert_eq!(thread.search("", false).len(), 2);
}

// =========================================================================
// Dates
// =========================================================================

#[test]
fn test_utc_and_naive_inputs_agree() {
    let thread = Thread::new(
        ["A", "B"],
        vec![Message::new("A, B", "A", noon(), "x", 1)],
    );
    let utc = Utc.with_ymd_and_hms(2015, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(thread.sent_between(utc, None).unwrap().len(), 1);
    assert_eq!(thread.sent_between(noon(), None).unwrap().len(), 1);
    assert_eq!(
        thread
            .sent_between(NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(), None)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_parsed_date_strings() {
    let chat = Chat::new(
        "A",
        vec![Thread::new(
            ["A", "B"],
            vec![Message::new("A, B", "B", noon(), "x", 1)],
        )],
    );
    let day: DateInput = "2015-03-01".parse().unwrap();
    let end: DateInput = "2015-03-01 12:00".parse().unwrap();
    assert_eq!(chat.sent_between(day, Some(end)).unwrap().len(), 1);
    assert!("March 1st".parse::<DateInput>().is_err());
}

#[test]
fn test_leap_day_tuple() {
    let chat = Chat::new("A", Vec::new());
    assert!(chat.sent_before((2016, 2, 29)).is_ok());
    assert!(chat.sent_before((2015, 2, 29)).is_err());
}

// =========================================================================
// Builder corner cases
// =========================================================================

#[test]
fn test_record_without_messages() {
    let mut builder = ChatBuilder::new("Me");
    builder.add_thread(ThreadRecord {
        participants: vec!["Me".into(), "Ghost".into()],
        messages: Vec::new(),
    });
    let chat = builder.build();
    assert_eq!(chat.len(), 1);
    assert!(chat.thread(0).unwrap().is_empty());
    assert!(chat.people().contains("Ghost"));
}

#[test]
fn test_participant_order_matters_for_labels() {
    let raw = |people: [&str; 2]| ThreadRecord {
        participants: people.iter().map(|p| p.to_string()).collect(),
        messages: vec![RawMessage {
            author: "Me".into(),
            timestamp: noon(),
            text: "x".into(),
        }],
    };
    let mut builder = ChatBuilder::new("Me");
    builder.add_thread(raw(["Me", "Alice"]));
    builder.add_thread(raw(["Alice", "Me"]));
    let chat = builder.build();

    assert_eq!(chat.len(), 2);
    assert!(chat.thread_by_label("Me, Alice").is_ok());
    assert!(chat.thread_by_label("Alice, Me").is_ok());
}

#[test]
fn test_stats_on_empty_chat() {
    let stats = Chat::new("Me", Vec::new()).stats();
    assert_eq!(stats.messages, 0);
    assert_eq!(stats.people, 1);
    assert!(stats.first_message.is_none());
}
