// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Line-oriented parsing for WhatsApp chat exports.
//!
//! This module turns the plain-text transcript produced by WhatsApp's
//! "export chat" feature into typed entries. The format is loosely
//! structured: each message starts with a bracketed timestamp header, and
//! any line that does not look like a header continues the previous entry.
//!
//! # Format Overview
//!
//! ```text
//! [01/01/2024, 10:00:00] Alice: Hi
//! how are you?
//! [01/01/2024, 10:01:12] Messages are now secured with end-to-end encryption
//! ```
//!
//! - A header line with a `Sender: ` segment after the timestamp is a
//!   message; without one it is a system notice (group events, call
//!   notices, the encryption banner).
//! - The second line above has no header and becomes part of Alice's
//!   message, line break preserved.
//!
//! The sender detection is a textual heuristic: a message body that itself
//! starts with `Word: ` and carries no real sender is indistinguishable
//! from a message sent by "Word". This ambiguity is inherent to the export
//! format and left as-is.
//!
//! Parsing is total. Malformed lines degrade (orphan continuations are
//! dropped, headers with unparseable timestamps become continuations);
//! there is no error path. Partial and irregular exports are the common
//! case for this format.
//!
//! # Example
//!
//! ```
//! use wa2html::parser::{parse_transcript, Entry, ParseOptions};
//!
//! let text = "[01/01/2024, 10:00:00] Alice: Hi\nhow are you?";
//! let transcript = parse_transcript(text, &ParseOptions::default());
//!
//! assert_eq!(transcript.entries.len(), 1);
//! match &transcript.entries[0] {
//!     Entry::Message(msg) => assert_eq!(msg.text, "Hi\nhow are you?"),
//!     other => panic!("expected a message, got {other:?}"),
//! }
//! assert_eq!(transcript.participants.slot("Alice"), Some(0));
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::palette::{Palette, ParticipantRegistry};

/// Matches a header line: a bracketed timestamp followed by the rest.
///
/// The timestamp text itself is validated separately against the
/// configurable chrono format, so the bracket contents are matched loosely
/// here. Compiled once and shared by all parses; the per-parse state
/// (accumulator, registry) stays inside each call.
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\] (.*)$").expect("header pattern is valid"));

/// Default timestamp convention inside the header brackets:
/// `DD/MM/YYYY, HH:MM:SS`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Configuration consumed by [`parse_transcript`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// chrono format string for the bracketed timestamp.
    ///
    /// The default, [`DEFAULT_TIMESTAMP_FORMAT`], is the only documented
    /// convention; this is the single supported point of variation for
    /// locale-specific exports.
    pub timestamp_format: String,

    /// Color palette used for participant slot assignment.
    pub palette: Palette,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
            palette: Palette::default(),
        }
    }
}

/// One logical unit of chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Entry {
    /// A message from an identifiable sender.
    Message(Message),

    /// A chat-level event with no identifiable sender (encryption banner,
    /// "Alice added Bob", missed calls).
    SystemNotice(SystemNotice),

    /// Synthesized marker emitted when the calendar date changes between
    /// two consecutive dated entries.
    DateSeparator {
        /// The date of the entry that follows the separator.
        date: NaiveDate,
    },
}

/// A user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// When the message was sent.
    pub timestamp: NaiveDateTime,

    /// Sender name, trimmed, case-sensitive.
    pub sender: String,

    /// Message text. Continuation lines are embedded with `\n`.
    pub text: String,

    /// Whether at least one continuation line was appended to this message.
    pub continued: bool,
}

/// A chat-level event without a sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemNotice {
    /// When the event occurred, when the header carried a timestamp.
    pub timestamp: Option<NaiveDateTime>,

    /// The notice text.
    pub text: String,
}

/// The parsed result: ordered entries plus the participant registry.
///
/// Entries are totally ordered by original line position. The transcript is
/// built once per input, handed to a renderer, and discarded; nothing here
/// persists between parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    /// Entries in original transcript order.
    pub entries: Vec<Entry>,

    /// Sender-to-color-slot registry, in first-seen order.
    pub participants: ParticipantRegistry,
}

impl Transcript {
    /// Number of [`Entry::Message`] entries.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, Entry::Message(_)))
            .count()
    }

    /// Earliest and latest message timestamps, ignoring system notices.
    ///
    /// Returns `None` when the transcript contains no messages.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut timestamps = self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(msg) => Some(msg.timestamp),
            _ => None,
        });
        let first = timestamps.next()?;
        Some(timestamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
    }
}

/// The currently open entry, extended by continuation lines until the next
/// header closes it.
struct EntryBuilder {
    timestamp: NaiveDateTime,
    sender: Option<String>,
    text: String,
    continued: bool,
}

impl EntryBuilder {
    fn append_continuation(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
        self.continued = true;
    }

    fn finish(self) -> Entry {
        match self.sender {
            Some(sender) => Entry::Message(Message {
                timestamp: self.timestamp,
                sender,
                text: self.text,
                continued: self.continued,
            }),
            None => Entry::SystemNotice(SystemNotice {
                timestamp: Some(self.timestamp),
                text: self.text,
            }),
        }
    }
}

/// Splits the post-bracket text into an optional sender and the body.
///
/// A message has a colon-delimited sender right after the timestamp bracket
/// (`Alice: hi`); anything else is a system notice. The sender segment must
/// be non-empty and colon-free, mirroring the export convention.
fn split_sender(rest: &str) -> (Option<String>, String) {
    if let Some((name, body)) = rest.split_once(": ")
        && !name.trim().is_empty()
        && !name.contains(':')
    {
        (Some(name.trim().to_owned()), body.trim().to_owned())
    } else {
        (None, rest.trim().to_owned())
    }
}

/// Parses a chat export into a [`Transcript`].
///
/// This is a single left-to-right scan with one open accumulator. Each line
/// either starts a new entry (header match), extends the open one
/// (continuation), or is dropped (continuation with nothing open). A
/// [`Entry::DateSeparator`] is emitted whenever the calendar date changes
/// between two consecutive dated entries.
///
/// The function never fails: empty input yields an empty transcript, and
/// malformed lines degrade as described in the module docs. Each call owns
/// its own accumulator and registry, so concurrent calls on different
/// inputs are independent.
#[must_use]
pub fn parse_transcript(text: &str, opts: &ParseOptions) -> Transcript {
    let mut entries = Vec::new();
    let mut registry = ParticipantRegistry::new(opts.palette.clone());
    let mut open: Option<EntryBuilder> = None;
    let mut last_date: Option<NaiveDate> = None;

    for line in text.lines() {
        let Some(caps) = HEADER.captures(line) else {
            // Continuation. With nothing open (leading junk before the
            // first header) the line is dropped.
            if let Some(builder) = open.as_mut() {
                builder.append_continuation(line);
            }
            continue;
        };

        let Ok(timestamp) = NaiveDateTime::parse_from_str(&caps[1], &opts.timestamp_format) else {
            // Bracketed prefix with an unrecognized timestamp: reclassify
            // the whole line as a continuation.
            if let Some(builder) = open.as_mut() {
                builder.append_continuation(line);
            }
            continue;
        };

        if let Some(builder) = open.take() {
            entries.push(builder.finish());
        }

        let date = timestamp.date();
        if last_date.is_some_and(|previous| previous != date) {
            entries.push(Entry::DateSeparator { date });
        }
        last_date = Some(date);

        let (sender, body) = split_sender(&caps[2]);
        if let Some(name) = &sender {
            registry.assign(name);
        }

        open = Some(EntryBuilder {
            timestamp,
            sender,
            text: body,
            continued: false,
        });
    }

    if let Some(builder) = open {
        entries.push(builder.finish());
    }

    Transcript {
        entries,
        participants: registry,
    }
}
