// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! HTML rendering for parsed chat transcripts.
//!
//! This module transforms a [`Transcript`] into a self-contained HTML
//! document styled like the WhatsApp UI. The document embeds its stylesheet
//! in a `<style>` block, so the output is a single file with no external
//! resources; pagination is left to whatever consumes it (a browser's print
//! pipeline or an HTML-to-PDF tool).
//!
//! # Output Structure
//!
//! - An optional chat header with the title, message count, participant
//!   count, and date range
//! - One bubble per message, with the sender name colored by the
//!   participant's palette slot
//! - Centered chips for date separators and system notices
//!
//! # Example
//!
//! ```
//! use wa2html::parser::{parse_transcript, ParseOptions};
//! use wa2html::renderer::{render_transcript, RenderOptions};
//!
//! let transcript = parse_transcript(
//!     "[01/01/2024, 10:00:00] Alice: Hi there",
//!     &ParseOptions::default(),
//! );
//!
//! let html = render_transcript(&transcript, &RenderOptions::default());
//! assert!(html.contains("Hi there"));
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```

use crate::palette::ParticipantRegistry;
use crate::parser::{Entry, Message, SystemNotice, Transcript};
use std::fmt::Write;

/// The stylesheet embedded when [`RenderOptions::stylesheet`] is `None`.
pub const DEFAULT_STYLESHEET: &str = include_str!("../assets/whatsapp.css");

/// Configuration options for HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Document title, shown in the `<title>` tag and the chat header.
    ///
    /// Defaults to "WhatsApp Chat" when `None`.
    pub title: Option<String>,

    /// Whether to show the send time inside each message bubble.
    pub show_timestamps: bool,

    /// Whether to include the chat header block (title, message count,
    /// participant count, date range).
    pub show_summary: bool,

    /// Replacement stylesheet. `None` embeds [`DEFAULT_STYLESHEET`].
    ///
    /// Per-sender color rules are generated from the participant registry
    /// and appended after the stylesheet either way.
    pub stylesheet: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            show_timestamps: true,
            show_summary: true,
            stylesheet: None,
        }
    }
}

/// Renders a parsed transcript as a complete HTML document.
///
/// This is the main entry point for rendering. The output is deterministic
/// for a given transcript and options.
#[must_use]
pub fn render_transcript(transcript: &Transcript, opts: &RenderOptions) -> String {
    let title = opts.title.as_deref().unwrap_or("WhatsApp Chat");
    let stylesheet = opts.stylesheet.as_deref().unwrap_or(DEFAULT_STYLESHEET);

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(out, "<title>{}</title>", escape_html(title)).unwrap();
    out.push_str("<style>\n");
    out.push_str(stylesheet);
    if !stylesheet.ends_with('\n') {
        out.push('\n');
    }
    write_sender_rules(&mut out, &transcript.participants);
    out.push_str("</style>\n</head>\n<body>\n<div class=\"chat\">\n");

    if opts.show_summary {
        render_summary(&mut out, transcript, title);
    }

    for entry in &transcript.entries {
        match entry {
            Entry::Message(msg) => render_message(&mut out, msg, &transcript.participants, opts),
            Entry::SystemNotice(notice) => render_notice(&mut out, notice),
            Entry::DateSeparator { date } => {
                writeln!(
                    out,
                    "<div class=\"date-separator\"><span>{}</span></div>",
                    date.format("%-d %B %Y")
                )
                .unwrap();
            }
        }
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

/// Emits one CSS rule per occupied palette slot.
fn write_sender_rules(out: &mut String, participants: &ParticipantRegistry) {
    let palette = participants.palette();
    let occupied = participants.len().min(palette.len());
    for slot in 0..occupied {
        writeln!(
            out,
            ".sender-{slot} .sender-name {{ color: {}; }}",
            palette.color(slot)
        )
        .unwrap();
    }
}

/// One-line transcript summary: message count, participant count, and the
/// date range when the transcript contains messages.
///
/// Used for the chat header block and by callers reporting progress.
#[must_use]
pub fn summary_line(transcript: &Transcript) -> String {
    let mut line = format!(
        "{} messages, {} participants",
        transcript.message_count(),
        transcript.participants.len()
    );
    if let Some((start, end)) = transcript.date_range() {
        write!(
            line,
            ", {} to {}",
            start.format("%-d %B %Y"),
            end.format("%-d %B %Y")
        )
        .unwrap();
    }
    line
}

fn render_summary(out: &mut String, transcript: &Transcript, title: &str) {
    writeln!(out, "<header class=\"chat-header\">").unwrap();
    writeln!(out, "<h1>{}</h1>", escape_html(title)).unwrap();
    writeln!(out, "<p class=\"chat-meta\">{}</p>", summary_line(transcript)).unwrap();
    writeln!(out, "</header>").unwrap();
}

fn render_message(
    out: &mut String,
    msg: &Message,
    participants: &ParticipantRegistry,
    opts: &RenderOptions,
) {
    let slot = participants.slot(&msg.sender).unwrap_or(0);
    writeln!(out, "<div class=\"message sender-{slot}\">").unwrap();
    writeln!(
        out,
        "<span class=\"sender-name\">{}</span>",
        escape_html(&msg.sender)
    )
    .unwrap();
    writeln!(out, "<p class=\"bubble-text\">{}</p>", escape_html(&msg.text)).unwrap();
    if opts.show_timestamps {
        writeln!(
            out,
            "<span class=\"timestamp\">{}</span>",
            msg.timestamp.format("%H:%M")
        )
        .unwrap();
    }
    writeln!(out, "</div>").unwrap();
}

fn render_notice(out: &mut String, notice: &SystemNotice) {
    writeln!(
        out,
        "<div class=\"system-notice\"><span>{}</span></div>",
        escape_html(&notice.text)
    )
    .unwrap();
}

/// Escapes text for use in HTML element content and attribute values.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
