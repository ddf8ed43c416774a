// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Integration tests for wa2html parsing and rendering.

use std::fs;
use wa2html::parser::{self, Entry, ParseOptions};
use wa2html::renderer::{self, RenderOptions};

const SAMPLE_EXPORT: &str = "\
[01/01/2024, 09:58:12] Messages and calls are end-to-end encrypted
[01/01/2024, 10:00:00] Alice: Happy new year!
[01/01/2024, 10:00:41] Bob: Same to you
and the family
[01/01/2024, 10:02:03] Alice added Carol
[02/01/2024, 08:15:00] Carol: Morning all
[02/01/2024, 08:16:30] Alice: Morning!";

/// Parses a realistic export end to end and verifies entry structure.
#[test]
fn parses_sample_export() {
    let transcript = parser::parse_transcript(SAMPLE_EXPORT, &ParseOptions::default());

    // 6 parsed entries plus one synthesized date separator
    assert_eq!(transcript.entries.len(), 7);
    assert_eq!(transcript.message_count(), 4);

    assert!(matches!(transcript.entries[0], Entry::SystemNotice(_)));
    assert!(matches!(transcript.entries[3], Entry::SystemNotice(_)));
    assert!(matches!(transcript.entries[4], Entry::DateSeparator { .. }));

    match &transcript.entries[2] {
        Entry::Message(msg) => {
            assert_eq!(msg.sender, "Bob");
            assert_eq!(msg.text, "Same to you\nand the family");
            assert!(msg.continued);
        }
        other => panic!("expected Bob's message, got {other:?}"),
    }

    // First-seen order: Alice, Bob, Carol
    let names: Vec<_> = transcript.participants.names().collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);
    assert_eq!(transcript.participants.slot("Carol"), Some(2));
}

/// Renders the sample export and verifies the document contents.
#[test]
fn renders_sample_export_as_html() {
    let transcript = parser::parse_transcript(SAMPLE_EXPORT, &ParseOptions::default());
    let html = renderer::render_transcript(&transcript, &RenderOptions::default());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("4 messages, 3 participants, 1 January 2024 to 2 January 2024"));
    assert!(html.contains("Happy new year!"));
    assert!(html.contains("Same to you\nand the family"));
    assert!(html.contains("<div class=\"date-separator\"><span>2 January 2024</span></div>"));
    assert!(html.contains("<div class=\"system-notice\"><span>Alice added Carol</span></div>"));

    // One bubble per message, classed by slot
    assert_eq!(html.matches("<div class=\"message sender-").count(), 4);
    assert!(html.contains("message sender-2")); // Carol
}

/// The progress summary reports counts and the full date range.
#[test]
fn summary_line_reports_counts_and_date_range() {
    let transcript = parser::parse_transcript(SAMPLE_EXPORT, &ParseOptions::default());

    assert_eq!(
        renderer::summary_line(&transcript),
        "4 messages, 3 participants, 1 January 2024 to 2 January 2024"
    );
}

/// Leading junk before the first header must not crash or produce entries.
#[test]
fn tolerates_leading_orphan_lines() {
    let text = format!("exported by some tool\n\n{SAMPLE_EXPORT}");
    let transcript = parser::parse_transcript(&text, &ParseOptions::default());

    assert_eq!(transcript.entries.len(), 7);

    let html = renderer::render_transcript(&transcript, &RenderOptions::default());
    assert!(!html.contains("exported by some tool"));
}

/// Empty input renders a valid, empty document.
#[test]
fn empty_input_renders_empty_document() {
    let transcript = parser::parse_transcript("", &ParseOptions::default());

    assert!(transcript.entries.is_empty());
    assert!(transcript.participants.is_empty());

    let html = renderer::render_transcript(&transcript, &RenderOptions::default());
    assert!(html.contains("0 messages, 0 participants"));
    assert!(html.ends_with("</html>\n"));
}

/// The JSON dump carries tagged entries and the ordered registry.
#[test]
fn json_dump_round_trips_structure() {
    let transcript = parser::parse_transcript(SAMPLE_EXPORT, &ParseOptions::default());
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string_pretty(&transcript).unwrap()).unwrap();

    let kinds: Vec<_> = value["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(
        kinds,
        [
            "systemNotice",
            "message",
            "message",
            "systemNotice",
            "dateSeparator",
            "message",
            "message"
        ]
    );
    assert_eq!(value["participants"]["Alice"], 0);
    assert_eq!(value["participants"]["Bob"], 1);
    assert_eq!(value["participants"]["Carol"], 2);
}

/// Files written to disk parse identically to in-memory strings.
#[test]
fn parses_export_from_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("chat.txt");
    fs::write(&path, SAMPLE_EXPORT).expect("Failed to write fixture");

    let text = fs::read_to_string(&path).expect("Failed to read fixture");
    let from_disk = parser::parse_transcript(&text, &ParseOptions::default());
    let from_memory = parser::parse_transcript(SAMPLE_EXPORT, &ParseOptions::default());

    assert_eq!(from_disk, from_memory);
}

/// A custom timestamp format carries through the whole pipeline.
#[test]
fn custom_timestamp_format_end_to_end() {
    let opts = ParseOptions {
        timestamp_format: "%Y-%m-%d %H:%M".into(),
        ..Default::default()
    };
    let transcript = parser::parse_transcript(
        "[2024-03-01 12:30] Alice: hello\n[2024-03-02 07:45] Bob: hi",
        &opts,
    );

    assert_eq!(transcript.entries.len(), 3);
    assert!(matches!(transcript.entries[1], Entry::DateSeparator { .. }));

    let html = renderer::render_transcript(&transcript, &RenderOptions::default());
    assert!(html.contains("<div class=\"date-separator\"><span>2 March 2024</span></div>"));
    assert!(html.contains("<span class=\"timestamp\">12:30</span>"));
}
