// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert WhatsApp chat exports to styled HTML.
//!
//! This crate provides parsing and rendering functionality for transforming
//! the plain-text transcript files produced by WhatsApp's "export chat"
//! feature into self-contained HTML documents.
//!
//! # Overview
//!
//! A WhatsApp export is a loosely structured text file: one header line per
//! message (`[DD/MM/YYYY, HH:MM:SS] Sender: text`), interleaved with system
//! notices and raw continuation lines for multi-line messages. This crate:
//!
//! 1. Parses the text into typed entries (messages, system notices,
//!    synthesized date separators) plus a participant registry that assigns
//!    each sender a stable color slot
//! 2. Renders the entries as an HTML document styled like the WhatsApp UI,
//!    ready for a browser or any HTML-to-PDF tool to paginate
//!
//! # Example
//!
//! ```no_run
//! use wa2html::{parser, renderer};
//!
//! let text = std::fs::read_to_string("chat.txt").unwrap();
//! let transcript = parser::parse_transcript(&text, &parser::ParseOptions::default());
//!
//! let opts = renderer::RenderOptions {
//!     title: Some("Family group".into()),
//!     show_timestamps: true,
//!     ..Default::default()
//! };
//!
//! let html = renderer::render_transcript(&transcript, &opts);
//! println!("{html}");
//! ```
//!
//! # Modules
//!
//! - [`parser`]: line-oriented parsing and type definitions for chat exports
//! - [`palette`]: participant-to-color-slot assignment
//! - [`renderer`]: HTML generation with configurable output options

#![deny(missing_docs)]

pub mod palette;
pub mod parser;
pub mod renderer;
