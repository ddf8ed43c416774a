// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for wa2html.
//!
//! This binary provides the `wa2html` command for converting WhatsApp
//! chat exports from plain text to styled HTML (or a JSON dump of the
//! parsed transcript).

use lexopt::prelude::*;
use snafu::{OptionExt, ensure, prelude::*};
use std::path::{Path, PathBuf};
use wa2html::{palette, parser, renderer};
use walkdir::WalkDir;

/// Where to write the rendered output.
#[derive(Clone)]
enum OutputTarget {
    /// Write each file to the specified directory.
    Directory(PathBuf),
    /// Write to stdout.
    Stdout,
}

#[allow(clippy::struct_excessive_bools)]
struct Cli {
    input: Vec<PathBuf>,
    output: OutputTarget,
    json: bool,
    title: Option<String>,
    stylesheet: Option<PathBuf>,
    timestamp_format: Option<String>,
    colors: Option<Vec<String>>,
    show_timestamps: bool,
    show_summary: bool,
    quiet: bool,
    dry_run: bool,
    force: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("at least one input file or directory is required"))]
    NoInputFiles,

    #[snafu(display("cannot output multiple files to stdout"))]
    MultipleFilesToStdout,

    #[snafu(display("failed to create output directory: {source}"))]
    CreateOutputDir { source: std::io::Error },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to read stylesheet {}: {source}", path.display()))]
    ReadStylesheet {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("invalid input filename: no file stem"))]
    InvalidFilename,

    #[snafu(display("failed to serialize transcript: {source}"))]
    SerializeJson { source: serde_json::Error },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert WhatsApp chat exports to styled HTML

Usage: {name} [OPTIONS] -o <OUTPUT> <INPUT>...

Arguments:
  <INPUT>...  Input text files or directories containing exports

Options:
  -o, --output <OUTPUT>       Output directory (or - for stdout)
      --json                  Emit the parsed transcript as JSON instead of HTML
      --title <TITLE>         Chat title for the document header
      --stylesheet <FILE>     Replace the built-in stylesheet
      --timestamp-format <F>  chrono format for the bracketed timestamp
                              (default: {format})
      --colors <LIST>         Comma-separated sender colors, overriding the
                              built-in palette

Metadata display (use --show-* or --hide-*):
      --show-timestamps       Include send times in bubbles (default: on)
      --hide-timestamps       Hide send times
      --show-summary          Include the chat header block (default: on)
      --hide-summary          Hide the chat header block

Other options:
  -q, --quiet                 Suppress progress messages
  -n, --dry-run               Show what would be processed without writing
  -f, --force                 Overwrite existing output files
  -h, --help                  Print help
  -V, --version               Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        format = parser::DEFAULT_TIMESTAMP_FORMAT,
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut input = Vec::new();
    let mut output: Option<OutputTarget> = None;
    let mut json = false;
    let mut title = None;
    let mut stylesheet = None;
    let mut timestamp_format = None;
    let mut colors = None;
    // Defaults: timestamps on, summary on
    let mut show_timestamps = true;
    let mut show_summary = true;
    let mut quiet = false;
    let mut dry_run = false;
    let mut force = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('o') | Long("output") => {
                let val: PathBuf = parser.value()?.parse()?;
                output = Some(if val == Path::new("-") {
                    OutputTarget::Stdout
                } else {
                    OutputTarget::Directory(val)
                });
            }
            Long("json") => json = true,
            Long("title") => title = Some(parser.value()?.string()?),
            Long("stylesheet") => stylesheet = Some(parser.value()?.parse()?),
            Long("timestamp-format") => timestamp_format = Some(parser.value()?.string()?),
            Long("colors") => {
                let val = parser.value()?.string()?;
                let list: Vec<String> = val
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_owned)
                    .collect();
                if list.is_empty() {
                    return Err("--colors needs at least one color".into());
                }
                colors = Some(list);
            }
            // Show/hide flags - last one wins
            Long("show-timestamps") => show_timestamps = true,
            Long("hide-timestamps") => show_timestamps = false,
            Long("show-summary") => show_summary = true,
            Long("hide-summary") => show_summary = false,
            Short('q') | Long("quiet") => quiet = true,
            Short('n') | Long("dry-run") => dry_run = true,
            Short('f') | Long("force") => force = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) => input.push(val.parse()?),
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        input,
        output: output.ok_or("missing required option: --output")?,
        json,
        title,
        stylesheet,
        timestamp_format,
        colors,
        show_timestamps,
        show_summary,
        quiet,
        dry_run,
        force,
    })
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;

    ensure!(!cli.input.is_empty(), NoInputFilesSnafu);

    // Collect all input files first
    let files = collect_input_files(&cli.input);

    match &cli.output {
        OutputTarget::Stdout => {
            ensure!(files.len() == 1, MultipleFilesToStdoutSnafu);
            process_to_stdout(&files[0], &cli)?;
        }
        OutputTarget::Directory(dir) => {
            if !cli.dry_run {
                std::fs::create_dir_all(dir).context(CreateOutputDirSnafu)?;
            }
            for file in &files {
                process_file(file, dir, &cli)?;
            }
        }
    }

    Ok(())
}

/// Collects all text files from the given inputs (files and directories).
fn collect_input_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
            {
                files.push(entry.path().to_path_buf());
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Creates parse options from CLI arguments.
fn make_parse_options(cli: &Cli) -> parser::ParseOptions {
    let mut opts = parser::ParseOptions::default();
    if let Some(format) = &cli.timestamp_format {
        opts.timestamp_format.clone_from(format);
    }
    if let Some(colors) = &cli.colors {
        opts.palette = palette::Palette::new(colors.clone());
    }
    opts
}

/// Creates render options from CLI arguments, reading a replacement
/// stylesheet from disk if one was given.
fn make_render_options(cli: &Cli) -> Result<renderer::RenderOptions, Error> {
    let stylesheet = match &cli.stylesheet {
        Some(path) => {
            Some(std::fs::read_to_string(path).context(ReadStylesheetSnafu { path })?)
        }
        None => None,
    };
    Ok(renderer::RenderOptions {
        title: cli.title.clone(),
        show_timestamps: cli.show_timestamps,
        show_summary: cli.show_summary,
        stylesheet,
    })
}

/// Parses one input file and renders it per the CLI mode.
fn convert(input: &Path, cli: &Cli) -> Result<(parser::Transcript, String), Error> {
    let text = std::fs::read_to_string(input).context(ReadFileSnafu { path: input })?;
    let transcript = parser::parse_transcript(&text, &make_parse_options(cli));

    if transcript.entries.is_empty() && !cli.quiet {
        eprintln!("Warning: no entries recognized in {}", input.display());
    }

    let rendered = if cli.json {
        let mut out = serde_json::to_string_pretty(&transcript).context(SerializeJsonSnafu)?;
        out.push('\n');
        out
    } else {
        let opts = make_render_options(cli)?;
        renderer::render_transcript(&transcript, &opts)
    };

    Ok((transcript, rendered))
}

/// Processes a single file and outputs to stdout.
fn process_to_stdout(input: &Path, cli: &Cli) -> Result<(), Error> {
    if cli.dry_run {
        eprintln!("Would output {}", input.display());
        return Ok(());
    }

    let (transcript, rendered) = convert(input, cli)?;
    print!("{rendered}");
    if !cli.quiet {
        eprintln!(
            "{}: {}",
            input.display(),
            renderer::summary_line(&transcript)
        );
    }
    Ok(())
}

/// Processes a single file and writes to the output directory.
fn process_file(input: &Path, out_dir: &Path, cli: &Cli) -> Result<(), Error> {
    let extension = if cli.json { "json" } else { "html" };
    let out_name = input.file_stem().context(InvalidFilenameSnafu)?;
    let out_path = out_dir.join(format!("{}.{extension}", out_name.to_string_lossy()));

    // Handle dry-run mode
    if cli.dry_run {
        eprintln!("Would write {}", out_path.display());
        return Ok(());
    }

    // Check if output exists and handle overwrite
    if out_path.exists() && !cli.force {
        eprintln!(
            "Skipping {} (already exists, use --force to overwrite)",
            out_path.display()
        );
        return Ok(());
    }

    let (transcript, rendered) = convert(input, cli)?;

    std::fs::write(&out_path, &rendered).context(WriteFileSnafu { path: &out_path })?;

    if !cli.quiet {
        eprintln!(
            "Wrote {} ({})",
            out_path.display(),
            renderer::summary_line(&transcript)
        );
    }
    Ok(())
}
