//! Command-line argument definitions for the Almanac CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input document or quick events,
//! override the style and time scale, and control output, configuration and
//! logging.

use clap::Parser;

use almanac::{Format, Granularity, timeline::Style};

/// Command-line arguments for the Almanac timeline tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input timeline document
    #[arg(help = "Path to the input file (.yaml, .yml, .json or .toon)")]
    pub input: Option<String>,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input format; detected from the file extension when omitted
    #[arg(long)]
    pub format: Option<Format>,

    /// Override the document's timeline style
    #[arg(long)]
    pub style: Option<Style>,

    /// Override the document's time scale
    #[arg(long)]
    pub scale: Option<Granularity>,

    /// Quick event as DATE:TITLE, used instead of an input file
    #[arg(short = 'e', long = "event", conflicts_with = "input")]
    pub events: Vec<String>,

    /// Title of a timeline built from quick events
    #[arg(long, default_value = "Timeline")]
    pub title: String,

    /// Write the animation frame plan instead of a single layout
    #[arg(long)]
    pub frames: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
