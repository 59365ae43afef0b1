//! CLI logic for the Almanac timeline tool.
//!
//! This module contains the core CLI logic: loading the timeline, applying
//! command-line overrides and writing the layout or frame plan as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info, warn};
use serde::Serialize;

use almanac::{
    AlmanacError, Format, TimelineBuilder,
    animation::Frame,
    layout::Layout,
    timeline::Timeline,
};

/// Layout plus animation frames, as written by `--frames`.
#[derive(Serialize)]
struct FramePlan<'l, 'a> {
    layout: &'l Layout<'a>,
    frames: &'l [Frame<'a>],
}

/// Run the Almanac CLI application
///
/// Reads the input document or quick events, lays out the timeline and
/// writes the result as JSON to the output file.
///
/// # Errors
///
/// Returns `AlmanacError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing and validation errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), AlmanacError> {
    info!(
        input_path:? = args.input,
        output_path = args.output;
        "Processing timeline"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = TimelineBuilder::new(app_config);

    let timeline = apply_overrides(load_timeline(&builder, args)?, args);
    let layout = builder.layout(&timeline);

    let json = if args.frames {
        let frames = builder.animate(&timeline);
        builder.to_json(&FramePlan {
            layout: &layout,
            frames: &frames,
        })?
    } else {
        builder.to_json(&layout)?
    };

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}

fn load_timeline(builder: &TimelineBuilder, args: &Args) -> Result<Timeline, AlmanacError> {
    let Some(input) = &args.input else {
        if args.events.is_empty() {
            return Err(AlmanacError::Config(
                "no input file or quick events given".to_string(),
            ));
        }
        return builder.quick_timeline(&args.title, &args.events);
    };

    let source = fs::read_to_string(input)?;
    match args.format.or_else(|| Format::from_path(input)) {
        Some(format) => builder.parse(&source, format),
        None => {
            warn!(input_path = input; "Unknown file extension, detecting format");
            builder.parse_auto(&source)
        }
    }
}

fn apply_overrides(mut timeline: Timeline, args: &Args) -> Timeline {
    if let Some(style) = args.style {
        debug!(style:%; "Overriding timeline style");
        timeline = timeline.with_style(style);
    }
    if let Some(scale) = args.scale {
        debug!(scale:%; "Overriding time scale");
        timeline = timeline.with_granularity(scale);
    }
    timeline
}
