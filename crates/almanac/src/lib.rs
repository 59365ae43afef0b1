//! Almanac - time-scale normalization and collision-free timeline layout.
//!
//! Parsing, scale calculation, layout and animation planning for
//! timelines in five styles: horizontal, vertical, Gantt, roadmap and
//! infographic. The output is pure data, ready for any renderer.

pub mod animation;
pub mod collision;
pub mod config;
pub mod layout;
pub mod position;
pub mod scale;

mod error;

pub use almanac_core::{color, geometry, granularity::Granularity, timeline};
pub use almanac_parser::Format;

pub use error::AlmanacError;

use log::{debug, info, trace};
use serde::Serialize;

use almanac_core::timeline::{Event, Timeline};

use animation::{Animator, Frame};
use config::AppConfig;
use layout::{Layout, LayoutEngine};

/// Builder for parsing and laying out timelines.
///
/// # Examples
///
/// ```
/// use almanac::{Format, TimelineBuilder, config::AppConfig};
///
/// let source = r#"
/// title: Launch
/// style: gantt
/// milestones:
///   - date: 2024-01-15
///     title: Kickoff
///     end_date: 2024-02-15
///     progress: 40
///   - date: 2024-04-01
///     title: Release
/// "#;
///
/// let builder = TimelineBuilder::new(AppConfig::default());
/// let timeline = builder.parse(source, Format::Yaml).expect("Failed to parse");
/// let layout = builder.layout(&timeline);
///
/// assert_eq!(layout.placed_events().len(), 2);
/// let json = builder.to_json(&layout).expect("Failed to export");
/// assert!(json.contains("\"style\": \"gantt\""));
/// ```
#[derive(Default)]
pub struct TimelineBuilder {
    config: AppConfig,
}

impl TimelineBuilder {
    /// Create a new timeline builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a document in a known format into a validated timeline.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::Parse` carrying every diagnostic found in the
    /// document together with the source text.
    pub fn parse(&self, source: &str, format: Format) -> Result<Timeline, AlmanacError> {
        info!(format:%; "Parsing timeline");

        let timeline = almanac_parser::parse(source, format)
            .map_err(|err| AlmanacError::new_parse_error(err, source))?;

        debug!(events = timeline.events().len(); "Timeline parsed successfully");
        trace!(timeline:?; "Parsed timeline");

        Ok(timeline)
    }

    /// Parse a document whose format is unknown.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::Parse` when no format reads the document.
    pub fn parse_auto(&self, source: &str) -> Result<Timeline, AlmanacError> {
        info!("Parsing timeline with format detection");

        let timeline = almanac_parser::parse_auto(source)
            .map_err(|err| AlmanacError::new_parse_error(err, source))?;

        debug!(events = timeline.events().len(); "Timeline parsed successfully");
        Ok(timeline)
    }

    /// Build a timeline from `DATE:TITLE` quick events.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::Parse` for malformed entries; the attached
    /// source is the entries joined by newlines.
    pub fn quick_timeline<S: AsRef<str>>(
        &self,
        title: &str,
        entries: &[S],
    ) -> Result<Timeline, AlmanacError> {
        let events: Vec<Event> = almanac_parser::parse_quick_events(entries).map_err(|err| {
            let joined: Vec<&str> = entries.iter().map(AsRef::as_ref).collect();
            AlmanacError::new_parse_error(err, joined.join("\n"))
        })?;

        info!(events = events.len(); "Built timeline from quick events");
        Ok(Timeline::new(title, events))
    }

    /// Lay out a timeline in its configured style.
    pub fn layout<'a>(&self, timeline: &'a Timeline) -> Layout<'a> {
        self.engine().calculate(timeline)
    }

    /// Plan every animation frame of a timeline.
    pub fn animate<'a>(&self, timeline: &'a Timeline) -> Vec<Frame<'a>> {
        self.animator(timeline).render_all(|current, total| {
            trace!(current, total; "Frame planned");
        })
    }

    /// Create an animator for lazy frame planning.
    pub fn animator<'a>(&self, timeline: &'a Timeline) -> Animator<'a> {
        Animator::new(timeline, self.engine(), *self.config.animation())
    }

    /// Serialize any layout artifact as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::Export` if serialization fails.
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, AlmanacError> {
        let json = serde_json::to_string_pretty(value)?;
        debug!(bytes = json.len(); "Exported JSON");
        Ok(json)
    }

    fn engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.config.layout().clone())
    }
}
