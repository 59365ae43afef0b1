//! The validated timeline model consumed by layout.
//!
//! A [`Timeline`] is produced once by the parser crate and treated as
//! immutable afterwards. Every layout pass and every animation frame reads
//! it without modification.
//!
//! # Overview
//!
//! - [`Event`] - A single dated milestone, optionally spanning a range
//! - [`Style`] - The chart topology used to lay the events out
//! - [`OutputSettings`] - Canvas dimensions and playback parameters
//! - [`DisplaySettings`] - Per-style display toggles
//! - [`Timeline`] - The complete, date-sorted timeline

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{color::Color, granularity::Granularity};

/// Lane name used for events without a category
pub const DEFAULT_LANE: &str = "default";

/// Chart topology of a timeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Events along a horizontal axis (default)
    #[default]
    Horizontal,
    /// Events alternating around a vertical axis
    Vertical,
    /// One bar per event on a shared time axis
    Gantt,
    /// Category swimlanes with cards
    Roadmap,
    /// A three-column snake grid ordered by sequence
    Infographic,
}

impl Style {
    /// All styles in declaration order
    pub const ALL: [Style; 5] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Gantt,
        Self::Roadmap,
        Self::Infographic,
    ];
}

impl FromStr for Style {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "gantt" => Ok(Self::Gantt),
            "roadmap" => Ok(Self::Roadmap),
            "infographic" => Ok(Self::Infographic),
            _ => Err("Unsupported timeline style"),
        }
    }
}

impl From<Style> for &'static str {
    fn from(val: Style) -> Self {
        match val {
            Style::Horizontal => "horizontal",
            Style::Vertical => "vertical",
            Style::Gantt => "gantt",
            Style::Roadmap => "roadmap",
            Style::Infographic => "infographic",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A dated milestone on the timeline.
///
/// Only `date` and `title` are required; everything else is attached with
/// the `with_*` builders.
///
/// # Examples
///
/// ```
/// # use almanac_core::timeline::Event;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let event = Event::new(start, "Kickoff")
///     .with_category("Planning")
///     .with_progress(40.0);
///
/// assert_eq!(event.title(), "Kickoff");
/// assert_eq!(event.category(), Some("Planning"));
/// assert_eq!(event.progress(), Some(40.0));
/// assert!(!event.highlight());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    date: NaiveDateTime,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    highlight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl Event {
    pub fn new(date: NaiveDateTime, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            description: None,
            end_date: None,
            progress: None,
            category: None,
            highlight: false,
            color: None,
            icon: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the end of the event's range. Callers guarantee `end_date >= date`.
    pub fn with_end_date(mut self, end_date: NaiveDateTime) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the completion percentage, clamped to `0..=100`
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress.clamp(0.0, 100.0));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.end_date
    }

    /// Returns the end date, or the start date for point events
    pub fn last_date(&self) -> NaiveDateTime {
        self.end_date.unwrap_or(self.date)
    }

    pub fn progress(&self) -> Option<f32> {
        self.progress
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the category, falling back to the default lane name
    pub fn lane_name(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_LANE)
    }

    pub fn highlight(&self) -> bool {
        self.highlight
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// Canvas dimensions and animation playback parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputSettings {
    width: u32,
    height: u32,
    fps: u32,
    duration: f32,
}

impl OutputSettings {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the animation duration in seconds
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Animation duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            duration: 5.0,
        }
    }
}

/// Display toggles shared by every style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplaySettings {
    show_title: bool,
    show_dates: bool,
    show_descriptions: bool,
    compact: bool,
}

impl DisplaySettings {
    pub fn with_show_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    pub fn with_show_dates(mut self, show: bool) -> Self {
        self.show_dates = show;
        self
    }

    pub fn with_show_descriptions(mut self, show: bool) -> Self {
        self.show_descriptions = show;
        self
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn show_title(&self) -> bool {
        self.show_title
    }

    pub fn show_dates(&self) -> bool {
        self.show_dates
    }

    pub fn show_descriptions(&self) -> bool {
        self.show_descriptions
    }

    pub fn compact(&self) -> bool {
        self.compact
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_title: true,
            show_dates: true,
            show_descriptions: true,
            compact: false,
        }
    }
}

/// A complete timeline with events sorted ascending by date.
///
/// Sorting is stable, so events sharing a date keep their input order.
///
/// # Examples
///
/// ```
/// # use almanac_core::timeline::{Event, Style, Timeline};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let timeline = Timeline::new(
///     "Launch",
///     vec![Event::new(day(20), "Release"), Event::new(day(1), "Beta")],
/// )
/// .with_style(Style::Gantt);
///
/// assert_eq!(timeline.events()[0].title(), "Beta");
/// assert_eq!(timeline.date_range(), Some((day(1), day(20))));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    granularity: Granularity,
    style: Style,
    events: Vec<Event>,
    output: OutputSettings,
    display: DisplaySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<String>>,
}

impl Timeline {
    pub fn new(title: impl Into<String>, mut events: Vec<Event>) -> Self {
        events.sort_by_key(Event::date);
        Self {
            title: title.into(),
            subtitle: None,
            granularity: Granularity::default(),
            style: Style::default(),
            events,
            output: OutputSettings::default(),
            display: DisplaySettings::default(),
            categories: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_output(mut self, output: OutputSettings) -> Self {
        self.output = output;
        self
    }

    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = display;
        self
    }

    /// Sets an explicit swimlane ordering for the roadmap style
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Events in ascending date order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn output(&self) -> &OutputSettings {
        &self.output
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    /// Earliest and latest date covered by the events, end dates included.
    ///
    /// Returns `None` when the timeline has no events.
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.events.first()?.date();
        let last = self
            .events
            .iter()
            .map(Event::last_date)
            .max()
            .unwrap_or(first);
        Some((first, last))
    }

    /// Swimlane names in display order.
    ///
    /// A non-empty explicit category list wins. Otherwise lanes follow the
    /// first appearance of each category, with uncategorized events counted
    /// under [`DEFAULT_LANE`]. A timeline without events has a single
    /// default lane.
    pub fn lanes(&self) -> Vec<String> {
        if let Some(categories) = self.categories.as_ref().filter(|c| !c.is_empty()) {
            return categories.clone();
        }

        let seen: IndexSet<&str> = self.events.iter().map(Event::lane_name).collect();
        if seen.is_empty() {
            return vec![DEFAULT_LANE.to_string()];
        }

        debug!(lanes = seen.len(); "Derived lanes from event categories");
        seen.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("gantt".parse(), Ok(Style::Gantt));
        assert_eq!("Roadmap".parse(), Ok(Style::Roadmap));
        assert!("spiral".parse::<Style>().is_err());
        for style in Style::ALL {
            assert_eq!(style.to_string().parse(), Ok(style));
        }
    }

    #[test]
    fn test_events_sorted_stably() {
        let timeline = Timeline::new(
            "t",
            vec![
                Event::new(day(2024, 5, 1), "late"),
                Event::new(day(2024, 1, 1), "first"),
                Event::new(day(2024, 1, 1), "second"),
            ],
        );
        let titles: Vec<_> = timeline.events().iter().map(Event::title).collect();
        assert_eq!(titles, ["first", "second", "late"]);
    }

    #[test]
    fn test_date_range_includes_end_dates() {
        let timeline = Timeline::new(
            "t",
            vec![
                Event::new(day(2024, 1, 1), "a").with_end_date(day(2024, 9, 1)),
                Event::new(day(2024, 3, 1), "b"),
            ],
        );
        assert_eq!(
            timeline.date_range(),
            Some((day(2024, 1, 1), day(2024, 9, 1)))
        );
    }

    #[test]
    fn test_date_range_empty() {
        assert_eq!(Timeline::new("t", Vec::new()).date_range(), None);
    }

    #[test]
    fn test_lanes_first_seen_with_default() {
        let timeline = Timeline::new(
            "t",
            vec![
                Event::new(day(2024, 1, 1), "a").with_category("Backend"),
                Event::new(day(2024, 2, 1), "b"),
                Event::new(day(2024, 3, 1), "c").with_category("Backend"),
            ],
        );
        assert_eq!(timeline.lanes(), ["Backend", "default"]);
    }

    #[test]
    fn test_lanes_explicit_order_wins() {
        let timeline = Timeline::new(
            "t",
            vec![Event::new(day(2024, 1, 1), "a").with_category("Backend")],
        )
        .with_categories(vec!["Frontend".to_string(), "Backend".to_string()]);
        assert_eq!(timeline.lanes(), ["Frontend", "Backend"]);
    }

    #[test]
    fn test_lanes_empty_explicit_list_ignored() {
        let timeline = Timeline::new(
            "t",
            vec![Event::new(day(2024, 1, 1), "a").with_category("Ops")],
        )
        .with_categories(Vec::new());
        assert_eq!(timeline.lanes(), ["Ops"]);
    }

    #[test]
    fn test_lanes_without_events() {
        assert_eq!(Timeline::new("t", Vec::new()).lanes(), ["default"]);
    }

    #[test]
    fn test_progress_clamped() {
        let event = Event::new(day(2024, 1, 1), "a").with_progress(150.0);
        assert_eq!(event.progress(), Some(100.0));
    }
}
