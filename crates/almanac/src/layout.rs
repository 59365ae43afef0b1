//! Layout calculation.
//!
//! [`LayoutEngine`] turns an immutable [`Timeline`] into a [`Layout`]: the
//! pixel-space rectangles, anchor points and ticks a renderer paints
//! verbatim. Each [`Style`] has its own placement strategy behind the
//! [`StyleEngine`] trait; dispatch happens once per call on the style enum.
//!
//! Every call rebuilds the layout from scratch, so identical input always
//! yields identical output.

mod engines;

use chrono::NaiveDateTime;
use log::{debug, info, trace};
use serde::Serialize;

use almanac_core::{
    geometry::{Insets, Point, Rect},
    timeline::{DisplaySettings, Event, Style, Timeline},
};

use crate::{
    config::LayoutConfig,
    position::date_to_position,
    scale::{ScaleInfo, calculate_scale},
};

/// Shape a renderer should draw for an event marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Bar,
    Diamond,
    Card,
}

/// A scale tick mapped onto the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    major: bool,
}

impl Tick {
    pub fn position(&self) -> Point {
        self.position
    }

    /// Unit label; only major ticks carry one
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_major(&self) -> bool {
        self.major
    }
}

/// A roadmap swimlane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    name: String,
    area: Rect,
}

impl Lane {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Band covering the lane label column and the chart
    pub fn area(&self) -> Rect {
        self.area
    }
}

/// Final placement of a single event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent<'a> {
    event: &'a Event,
    index: usize,
    marker: Rect,
    marker_shape: MarkerShape,
    label: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<Rect>,
    connector_start: Point,
    connector_end: Point,
    primary_side: bool,
    level: usize,
    row: usize,
}

impl<'a> PlacedEvent<'a> {
    fn new(event: &'a Event, index: usize, marker: Rect, marker_shape: MarkerShape, label: Rect) -> Self {
        let anchor = marker.center();
        Self {
            event,
            index,
            marker,
            marker_shape,
            label,
            description: None,
            progress: None,
            connector_start: anchor,
            connector_end: anchor,
            primary_side: true,
            level: 0,
            row: 0,
        }
    }

    fn with_description(mut self, description: Option<Rect>) -> Self {
        self.description = description;
        self
    }

    fn with_progress(mut self, progress: Option<Rect>) -> Self {
        self.progress = progress;
        self
    }

    fn with_connector(mut self, start: Point, end: Point) -> Self {
        self.connector_start = start;
        self.connector_end = end;
        self
    }

    fn with_primary_side(mut self, primary_side: bool) -> Self {
        self.primary_side = primary_side;
        self
    }

    fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    /// Moves every text box and the connector end by `offset`, leaving the
    /// marker in place.
    fn shift_text(mut self, offset: Point) -> Self {
        self.label = self.label.translate(offset);
        self.description = self.description.map(|d| d.translate(offset));
        self.connector_end = Point::new(
            self.connector_end.x() + offset.x(),
            self.connector_end.y() + offset.y(),
        );
        self
    }

    /// Moves the marker together with its text boxes by `offset`.
    fn shift_all(mut self, offset: Point) -> Self {
        self.marker = self.marker.translate(offset);
        self.progress = self.progress.map(|p| p.translate(offset));
        self.shift_text(offset)
    }

    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// Position of the event in the timeline's date-sorted event list
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn marker(&self) -> Rect {
        self.marker
    }

    pub fn marker_shape(&self) -> MarkerShape {
        self.marker_shape
    }

    pub fn label(&self) -> Rect {
        self.label
    }

    pub fn description(&self) -> Option<Rect> {
        self.description
    }

    /// Completed portion of a Gantt bar
    pub fn progress(&self) -> Option<Rect> {
        self.progress
    }

    pub fn connector_start(&self) -> Point {
        self.connector_start
    }

    pub fn connector_end(&self) -> Point {
        self.connector_end
    }

    /// Which side of the axis the text sits on.
    ///
    /// `true` means above the axis for the horizontal style and left of it
    /// for the vertical style. The other styles always report `true`.
    pub fn primary_side(&self) -> bool {
        self.primary_side
    }

    /// Stacking level assigned by collision resolution
    pub fn level(&self) -> usize {
        self.level
    }

    /// Gantt row, roadmap lane or infographic grid row; 0 elsewhere
    pub fn row(&self) -> usize {
        self.row
    }
}

/// The complete layout of a timeline for one style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout<'a> {
    style: Style,
    width: f32,
    height: f32,
    scale: ScaleInfo,
    title_area: Rect,
    timeline_area: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    legend_area: Option<Rect>,
    axis_start: Point,
    axis_end: Point,
    ticks: Vec<Tick>,
    lanes: Vec<Lane>,
    placed_events: Vec<PlacedEvent<'a>>,
}

impl<'a> Layout<'a> {
    pub fn style(&self) -> Style {
        self.style
    }

    /// Canvas width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scale(&self) -> &ScaleInfo {
        &self.scale
    }

    /// Title region; zero-sized when titles are hidden
    pub fn title_area(&self) -> Rect {
        self.title_area
    }

    pub fn timeline_area(&self) -> Rect {
        self.timeline_area
    }

    /// Gantt label column or roadmap lane label column
    pub fn legend_area(&self) -> Option<Rect> {
        self.legend_area
    }

    pub fn axis_start(&self) -> Point {
        self.axis_start
    }

    pub fn axis_end(&self) -> Point {
        self.axis_end
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn placed_events(&self) -> &[PlacedEvent<'a>] {
        &self.placed_events
    }
}

/// Style-specific part of a layout produced by a [`StyleEngine`].
#[derive(Debug, Default)]
pub struct Placement<'a> {
    timeline_area: Rect,
    legend_area: Option<Rect>,
    axis_start: Point,
    axis_end: Point,
    ticks: Vec<Tick>,
    lanes: Vec<Lane>,
    placed_events: Vec<PlacedEvent<'a>>,
}

/// Resolved spacing values for one layout call.
///
/// Compact mode has already been applied.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Metrics {
    pub margin: f32,
    pub title_height: f32,
    pub region_gap: f32,
    pub marker_size: f32,
    pub label_height: f32,
    pub description_height: f32,
    pub min_gap: f32,
    pub max_levels: usize,
    pub level_spacing: f32,
    pub label_width: f32,
    pub density_label_width: f32,
    pub description_density_limit: f32,
    pub min_card_height: f32,
}

impl Metrics {
    fn new(config: &LayoutConfig, display: &DisplaySettings) -> Self {
        let factor = if display.compact() {
            config.compact_factor()
        } else {
            1.0
        };
        Self {
            margin: config.margin(),
            title_height: if display.show_title() {
                config.title_height()
            } else {
                0.0
            },
            region_gap: config.region_gap(),
            marker_size: config.marker_size(),
            label_height: config.label_height(),
            description_height: config.description_height(),
            min_gap: config.min_gap() * factor,
            max_levels: config.max_levels(),
            level_spacing: config.level_spacing() * factor,
            label_width: config.label_width(),
            density_label_width: config.density_label_width(),
            description_density_limit: config.description_density_limit(),
            min_card_height: config.min_card_height() * factor,
        }
    }
}

/// Everything a [`StyleEngine`] reads during placement.
pub struct Context<'a, 's> {
    timeline: &'a Timeline,
    scale: &'s ScaleInfo,
    metrics: Metrics,
    width: f32,
    height: f32,
}

impl<'a> Context<'a, '_> {
    pub fn timeline(&self) -> &'a Timeline {
        self.timeline
    }

    pub fn events(&self) -> &'a [Event] {
        self.timeline.events()
    }

    pub fn scale(&self) -> &ScaleInfo {
        self.scale
    }

    pub(crate) fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn show_descriptions(&self) -> bool {
        self.timeline.display().show_descriptions()
    }

    /// Top of the first region below the title
    pub fn content_top(&self) -> f32 {
        self.metrics.margin + self.metrics.title_height + self.metrics.region_gap
    }

    /// Maps a date onto an axis of `length` pixels starting at `origin`
    pub fn position(&self, date: NaiveDateTime, origin: f32, length: f32) -> f32 {
        origin + date_to_position(date, self.scale, length)
    }

    /// Maps every scale tick onto an axis; `place` turns an axis offset into
    /// a canvas point.
    pub fn ticks(&self, origin: f32, length: f32, place: impl Fn(f32) -> Point) -> Vec<Tick> {
        let majors = self.scale.labeled_ticks().map(|(date, label)| Tick {
            position: place(self.position(date, origin, length)),
            label: Some(label.to_string()),
            major: true,
        });
        let minors = self.scale.minor_ticks().iter().map(|&date| Tick {
            position: place(self.position(date, origin, length)),
            label: None,
            major: false,
        });
        majors.chain(minors).collect()
    }
}

/// A placement strategy for one [`Style`].
pub trait StyleEngine {
    /// Height of the title region when titles are shown
    fn title_height(&self, config: &LayoutConfig) -> f32 {
        config.title_height()
    }

    /// Places every event of the timeline
    fn place<'a>(&self, ctx: &Context<'a, '_>) -> Placement<'a>;
}

/// Computes layouts for timelines.
///
/// # Examples
///
/// ```
/// # use almanac::{config::LayoutConfig, layout::LayoutEngine};
/// # use almanac::timeline::{Event, Style, Timeline};
/// use chrono::NaiveDate;
///
/// let day = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let timeline = Timeline::new(
///     "Launch",
///     vec![Event::new(day(1), "Kickoff"), Event::new(day(6), "Release")],
/// )
/// .with_style(Style::Vertical);
///
/// let layout = LayoutEngine::new(LayoutConfig::default()).calculate(&timeline);
/// assert_eq!(layout.placed_events().len(), 2);
/// assert!(layout.placed_events()[0].primary_side());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Computes the scale of a timeline's date range.
    ///
    /// A timeline without events gets a scale around the Unix epoch.
    pub fn scale_for(&self, timeline: &Timeline) -> ScaleInfo {
        let epoch = NaiveDateTime::default();
        let (start, end) = timeline.date_range().unwrap_or((epoch, epoch));
        calculate_scale(start, end, timeline.granularity(), self.config.padding_units())
    }

    /// Lays out a timeline in its configured style.
    pub fn calculate<'a>(&self, timeline: &'a Timeline) -> Layout<'a> {
        let scale = self.scale_for(timeline);
        self.calculate_with_scale(timeline, scale)
    }

    /// Lays out a timeline against a precomputed scale.
    pub fn calculate_with_scale<'a>(&self, timeline: &'a Timeline, scale: ScaleInfo) -> Layout<'a> {
        let style = timeline.style();
        info!(style:%, events = timeline.events().len(); "Calculating layout");

        let engine: &dyn StyleEngine = match style {
            Style::Horizontal => &engines::Horizontal,
            Style::Vertical => &engines::Vertical,
            Style::Gantt => &engines::Gantt,
            Style::Roadmap => &engines::Roadmap,
            Style::Infographic => &engines::Infographic,
        };

        let display = timeline.display();
        let mut metrics = Metrics::new(&self.config, display);
        if display.show_title() {
            metrics.title_height = engine.title_height(&self.config);
        }

        let width = timeline.output().width() as f32;
        let height = timeline.output().height() as f32;
        let title_area = if display.show_title() {
            Rect::new(0.0, 0.0, width, height)
                .inset(Insets::uniform(metrics.margin))
                .with_height(metrics.title_height)
        } else {
            Rect::default()
        };

        let ctx = Context {
            timeline,
            scale: &scale,
            metrics,
            width,
            height,
        };
        let placement = engine.place(&ctx);

        debug!(
            placed = placement.placed_events.len(),
            ticks = placement.ticks.len(),
            lanes = placement.lanes.len();
            "Layout calculated"
        );
        trace!(timeline_area:? = placement.timeline_area; "Layout regions");

        Layout {
            style,
            width,
            height,
            scale,
            title_area,
            timeline_area: placement.timeline_area,
            legend_area: placement.legend_area,
            axis_start: placement.axis_start,
            axis_end: placement.axis_end,
            ticks: placement.ticks,
            lanes: placement.lanes,
            placed_events: placement.placed_events,
        }
    }
}
