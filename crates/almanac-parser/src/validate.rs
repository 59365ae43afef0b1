//! Validation of raw documents into [`Timeline`] values.
//!
//! All checks run to completion so one error report lists every problem in
//! the document. Reversed event ranges are rejected here; layout never sees
//! an end date before its start date.

use std::ops::RangeInclusive;

use chrono::NaiveDateTime;
use log::{debug, trace};

use almanac_core::{
    color::Color,
    granularity::Granularity,
    timeline::{DisplaySettings, Event, OutputSettings, Style, Timeline},
};

use crate::{
    dates::{self, DATE_HELP},
    document::{RawEvent, RawOutput, RawTimeline},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

const TITLE_LEN: RangeInclusive<usize> = 1..=200;
const SUBTITLE_MAX: usize = 300;
const DESCRIPTION_MAX: usize = 500;
const CATEGORY_MAX: usize = 50;
const DIMENSION_RANGE: RangeInclusive<i64> = 100..=8000;
const FPS_RANGE: RangeInclusive<i64> = 1..=120;
const DURATION_RANGE: RangeInclusive<f64> = 0.5..=60.0;
const PROGRESS_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Validates a raw document against its source text.
///
/// `source` is only used to locate offending values for diagnostic labels.
pub(crate) fn validate(raw: RawTimeline, source: &str) -> Result<Timeline, ParseError> {
    let mut validator = Validator {
        source,
        collector: DiagnosticCollector::new(),
    };

    validator.check_text("title", &raw.title, TITLE_LEN);
    if let Some(subtitle) = &raw.subtitle {
        validator.check_text("subtitle", subtitle, 0..=SUBTITLE_MAX);
    }

    let granularity = validator.granularity(raw.scale.as_deref());
    let style = validator.style(raw.style.as_deref());
    let output = validator.output(raw.output.unwrap_or_default());

    let raw_events = raw.milestones.unwrap_or_default();
    if raw_events.is_empty() {
        validator.collector.emit(
            Diagnostic::error("timeline has no events")
                .with_code(ErrorCode::E200)
                .with_help("add at least one entry under `milestones`"),
        );
    }

    let events: Vec<Event> = raw_events
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw_event)| validator.event(index, raw_event))
        .collect();

    validator.collector.finish()?;

    let defaults = DisplaySettings::default();
    let display = defaults
        .with_show_title(raw.show_title.unwrap_or(defaults.show_title()))
        .with_show_dates(raw.show_dates.unwrap_or(defaults.show_dates()))
        .with_show_descriptions(
            raw.show_descriptions
                .unwrap_or(defaults.show_descriptions()),
        )
        .with_compact(raw.compact_mode.unwrap_or(defaults.compact()));

    let mut timeline = Timeline::new(raw.title, events)
        .with_granularity(granularity)
        .with_style(style)
        .with_output(output)
        .with_display(display);
    if let Some(subtitle) = raw.subtitle {
        timeline = timeline.with_subtitle(subtitle);
    }
    if let Some(categories) = raw.categories {
        timeline = timeline.with_categories(categories);
    }

    debug!(
        events = timeline.events().len(),
        style:% = timeline.style(),
        scale:% = timeline.granularity();
        "Timeline validated"
    );
    trace!(timeline:?; "Validated timeline");

    Ok(timeline)
}

struct Validator<'a> {
    source: &'a str,
    collector: DiagnosticCollector,
}

impl Validator<'_> {
    fn locate(&self, needle: &str) -> Option<Span> {
        Span::locate(self.source, needle)
    }

    fn check_text(&mut self, field: &str, value: &str, allowed: RangeInclusive<usize>) {
        let length = value.chars().count();
        if allowed.contains(&length) {
            return;
        }

        let message = if length < *allowed.start() {
            format!("`{field}` must not be empty")
        } else {
            format!(
                "`{field}` is {length} characters long; the limit is {}",
                allowed.end()
            )
        };
        let span = self.locate(value);
        self.collector.emit(
            Diagnostic::error(message)
                .with_code(ErrorCode::E202)
                .with_optional_label(span, "this text"),
        );
    }

    fn granularity(&mut self, scale: Option<&str>) -> Granularity {
        let Some(scale) = scale else {
            return Granularity::default();
        };
        scale.parse().unwrap_or_else(|_| {
            let span = self.locate(scale);
            self.collector.emit(
                Diagnostic::error(format!("unknown time scale `{scale}`"))
                    .with_code(ErrorCode::E208)
                    .with_optional_label(span, "unknown scale")
                    .with_help("use hourly, daily, weekly, monthly, quarterly or yearly"),
            );
            Granularity::default()
        })
    }

    fn style(&mut self, style: Option<&str>) -> Style {
        let Some(style) = style else {
            return Style::default();
        };
        style.parse().unwrap_or_else(|_| {
            let span = self.locate(style);
            self.collector.emit(
                Diagnostic::error(format!("unknown style `{style}`"))
                    .with_code(ErrorCode::E207)
                    .with_optional_label(span, "unknown style")
                    .with_help("use horizontal, vertical, gantt, roadmap or infographic"),
            );
            Style::default()
        })
    }

    fn output(&mut self, raw: RawOutput) -> OutputSettings {
        let defaults = OutputSettings::default();
        let width = self.integer_setting("output.width", raw.width, DIMENSION_RANGE);
        let height = self.integer_setting("output.height", raw.height, DIMENSION_RANGE);
        let fps = self.integer_setting("output.fps", raw.fps, FPS_RANGE);

        let duration = match raw.duration {
            Some(duration) if DURATION_RANGE.contains(&duration) => duration as f32,
            Some(duration) => {
                self.emit_out_of_range("output.duration", &duration.to_string(), "0.5..=60");
                defaults.duration()
            }
            None => defaults.duration(),
        };

        OutputSettings::new(
            width.unwrap_or(defaults.width()),
            height.unwrap_or(defaults.height()),
        )
        .with_fps(fps.unwrap_or(defaults.fps()))
        .with_duration(duration)
    }

    fn integer_setting(
        &mut self,
        field: &str,
        value: Option<i64>,
        allowed: RangeInclusive<i64>,
    ) -> Option<u32> {
        let value = value?;
        if allowed.contains(&value) {
            return u32::try_from(value).ok();
        }
        let range = format!("{}..={}", allowed.start(), allowed.end());
        self.emit_out_of_range(field, &value.to_string(), &range);
        None
    }

    fn emit_out_of_range(&mut self, field: &str, value: &str, range: &str) {
        let span = self.locate(value);
        self.collector.emit(
            Diagnostic::error(format!("`{field}` is {value}, outside {range}"))
                .with_code(ErrorCode::E206)
                .with_optional_label(span, "out of range"),
        );
    }

    fn date(&mut self, index: usize, field: &str, text: &str) -> Option<NaiveDateTime> {
        match dates::parse_datetime(text) {
            Ok(date) => Some(date),
            Err(err) => {
                let span = self.locate(text);
                self.collector.emit(
                    Diagnostic::error(format!("event {}: {err}", index + 1))
                        .with_code(ErrorCode::E201)
                        .with_optional_label(span, format!("invalid `{field}`"))
                        .with_help(DATE_HELP),
                );
                None
            }
        }
    }

    /// Validates one event, returning it only if every field passed
    fn event(&mut self, index: usize, raw: RawEvent) -> Option<Event> {
        let errors_before = self.collector.error_count();

        self.check_text("title", &raw.title, TITLE_LEN);
        if let Some(description) = &raw.description {
            self.check_text("description", description, 0..=DESCRIPTION_MAX);
        }
        if let Some(category) = &raw.category {
            self.check_text("category", category, 0..=CATEGORY_MAX);
        }

        let date = self.date(index, "date", &raw.date);
        let end_date = raw
            .end_date
            .as_deref()
            .and_then(|text| self.date(index, "end_date", text));

        if let (Some(start), Some(end)) = (date, end_date) {
            if end < start {
                self.emit_reversed(index, &raw, start, end);
            }
        }

        let color = raw.color.as_deref().and_then(|text| self.color(text));

        if let Some(progress) = raw.progress {
            if !PROGRESS_RANGE.contains(&progress) {
                let span = self.locate(&progress.to_string());
                self.collector.emit(
                    Diagnostic::error(format!(
                        "event {}: progress {progress} is outside 0..=100",
                        index + 1
                    ))
                    .with_code(ErrorCode::E205)
                    .with_optional_label(span, "progress"),
                );
            }
        }

        let date = date?;
        if self.collector.error_count() > errors_before {
            return None;
        }

        let mut event = Event::new(date, raw.title).with_highlight(raw.highlight.unwrap_or(false));
        if let Some(description) = raw.description {
            event = event.with_description(description);
        }
        if let Some(end) = end_date {
            event = event.with_end_date(end);
        }
        if let Some(progress) = raw.progress {
            event = event.with_progress(progress as f32);
        }
        if let Some(category) = raw.category {
            event = event.with_category(category);
        }
        if let Some(color) = color {
            event = event.with_color(color);
        }
        if let Some(icon) = raw.icon {
            event = event.with_icon(icon);
        }
        Some(event)
    }

    fn emit_reversed(
        &mut self,
        index: usize,
        raw: &RawEvent,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) {
        let end_text = raw.end_date.as_deref().unwrap_or_default();
        let mut diagnostic = Diagnostic::error(format!(
            "event {}: end date {end} is before start date {start}",
            index + 1
        ))
        .with_code(ErrorCode::E203)
        .with_optional_label(self.locate(end_text), "ends here")
        .with_help("swap the dates or remove `end_date`");
        if let Some(span) = self.locate(&raw.date) {
            diagnostic = diagnostic.with_secondary_label(span, "starts here");
        }
        self.collector.emit(diagnostic);
    }

    fn color(&mut self, text: &str) -> Option<Color> {
        let is_hex = text.len() == 7
            && text.starts_with('#')
            && text[1..].chars().all(|c| c.is_ascii_hexdigit());
        let color = if is_hex { Color::new(text).ok() } else { None };

        if color.is_none() {
            let span = self.locate(text);
            self.collector.emit(
                Diagnostic::error(format!("invalid color `{text}`"))
                    .with_code(ErrorCode::E204)
                    .with_optional_label(span, "expected `#RRGGBB`")
                    .with_help("use a six-digit hex color such as `#3b82f6`"),
            );
        }
        color
    }
}
