//! Raw document schema shared by every input format.
//!
//! Documents are first deserialized into these loosely-typed records and
//! only then validated, so that range and format problems are reported as
//! diagnostics with error codes instead of opaque serde messages.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    compact,
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

fn default_title() -> String {
    "Timeline".to_string()
}

/// Top-level timeline document
#[derive(Debug, Deserialize)]
pub(crate) struct RawTimeline {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub scale: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, alias = "events")]
    pub milestones: Option<Vec<RawEvent>>,
    #[serde(default)]
    pub output: Option<RawOutput>,
    #[serde(default)]
    pub show_title: Option<bool>,
    #[serde(default)]
    pub show_dates: Option<bool>,
    #[serde(default)]
    pub show_descriptions: Option<bool>,
    #[serde(default)]
    pub compact_mode: Option<bool>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

/// A single event record
#[derive(Debug, Deserialize)]
pub(crate) struct RawEvent {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub highlight: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
}

/// Canvas and playback settings, range-checked during validation
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawOutput {
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub fps: Option<i64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

pub(crate) fn from_yaml(source: &str) -> Result<RawTimeline, ParseError> {
    serde_yaml::from_str(source).map_err(|err| {
        let span = err
            .location()
            .map(|location| Span::new(location.index()..location.index()));
        Diagnostic::error(format!("invalid YAML document: {err}"))
            .with_code(ErrorCode::E100)
            .with_optional_label(span, "here")
            .into()
    })
}

pub(crate) fn from_json(source: &str) -> Result<RawTimeline, ParseError> {
    serde_json::from_str(source).map_err(|err| {
        let code = if err.is_data() {
            ErrorCode::E102
        } else {
            ErrorCode::E101
        };
        let span = Span::from_line_column(source, err.line(), err.column());
        Diagnostic::error(format!("invalid JSON document: {err}"))
            .with_code(code)
            .with_label(span, "here")
            .into()
    })
}

pub(crate) fn from_compact(source: &str) -> Result<RawTimeline, ParseError> {
    let value: Value = compact::parse(source)?;
    serde_json::from_value(value).map_err(|err| {
        Diagnostic::error(format!("invalid document structure: {err}"))
            .with_code(ErrorCode::E102)
            .with_help("check that every event row has a `date` and a `title`")
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_defaults() {
        let raw = from_yaml("milestones:\n  - date: 2024-01-15\n    title: Start\n").unwrap();

        assert_eq!(raw.title, "Timeline");
        assert!(raw.style.is_none());
        let events = raw.milestones.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "2024-01-15");
    }

    #[test]
    fn test_events_alias() {
        let raw = from_json(r#"{"events": [{"date": "2024-01-15", "title": "Start"}]}"#).unwrap();
        assert_eq!(raw.milestones.map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_yaml_syntax_error_has_location() {
        let err = from_yaml("title: [unclosed\n").unwrap_err();
        let diag = &err.diagnostics()[0];

        assert_eq!(diag.code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_json_syntax_vs_structure() {
        let syntax = from_json("{\"title\": ").unwrap_err();
        assert!(syntax.has_code(ErrorCode::E101));

        let structure = from_json(r#"{"milestones": {"date": "2024-01-01"}}"#).unwrap_err();
        assert!(structure.has_code(ErrorCode::E102));
    }

    #[test]
    fn test_compact_structure_error() {
        let err = from_compact("milestones[1]: date\n2024-01-15\n").unwrap_err();
        assert!(err.has_code(ErrorCode::E102));
    }
}
