//! # Almanac Parser
//!
//! Reads timeline documents and turns them into validated
//! [`Timeline`] values. Three input formats share one schema:
//!
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//! - the compact tabular notation (`.toon`)
//!
//! ## Usage
//!
//! ```
//! # use almanac_parser::{parse, Format, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//! title: Product Launch
//! style: roadmap
//! milestones:
//!   - date: 2024-01-15
//!     title: Kickoff
//!     category: Planning
//!   - date: 2024-04-01
//!     title: Beta
//! "#;
//!
//!     let timeline = parse(source, Format::Yaml)?;
//!     assert_eq!(timeline.events().len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;

mod compact;
mod dates;
mod document;
mod quick;
mod span;
mod validate;

pub use quick::parse_quick_events;
pub use span::Span;

use std::{fmt, path::Path, str::FromStr};

use log::{debug, info};

use almanac_core::timeline::Timeline;

use error::ParseError;

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
    /// The compact tabular notation
    Compact,
}

impl Format {
    /// Picks a format from a file extension, case-insensitively.
    ///
    /// Returns `None` for unknown or missing extensions; such files go
    /// through [`parse_auto`].
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toon" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "compact" | "toon" => Ok(Self::Compact),
            _ => Err("Unsupported document format"),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// Parses and validates a document in the given format.
///
/// # Errors
///
/// Returns a [`ParseError`] for syntax errors, structural mismatches and
/// every validation problem found in the document.
pub fn parse(source: &str, format: Format) -> Result<Timeline, ParseError> {
    info!(format:%; "Parsing timeline document");

    let raw = match format {
        Format::Yaml => document::from_yaml(source)?,
        Format::Json => document::from_json(source)?,
        Format::Compact => document::from_compact(source)?,
    };

    validate::validate(raw, source)
}

/// Parses a document whose format is unknown.
///
/// Tries YAML, then JSON, then the compact notation, and validates the
/// first document that reads successfully.
///
/// # Errors
///
/// When no format can read the document, the YAML error is returned.
pub fn parse_auto(source: &str) -> Result<Timeline, ParseError> {
    let raw = match document::from_yaml(source) {
        Ok(raw) => raw,
        Err(yaml_err) => {
            debug!("Document is not YAML, trying other formats");
            document::from_json(source)
                .or_else(|_| document::from_compact(source))
                .map_err(|_| yaml_err)?
        }
    };

    validate::validate(raw, source)
}

#[cfg(test)]
mod tests {
    use almanac_core::timeline::Style;

    use super::*;

    const YAML: &str = r#"
title: Release Plan
style: gantt
milestones:
  - date: 2024-01-15
    title: Project Start
    description: Kickoff meeting
    highlight: true
  - date: 2024-06-01
    title: Launch
"#;

    const COMPACT: &str = r#"
title: Release Plan
style: gantt
milestones[2]: date title description highlight
2024-01-15 "Project Start" "Kickoff meeting" true
2024-06-01 Launch null false
"#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path("plan.YAML"), Some(Format::Yaml));
        assert_eq!(Format::from_path("plan.yml"), Some(Format::Yaml));
        assert_eq!(Format::from_path("dir/plan.json"), Some(Format::Json));
        assert_eq!(Format::from_path("plan.toon"), Some(Format::Compact));
        assert_eq!(Format::from_path("plan.txt"), None);
        assert_eq!(Format::from_path("plan"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("toon".parse(), Ok(Format::Compact));
        assert_eq!("JSON".parse(), Ok(Format::Json));
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_compact_matches_yaml() {
        let from_yaml = parse(YAML, Format::Yaml).unwrap();
        let from_compact = parse(COMPACT, Format::Compact).unwrap();

        assert_eq!(from_yaml, from_compact);
        assert_eq!(from_yaml.style(), Style::Gantt);
    }

    #[test]
    fn test_json_document() {
        let source = r#"{"title": "J", "milestones": [{"date": "2024-02-01", "title": "A"}]}"#;
        let timeline = parse(source, Format::Json).unwrap();
        assert_eq!(timeline.title(), "J");
    }

    #[test]
    fn test_parse_auto() {
        assert!(parse_auto(YAML).is_ok());
        assert!(parse_auto(COMPACT).is_ok());
    }

    #[test]
    fn test_parse_auto_reports_yaml_error() {
        let err = parse_auto("{ not: [valid\n").unwrap_err();
        assert!(err.has_code(error::ErrorCode::E100));
    }
}
