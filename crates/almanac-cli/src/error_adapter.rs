//! Error adapter for converting AlmanacError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`almanac_parser::error::ParseError`] usually carries every problem
//! found in a document; each diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use almanac::AlmanacError;
use almanac_parser::error::{Diagnostic, Severity};

/// Adapter for a single almanac diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source text the diagnostic's spans index into
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self.diag.severity() {
            Severity::Error => Some(MietteSeverity::Error),
            Severity::Warning => Some(MietteSeverity::Warning),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`AlmanacError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a AlmanacError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            AlmanacError::Io(_) => "almanac::io",
            AlmanacError::Parse { .. } => return None,
            AlmanacError::Config(_) => "almanac::config",
            AlmanacError::Export(_) => "almanac::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            AlmanacError::Config(_) => Some(Box::new(
                "check the --config path or the [layout] and [animation] tables",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: almanac_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`AlmanacError`] into a list of reportable errors.
///
/// [`AlmanacError::Parse`] yields one [`Reportable`] per diagnostic; every
/// other variant yields a single one.
pub fn to_reportables(err: &AlmanacError) -> Vec<Reportable<'_>> {
    match err {
        AlmanacError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use miette::{GraphicalReportHandler, GraphicalTheme};

    use almanac_parser::{Format, Span, error::ErrorCode, parse};

    use super::*;

    const REVERSED_AND_BAD_COLOR: &str = "\
title: Roadmap
milestones:
  - date: 2024-02-01
    end_date: 2024-01-01
    title: Backwards
  - date: 2024-03-01
    title: Beta
    color: blue
";

    fn parse_failure(source: &str, format: Format) -> AlmanacError {
        let err = parse(source, format).unwrap_err();
        AlmanacError::new_parse_error(err, source)
    }

    fn offset_of(source: &str, needle: &str) -> usize {
        Span::locate(source, needle).unwrap().start()
    }

    #[test]
    fn test_each_document_problem_is_reportable() {
        let err = parse_failure(REVERSED_AND_BAD_COLOR, Format::Yaml);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);

        let codes: Vec<String> = reportables
            .iter()
            .map(|r| r.code().unwrap().to_string())
            .collect();
        assert_eq!(codes, [ErrorCode::E203.to_string(), ErrorCode::E204.to_string()]);
        assert!(reportables.iter().all(|r| r.severity() == Some(MietteSeverity::Error)));
        assert_eq!(reportables[1].to_string(), "invalid color `blue`");
    }

    #[test]
    fn test_reversed_range_labels_point_into_source() {
        let err = parse_failure(REVERSED_AND_BAD_COLOR, Format::Yaml);
        let reportables = to_reportables(&err);
        let Reportable::Diagnostic(reversed) = &reportables[0] else {
            panic!("Expected Diagnostic");
        };

        let labels: Vec<_> = reversed.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);

        assert_eq!(labels[0].label(), Some("ends here"));
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), offset_of(REVERSED_AND_BAD_COLOR, "2024-01-01"));
        assert_eq!(labels[0].len(), "2024-01-01".len());

        assert_eq!(labels[1].label(), Some("starts here"));
        assert!(!labels[1].primary());
        assert_eq!(labels[1].offset(), offset_of(REVERSED_AND_BAD_COLOR, "2024-02-01"));

        assert_eq!(
            reversed.help().unwrap().to_string(),
            "swap the dates or remove `end_date`"
        );
    }

    #[test]
    fn test_compact_warning_keeps_warning_severity() {
        // The surplus cell only warns; the missing second row fails the parse
        let source = "title: T\nmilestones[2]: date title\n2024-01-15 Launch surplus\n";
        let err = parse_failure(source, Format::Compact);

        let reportables = to_reportables(&err);
        let severities: Vec<_> = reportables.iter().map(|r| r.severity()).collect();
        assert!(severities.contains(&Some(MietteSeverity::Warning)));
        assert!(severities.contains(&Some(MietteSeverity::Error)));

        let missing = reportables
            .iter()
            .find(|r| r.code().is_some_and(|c| c.to_string() == ErrorCode::E003.to_string()))
            .unwrap();
        let label = missing.labels().unwrap().next().unwrap();
        assert_eq!(label.offset(), offset_of(source, "milestones[2]"));
    }

    #[test]
    fn test_rendered_report_shows_source_line() {
        let err = parse_failure(REVERSED_AND_BAD_COLOR, Format::Yaml);
        let reportables = to_reportables(&err);

        let mut rendered = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut rendered, &reportables[1])
            .unwrap();

        assert!(rendered.contains("color: blue"));
        assert!(rendered.contains("expected `#RRGGBB`"));
        assert!(rendered.contains("#3b82f6"));
    }

    #[test]
    fn test_config_error_has_code_and_help() {
        let err = AlmanacError::Config("no input file or quick events given".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        let Reportable::Error(e) = &reportables[0] else {
            panic!("Expected Error");
        };
        assert_eq!(
            e.to_string(),
            "Configuration error: no input file or quick events given"
        );
        assert_eq!(e.code().unwrap().to_string(), "almanac::config");
        assert!(e.help().unwrap().to_string().contains("--config"));
        assert!(e.source_code().is_none());
    }
}
