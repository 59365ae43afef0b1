//! Accumulates diagnostics so validation can report every problem at once.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics during validation.
///
/// Warnings are logged when the collection finishes successfully, since a
/// successful parse has no other channel to surface them.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Moves every diagnostic out of a failed sub-parse into this collector
    pub fn extend(&mut self, err: ParseError) {
        for diagnostic in err.into_diagnostics() {
            self.emit(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Number of error-severity diagnostics emitted so far
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Finishes collection.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] holding every diagnostic, warnings
    /// included, if at least one error was emitted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors() {
            return Err(ParseError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!(diagnostic:%; "Document accepted with warning");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_empty_is_ok() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_collector_warnings_only_is_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("extra cell ignored"));

        assert!(!collector.has_errors());
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(
            Diagnostic::error("invalid color")
                .with_code(ErrorCode::E204)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("extra cell ignored"));
        collector.emit(Diagnostic::error("progress out of range").with_code(ErrorCode::E205));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.diagnostics()[0].message(), "invalid color");
    }

    #[test]
    fn test_collector_extend() {
        let mut collector = DiagnosticCollector::new();
        collector.extend(ParseError::from(vec![
            Diagnostic::error("a"),
            Diagnostic::error("b"),
        ]));

        assert!(collector.has_errors());
        assert_eq!(collector.finish().unwrap_err().diagnostics().len(), 2);
    }
}
