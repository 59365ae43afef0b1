//! Error codes for the Almanac diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Compact notation syntax errors
//! - `E1xx` - Document (YAML/JSON) errors
//! - `E2xx` - Validation errors
//! - `E3xx` - Quick event errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Compact Notation Errors (E0xx)
    // =========================================================================
    /// Unterminated quoted cell.
    ///
    /// A table cell opened a double quote that is never closed on its line.
    E001,

    /// Unrecognized line.
    ///
    /// A line is neither `key: value`, a `key[N]:` array header, a comment,
    /// nor part of an indented block.
    E002,

    /// Missing table rows.
    ///
    /// An array header announced more rows than the document contains.
    E003,

    /// Empty document.
    ///
    /// The compact document contains no keys.
    E004,

    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Invalid YAML.
    E100,

    /// Invalid JSON.
    E101,

    /// Invalid document structure.
    ///
    /// The document parsed but a field has the wrong shape, such as a list
    /// where a mapping was expected.
    E102,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Missing events.
    ///
    /// A timeline needs at least one event.
    E200,

    /// Invalid date.
    ///
    /// Dates are `YYYY-MM-DD`, optionally followed by `THH:MM[:SS]` or a
    /// space and `HH:MM[:SS]`.
    E201,

    /// Text length out of range.
    ///
    /// A title, subtitle, description or category is empty or too long.
    E202,

    /// End date before start date.
    E203,

    /// Invalid color.
    ///
    /// Event colors are six-digit hex codes such as `#3b82f6`.
    E204,

    /// Progress out of range.
    ///
    /// Progress is a percentage between 0 and 100.
    E205,

    /// Output setting out of range.
    ///
    /// Width and height must be 100..=8000, fps 1..=120 and duration
    /// 0.5..=60 seconds.
    E206,

    /// Unknown style.
    E207,

    /// Unknown time scale.
    E208,

    // =========================================================================
    // Quick Event Errors (E3xx)
    // =========================================================================
    /// Malformed quick event.
    ///
    /// Quick events are written as `DATE:TITLE`.
    E300,

    /// Empty quick event title.
    E301,
}

impl ErrorCode {
    /// Returns the code as a static string such as `"E203"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short lowercase description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated quoted cell",
            ErrorCode::E002 => "unrecognized line",
            ErrorCode::E003 => "missing table rows",
            ErrorCode::E004 => "empty document",
            ErrorCode::E100 => "invalid yaml",
            ErrorCode::E101 => "invalid json",
            ErrorCode::E102 => "invalid document structure",
            ErrorCode::E200 => "missing events",
            ErrorCode::E201 => "invalid date",
            ErrorCode::E202 => "text length out of range",
            ErrorCode::E203 => "end date before start date",
            ErrorCode::E204 => "invalid color",
            ErrorCode::E205 => "progress out of range",
            ErrorCode::E206 => "output setting out of range",
            ErrorCode::E207 => "unknown style",
            ErrorCode::E208 => "unknown time scale",
            ErrorCode::E300 => "malformed quick event",
            ErrorCode::E301 => "empty quick event title",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
