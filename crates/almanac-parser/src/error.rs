//! Diagnostics produced while reading timeline documents.
//!
//! Every problem found in a document becomes a [`Diagnostic`] with a
//! severity, an optional [`ErrorCode`], labeled source spans and help text.
//! Validation keeps going after the first problem, so a single
//! [`ParseError`] usually reports everything wrong with a document at once.
//!
//! # Example
//!
//! ```
//! # use almanac_parser::error::{Diagnostic, ErrorCode};
//! # use almanac_parser::Span;
//! let diag = Diagnostic::error("end date `2024-01-01` is before start date `2024-02-01`")
//!     .with_code(ErrorCode::E203)
//!     .with_label(Span::new(40..50), "ends here")
//!     .with_secondary_label(Span::new(20..30), "starts here")
//!     .with_help("swap the dates or remove `end_date`");
//! assert_eq!(diag.labels().len(), 2);
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
