//! Quick `DATE:TITLE` events given on the command line.

use log::debug;

use almanac_core::timeline::Event;

use crate::{
    dates::{self, DATE_HELP},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Parses quick events written as `DATE:TITLE`.
///
/// The date may carry a time (`2024-01-15T09:30:Standup`): the split
/// happens at the first colon whose left-hand side is a valid date. Spans
/// in the returned diagnostics index into `inputs.join("\n")`.
///
/// # Errors
///
/// Returns a [`ParseError`] with one diagnostic per malformed input.
///
/// # Examples
///
/// ```
/// # use almanac_parser::parse_quick_events;
/// let events = parse_quick_events(&["2024-01-15:Kickoff", "2024-03-01T10:00:Demo day"]).unwrap();
/// assert_eq!(events[1].title(), "Demo day");
/// ```
pub fn parse_quick_events<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Event>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut events = Vec::with_capacity(inputs.len());
    let mut offset = 0;

    for (index, input) in inputs.iter().enumerate() {
        let input = input.as_ref();
        match parse_quick_event(input) {
            Ok(event) => events.push(event),
            Err(diagnostic) => {
                let span = Span::new(0..input.len()).offset_by(offset);
                collector.emit(
                    Diagnostic::error(format!("quick event {}: {}", index + 1, diagnostic.message()))
                        .with_code(diagnostic.code().unwrap_or(ErrorCode::E300))
                        .with_label(span, "in this event")
                        .with_help(diagnostic.help().unwrap_or(DATE_HELP)),
                );
            }
        }
        offset += input.len() + 1;
    }

    collector.finish()?;
    debug!(count = events.len(); "Parsed quick events");
    Ok(events)
}

fn parse_quick_event(input: &str) -> Result<Event, Diagnostic> {
    if !input.contains(':') {
        return Err(Diagnostic::error(format!("`{input}` is missing a `:`"))
            .with_code(ErrorCode::E300)
            .with_help("write quick events as `DATE:TITLE`, for example `2024-01-15:Kickoff`"));
    }

    let split = input
        .match_indices(':')
        .find_map(|(at, _)| dates::parse_datetime(&input[..at]).ok().map(|date| (date, at)));

    let Some((date, at)) = split else {
        return Err(Diagnostic::error(format!("`{input}` does not start with a date"))
            .with_code(ErrorCode::E300)
            .with_help(DATE_HELP));
    };

    let title = input[at + 1..].trim();
    if title.is_empty() {
        return Err(Diagnostic::error("title is empty")
            .with_code(ErrorCode::E301)
            .with_help("add a title after the colon"));
    }

    Ok(Event::new(date, title))
}
