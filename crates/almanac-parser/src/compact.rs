//! Compact tabular notation.
//!
//! A token-lean alternative to YAML, read into a [`serde_json::Value`] so it
//! shares the document schema with the other formats.
//!
//! ```text
//! title: Project Timeline
//! style: horizontal
//! milestones[3]: date title description highlight
//! 2024-01-15 "Project Start" "Kickoff meeting" true
//! 2024-06-01 Launch "Go live" false
//! 2024-12-01 "Year End" null false
//! output:
//!   width: 1280
//!   height: 720
//! ```
//!
//! - `key: value` sets a scalar
//! - `key[N]: f1 f2 ...` is followed by N rows of space-separated cells
//! - `key[N]:` is followed by N single values
//! - `key:` followed by an indented block is a nested object
//! - Lines starting with `#` are comments
//!
//! Bare scalars are typed: `null`/`none`, `true`/`false`, integers and
//! floats. Everything else, and every double-quoted cell, is a string.

use log::debug;
use serde_json::{Map, Number, Value};
use winnow::{
    ModalResult, Parser as _,
    ascii::{digit1, space0, space1},
    combinator::{alt, delimited, opt, preceded, separated},
    token::{none_of, rest, take_till, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Parses a compact document into a JSON object.
///
/// # Errors
///
/// Returns a [`ParseError`] listing every malformed line, unterminated
/// quote and missing table row.
pub(crate) fn parse(source: &str) -> Result<Value, ParseError> {
    let mut parser = CompactParser::new(source);
    let map = parser.parse_block(0);

    if map.is_empty() && !parser.collector.has_errors() {
        parser.collector.emit(
            Diagnostic::error("compact document contains no keys")
                .with_code(ErrorCode::E004)
                .with_help("start with a line such as `title: My Timeline`"),
        );
    }
    parser.collector.finish()?;

    debug!(keys = map.len(); "Parsed compact document");
    Ok(Value::Object(map))
}

/// A non-blank, non-comment source line
#[derive(Debug, Clone, Copy)]
struct Line<'s> {
    indent: usize,
    text: &'s str,
    offset: usize,
}

impl Line<'_> {
    fn span(&self) -> Span {
        Span::new(self.offset..self.offset + self.text.len())
    }
}

/// The structural part of a line, before any value is typed
#[derive(Debug, PartialEq)]
enum Header<'s> {
    Pair {
        key: &'s str,
        value: &'s str,
    },
    Array {
        key: &'s str,
        count: usize,
        fields: &'s str,
    },
}

#[derive(Debug, PartialEq)]
enum Cell<'s> {
    Quoted(&'s str),
    Bare(&'s str),
}

impl Cell<'_> {
    fn to_value(&self) -> Value {
        match self {
            Cell::Quoted(text) => Value::String((*text).to_string()),
            Cell::Bare(text) => typed(text),
        }
    }
}

struct CompactParser<'s> {
    lines: Vec<Line<'s>>,
    pos: usize,
    collector: DiagnosticCollector,
}

impl<'s> CompactParser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lines: split_lines(source),
            pos: 0,
            collector: DiagnosticCollector::new(),
        }
    }

    /// Parses consecutive lines indented at least `indent` into an object
    fn parse_block(&mut self, indent: usize) -> Map<String, Value> {
        let mut map = Map::new();

        while let Some(line) = self.lines.get(self.pos).copied() {
            if line.indent < indent {
                break;
            }
            self.pos += 1;

            match header.parse(line.text) {
                Ok(Header::Pair { key, value }) => {
                    let value = if value.is_empty() {
                        self.nested(line)
                    } else {
                        scalar(value)
                    };
                    map.insert(key.to_string(), value);
                }
                Ok(Header::Array { key, count, fields }) => {
                    let value = if fields.is_empty() {
                        self.list(line, key, count)
                    } else {
                        self.table(line, key, count, fields)
                    };
                    map.insert(key.to_string(), value);
                }
                Err(_) => self.collector.emit(
                    Diagnostic::error(format!("unrecognized line `{}`", line.text))
                        .with_code(ErrorCode::E002)
                        .with_label(line.span(), "expected `key: value` or `key[N]: fields`"),
                ),
            }
        }

        map
    }

    fn nested(&mut self, parent: Line<'s>) -> Value {
        let next_indent = self.lines.get(self.pos).map(|line| line.indent);
        match next_indent {
            Some(indent) if indent > parent.indent => Value::Object(self.parse_block(indent)),
            _ => Value::Null,
        }
    }

    /// Lines not yet consumed; a declared row count never reserves more
    fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    fn list(&mut self, header_line: Line<'s>, key: &str, count: usize) -> Value {
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            let Some(line) = self.next_row(header_line, key, count, values.len()) else {
                break;
            };
            values.push(scalar(line.text));
        }
        Value::Array(values)
    }

    fn table(&mut self, header_line: Line<'s>, key: &str, count: usize, fields: &str) -> Value {
        let fields: Vec<&str> = fields.split_whitespace().collect();
        let mut rows = Vec::with_capacity(count.min(self.remaining()));

        for read in 0..count {
            let Some(line) = self.next_row(header_line, key, count, read) else {
                break;
            };

            let cells = match row.parse(line.text) {
                Ok(cells) => cells,
                Err(_) => {
                    self.collector.emit(
                        Diagnostic::error("unterminated quoted cell")
                            .with_code(ErrorCode::E001)
                            .with_label(line.span(), "this row opens a quote it never closes"),
                    );
                    continue;
                }
            };

            if cells.len() > fields.len() {
                self.collector.emit(
                    Diagnostic::warning(format!(
                        "row has {} cells but `{key}` names {} fields; extra cells are ignored",
                        cells.len(),
                        fields.len()
                    ))
                    .with_label(line.span(), "extra cells"),
                );
            }

            let object: Map<String, Value> = fields
                .iter()
                .zip(&cells)
                .map(|(field, cell)| ((*field).to_string(), cell.to_value()))
                .collect();
            rows.push(Value::Object(object));
        }

        Value::Array(rows)
    }

    /// Takes the next row of an array, reporting a shortfall on the header
    fn next_row(
        &mut self,
        header_line: Line<'s>,
        key: &str,
        count: usize,
        read: usize,
    ) -> Option<Line<'s>> {
        let line = self.lines.get(self.pos).copied();
        match line {
            Some(line) => {
                self.pos += 1;
                Some(line)
            }
            None => {
                self.collector.emit(
                    Diagnostic::error(format!(
                        "`{key}` declares {count} rows but only {read} are present"
                    ))
                    .with_code(ErrorCode::E003)
                    .with_label(header_line.span(), "declared here")
                    .with_help(format!("add the missing rows or change `[{count}]` to `[{read}]`")),
                );
                None
            }
        }
    }
}

fn split_lines(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for raw in source.split_inclusive('\n') {
        let content = raw.trim_end();
        let text = content.trim_start();
        let indent = content.len() - text.len();
        if !text.is_empty() && !text.starts_with('#') {
            lines.push(Line {
                indent,
                text,
                offset: offset + indent,
            });
        }
        offset += raw.len();
    }

    lines
}

fn key<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '-').parse_next(input)
}

fn row_count(input: &mut &str) -> ModalResult<usize> {
    delimited('[', digit1.try_map(str::parse::<usize>), ']').parse_next(input)
}

fn header<'s>(input: &mut &'s str) -> ModalResult<Header<'s>> {
    let key = key.parse_next(input)?;
    let count = opt(row_count).parse_next(input)?;
    let value = preceded((':', space0), rest).parse_next(input)?;

    Ok(match count {
        Some(count) => Header::Array {
            key,
            count,
            fields: value,
        },
        None => Header::Pair { key, value },
    })
}

fn quoted<'s>(input: &mut &'s str) -> ModalResult<Cell<'s>> {
    delimited('"', take_till(0.., '"'), '"')
        .map(Cell::Quoted)
        .parse_next(input)
}

fn bare<'s>(input: &mut &'s str) -> ModalResult<Cell<'s>> {
    (none_of(['"', ' ', '\t']), take_till(0.., [' ', '\t']))
        .take()
        .map(Cell::Bare)
        .parse_next(input)
}

fn row<'s>(input: &mut &'s str) -> ModalResult<Vec<Cell<'s>>> {
    separated(0.., alt((quoted, bare)), space1).parse_next(input)
}

/// Types a whole-value scalar, honoring surrounding quotes
fn scalar(text: &str) -> Value {
    let text = text.trim();
    match text
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => Value::String(inner.to_string()),
        None => typed(text),
    }
}

fn typed(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }

    match text.to_ascii_lowercase().as_str() {
        "null" | "none" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if text.contains('.') {
        if let Some(number) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(number);
        }
    } else if let Ok(number) = text.parse::<i64>() {
        return Value::Number(number.into());
    }

    Value::String(text.to_string())
}
