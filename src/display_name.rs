//! Display Name Formatter.
//!
//! Renders one human-readable invocation name per argument tuple from a
//! pattern string. Recognized placeholders: `{displayName}` (the method's
//! own display name), `{index}` (1-based invocation index), `{arguments}`
//! (comma-joined rendering of the whole tuple), and `{0}`, `{1}`, …
//! (individual tuple elements).
//!
//! Quoting follows the doubled-single-quote convention: `''` renders one
//! literal quote, and a lone `'` opens or closes a quoted literal region in
//! which braces lose their meaning. The only structural failure is an
//! unterminated quote region. Unknown placeholders pass through as literal
//! text — that permissiveness is part of the contract, so a pattern written
//! for a richer formatter degrades to readable output instead of failing.
//!
//! A pattern is parsed once per test method and applied once per
//! invocation record.

use once_cell::sync::Lazy;

use crate::errors::LatticeError;
use crate::value::Value;

/// The pattern used when a method declares none.
pub const DEFAULT_PATTERN: &str = "[{index}] {arguments}";

static DEFAULT: Lazy<NamePattern> =
    Lazy::new(|| NamePattern::parse(DEFAULT_PATTERN).expect("default pattern is well-formed"));

/// Parsed form of the default pattern, shared read-only across resolutions.
pub fn default_pattern() -> &'static NamePattern {
    &DEFAULT
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    DisplayName,
    Index,
    Arguments,
    Argument(usize),
}

/// A display-name pattern parsed into segments, ready to format any number
/// of invocation records without re-parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct NamePattern {
    segments: Vec<Segment>,
}

impl NamePattern {
    /// Parses `pattern`, failing only on an unterminated quote region.
    pub fn parse(pattern: &str) -> Result<Self, LatticeError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();
        let mut quoted = false;

        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        literal.push('\'');
                    } else {
                        quoted = !quoted;
                    }
                }
                '{' if !quoted => {
                    let mut body = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        body.push(inner);
                    }
                    if !closed {
                        // Unclosed brace: not a placeholder, keep the text.
                        literal.push('{');
                        literal.push_str(&body);
                        continue;
                    }
                    match Self::placeholder(&body) {
                        Some(segment) => {
                            if !literal.is_empty() {
                                segments.push(Segment::Literal(std::mem::take(&mut literal)));
                            }
                            segments.push(segment);
                        }
                        None => {
                            literal.push('{');
                            literal.push_str(&body);
                            literal.push('}');
                        }
                    }
                }
                other => literal.push(other),
            }
        }

        if quoted {
            return Err(LatticeError::UnterminatedQuote {
                pattern: pattern.to_string(),
            });
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    fn placeholder(body: &str) -> Option<Segment> {
        match body {
            "displayName" => Some(Segment::DisplayName),
            "index" => Some(Segment::Index),
            "arguments" => Some(Segment::Arguments),
            _ => body.parse::<usize>().ok().map(Segment::Argument),
        }
    }

    /// Renders the name for one invocation record.
    ///
    /// A positional placeholder beyond the tuple's length passes through as
    /// literal text, keeping the permissive contract: formatting never
    /// fails once the pattern has parsed.
    pub fn format(&self, display_name: &str, index: usize, arguments: &[Value]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::DisplayName => out.push_str(display_name),
                Segment::Index => out.push_str(&index.to_string()),
                Segment::Arguments => {
                    let joined = arguments
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    out.push_str(&joined);
                }
                Segment::Argument(k) => match arguments.get(*k) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(&k.to_string());
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}
