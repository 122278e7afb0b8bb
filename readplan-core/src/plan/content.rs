//! Content line parsing
//!
//! A content line is a `;`-separated list of verse references with an
//! optional trailing time directive such as `(/2W)`.

use std::sync::LazyLock;

use regex::Regex;

use super::verse::{parse_verse, VerseReference};
use crate::error::ParseError;

static TRAILING_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(/([0-9]+)([A-Za-z])\)\s*$").expect("valid time directive pattern")
});

/// References and duration read from one content line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub references: Vec<VerseReference>,
    /// Intended reading time in days
    pub duration: Option<u32>,
}

/// Day count for a time directive like `(/3M)`
///
/// Units are D (1), W (7), M (30) and Y (365). Months and years are
/// approximations. Any other unit, or a count that overflows, gives `None`.
pub fn parse_time_directive(directive: &str) -> Option<u32> {
    let caps = TRAILING_DIRECTIVE.captures(directive.trim())?;
    let count: u32 = caps[1].parse().ok()?;
    count.checked_mul(unit_days(&caps[2])?)
}

fn unit_days(unit: &str) -> Option<u32> {
    match unit {
        "D" => Some(1),
        "W" => Some(7),
        "M" => Some(30),
        "Y" => Some(365),
        _ => None,
    }
}

/// Parse a content line into its references and duration
///
/// The directive is removed before the references are read, even when its
/// unit is not recognized. Fails on the first segment that is not a
/// valid reference.
pub fn parse_content_line(line: &str) -> Result<ContentLine, ParseError> {
    let (body, duration) = match TRAILING_DIRECTIVE.find(line) {
        Some(m) => (&line[..m.start()], parse_time_directive(m.as_str())),
        None => (line, None),
    };

    let references = body
        .split(';')
        .map(parse_verse)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ContentLine {
        references,
        duration,
    })
}
