//! Line parsing for the bracketed log layout.
//!
//! Expected layout (one line = one record):
//!
//! ```text
//! [<weekday> <month> <day> <year> <HH:MM:SS> <±><HH><MM>] [<level>] <message…>
//! ```
//!
//! Example:
//!
//! ```text
//! [Wed Jun 25 2014 15:41:43 +0200] [info] listening on :8080
//! ```
//!
//! The date/time is parsed in its written (offset-local) form, shifted by
//! the declared timezone offset, and stored as UTC epoch seconds.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDateTime};
use regex::Regex;

use crate::error::ParseError;
use crate::line::{Level, LogLine};

const DATETIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S";

static LAYOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[(?P<stamp>[A-Za-z0-9: ]+) (?P<sign>[+-])(?P<hours>\d{2})(?P<mins>\d{2})\] \[(?P<level>[a-z]+)\]",
    )
    .expect("layout pattern compiles")
});

/// Strategy for turning one raw line into a [`LogLine`].
///
/// A source holds exactly one parser for its whole lifetime; alternate log
/// formats plug in here without touching the merge engine.
pub trait LineParser {
    fn parse(&self, raw: &str) -> Result<LogLine, ParseError>;
}

/// Default parser for the bracketed timestamp + severity layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketParser;

impl LineParser for BracketParser {
    fn parse(&self, raw: &str) -> Result<LogLine, ParseError> {
        let caps = LAYOUT
            .captures(raw)
            .ok_or_else(|| ParseError::Layout(raw.trim_end().to_string()))?;

        let stamp = &caps["stamp"];
        let written = NaiveDateTime::parse_from_str(stamp, DATETIME_FORMAT).map_err(|source| {
            ParseError::Timestamp {
                text: stamp.to_string(),
                source,
            }
        })?;

        // Two-digit groups; the pattern guarantees these parse.
        let hours: i64 = caps["hours"].parse().expect("matched \\d{2}");
        let mins: i64 = caps["mins"].parse().expect("matched \\d{2}");
        let shift = Duration::hours(hours) + Duration::minutes(mins);

        let utc = match &caps["sign"] {
            "+" => written + shift,
            _ => written - shift,
        };

        let level: Level = caps["level"].parse()?;

        Ok(LogLine {
            timestamp: utc.and_utc().timestamp(),
            level,
            text: raw.to_string(),
        })
    }
}
