use std::fmt;

use crate::line::Level;

/// A single parsed log record.
///
/// Only a [`LineParser`](crate::line::LineParser) constructs these: a line
/// either parses completely or yields an error, never a partially populated
/// record. `text` keeps the raw line byte-for-byte (trailing newline
/// included) so records re-emit verbatim.
///
/// Merge ordering compares timestamps only; level and text never
/// participate. The comparison lives in the broker's priority function
/// rather than an `Ord` impl here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Seconds since the Unix epoch, normalized to UTC.
    pub timestamp: i64,
    pub level: Level,
    /// The raw line exactly as read.
    pub text: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
