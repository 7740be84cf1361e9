//! A single input stream: raw lines in, filtered records out.

use std::io::BufRead;

use crate::Result;
use crate::error::Error;
use crate::line::{BracketParser, Level, LineParser, LogLine};

/// One log input as a position within it.
///
/// Pulls raw lines on demand, parses each with the configured strategy, and
/// yields only records at or above the severity threshold. The parser is
/// fixed at construction; swapping log formats means constructing the source
/// with a different [`LineParser`].
///
/// The reader is dropped the moment end-of-input is observed, so the
/// underlying resource is released exactly once and an exhausted source can
/// never produce again.
pub struct Source {
    name: String,
    reader: Option<Box<dyn BufRead>>,
    parser: Box<dyn LineParser>,
    threshold: Level,
    lineno: u64,
}

impl Source {
    pub fn new(name: impl Into<String>, reader: impl BufRead + 'static, threshold: Level) -> Self {
        Self {
            name: name.into(),
            reader: Some(Box::new(reader)),
            parser: Box::new(BracketParser),
            threshold,
            lineno: 0,
        }
    }

    /// Replace the default line parser.
    pub fn with_parser(mut self, parser: Box<dyn LineParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Display name used in diagnostics and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_exhausted(&self) -> bool {
        self.reader.is_none()
    }

    /// Pull the next record at or above the threshold.
    ///
    /// Lines below the threshold are parsed, then dropped; a parse failure
    /// on a dropped line is still fatal, since parsing happens before
    /// filtering. `Ok(None)` means exhausted, and stays `Ok(None)` on every
    /// later call.
    pub fn next_qualifying(&mut self) -> Result<Option<LogLine>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        loop {
            let mut raw = String::new();
            let n = reader.read_line(&mut raw).map_err(|source| Error::Read {
                src: self.name.clone(),
                source,
            })?;
            if n == 0 {
                tracing::debug!(source = %self.name, lines = self.lineno, "source exhausted");
                self.reader = None;
                return Ok(None);
            }
            self.lineno += 1;

            let line = self.parser.parse(&raw).map_err(|source| Error::Parse {
                src: self.name.clone(),
                line: self.lineno,
                source,
            })?;

            if line.level >= self.threshold {
                return Ok(Some(line));
            }
            tracing::trace!(source = %self.name, level = %line.level, "line below threshold");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(body: &str, threshold: Level) -> Source {
        Source::new("test.log", Cursor::new(body.to_string()), threshold)
    }

    #[test]
    fn yields_lines_in_file_order() {
        let mut src = source(
            "[Wed Jun 25 2014 10:00:00 +0000] [info] one\n\
             [Wed Jun 25 2014 10:01:00 +0000] [warning] two\n",
            Level::Debug,
        );
        assert_eq!(src.next_qualifying().unwrap().unwrap().level, Level::Info);
        assert_eq!(
            src.next_qualifying().unwrap().unwrap().level,
            Level::Warning
        );
        assert!(src.next_qualifying().unwrap().is_none());
    }

    #[test]
    fn skips_lines_below_threshold() {
        let mut src = source(
            "[Wed Jun 25 2014 10:00:00 +0000] [debug] noise\n\
             [Wed Jun 25 2014 10:01:00 +0000] [info] noise\n\
             [Wed Jun 25 2014 10:02:00 +0000] [error] kept\n",
            Level::Error,
        );
        let line = src.next_qualifying().unwrap().unwrap();
        assert_eq!(line.level, Level::Error);
        assert!(src.next_qualifying().unwrap().is_none());
    }

    #[test]
    fn exhaustion_is_sticky_and_releases_the_reader() {
        let mut src = source("[Wed Jun 25 2014 10:00:00 +0000] [info] only\n", Level::Debug);
        assert!(src.next_qualifying().unwrap().is_some());
        assert!(!src.is_exhausted());
        assert!(src.next_qualifying().unwrap().is_none());
        assert!(src.is_exhausted());
        assert!(src.next_qualifying().unwrap().is_none());
    }

    #[test]
    fn empty_input_is_immediately_exhausted() {
        let mut src = source("", Level::Debug);
        assert!(src.next_qualifying().unwrap().is_none());
        assert!(src.is_exhausted());
    }

    #[test]
    fn parse_failure_on_a_filtered_line_is_still_fatal() {
        // The malformed line would be discarded by the filter if it parsed;
        // parsing comes first, so it aborts anyway.
        let mut src = source(
            "not a log line at all\n\
             [Wed Jun 25 2014 10:02:00 +0000] [error] unreachable\n",
            Level::Error,
        );
        let err = src.next_qualifying().unwrap_err();
        match err {
            Error::Parse { src, line, .. } => {
                assert_eq!(src, "test.log");
                assert_eq!(line, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn error_message_names_source_and_line() {
        let mut src = source(
            "[Wed Jun 25 2014 10:00:00 +0000] [info] fine\n\
             broken\n",
            Level::Debug,
        );
        assert!(src.next_qualifying().unwrap().is_some());
        let err = src.next_qualifying().unwrap_err();
        assert!(err.to_string().starts_with("test.log:2:"));
    }
}
