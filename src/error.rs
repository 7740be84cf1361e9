//! Error taxonomy for the merge engine.
//!
//! Every variant is fatal: a failure surfaced from any source aborts the
//! merge, and output already delivered to the caller is never retracted.

use thiserror::Error;

/// A single raw line could not be turned into a record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line does not match the \"[timestamp] [level]\" layout: {0:?}")]
    Layout(String),

    #[error("bad timestamp {text:?}: {source}")]
    Timestamp {
        text: String,
        #[source]
        source: chrono::format::ParseError,
    },

    #[error("unknown severity level {0:?}")]
    Level(String),
}

/// Failure surfaced while pulling records from a source.
#[derive(Debug, Error)]
pub enum Error {
    /// A line failed to parse. `line` is 1-based within the named source.
    #[error("{src}:{line}: {source}")]
    Parse {
        src: String,
        line: u64,
        #[source]
        source: ParseError,
    },

    /// The underlying resource failed mid-read.
    #[error("failed to read from {src}: {source}")]
    Read {
        src: String,
        #[source]
        source: std::io::Error,
    },
}
