//! Fan-in merge engine.
//!
//! The merge walks the state machine `Empty → Preloading → Merging →
//! Drained`. [`Broker`] is the empty/configuration stage; [`Broker::run`]
//! performs the preload and hands back a [`Merged`] iterator, which is the
//! merging stage. Once `Merged` returns `None` (natural exhaustion, or the
//! step after a fatal error) it is drained and stays drained.
//!
//! One pending record per open source forms the frontier; each step selects
//! the highest-priority entry, refills it from the winning source, and
//! emits it:
//!
//! ```text
//! source 0: │ 14 17 …       frontier
//! source 1: │ 16 …           0 → 12 ◄─ winner (earliest, lowest id on ties)
//! source 2: │ 15 18 …        1 → 13
//!                            2 → 15
//! ```
//!
//! Selection scans the whole frontier, so each emitted record costs O(k) in
//! the number of open sources, O(n·k) for the full merge. Fine for the
//! handful of files this tool is pointed at.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::BufRead;

use crate::Result;
use crate::line::{Level, LineParser, LogLine};
use crate::merge::source::Source;

/// Selection function over pending records. `Less` means higher priority.
pub type Priority = Box<dyn Fn(&LogLine, &LogLine) -> Ordering>;

struct PendingInput {
    name: String,
    reader: Box<dyn BufRead>,
    parser: Option<Box<dyn LineParser>>,
}

/// Merge configuration, chained builder-style before [`Broker::run`].
///
/// `run` consumes the broker, so every configuration hook is structurally
/// settable only before preload.
pub struct Broker {
    inputs: Vec<PendingInput>,
    threshold: Level,
    priority: Priority,
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

impl Broker {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            threshold: Level::Debug,
            priority: Box::new(|a, b| a.timestamp.cmp(&b.timestamp)),
        }
    }

    /// Append one input. Insertion order is permanent: it is the index used
    /// to break priority ties for the whole merge.
    pub fn add_input(mut self, name: impl Into<String>, reader: impl BufRead + 'static) -> Self {
        self.inputs.push(PendingInput {
            name: name.into(),
            reader: Box::new(reader),
            parser: None,
        });
        self
    }

    /// Append one input that uses its own line parser instead of the
    /// default bracketed layout.
    pub fn add_input_with(
        mut self,
        name: impl Into<String>,
        reader: impl BufRead + 'static,
        parser: Box<dyn LineParser>,
    ) -> Self {
        self.inputs.push(PendingInput {
            name: name.into(),
            reader: Box::new(reader),
            parser: Some(parser),
        });
        self
    }

    /// Minimum severity, applied uniformly to every source. Defaults to
    /// [`Level::Debug`] (keep everything).
    pub fn threshold(mut self, level: Level) -> Self {
        self.threshold = level;
        self
    }

    /// Replace the selection function. Defaults to earliest timestamp wins.
    pub fn priority(mut self, cmp: impl Fn(&LogLine, &LogLine) -> Ordering + 'static) -> Self {
        self.priority = Box::new(cmp);
        self
    }

    /// Preload: open a source per input and pull its first qualifying
    /// record. A source with no qualifying record at all never joins the
    /// active set (its resource is released right here). A parse or read
    /// failure aborts before any output exists.
    pub fn run(self) -> Result<Merged> {
        let mut sources = BTreeMap::new();
        let mut frontier = BTreeMap::new();

        for (id, input) in self.inputs.into_iter().enumerate() {
            let mut source = Source::new(input.name, input.reader, self.threshold);
            if let Some(parser) = input.parser {
                source = source.with_parser(parser);
            }
            if let Some(first) = source.next_qualifying()? {
                frontier.insert(id, first);
                sources.insert(id, source);
            }
        }

        tracing::debug!(active = sources.len(), "preload complete");
        Ok(Merged {
            sources,
            frontier,
            priority: self.priority,
            failed: false,
        })
    }
}

/// The running merge: a lazy, non-restartable record sequence.
///
/// Yields `Ok(record)` in priority order; a fatal failure from any source
/// is yielded once as `Err`, after which the sequence ends. Records already
/// yielded are never retracted. `sources` and `frontier` are keyed by the
/// original input index and always hold exactly the same key set, so
/// removing an exhausted source never disturbs the identity of the others.
pub struct Merged {
    sources: BTreeMap<usize, Source>,
    frontier: BTreeMap<usize, LogLine>,
    priority: Priority,
    failed: bool,
}

impl Merged {
    /// Number of still-open sources.
    pub fn active_sources(&self) -> usize {
        self.sources.len()
    }

    fn select(&self) -> Option<usize> {
        let mut entries = self.frontier.iter();
        let (&first_id, first_line) = entries.next()?;
        let mut winner = (first_id, first_line);
        for (&id, line) in entries {
            // Strict `Less`: on equal priority the earlier entry stands,
            // so the lowest input index always wins ties.
            if (self.priority)(line, winner.1) == Ordering::Less {
                winner = (id, line);
            }
        }
        Some(winner.0)
    }
}

impl Iterator for Merged {
    type Item = Result<LogLine>;

    /// One select-emit-refill step: at most one underlying read, from the
    /// winning source only.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let winner = self.select()?;

        let refill = match self.sources.get_mut(&winner) {
            Some(source) => source.next_qualifying(),
            // Unreachable while the invariant holds; end the sequence
            // rather than panic if it ever doesn't.
            None => return None,
        };

        let emitted = match refill {
            Ok(Some(next)) => self.frontier.insert(winner, next),
            Ok(None) => {
                self.sources.remove(&winner);
                self.frontier.remove(&winner)
            }
            Err(err) => {
                // Fatal. Drop every source now so underlying resources are
                // released even if the caller holds on to the iterator. The
                // selected record is lost, as its refill never completed.
                self.failed = true;
                self.sources.clear();
                self.frontier.clear();
                return Some(Err(err));
            }
        };
        emitted.map(Ok)
    }
}
