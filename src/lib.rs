//! logfan — chronological fan-in merge for severity-filtered log files.
//!
//! Several independently written, individually chronological log files go
//! in; one chronological, severity-filtered stream comes out. The engine is
//! a streaming k-way merge: every open source contributes one pending
//! record to a frontier, and each step emits the highest-priority record,
//! refilling it from the winning source only.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use logfan::line::Level;
//! use logfan::merge::Broker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let merged = Broker::new()
//!     .add_input("api.log", BufReader::new(File::open("api.log")?))
//!     .add_input("worker.log", BufReader::new(File::open("worker.log")?))
//!     .threshold(Level::Warning)
//!     .run()?;
//! for record in merged {
//!     print!("{}", record?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod blank;
pub mod error;
pub mod line;
pub mod merge;

pub use error::{Error, ParseError};

pub type Result<T> = std::result::Result<T, Error>;
