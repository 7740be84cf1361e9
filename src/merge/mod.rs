//! Streaming k-way merge over filtered log sources.

pub mod broker;
pub mod source;

pub use broker::{Broker, Merged, Priority};
pub use source::Source;
