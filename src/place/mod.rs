//! Place subsystem: coordinate parsing, proximity merging, and content sources.

pub mod markers;
pub mod parser;
pub mod set;
pub mod source;
pub mod types;

pub use markers::{markers, Marker};
pub use parser::{parse_line, parse_multiline, try_parse_line, Hemisphere};
pub use set::{LocationSet, DEFAULT_THRESHOLD_M};
pub use source::{collect_locations, ContentSource, JsonFileSource, SourceBlock, SourceError};
pub use types::{Label, Location, ParseError, SourceMeta};
