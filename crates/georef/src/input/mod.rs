//! Reading occurrence tables.

mod reader;
mod source;

pub use reader::{OccurrenceReader, ReaderConfig};
pub use source::SourceMetadata;
