#![forbid(unsafe_code)]

pub mod loader;
pub mod source;
pub mod tabular;

pub use loader::{LoadError, LoadedPool, QuestionLoader};
pub use source::{FileSource, HttpSource, QuestionSource, SourceError, StaticSource};
pub use tabular::{ColumnPolicy, EXPECTED_COLUMNS, parse_tabular};
