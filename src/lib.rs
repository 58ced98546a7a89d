//! Small filesystem helpers: one-level directory listing with optional regex
//! filtering and per-entry metadata, plus path string utilities.

pub mod error;
pub mod metadata;
pub mod paths;
pub mod report;
pub mod scanner;
pub mod types;
pub mod validate;

pub use error::ScanError;
pub use metadata::{
    DEFAULT_TIME_FORMAT, MetadataOptions, SizeUnit, TimeFormat, get_directory_metadata,
    get_file_metadata,
};
pub use scanner::{ScanOptions, get_dir_contents, get_dir_contents_with};
pub use types::{DirContents, EntryMetadata};
pub use validate::{is_valid_directory, is_valid_file};
