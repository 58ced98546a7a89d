use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid time format '{0}'")]
    TimeFormat(String),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}
