use serde::Serialize;

/// Snapshot of one filesystem entry, taken at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EntryMetadata {
    pub last_modified: String,
    pub size: String,
    pub name: String,
    pub parent_directory: String,
    pub full_path: String,
}

/// What a directory scan produced: bare names, or one record per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirContents {
    Names(Vec<String>),
    Metadata(Vec<EntryMetadata>),
}

impl DirContents {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            DirContents::Names(names) => names.len(),
            DirContents::Metadata(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
