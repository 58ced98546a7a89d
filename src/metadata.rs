//! Metadata providers for files and directories.
//!
//! Both providers produce the same [`EntryMetadata`] shape, so callers that do
//! not know what an entry is can classify it once and delegate.

use crate::error::ScanError;
use crate::types::EntryMetadata;
use crate::validate::{is_valid_directory, is_valid_file};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use log::warn;
use std::fs::{self, Metadata};
use std::path::Path;
use std::time::SystemTime;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BASE_UNIT: f64 = 1_024.0;

/// Unit for the `size` field. Parsed from the single-letter codes
/// `b`, `k`, `m` and `g`; any other code keeps the raw byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeUnit {
    Bytes,
    #[default]
    Kilobytes,
    Megabytes,
    Gigabytes,
    Unrecognized,
}

impl SizeUnit {
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "b" => SizeUnit::Bytes,
            "k" => SizeUnit::Kilobytes,
            "m" => SizeUnit::Megabytes,
            "g" => SizeUnit::Gigabytes,
            _ => SizeUnit::Unrecognized,
        }
    }

    /// Renders `bytes` in this unit. Scaled units are rounded to two decimals
    /// and always carry a fractional part (`"4.0"`).
    #[must_use]
    pub fn scale(self, bytes: u64) -> String {
        let divisor = match self {
            SizeUnit::Bytes | SizeUnit::Unrecognized => return bytes.to_string(),
            SizeUnit::Kilobytes => BASE_UNIT,
            SizeUnit::Megabytes => BASE_UNIT * BASE_UNIT,
            SizeUnit::Gigabytes => BASE_UNIT * BASE_UNIT * BASE_UNIT,
        };

        let rounded = (bytes as f64 / divisor * 100.0).round() / 100.0;
        let text = rounded.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    }
}

/// A strftime pattern checked up front, so formatting cannot fail later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat(String);

impl TimeFormat {
    pub fn new(pattern: impl Into<String>) -> Result<Self, ScanError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ScanError::TimeFormat(pattern));
        }
        Ok(TimeFormat(pattern))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn format(&self, time: SystemTime) -> String {
        let local: DateTime<Local> = time.into();
        local.format(&self.0).to_string()
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        TimeFormat(DEFAULT_TIME_FORMAT.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataOptions {
    pub size_unit: SizeUnit,
    pub time_format: TimeFormat,
}

/// Describes a directory. `None` unless `path` is an existing directory.
///
/// The size is what the OS reports for the directory inode itself, not the
/// total of its contents.
#[must_use]
pub fn get_directory_metadata(
    path: impl AsRef<Path>,
    options: &MetadataOptions,
) -> Option<EntryMetadata> {
    let path = path.as_ref();
    if !is_valid_directory(path) {
        return None;
    }
    describe(path, options)
}

/// Describes a regular file. `None` unless `path` is an existing file.
#[must_use]
pub fn get_file_metadata(
    path: impl AsRef<Path>,
    options: &MetadataOptions,
) -> Option<EntryMetadata> {
    let path = path.as_ref();
    if !is_valid_file(path) {
        return None;
    }
    describe(path, options)
}

fn describe(path: &Path, options: &MetadataOptions) -> Option<EntryMetadata> {
    // The entry can vanish between validation and stat.
    let metadata: Metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            warn!("Cannot stat {}: {e}", path.display());
            return None;
        }
    };

    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    Some(EntryMetadata {
        last_modified: options.time_format.format(modified),
        size: options.size_unit.scale(metadata.len()),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        parent_directory: parent_directory(path),
        full_path: path.to_string_lossy().into_owned(),
    })
}

/// A bare relative name lives in `.`; the root is its own parent.
fn parent_directory(path: &Path) -> String {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
        Some(parent) => parent.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}
