use crate::error::ScanError;
use crate::metadata::{MetadataOptions, get_directory_metadata, get_file_metadata};
use crate::paths::lexical_normalize;
use crate::types::{DirContents, EntryMetadata};
use crate::validate::{is_valid_directory, is_valid_file};
use log::{debug, warn};
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Unanchored regex; entries with no match anywhere in their name are dropped.
    pub filter_pattern: Option<String>,
    /// Return one record per entry instead of bare names.
    pub meta_data: bool,
    pub metadata: MetadataOptions,
}

/// Lists the direct children of `source_dir`.
///
/// Returns `Ok(None)` when `source_dir` is not an existing directory, which
/// callers must keep apart from `Ok(Some(_))` with no entries. A malformed
/// `filter_pattern` is an error.
///
/// Entry paths are normalized lexically before they are stat'ed, so a
/// `source_dir` that goes through a symlink and then `..` describes entries
/// under the link's lexical parent; entries missing there are dropped from a
/// metadata listing.
pub fn get_dir_contents(
    source_dir: impl AsRef<Path>,
    filter_pattern: Option<&str>,
    meta_data: bool,
) -> Result<Option<DirContents>, ScanError> {
    let options = ScanOptions {
        filter_pattern: filter_pattern.map(str::to_string),
        meta_data,
        metadata: MetadataOptions::default(),
    };
    get_dir_contents_with(source_dir, &options)
}

pub fn get_dir_contents_with(
    source_dir: impl AsRef<Path>,
    options: &ScanOptions,
) -> Result<Option<DirContents>, ScanError> {
    let source_dir = source_dir.as_ref();

    if !is_valid_directory(source_dir) {
        debug!("{} is not a valid directory", source_dir.display());
        return Ok(None);
    }

    let filter = options
        .filter_pattern
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    let mut names: Vec<String> = Vec::new();
    let mut records: Vec<EntryMetadata> = Vec::new();

    // One level only: subdirectories show up as entries but are not entered.
    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(ScanError::ReadDir {
                    path: source_dir.display().to_string(),
                    source: e,
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", source_dir.display());
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();

        if let Some(re) = &filter
            && !re.is_match(&name)
        {
            continue;
        }

        if !options.meta_data {
            names.push(name);
            continue;
        }

        match classify_and_describe(entry.path(), &options.metadata) {
            Some(record) => records.push(record),
            None => debug!("Dropping unclassifiable entry {name}"),
        }
    }

    Ok(Some(if options.meta_data {
        DirContents::Metadata(records)
    } else {
        DirContents::Names(names)
    }))
}

fn classify_and_describe(path: &Path, options: &MetadataOptions) -> Option<EntryMetadata> {
    let path = lexical_normalize(path);

    // Directories win over files.
    if is_valid_directory(&path) {
        get_directory_metadata(&path, options)
    } else if is_valid_file(&path) {
        get_file_metadata(&path, options)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn fixture() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.log"), "b").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("subdir").join("nested.txt"), "n").unwrap();
        dir
    }

    fn names(contents: Option<DirContents>) -> HashSet<String> {
        match contents {
            Some(DirContents::Names(names)) => names.into_iter().collect(),
            other => panic!("expected names, got {other:?}"),
        }
    }

    #[test]
    fn test_lists_direct_children_only() {
        let dir = fixture();
        let listed = names(get_dir_contents(dir.path(), None, false).unwrap());

        let expected: HashSet<String> = ["a.txt", "b.log", "subdir"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn test_pattern_is_anchored_only_where_it_says() {
        let dir = fixture();

        let txt = names(get_dir_contents(dir.path(), Some(r"\.txt$"), false).unwrap());
        assert_eq!(txt, HashSet::from(["a.txt".to_string()]));

        // Unanchored: "ub" matches inside "subdir".
        let inner = names(get_dir_contents(dir.path(), Some("ub"), false).unwrap());
        assert_eq!(inner, HashSet::from(["subdir".to_string()]));
    }

    #[test]
    fn test_invalid_directory_is_none_even_with_bad_pattern() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does_not_exist");

        assert_eq!(get_dir_contents(&missing, None, false).unwrap(), None);
        assert_eq!(get_dir_contents(&missing, Some("("), true).unwrap(), None);

        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert_eq!(get_dir_contents(&file, None, true).unwrap(), None);
    }

    #[test]
    fn test_empty_directory_is_empty_not_none() {
        let dir = tempdir().unwrap();

        assert_eq!(
            get_dir_contents(dir.path(), None, false).unwrap(),
            Some(DirContents::Names(vec![]))
        );
        assert_eq!(
            get_dir_contents(dir.path(), None, true).unwrap(),
            Some(DirContents::Metadata(vec![]))
        );
    }

    #[test]
    fn test_malformed_pattern_is_an_error() {
        let dir = fixture();
        let result = get_dir_contents(dir.path(), Some("(unclosed"), false);
        assert!(matches!(result, Err(ScanError::Pattern(_))));
    }

    #[test]
    fn test_metadata_records_for_files_and_directories() {
        let dir = fixture();
        let contents = get_dir_contents(dir.path(), None, true).unwrap();

        let records = match contents {
            Some(DirContents::Metadata(records)) => records,
            other => panic!("expected metadata, got {other:?}"),
        };
        assert_eq!(records.len(), 3);

        let subdir = records.iter().find(|r| r.name == "subdir").unwrap();
        assert_eq!(subdir.parent_directory, dir.path().to_string_lossy());
        assert_eq!(subdir.full_path, dir.path().join("subdir").to_string_lossy());

        for record in &records {
            assert!(!record.last_modified.is_empty());
            assert!(record.size.parse::<f64>().unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_metadata_with_filter() {
        let dir = fixture();
        let contents = get_dir_contents(dir.path(), Some("log$"), true).unwrap();

        match contents {
            Some(DirContents::Metadata(records)) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].name, "b.log");
            }
            other => panic!("expected metadata, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_dropped_only_with_metadata() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let listed = names(get_dir_contents(dir.path(), None, false).unwrap());
        assert!(listed.contains("dangling"));

        let contents = get_dir_contents(dir.path(), None, true).unwrap().unwrap();
        assert_eq!(contents.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_directory_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = fixture();
        let locked = dir.path().join("subdir");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can list it anyway.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = get_dir_contents(&locked, None, false);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(ScanError::ReadDir { .. })), "got {result:?}");
    }

    #[test]
    fn test_custom_metadata_options() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("k.bin"), vec![0u8; 1024]).unwrap();

        let options = ScanOptions {
            filter_pattern: None,
            meta_data: true,
            metadata: MetadataOptions {
                size_unit: crate::metadata::SizeUnit::Bytes,
                ..MetadataOptions::default()
            },
        };

        match get_dir_contents_with(dir.path(), &options).unwrap() {
            Some(DirContents::Metadata(records)) => assert_eq!(records[0].size, "1024"),
            other => panic!("expected metadata, got {other:?}"),
        }
    }
}
