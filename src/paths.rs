//! Path string helpers: lexical normalization, joining, directory creation.

use log::{debug, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Lexical path normalization without filesystem access.
///
/// Drops `.` components, resolves `..` against the preceding component and
/// never climbs above the root. Symlinks are not resolved. An empty result
/// becomes `.`.
#[must_use]
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}

/// Joins `components` with `separator` and normalizes the result.
///
/// Returns `None` when there is nothing to join.
#[must_use]
pub fn create_dir_path_string(components: &[&str], separator: &str) -> Option<String> {
    if components.is_empty() {
        return None;
    }

    let joined = components.join(separator);
    Some(
        lexical_normalize(Path::new(&joined))
            .to_string_lossy()
            .into_owned(),
    )
}

/// Normalizes the plain concatenation of two path strings, so mixed or
/// doubled separators at the seam collapse.
#[must_use]
pub fn fix_path(path1: &str, path2: &str) -> String {
    let combined = format!("{path1}{path2}");
    lexical_normalize(Path::new(&combined))
        .to_string_lossy()
        .into_owned()
}

/// Creates `dir_path` and any missing parents.
///
/// Returns `true` only when the directory did not exist and was created.
pub fn create_dir(dir_path: impl AsRef<Path>) -> bool {
    let dir_path = dir_path.as_ref();

    if dir_path.exists() {
        debug!("{} already exists, not creating", dir_path.display());
        return false;
    }

    match fs::create_dir_all(dir_path) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to create {}: {e}", dir_path.display());
            false
        }
    }
}
