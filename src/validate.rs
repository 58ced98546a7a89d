use std::fs;
use std::path::Path;

/// True for an existing directory. Symlinks are followed, so a dangling link
/// is neither a file nor a directory.
#[must_use]
pub fn is_valid_directory(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_dir())
}

#[must_use]
pub fn is_valid_file(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file())
}
