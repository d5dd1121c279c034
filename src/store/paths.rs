//! # Path Cleaning and Containment
//!
//! Helpers for turning caller-supplied names into safe locations under the
//! storage root. All resolution is lexical: `.` and `..` segments are folded
//! before any filesystem call, and anything that would land outside the root
//! is rejected up front.

use std::path::{Component, Path, PathBuf};

use super::errors::{StorageError, StorageResult};

/// Clean an original upload name for extension extraction.
///
/// Normalizes `\` to `/`, drops empty and `.` segments, and folds `..`
/// segments lexically (leading `..` segments are discarded). The result may
/// be empty when the whole name folds away.
pub fn clean_name(raw: &str) -> String {
    let normalized = raw.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Extension of a cleaned name: the substring from the last `.` of the final
/// component, inclusive. Empty when the component has no dot.
pub fn extension_of(cleaned: &str) -> &str {
    let file_name = cleaned.rsplit('/').next().unwrap_or(cleaned);
    match file_name.rfind('.') {
        Some(idx) => &file_name[idx..],
        None => "",
    }
}

/// Normalize a storage name to a relative key under the root.
///
/// Rejects absolute names and any `..` sequence that would climb above the
/// root. An empty result is also rejected: a storage name must identify a
/// file, never the root itself.
pub fn normalize_name(name: &str) -> StorageResult<String> {
    let segments = normalize_segments(name)?;
    if segments.is_empty() {
        return Err(StorageError::InvalidInput(format!(
            "Name does not identify a file: {}",
            name
        )));
    }
    Ok(segments.join("/"))
}

/// Normalize a destination directory to a relative key under the root.
///
/// Same containment rules as [`normalize_name`], but an empty result is
/// allowed and means the root itself.
pub fn normalize_location(location: &str) -> StorageResult<String> {
    Ok(normalize_segments(location)?.join("/"))
}

/// Join a normalized relative key onto the root.
pub fn join_under(root: &Path, relative: &str) -> PathBuf {
    if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

/// Lexically normalize an absolute path (no filesystem access).
pub fn normalize_absolute(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => resolved.push(part),
        }
    }
    resolved
}

fn normalize_segments(raw: &str) -> StorageResult<Vec<String>> {
    let normalized = raw.replace('\\', "/");
    if normalized.starts_with('/') {
        return Err(StorageError::InvalidInput(format!(
            "Absolute paths are not allowed: {}",
            raw
        )));
    }

    let mut segments: Vec<String> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(StorageError::InvalidInput(format!(
                        "Path escapes storage root: {}",
                        raw
                    )));
                }
            }
            other => segments.push(other.to_string()),
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_plain() {
        assert_eq!(clean_name("report.pdf"), "report.pdf");
    }

    #[test]
    fn test_clean_name_folds_dot_segments() {
        assert_eq!(clean_name("a/./b/../c.txt"), "a/c.txt");
        assert_eq!(clean_name("../../etc/passwd"), "etc/passwd");
    }

    #[test]
    fn test_clean_name_backslashes() {
        assert_eq!(clean_name("dir\\file.txt"), "dir/file.txt");
    }

    #[test]
    fn test_clean_name_can_fold_to_empty() {
        assert_eq!(clean_name(".."), "");
        assert_eq!(clean_name("a/.."), "");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("report.pdf"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of(".config"), ".config");
        assert_eq!(extension_of("dir.v2/noext"), "");
    }

    #[test]
    fn test_normalize_name_plain() {
        assert_eq!(normalize_name("file.txt").unwrap(), "file.txt");
        assert_eq!(normalize_name("sub/file.txt").unwrap(), "sub/file.txt");
    }

    #[test]
    fn test_normalize_name_folds_inside_root() {
        assert_eq!(normalize_name("sub/../file.txt").unwrap(), "file.txt");
    }

    #[test]
    fn test_normalize_name_rejects_escape() {
        assert!(matches!(
            normalize_name("../file.txt"),
            Err(StorageError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_name("a/../../file.txt"),
            Err(StorageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_normalize_name_rejects_absolute() {
        assert!(matches!(
            normalize_name("/etc/passwd"),
            Err(StorageError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_name("\\etc\\passwd"),
            Err(StorageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_normalize_name_rejects_root_itself() {
        assert!(matches!(
            normalize_name(""),
            Err(StorageError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_name("sub/.."),
            Err(StorageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_normalize_location_allows_root() {
        assert_eq!(normalize_location("").unwrap(), "");
        assert_eq!(normalize_location(".").unwrap(), "");
        assert_eq!(normalize_location("sub/dir").unwrap(), "sub/dir");
    }

    #[test]
    fn test_normalize_location_rejects_escape() {
        assert!(matches!(
            normalize_location("../elsewhere"),
            Err(StorageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_normalize_absolute() {
        assert_eq!(
            normalize_absolute(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
    }

    #[test]
    fn test_join_under() {
        let root = Path::new("/data");
        assert_eq!(join_under(root, ""), PathBuf::from("/data"));
        assert_eq!(join_under(root, "x/y"), PathBuf::from("/data/x/y"));
    }
}
