//! Utility functions for vault path handling

use std::io;
use std::path::{Path, PathBuf};

/// Resolve a vault-relative path, ensuring it stays within the vault
/// Returns an error if the path attempts to escape the vault root
pub fn secure_path(base: &Path, relative: &str) -> io::Result<PathBuf> {
    let mut result = base.to_path_buf();
    let mut first = true;

    for component in relative.split(|c| c == '/' || c == '\\') {
        match component {
            "" | "." => continue,
            ".." => {
                if result == base {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "Path traversal detected: cannot escape vault directory",
                    ));
                }
                result.pop();
            }
            _ => {
                if first && is_drive_prefix(component) {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "Absolute paths are not allowed",
                    ));
                }
                result.push(component);
            }
        }
        first = false;
    }

    if relative.starts_with('/') || relative.starts_with('\\') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Absolute paths are not allowed",
        ));
    }

    // Symlinks may still point outside; compare canonical forms when possible
    if result.exists() {
        let canonical_base = dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());
        let canonical_result = dunce::canonicalize(&result).unwrap_or_else(|_| result.clone());
        if !canonical_result.starts_with(&canonical_base) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path traversal detected: resolved path escapes vault directory",
            ));
        }
    } else if !result.starts_with(base) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Path traversal detected: resolved path escapes vault directory",
        ));
    }

    Ok(result)
}

/// Leading Windows drive component such as `C:`
///
/// Outside Windows only the bare `X:` segment counts; `Q: Intro.md` is an
/// ordinary file name there.
fn is_drive_prefix(component: &str) -> bool {
    let bytes = component.as_bytes();
    let drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    if cfg!(windows) {
        drive
    } else {
        drive && bytes.len() == 2
    }
}

/// Lexically normalize a vault-relative path
///
/// Separators become `/`, empty and `.` segments are dropped and `..`
/// removes the previous segment (never going above the root).
pub fn normalize_relative(relative: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for component in relative.split(|c| c == '/' || c == '\\') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }
    segments.join("/")
}

/// Vault-relative path with forward slashes
pub fn relative_path(base: &Path, path: &Path) -> String {
    display_path(path.strip_prefix(base).unwrap_or(path))
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_path_normal() {
        let base = PathBuf::from("/home/user/vault");
        let result = secure_path(&base, "folder/note.md").unwrap();
        assert_eq!(result, PathBuf::from("/home/user/vault/folder/note.md"));
    }

    #[test]
    fn test_secure_path_inner_parent_allowed() {
        let base = PathBuf::from("/home/user/vault");
        let result = secure_path(&base, "folder/../note.md").unwrap();
        assert_eq!(result, PathBuf::from("/home/user/vault/note.md"));
    }

    #[test]
    fn test_secure_path_traversal_blocked() {
        let base = PathBuf::from("/home/user/vault");
        assert!(secure_path(&base, "../../../etc/passwd").is_err());
        assert!(secure_path(&base, "../Root_Export.md").is_err());
    }

    #[test]
    fn test_secure_path_absolute_blocked() {
        let base = PathBuf::from("/home/user/vault");
        assert!(secure_path(&base, "/etc/passwd").is_err());
        assert!(secure_path(&base, "C:\\Windows\\System32").is_err());
    }

    #[test]
    fn test_secure_path_colon_names_allowed() {
        let base = PathBuf::from("/home/user/vault");
        let result = secure_path(&base, "Q: Intro.md").unwrap();
        assert_eq!(result, PathBuf::from("/home/user/vault/Q: Intro.md"));
        assert!(secure_path(&base, "Notes/A: Notes.md").is_ok());
    }

    #[test]
    fn test_normalize_relative() {
        assert_eq!(normalize_relative("./R.md"), "R.md");
        assert_eq!(normalize_relative("Notes//R.md"), "Notes/R.md");
        assert_eq!(normalize_relative("Notes\\..\\R.md"), "R.md");
        assert_eq!(normalize_relative("../R.md"), "R.md");
    }

    #[test]
    fn test_relative_path() {
        let base = PathBuf::from("/vault");
        assert_eq!(relative_path(&base, &base.join("a").join("b.md")), "a/b.md");
    }
}
