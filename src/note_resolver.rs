//! Link resolution module
//!
//! Resolves embed-link targets to documents in a [`DocumentIndex`].
//!
//! Resolution rules (in order):
//! 1. Exact path: `target + ".md"` equals a document path. Keeps
//!    folder-qualified links pointing at the right note when several
//!    folders hold a note with the same name.
//! 2. Filename: only for targets without `/`, the first document in index
//!    order whose path ends with `target + ".md"`.
//! 3. Not found.

use crate::constants as C;
use crate::document::{Document, DocumentIndex};

/// Resolve an embed-link target
pub fn resolve_link<'a>(target: &str, index: &'a DocumentIndex) -> Option<&'a Document> {
    let wanted = format!("{}{}", target, C::MARKDOWN_EXTENSION);

    // Rule 1: exact path
    if let Some(doc) = index.iter().find(|d| d.path == wanted) {
        return Some(doc);
    }

    // Rule 2: bare filename, first match wins
    if !target.contains(C::PATH_SEPARATOR) {
        return index.iter().find(|d| d.path.ends_with(&wanted));
    }

    None
}

/// Resolve a user-supplied root note reference
///
/// Accepts `Folder/Note`, `Folder/Note.md`, `Folder\Note` or a bare `Note`.
pub fn resolve_root<'a>(reference: &str, index: &'a DocumentIndex) -> Option<&'a Document> {
    let reference = reference.trim().replace('\\', "/");
    let reference = reference.trim_start_matches("./");
    let target = reference
        .strip_suffix(C::MARKDOWN_EXTENSION)
        .unwrap_or(reference);

    if target.is_empty() {
        return None;
    }

    resolve_link(target, index)
}
