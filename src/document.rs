//! Documents and the document index
//!
//! A [`Document`] identifies one note by its vault-relative path. Content is
//! never stored on it: every visit goes through a [`ContentSource`], so a
//! traversal always sees the current text of a note.

use std::collections::HashSet;
use std::io;

use crate::constants as C;

/// One markdown note in a vault
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    /// Vault-relative path with forward slashes, e.g. `Notes/Idea.md`
    pub path: String,
    /// Final path segment without the `.md` suffix
    pub basename: String,
}

impl Document {
    /// Create a document from its vault-relative path
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into().replace('\\', "/");
        let basename = basename_of(&path);
        Self { path, basename }
    }
}

/// Derive the display name of a path: last segment, suffix stripped
pub fn basename_of(path: &str) -> String {
    let name = path.rsplit(C::PATH_SEPARATOR).next().unwrap_or(path);
    name.strip_suffix(C::MARKDOWN_EXTENSION)
        .unwrap_or(name)
        .to_string()
}

/// Read access to document content
pub trait ContentSource {
    /// Read the current content of a document
    fn read(&self, document: &Document) -> io::Result<String>;
}

impl<T: ContentSource + ?Sized> ContentSource for &T {
    fn read(&self, document: &Document) -> io::Result<String> {
        (**self).read(document)
    }
}

/// Ordered snapshot of all documents known at the start of a run
///
/// The order is significant: filename fallback resolution picks the first
/// match in index order.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    documents: Vec<Document>,
}

impl DocumentIndex {
    /// Build an index, keeping the first document for any repeated path
    pub fn new(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for document in documents {
            if seen.insert(document.path.clone()) {
                kept.push(document);
            } else {
                tracing::warn!(path = %document.path, "duplicate document path ignored");
            }
        }

        Self { documents: kept }
    }

    /// Build an index from vault-relative paths
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(paths.into_iter().map(Document::new))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Find a document by exact path
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.path == path)
    }
}

impl<'a> IntoIterator for &'a DocumentIndex {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
