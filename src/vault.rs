//! Vault backends
//!
//! A [`Vault`] is everything the export pipeline needs from its host: the
//! document index, on-demand reads, and creation of the single output
//! artifact. [`FsVault`] serves a directory of markdown files;
//! [`MemoryVault`] holds notes in memory for embedding and tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::constants as C;
use crate::document::{ContentSource, Document, DocumentIndex};
use crate::error::{ExportError, Result};
use crate::util;

/// Host capabilities used by an export
pub trait Vault: ContentSource {
    /// Snapshot of every document currently in the vault
    fn index(&self) -> Result<DocumentIndex>;

    /// Create the export artifact at the vault root
    ///
    /// Fails if `name` already exists, unless `overwrite` is set.
    fn create_artifact(&self, name: &str, content: &str, overwrite: bool) -> io::Result<PathBuf>;
}

// === FsVault ===

/// Vault backed by a directory tree of `.md` files
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Open a vault directory
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Vault directory not found: {}", util::display_path(root)),
            ));
        }
        let root = dunce::canonicalize(root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find_notes_recursive(&self, current: &Path, notes: &mut Vec<String>) -> io::Result<()> {
        for entry in fs::read_dir(current)? {
            let entry = entry?;
            let path = entry.path();

            // Skip hidden files and directories (.obsidian, .git, settings)
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            // Symlinked directories are not followed
            if entry.file_type()?.is_dir() {
                self.find_notes_recursive(&path, notes)?;
            } else if path.extension().map(|e| e == "md").unwrap_or(false) {
                notes.push(util::relative_path(&self.root, &path));
            }
        }

        Ok(())
    }
}

impl ContentSource for FsVault {
    fn read(&self, document: &Document) -> io::Result<String> {
        let path = util::secure_path(&self.root, &document.path)?;
        fs::read_to_string(path)
    }
}

impl Vault for FsVault {
    fn index(&self) -> Result<DocumentIndex> {
        let mut notes = Vec::new();
        self.find_notes_recursive(&self.root, &mut notes)
            .map_err(|source| ExportError::Index {
                root: self.root.clone(),
                source,
            })?;

        notes.sort();
        tracing::debug!(count = notes.len(), root = %util::display_path(&self.root), "indexed vault");
        Ok(DocumentIndex::from_paths(notes))
    }

    fn create_artifact(&self, name: &str, content: &str, overwrite: bool) -> io::Result<PathBuf> {
        let path = util::secure_path(&self.root, name)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("'{}' already exists. Use --overwrite to replace.", name),
                )
            } else {
                e
            }
        })?;
        file.write_all(content.as_bytes())?;

        Ok(path)
    }
}

// === MemoryVault ===

/// In-memory vault keyed by vault-relative path
///
/// Index order is path order. Created artifacts are stored like any other
/// note, so they show up in later indexes.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    notes: RefCell<BTreeMap<String, String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a note
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.notes
            .get_mut()
            .insert(path.into().replace('\\', "/"), content.into());
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.notes.get_mut().remove(path)
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.notes.borrow().get(path).cloned()
    }

    /// Index of all notes ending in `.md`
    pub fn document_index(&self) -> DocumentIndex {
        let notes = self.notes.borrow();
        DocumentIndex::from_paths(
            notes
                .keys()
                .filter(|path| path.ends_with(C::MARKDOWN_EXTENSION))
                .cloned()
                .collect::<Vec<_>>(),
        )
    }
}

impl ContentSource for MemoryVault {
    fn read(&self, document: &Document) -> io::Result<String> {
        self.content(&document.path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such note: {}", document.path),
            )
        })
    }
}

impl Vault for MemoryVault {
    fn index(&self) -> Result<DocumentIndex> {
        Ok(self.document_index())
    }

    fn create_artifact(&self, name: &str, content: &str, overwrite: bool) -> io::Result<PathBuf> {
        let mut notes = self.notes.borrow_mut();
        if !overwrite && notes.contains_key(name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{}' already exists", name),
            ));
        }
        notes.insert(name.to_string(), content.to_string());
        Ok(PathBuf::from(name))
    }
}
