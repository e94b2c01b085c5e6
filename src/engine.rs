//! ExportEngine - High-level export operations
//!
//! Runs one export end to end:
//! - Guards: a root reference must be given and prefix or suffix must be
//!   set; both are checked before anything is read
//! - Index snapshot and root selection; an export name that normalizes to
//!   the root's own path is refused before flattening
//! - Flattening, with link failures sent to the notifier
//! - Single artifact creation and the completion notice

use std::ops::Deref;
use std::path::PathBuf;

use crate::document::{Document, DocumentIndex};
use crate::error::{ExportError, Result};
use crate::flatten::Flattener;
use crate::note_resolver;
use crate::notify::{Notice, Notifier};
use crate::settings::ExportSettings;
use crate::util;
use crate::vault::Vault;

/// Options that do not belong to the persisted settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Replace an existing artifact instead of failing
    pub overwrite: bool,
}

/// Merged text of a root note, not yet written anywhere
#[derive(Debug, Clone)]
pub struct Flattened {
    pub root: Document,
    pub text: String,
    /// Number of link failures reported while flattening
    pub failures: usize,
}

/// Outcome of a completed export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub root: Document,
    pub artifact: PathBuf,
    pub failures: usize,
}

// === ExportEngine ===

/// Core engine for export operations over a vault
pub struct ExportEngine<V: Vault> {
    vault: V,
}

impl<V: Vault> ExportEngine<V> {
    pub fn new(vault: V) -> Self {
        Self { vault }
    }

    /// Flatten a root note without writing an artifact
    pub fn flatten_note(
        &self,
        reference: Option<&str>,
        settings: &ExportSettings,
        notifier: &mut dyn Notifier,
    ) -> Result<Flattened> {
        let reference = require_reference(reference)?;
        let index = self.vault.index()?;
        let root = select_root(reference, &index)?;
        self.flatten_root(&index, root, settings, notifier)
    }

    /// Flatten a root note and write the merged text as a new note
    pub fn export(
        &self,
        reference: Option<&str>,
        settings: &ExportSettings,
        options: ExportOptions,
        notifier: &mut dyn Notifier,
    ) -> Result<ExportReport> {
        let reference = require_reference(reference)?;
        settings.validate_export_name()?;

        let index = self.vault.index()?;
        let root = select_root(reference, &index)?;
        let name = settings.artifact_name(&root.basename);
        if util::normalize_relative(&name) == root.path {
            return Err(ExportError::ConfigurationInvalid);
        }

        let flattened = self.flatten_root(&index, root, settings, notifier)?;

        let artifact = self
            .vault
            .create_artifact(&name, &flattened.text, options.overwrite)
            .map_err(|source| ExportError::ArtifactCreationFailed {
                name: name.clone(),
                source,
            })?;

        tracing::info!(
            root = %flattened.root.path,
            artifact = %name,
            failures = flattened.failures,
            "export written"
        );
        notifier.notify(Notice::Exported {
            path: artifact.clone(),
            unresolved: flattened.failures,
        });

        Ok(ExportReport {
            root: flattened.root,
            artifact,
            failures: flattened.failures,
        })
    }

    fn flatten_root(
        &self,
        index: &DocumentIndex,
        root: Document,
        settings: &ExportSettings,
        notifier: &mut dyn Notifier,
    ) -> Result<Flattened> {
        let mut counting = CountingNotifier { inner: notifier, failures: 0 };
        let text = Flattener::new(index, &self.vault, settings).flatten(&root, &mut counting)?;

        Ok(Flattened {
            root,
            text,
            failures: counting.failures,
        })
    }
}

impl<V: Vault> Deref for ExportEngine<V> {
    type Target = V;
    fn deref(&self) -> &Self::Target {
        &self.vault
    }
}

fn select_root(reference: &str, index: &DocumentIndex) -> Result<Document> {
    note_resolver::resolve_root(reference, index)
        .cloned()
        .ok_or_else(|| ExportError::NoActiveDocument {
            reference: reference.to_string(),
        })
}

fn require_reference(reference: Option<&str>) -> Result<&str> {
    match reference.map(str::trim) {
        Some(r) if !r.is_empty() => Ok(r),
        _ => Err(ExportError::NoActiveDocument {
            reference: String::new(),
        }),
    }
}

/// Forwards notices while counting failures
struct CountingNotifier<'a> {
    inner: &'a mut dyn Notifier,
    failures: usize,
}

impl Notifier for CountingNotifier<'_> {
    fn notify(&mut self, notice: Notice) {
        if notice.is_failure() {
            self.failures += 1;
        }
        self.inner.notify(notice);
    }
}
