//! Document flattening
//!
//! Expands embed-links recursively into one merged markdown string. Each
//! embedded note is reached one [`Layer`] deeper than its parent; in stacked
//! mode that layer's marker is prefixed to every heading line, so a `# H1`
//! inside a note embedded twice over comes out as `### H1`.
//!
//! The flattener tracks the chain of notes from the root to the note being
//! expanded. An embed that points back into that chain is reported as a
//! [`Notice::EmbedCycle`] and dropped instead of recursing forever.

use crate::constants as C;
use crate::document::{ContentSource, Document, DocumentIndex};
use crate::error::{ExportError, Result};
use crate::link::EmbedLink;
use crate::note_resolver::resolve_link;
use crate::notify::{Notice, Notifier};
use crate::settings::ExportSettings;

/// Nesting depth of a document below the export root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Layer {
    depth: usize,
}

impl Layer {
    /// Depth of the export root
    pub fn root() -> Self {
        Self { depth: 0 }
    }

    pub fn at(depth: usize) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// One level deeper
    pub fn nested(self) -> Self {
        Self { depth: self.depth + 1 }
    }

    /// Heading markers for this depth: one `#` per level
    pub fn marker(&self) -> String {
        std::iter::repeat(C::HEADING_MARKER).take(self.depth).collect()
    }
}

/// Recursive embed expander over one index snapshot
pub struct Flattener<'a, S: ContentSource + ?Sized> {
    index: &'a DocumentIndex,
    source: &'a S,
    settings: &'a ExportSettings,
}

impl<'a, S: ContentSource + ?Sized> Flattener<'a, S> {
    pub fn new(index: &'a DocumentIndex, source: &'a S, settings: &'a ExportSettings) -> Self {
        Self { index, source, settings }
    }

    /// Flatten a root document
    pub fn flatten(&self, root: &Document, notifier: &mut dyn Notifier) -> Result<String> {
        self.flatten_document(root, Layer::root(), true, notifier)
    }

    /// Flatten a document reached at `layer`
    ///
    /// Root documents never get a title line.
    pub fn flatten_document(
        &self,
        document: &Document,
        layer: Layer,
        is_root: bool,
        notifier: &mut dyn Notifier,
    ) -> Result<String> {
        let mut out = String::new();
        let mut chain = Vec::new();
        self.expand(document, layer, is_root, &mut chain, notifier, &mut out)?;
        Ok(out)
    }

    fn expand(
        &self,
        document: &Document,
        layer: Layer,
        is_root: bool,
        chain: &mut Vec<String>,
        notifier: &mut dyn Notifier,
        out: &mut String,
    ) -> Result<()> {
        tracing::debug!(path = %document.path, depth = layer.depth(), "expanding document");

        let content = self.source.read(document).map_err(|source| ExportError::Read {
            path: document.path.clone(),
            source,
        })?;

        chain.push(document.path.clone());

        if !is_root && self.settings.insert_titles {
            if self.settings.stacked_headings {
                out.push_str(&layer.marker());
                out.push(' ');
            } else {
                out.push(C::HEADING_MARKER);
                out.push(' ');
            }
            out.push_str(&document.basename);
            out.push_str(C::NEWLINE);
        }

        // Split on '\n' only; "\r" stays part of the line
        for line in content.split_terminator('\n') {
            if line.is_empty() {
                out.push_str(C::NEWLINE);
                continue;
            }

            if let Some(link) = EmbedLink::parse(line) {
                self.expand_link(&link, layer, chain, notifier, out)?;
                continue;
            }

            if self.settings.stacked_headings && line.starts_with(C::HEADING_MARKER) {
                out.push_str(&layer.marker());
            }
            out.push_str(line);
            out.push_str(C::NEWLINE);
        }

        chain.pop();
        Ok(())
    }

    fn expand_link(
        &self,
        link: &EmbedLink,
        layer: Layer,
        chain: &mut Vec<String>,
        notifier: &mut dyn Notifier,
        out: &mut String,
    ) -> Result<()> {
        let Some(target) = resolve_link(&link.target, self.index) else {
            tracing::warn!(target = %link.target, "embed link not resolved");
            notifier.notify(Notice::LinkNotResolved {
                target: link.target.clone(),
            });
            return Ok(());
        };

        if chain.iter().any(|path| *path == target.path) {
            tracing::warn!(target = %link.target, path = %target.path, "embed cycle skipped");
            notifier.notify(Notice::EmbedCycle {
                target: link.target.clone(),
                path: target.path.clone(),
            });
            return Ok(());
        }

        self.expand(target, layer.nested(), false, chain, notifier, out)
    }
}
