//! emx-export - Flatten embedded notes into a single export note
//!
//! A root note's `![[embed]]` lines are resolved against a [`DocumentIndex`]
//! and replaced by the embedded content, recursively, by the [`Flattener`].
//! [`ExportEngine`] drives a whole export over a [`Vault`] and writes the
//! merged text as one new note.

pub mod cli;
pub mod constants;
pub mod document;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod link;
pub mod note_resolver;
pub mod notify;
pub mod settings;
pub mod util;
pub mod vault;

pub use cli::{Cli, Command, SettingsCommand};
pub use document::{ContentSource, Document, DocumentIndex};
pub use engine::{ExportEngine, ExportOptions, ExportReport, Flattened};
pub use error::{ExportError, Result};
pub use flatten::{Flattener, Layer};
pub use link::EmbedLink;
pub use note_resolver::{resolve_link, resolve_root};
pub use notify::{CollectingNotifier, Notice, Notifier, StderrNotifier, WriterNotifier};
pub use settings::ExportSettings;
pub use util::{display_path, secure_path};
pub use vault::{FsVault, MemoryVault, Vault};

/// Resolve the vault directory: explicit path, or the current directory
pub fn vault_path(vault: Option<&str>) -> std::path::PathBuf {
    vault
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}
