//! User-facing notifications
//!
//! Link failures and the completion signal are sent to a [`Notifier`].
//! Sending is fire-and-forget: nothing a notifier does changes control flow.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::constants as C;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An embed-link target matched no document; the line was dropped
    LinkNotResolved { target: String },
    /// An embed-link resolved to a note already being expanded
    EmbedCycle { target: String, path: String },
    /// The export artifact was created
    Exported { path: PathBuf, unresolved: usize },
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        !matches!(self, Notice::Exported { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LinkNotResolved { target } => {
                write!(f, "{}Failed to find file link: {}", C::FAILURE_PREFIX, target)
            }
            Notice::EmbedCycle { target, path } => {
                write!(f, "{}Embed cycle at link: {} ({})", C::FAILURE_PREFIX, target, path)
            }
            Notice::Exported { .. } => f.write_str(C::EXPORT_SUCCESS_MESSAGE),
        }
    }
}

/// Sink for notifications
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Notifier that keeps every notice, in order
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    pub notices: Vec<Notice>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.is_failure())
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Notifier writing one line per notice
#[derive(Debug)]
pub struct WriterNotifier<W: Write> {
    out: W,
}

/// Notifier printing to stderr
pub type StderrNotifier = WriterNotifier<io::Stderr>;

impl<W: Write> WriterNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterNotifier<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Notifier for WriterNotifier<W> {
    fn notify(&mut self, notice: Notice) {
        // A notice that cannot be printed is dropped
        let _ = writeln!(self.out, "{}", notice);
    }
}
