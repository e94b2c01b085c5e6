//! Constants for emx-export
//!
//! File names, markers, defaults and message texts shared by the library
//! and the command-line front end.

// === Documents ===

/// Content-type suffix of every note in a vault
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Heading marker, repeated once per nesting level
pub const HEADING_MARKER: char = '#';

/// Path separator used in vault-relative document paths
pub const PATH_SEPARATOR: char = '/';

/// Newline character
pub const NEWLINE: &str = "\n";

// === Settings ===

/// Settings file stored at the vault root
pub const SETTINGS_FILENAME: &str = ".emx-export.json";

/// Default export name prefix
pub const DEFAULT_EXPORT_PREFIX: &str = "";

/// Default export name suffix
pub const DEFAULT_EXPORT_SUFFIX: &str = "_Export";

// === Messages ===

/// Prefix of every failure notification
pub const FAILURE_PREFIX: &str = "Failed: ";

/// Completion notification
pub const EXPORT_SUCCESS_MESSAGE: &str = "Exported Successfully";

/// Reported when prefix and suffix are both empty
pub const ERROR_EXPORT_NAME_UNSET: &str =
    "Cannot replace exporting file, suffix or prefix needed.";
