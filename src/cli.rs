use clap::{Parser, Subcommand};

/// emx-export - Flatten embedded notes into a single export note
///
/// # Quick Reference
///
/// ```bash
/// emx-export export "Book"                 # Write Book_Export.md at the vault root
/// emx-export export "Drafts/Book"          # Folder-qualified root note
/// emx-export export "Book" --stdout        # Print the merged text instead
/// emx-export export "Book" --no-titles     # No title line per embedded note
/// emx-export export "Book" --flat-headings # Keep heading levels as written
/// emx-export resolve "Chapter 1"           # Show which note a link points at
/// ```
///
/// ## Embeds
///
/// Lines starting with `![[Note]]` or `![[Note|alias]]` are replaced by the
/// content of `Note`, recursively. Each level of embedding adds one `#` to
/// the headings of the embedded note. Media embeds such as
/// `![[diagram.png]]` are kept as written.
///
/// ## Settings
///
/// ```bash
/// emx-export settings show
/// emx-export settings set suffix _Merged
/// emx-export settings set stacked-headings false
/// emx-export settings reset
/// ```
///
/// Settings live in `.emx-export.json` at the vault root.
///
/// ## Environment Variables
///
/// - `EMX_EXPORT_VAULT`: vault directory (default: current directory)
/// - `RUST_LOG`: log filter, e.g. `emx_export=debug`
#[derive(Parser, Debug)]
#[command(name = "emx-export")]
#[command(version = "0.1.0")]
#[command(about = "Flatten embedded notes into a single export note")]
pub struct Cli {
    /// Vault directory holding the notes
    #[arg(long, global = true, env = "EMX_EXPORT_VAULT", value_name = "PATH")]
    pub vault: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge a note and everything it embeds into a new note
    #[command(alias = "x")]
    Export {
        /// Root note (path or name, ".md" optional)
        note: Option<String>,

        /// Export name prefix (overrides settings)
        #[arg(long)]
        prefix: Option<String>,

        /// Export name suffix (overrides settings)
        #[arg(long)]
        suffix: Option<String>,

        /// Do not insert a title line for embedded notes
        #[arg(long)]
        no_titles: bool,

        /// Do not add heading levels per embedding depth
        #[arg(long)]
        flat_headings: bool,

        /// Print the merged text to stdout instead of creating a note
        #[arg(long)]
        stdout: bool,

        /// Replace an existing export note
        #[arg(long)]
        overwrite: bool,
    },

    /// Resolve a link target to a note path
    #[command(alias = "rv")]
    Resolve {
        /// Link target as written inside ![[...]]
        target: String,
    },

    /// Show or change export settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print current settings
    Show,

    /// Change one setting (stacked-headings, insert-titles, prefix, suffix)
    Set {
        key: String,
        /// New value; true/false for toggles
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Restore default settings
    Reset,
}
