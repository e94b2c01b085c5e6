//! Embed-link detection
//!
//! An embed-link is `![[target]]` or `![[target|alias]]` at the very start
//! of a line. Targets carrying a file extension (`![[diagram.png]]`) point
//! at media, not notes, and are left alone.

use once_cell::sync::Lazy;
use regex::Regex;

static EMBED_LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^!\[\[(.+?)(?:\|(.+?))?\]\]").expect("embed link regex")
});

/// A note embed parsed from the start of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedLink {
    /// Raw path or name inside the brackets
    pub target: String,
    /// Display override, never emitted
    pub alias: Option<String>,
}

impl EmbedLink {
    /// Parse a line that starts with a note embed
    ///
    /// Returns `None` for ordinary lines, embeds that do not start the line,
    /// and media embeds.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = EMBED_LINK_REGEX.captures(line)?;
        let target = caps.get(1)?.as_str();

        if has_extension(target) {
            return None;
        }

        Some(Self {
            target: target.to_string(),
            alias: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }
}

/// True when a `.` follows at least one character and precedes a
/// non-whitespace character, e.g. `image.png` or `clip.mp4`
fn has_extension(target: &str) -> bool {
    let chars: Vec<char> = target.chars().collect();
    chars
        .windows(2)
        .enumerate()
        .any(|(i, pair)| i >= 1 && pair[0] == '.' && !pair[1].is_whitespace())
}
