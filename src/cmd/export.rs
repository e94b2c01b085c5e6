//! Export command module

use std::io::{self, Write};
use std::path::Path;

use emx_export::{
    display_path, ExportEngine, ExportOptions, ExportSettings, FsVault, StderrNotifier,
};

/// Command-line values layered over the stored settings for one run
#[derive(Debug, Default)]
pub struct Overrides {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub no_titles: bool,
    pub flat_headings: bool,
}

impl Overrides {
    fn apply(self, stored: ExportSettings) -> ExportSettings {
        ExportSettings {
            stacked_headings: stored.stacked_headings && !self.flat_headings,
            insert_titles: stored.insert_titles && !self.no_titles,
            export_prefix: self.prefix.unwrap_or(stored.export_prefix),
            export_suffix: self.suffix.unwrap_or(stored.export_suffix),
        }
    }
}

pub fn run(
    vault_root: &Path,
    json: bool,
    note: Option<&str>,
    overrides: Overrides,
    stdout: bool,
    overwrite: bool,
) -> io::Result<()> {
    let vault = FsVault::open(vault_root)?;

    // Settings are read fresh for every export
    let settings = overrides.apply(ExportSettings::load(vault.root())?);
    let engine = ExportEngine::new(vault);
    let mut notifier = StderrNotifier::stderr();

    if stdout {
        let flattened = engine.flatten_note(note, &settings, &mut notifier)?;
        let mut out = io::stdout().lock();
        out.write_all(flattened.text.as_bytes())?;
        return out.flush();
    }

    let report = engine.export(note, &settings, ExportOptions { overwrite }, &mut notifier)?;

    if json {
        let value = serde_json::json!({
            "root": report.root.path,
            "artifact": display_path(&report.artifact),
            "failures": report.failures,
        });
        println!("{}", value);
    } else {
        // Output full path for shell pipeline compatibility
        println!("{}", display_path(&report.artifact));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_layer_on_stored() {
        let stored = ExportSettings::default();
        let settings = Overrides {
            suffix: Some("_Full".to_string()),
            no_titles: true,
            ..Default::default()
        }
        .apply(stored);

        assert!(settings.stacked_headings);
        assert!(!settings.insert_titles);
        assert_eq!(settings.export_prefix, "");
        assert_eq!(settings.export_suffix, "_Full");
    }

    #[test]
    fn test_no_overrides_keep_stored() {
        let stored = ExportSettings {
            stacked_headings: false,
            ..Default::default()
        };
        assert_eq!(Overrides::default().apply(stored.clone()), stored);
    }
}
