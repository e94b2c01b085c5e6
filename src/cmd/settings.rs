//! Settings management command module

use std::io;
use std::path::Path;

use emx_export::settings::SETTING_KEYS;
use emx_export::{display_path, ExportError, ExportSettings, SettingsCommand};

pub fn run(vault_root: &Path, json: bool, cmd: SettingsCommand) -> io::Result<()> {
    match cmd {
        SettingsCommand::Show => show(vault_root, json),
        SettingsCommand::Set { key, value } => set(vault_root, &key, &value),
        SettingsCommand::Reset => {
            let path = ExportSettings::default().save(vault_root)?;
            eprintln!("Settings reset: {}", display_path(&path));
            Ok(())
        }
    }
}

fn show(vault_root: &Path, json: bool) -> io::Result<()> {
    let settings = ExportSettings::load(vault_root)?;

    if json {
        let value = serde_json::to_string_pretty(&settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        println!("{}", value);
        return Ok(());
    }

    for key in SETTING_KEYS {
        // Every listed key has a value
        let value = settings.value_of(key).unwrap_or_default();
        println!("{} = {:?}", key, value);
    }
    Ok(())
}

fn set(vault_root: &Path, key: &str, value: &str) -> io::Result<()> {
    let current = ExportSettings::load(vault_root)?;
    let next = current.with_value(key, value).map_err(|message| ExportError::Settings {
        path: ExportSettings::path_in(vault_root),
        message,
    })?;

    next.save(vault_root)?;

    // Output the value that was set (for confirmation)
    println!("{}", next.value_of(key).unwrap_or_default());
    Ok(())
}
