//! Link resolution command module

use std::io;
use std::path::Path;

use emx_export::{resolve_link, FsVault, Vault};

pub fn run(vault_root: &Path, json: bool, target: &str) -> io::Result<()> {
    let vault = FsVault::open(vault_root)?;
    let index = vault.index()?;

    let Some(document) = resolve_link(target, &index) else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Failed to find file link: {}", target),
        ));
    };

    if json {
        let value = serde_json::json!({
            "target": target,
            "path": document.path,
            "basename": document.basename,
        });
        println!("{}", value);
    } else {
        println!("{}", document.path);
    }

    Ok(())
}
