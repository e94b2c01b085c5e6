use clap::Parser;
use emx_export::{constants as C, vault_path, Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "emx_export=debug" } else { "emx_export=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let vault = vault_path(cli.vault.as_deref());

    let result = match cli.command {
        Command::Export { note, prefix, suffix, no_titles, flat_headings, stdout, overwrite } => {
            cmd::export::run(
                &vault,
                cli.json,
                note.as_deref(),
                cmd::export::Overrides { prefix, suffix, no_titles, flat_headings },
                stdout,
                overwrite,
            )
        }
        Command::Resolve { target } => cmd::resolve::run(&vault, cli.json, &target),
        Command::Settings(settings_cmd) => cmd::settings::run(&vault, cli.json, settings_cmd),
    };

    if let Err(e) = result {
        eprintln!("{}{}", C::FAILURE_PREFIX, e);
        std::process::exit(1);
    }
}

mod cmd {
    pub mod export;
    pub mod resolve;
    pub mod settings;
}
