//! Rolodex - main entry point.
//!
//! Boot order follows the original tool: CLI flags, then environment
//! configuration, then the contacts file (a missing file is only a
//! warning), then the splash screen, then the interactive loop.

use anyhow::Result;
use clap::Parser;
use rolodex::shell::render;
use rolodex::{Config, Shell};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rolodex", version)]
#[command(about = "Local contact manager with a line-oriented command shell")]
struct Args {
    /// Contacts file to load (overrides ROLODEX_CONTACTS_FILE)
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Skip the startup splash screen
    #[arg(long)]
    no_splash: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?;

    // Logging goes to stderr; the shell owns stdout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config;
    if let Some(file) = args.file {
        config.contacts_file = file;
    }
    info!(file = %config.contacts_file, "starting rolodex");

    let mut shell = Shell::new(&config);
    let contacts_file = config.contacts_file.clone();
    shell.load_contacts(&contacts_file);

    if config.splash_screen && !args.no_splash {
        render::splash();
    }

    shell.run()
}
