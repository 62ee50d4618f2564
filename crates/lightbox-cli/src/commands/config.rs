use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lightbox_core::settings::{FileStore, TraySettings};

#[derive(Args)]
pub struct ConfigArgs {
    /// Write settings to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the settings currently persisted for the desktop app
    #[arg(long, conflicts_with = "output")]
    pub current: bool,
}

/// Print or save tray settings as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let settings = if args.current {
        let path = FileStore::default_path().context("No config directory available")?;
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        eprintln!("# {}", path.display());
        TraySettings::load(&store)
    } else {
        TraySettings::default()
    };
    let toml_str = settings.to_toml()?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        println!("Default settings saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
