mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightbox", about = "Generated-image tray and viewer companion")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode every image in an output folder and report fit scales
    Inspect(commands::inspect::InspectArgs),
    /// Show fit scale, zoom steps and pan bounds for an image size
    Fit(commands::fit::FitArgs),
    /// List the batches the tray would show for an output folder
    Scan(commands::scan::ScanArgs),
    /// Print or save the default tray settings as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Fit(args) => commands::fit::run(args),
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
