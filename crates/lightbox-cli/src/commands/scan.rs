use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use lightbox_core::consts::FEED_SCAN_INTERVAL;
use lightbox_core::environment::wait_for_directory_within;
use lightbox_core::feed::DirectoryFeed;
use lightbox_core::settings::TraySettings;
use lightbox_core::tray::Tray;

#[derive(Args)]
pub struct ScanArgs {
    /// Output folder to scan
    pub dir: PathBuf,

    /// Tray settings file (TOML); defaults otherwise
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep watching and print new batches as they appear
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds to wait for the folder to appear
    #[arg(long, default_value = "5")]
    pub wait: u64,
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let settings = match args.config {
        Some(ref path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            TraySettings::from_toml(&content)?
        }
        None => TraySettings::default(),
    };

    let dir = wait_for_directory_within(&args.dir, Duration::from_secs(args.wait))?;
    let mut feed = DirectoryFeed::new(dir);
    let mut tray = Tray::new(settings);

    for event in feed.scan()? {
        tray.push(event);
    }
    print_tray(&tray);

    if !args.watch {
        return Ok(());
    }

    tray.set_update_callback(|list| {
        println!("-- tray now holds {} images", list.len());
    });
    loop {
        std::thread::sleep(FEED_SCAN_INTERVAL);
        for event in feed.scan()? {
            println!(
                "+ {} new image(s) from {}",
                event.images.len(),
                event.source_node_id
            );
            for image in &event.images {
                println!("    {}", image.file_name());
            }
            tray.push(event);
        }
    }
}

fn print_tray(tray: &Tray) {
    let batches = tray.visible_batches();
    if batches.is_empty() {
        println!("No images found.");
        return;
    }
    for batch in &batches {
        println!(
            "Batch #{} [{}] {} image(s)",
            batch.id,
            batch.source_node_id,
            batch.images.len()
        );
        for image in &batch.images {
            println!("    {}", image.file_name());
        }
    }
    let hidden = tray.batch_count() - batches.len();
    if hidden > 0 {
        println!("({hidden} batch(es) hidden by the node filter)");
    }
    println!("Total: {} image(s)", tray.images().len());
}
