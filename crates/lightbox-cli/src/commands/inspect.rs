use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use lightbox_core::bounds::{compute_fit_scale, Size};
use lightbox_core::feed::DirectoryFeed;
use lightbox_core::image_list::Locator;
use lightbox_core::loader::{probe_dimensions, FsImageSource, ImageSource};
use rayon::prelude::*;

use super::parse_size;
use crate::summary::{print_field, print_title, Styles};

#[derive(Args)]
pub struct InspectArgs {
    /// Output folder to inspect
    pub dir: PathBuf,

    /// Container size used for the fit column
    #[arg(long, value_parser = parse_size, default_value = "1920x1080")]
    pub container: Size,

    /// Read headers only instead of decoding every image
    #[arg(long)]
    pub quick: bool,
}

struct Inspected {
    node: String,
    locator: Locator,
    result: lightbox_core::error::Result<Size>,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let start = Instant::now();
    let mut feed = DirectoryFeed::new(&args.dir);
    let events = feed
        .scan()
        .with_context(|| format!("Failed to scan {}", args.dir.display()))?;

    let items: Vec<(String, Locator)> = events
        .into_iter()
        .flat_map(|e| {
            let node = e.source_node_id;
            e.images.into_iter().map(move |l| (node.clone(), l))
        })
        .collect();

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message(if args.quick { "Probing" } else { "Decoding" });

    let results: Vec<Inspected> = items
        .into_par_iter()
        .map(|(node, locator)| {
            let result = if args.quick {
                probe_dimensions(&locator)
            } else {
                FsImageSource.decode(&locator).map(|img| img.size())
            };
            pb.inc(1);
            Inspected {
                node,
                locator,
                result,
            }
        })
        .collect();
    pb.finish_and_clear();

    let s = Styles::new();
    print_title(&s, "Lightbox Inspect");
    print_field(&s, "Folder", s.path.apply_to(args.dir.display()));
    print_field(
        &s,
        "Container",
        format!("{}x{}", args.container.width, args.container.height),
    );
    println!();

    println!(
        "  {:<16} {:<32} {:>11} {:>8}",
        s.header.apply_to("Node"),
        s.header.apply_to("File"),
        s.header.apply_to("Size"),
        s.header.apply_to("Fit")
    );

    let mut failed = 0usize;
    for item in &results {
        match &item.result {
            Ok(size) => {
                let fit = compute_fit_scale(*size, args.container);
                println!(
                    "  {:<16} {:<32} {:>11} {:>8}",
                    item.node,
                    item.locator.file_name(),
                    format!("{}x{}", size.width, size.height),
                    s.ok.apply_to(format!("{:.3}", fit))
                );
            }
            Err(e) => {
                failed += 1;
                println!(
                    "  {:<16} {:<32} {}",
                    item.node,
                    item.locator.file_name(),
                    s.error.apply_to(e)
                );
            }
        }
    }

    println!();
    print_field(&s, "Images", results.len());
    print_field(&s, "Failed", failed);
    print_field(&s, "Elapsed", format!("{:.2}s", start.elapsed().as_secs_f32()));
    println!();

    if failed > 0 {
        tracing::warn!("{failed} image(s) could not be read");
    }
    Ok(())
}
