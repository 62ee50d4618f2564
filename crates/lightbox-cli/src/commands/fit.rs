use anyhow::{bail, Result};
use clap::Args;
use lightbox_core::bounds::{compute_fit_scale, compute_pan_bounds, zoom_step, Size, ZoomDirection};
use lightbox_core::consts::MAX_SCALE;

use super::parse_size;

#[derive(Args)]
pub struct FitArgs {
    /// Natural image size, e.g. 1600x1200
    #[arg(value_parser = parse_size)]
    pub image: Size,

    /// Container size
    #[arg(long, value_parser = parse_size, default_value = "1920x1080")]
    pub container: Size,

    /// Number of zoom-in steps to list
    #[arg(long, default_value = "5")]
    pub steps: usize,

    /// Use the fast (modifier held) zoom factor
    #[arg(long)]
    pub fast: bool,
}

pub fn run(args: &FitArgs) -> Result<()> {
    if !args.image.is_valid() {
        bail!("image size must be positive");
    }
    let fit = compute_fit_scale(args.image, args.container);
    let max = MAX_SCALE.max(fit);

    println!(
        "Image {}x{} in container {}x{}",
        args.image.width, args.image.height, args.container.width, args.container.height
    );
    println!("Fit scale:   {fit:.4}");
    println!("Max scale:   {max:.4}");
    println!();
    println!("{:>5}  {:>10}  {:>12}  {:>16}", "Step", "Scale", "Size", "Pan bounds");
    println!("{}", "-".repeat(49));

    let mut scale = fit;
    for step in 0..=args.steps {
        let shown = args.image.scaled(scale);
        let bounds = compute_pan_bounds(scale, fit, args.image, args.container);
        println!(
            "{:>5}  {:>10.4}  {:>12}  {:>16}",
            step,
            scale,
            format!("{:.0}x{:.0}", shown.width, shown.height),
            format!("+/-{:.1}, +/-{:.1}", bounds.max_x, bounds.max_y)
        );
        let next = zoom_step(scale, ZoomDirection::In, args.fast, fit, max);
        if next == scale {
            println!("(clamped at max scale)");
            break;
        }
        scale = next;
    }

    Ok(())
}
