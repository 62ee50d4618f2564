pub mod config;
pub mod fit;
pub mod inspect;
pub mod scan;

use lightbox_core::bounds::Size;

/// Parse `WIDTHxHEIGHT`, e.g. `1920x1080`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: f32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let height: f32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    let size = Size::new(width, height);
    if !size.is_valid() {
        return Err(format!("size must be positive, got '{s}'"));
    }
    Ok(size)
}
