use approx::assert_relative_eq;
use lightbox_core::bounds::{Pan, Size, ZoomDirection};
use lightbox_core::state::{LoadStatus, ViewerState};

fn fitted(image: Size, container: Size) -> ViewerState {
    let mut s = ViewerState::new();
    s.set_container(container);
    s.commit_image(image, false);
    s
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_new_state_is_empty() {
    let s = ViewerState::new();
    assert!(s.images().is_empty());
    assert_eq!(s.index(), None);
    assert_eq!(s.load_status(), LoadStatus::Idle);
    assert!(s.transform().is_none());
    assert!(!s.can_pan());
}

#[test]
fn test_load_status_display() {
    assert_eq!(format!("{}", LoadStatus::Loading), "Loading");
    assert_eq!(format!("{}", LoadStatus::Failed), "Failed");
}

// ---------------------------------------------------------------------------
// Fit and zoom
// ---------------------------------------------------------------------------

#[test]
fn test_commit_image_fits() {
    let s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    assert_relative_eq!(s.min_scale(), 0.5);
    assert_relative_eq!(s.scale(), 0.5);
    assert_eq!(s.pan(), Pan::ZERO);
}

#[test]
fn test_zoom_without_image_is_noop() {
    let mut s = ViewerState::new();
    s.set_container(Size::new(800.0, 600.0));
    assert!(!s.zoom(ZoomDirection::In, false));
}

#[test]
fn test_zoom_out_at_fit_is_noop() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    assert!(!s.zoom(ZoomDirection::Out, false));
    assert_relative_eq!(s.scale(), 0.5);
}

#[test]
fn test_max_scale_never_below_fit() {
    // 10x10 image in 800x600: fit 60, above the hard limit.
    let mut s = fitted(Size::new(10.0, 10.0), Size::new(800.0, 600.0));
    assert_relative_eq!(s.max_scale(), 60.0);
    assert!(!s.zoom(ZoomDirection::In, false));
    assert!(!s.can_pan());
}

#[test]
fn test_transform_display_size() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.zoom(ZoomDirection::In, false);
    let t = s.transform().unwrap();
    assert_relative_eq!(t.display_size.width, 960.0, epsilon = 1e-3);
    assert_relative_eq!(t.display_size.height, 720.0, epsilon = 1e-3);
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

#[test]
fn test_pan_ignored_at_fit() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.pan_by(30.0, 30.0, false);
    assert_eq!(s.pan(), Pan::ZERO);
}

#[test]
fn test_pan_clamped_to_bounds() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.zoom(ZoomDirection::In, false); // 0.6 -> 960x720, bounds 80x60
    s.pan_by(500.0, -500.0, false);
    assert_relative_eq!(s.pan().x, 80.0, epsilon = 1e-3);
    assert_relative_eq!(s.pan().y, -60.0, epsilon = 1e-3);
}

#[test]
fn test_pan_fast_multiplier() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.zoom(ZoomDirection::In, true); // 1.8, plenty of room
    s.pan_by(10.0, 4.0, true);
    assert_relative_eq!(s.pan().x, 30.0);
    assert_relative_eq!(s.pan().y, 12.0);
}

#[test]
fn test_zoom_back_to_fit_resets_pan() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.zoom(ZoomDirection::In, false);
    s.pan_by(40.0, 20.0, false);
    s.zoom(ZoomDirection::Out, false);
    assert_relative_eq!(s.scale(), s.min_scale(), epsilon = 1e-6);
    assert_eq!(s.pan(), Pan::ZERO);
    assert!(s.bounds().is_collapsed());
}

// ---------------------------------------------------------------------------
// Container changes
// ---------------------------------------------------------------------------

#[test]
fn test_resize_at_fit_follows_fit() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.set_container(Size::new(400.0, 300.0));
    assert_relative_eq!(s.scale(), 0.25);
    assert_relative_eq!(s.min_scale(), 0.25);
}

#[test]
fn test_resize_zoomed_clamps_scale_and_pan() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.zoom(ZoomDirection::In, false); // 0.6
    s.pan_by(80.0, 60.0, false);
    s.set_container(Size::new(1600.0, 1200.0)); // fit 1.0 now
    assert_relative_eq!(s.scale(), 1.0);
    assert_eq!(s.pan(), Pan::ZERO);
}

#[test]
fn test_commit_preserve_zoom_keeps_scale() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.zoom(ZoomDirection::In, true); // 1.8
    s.commit_image(Size::new(1600.0, 1200.0), true);
    assert_relative_eq!(s.scale(), 1.8, epsilon = 1e-5);
}

#[test]
fn test_reset_view() {
    let mut s = fitted(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    s.zoom(ZoomDirection::In, true);
    s.pan_by(50.0, 50.0, false);
    s.reset_view();
    assert_relative_eq!(s.scale(), 0.5);
    assert_eq!(s.pan(), Pan::ZERO);
    assert!(!s.is_panning());
}
