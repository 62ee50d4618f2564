use approx::assert_relative_eq;
use lightbox_core::bounds::{
    clamp_pan, compute_fit_scale, compute_pan_bounds, wrap_index, zoom_factor, zoom_step, Pan,
    PanBounds, Size, ZoomDirection,
};
use lightbox_core::consts::MAX_SCALE;

// ---------------------------------------------------------------------------
// wrap_index
// ---------------------------------------------------------------------------

#[test]
fn test_wrap_index_empty_list() {
    assert_eq!(wrap_index(0, 1, 0), None);
    assert_eq!(wrap_index(3, -1, 0), None);
}

#[test]
fn test_wrap_index_full_cycle_returns_to_start() {
    for len in 1..8usize {
        for start in 0..len {
            let mut i = start;
            for _ in 0..len {
                i = wrap_index(i, 1, len).unwrap();
            }
            assert_eq!(i, start, "len={len} start={start}");
        }
    }
}

#[test]
fn test_wrap_index_ends() {
    assert_eq!(wrap_index(0, -1, 5), Some(4));
    assert_eq!(wrap_index(4, 1, 5), Some(0));
    assert_eq!(wrap_index(2, 0, 5), Some(2));
}

// ---------------------------------------------------------------------------
// Fit scale
// ---------------------------------------------------------------------------

#[test]
fn test_fit_scale_downscales_large_image() {
    let s = compute_fit_scale(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    assert_relative_eq!(s, 0.5);
}

#[test]
fn test_fit_scale_upscales_small_image() {
    let s = compute_fit_scale(Size::new(100.0, 50.0), Size::new(800.0, 600.0));
    assert_relative_eq!(s, 8.0);
}

#[test]
fn test_fit_scale_limited_by_narrow_axis() {
    // Tall image: height decides.
    let s = compute_fit_scale(Size::new(500.0, 2000.0), Size::new(1000.0, 1000.0));
    assert_relative_eq!(s, 0.5);
}

#[test]
fn test_fit_scale_negative_size_is_one() {
    let s = compute_fit_scale(Size::new(-5.0, 10.0), Size::new(800.0, 600.0));
    assert_eq!(s, 1.0);
}

// ---------------------------------------------------------------------------
// Pan bounds and clamping
// ---------------------------------------------------------------------------

#[test]
fn test_pan_bounds_zero_at_or_below_fit() {
    let image = Size::new(1600.0, 1200.0);
    let container = Size::new(800.0, 600.0);
    assert_eq!(compute_pan_bounds(0.5, 0.5, image, container), PanBounds::NONE);
    assert_eq!(compute_pan_bounds(0.4, 0.5, image, container), PanBounds::NONE);
}

#[test]
fn test_pan_bounds_zoomed_in() {
    let b = compute_pan_bounds(1.0, 0.5, Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
    assert_relative_eq!(b.max_x, 400.0);
    assert_relative_eq!(b.max_y, 300.0);
    assert!(!b.is_collapsed());
}

#[test]
fn test_pan_bounds_axis_smaller_than_container() {
    // Wide image zoomed a bit: fits vertically, overflows horizontally.
    let b = compute_pan_bounds(1.2, 1.0, Size::new(800.0, 200.0), Size::new(800.0, 600.0));
    assert_relative_eq!(b.max_x, 80.0);
    assert_eq!(b.max_y, 0.0);
}

#[test]
fn test_collapsed_bounds_under_epsilon() {
    assert!(PanBounds { max_x: 0.2, max_y: 0.4 }.is_collapsed());
    assert!(!PanBounds { max_x: 0.2, max_y: 3.0 }.is_collapsed());
}

#[test]
fn test_clamp_pan_limits_each_axis() {
    let b = PanBounds { max_x: 10.0, max_y: 5.0 };
    assert_eq!(clamp_pan(Pan::new(50.0, -50.0), b), Pan::new(10.0, -5.0));
    assert_eq!(clamp_pan(Pan::new(3.0, 2.0), b), Pan::new(3.0, 2.0));
}

#[test]
fn test_clamp_pan_idempotent() {
    let b = PanBounds { max_x: 12.5, max_y: 7.0 };
    for &(x, y) in &[(100.0, 100.0), (-3.0, 9.0), (0.0, 0.0), (-400.0, -1.0)] {
        let once = clamp_pan(Pan::new(x, y), b);
        assert_eq!(clamp_pan(once, b), once);
    }
}

#[test]
fn test_clamp_pan_no_bounds_forces_zero() {
    assert_eq!(clamp_pan(Pan::new(12.0, -4.0), PanBounds::NONE), Pan::ZERO);
}

// ---------------------------------------------------------------------------
// Zoom steps
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_factor_fast_is_triple() {
    assert_relative_eq!(zoom_factor(true), zoom_factor(false) * 3.0);
}

#[test]
fn test_three_zoom_ins_from_fit() {
    let mut s = 0.5;
    for _ in 0..3 {
        s = zoom_step(s, ZoomDirection::In, false, 0.5, MAX_SCALE);
    }
    assert_relative_eq!(s, 0.864, epsilon = 1e-5);
}

#[test]
fn test_zoom_in_out_round_trip() {
    for &start in &[0.7f32, 1.0, 2.5, 4.0] {
        let zoomed = zoom_step(start, ZoomDirection::In, false, 0.5, MAX_SCALE);
        let back = zoom_step(zoomed, ZoomDirection::Out, false, 0.5, MAX_SCALE);
        assert_relative_eq!(back, start, epsilon = 1e-5);
    }
}

#[test]
fn test_zoom_clamped_to_limits() {
    assert_eq!(zoom_step(9.5, ZoomDirection::In, true, 0.5, MAX_SCALE), MAX_SCALE);
    assert_eq!(zoom_step(0.55, ZoomDirection::Out, false, 0.5, MAX_SCALE), 0.5);
}
