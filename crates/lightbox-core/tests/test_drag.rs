mod common;

use approx::assert_relative_eq;
use common::{controller, image_list, open_loaded, RecordingCapture};
use lightbox_core::bounds::{Pan, ZoomDirection};
use lightbox_core::drag::{DragPhase, DragSession, NoCapture, PointerButton};

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

#[test]
fn test_session_requires_primary_button_over_image() {
    let mut capture = RecordingCapture::default();
    let mut s = DragSession::new();
    assert!(!s.begin(PointerButton::Secondary, true, true, &mut capture));
    assert!(!s.begin(PointerButton::Primary, false, true, &mut capture));
    assert!(!s.begin(PointerButton::Primary, true, false, &mut capture));
    assert_eq!(capture.log.borrow().requests, 0);
    assert!(s.begin(PointerButton::Primary, true, true, &mut capture));
    assert_eq!(s.phase(), DragPhase::CaptureRequested);
}

#[test]
fn test_session_motion_only_while_dragging() {
    let mut capture = RecordingCapture::default();
    let mut s = DragSession::new();
    s.begin(PointerButton::Primary, true, true, &mut capture);
    assert_eq!(s.motion(3.0, 4.0), None);
    assert_eq!(s.capture_changed(true), DragPhase::Dragging);
    assert_eq!(s.motion(3.0, 4.0), Some((3.0, 4.0)));
}

#[test]
fn test_session_grant_without_request_is_ignored() {
    let mut s = DragSession::new();
    assert_eq!(s.capture_changed(true), DragPhase::Released);
}

#[test]
fn test_session_capture_error_stays_released() {
    let mut s = DragSession::new();
    assert!(!s.begin(PointerButton::Primary, true, true, &mut NoCapture));
    assert_eq!(s.phase(), DragPhase::Released);
}

#[test]
fn test_session_release_is_idempotent() {
    let mut capture = RecordingCapture::default();
    let mut s = DragSession::new();
    s.begin(PointerButton::Primary, true, true, &mut capture);
    s.release(&mut capture);
    s.release(&mut capture);
    assert_eq!(capture.log.borrow().releases, 1);
}

#[test]
fn test_drag_phase_display() {
    assert_eq!(format!("{}", DragPhase::CaptureRequested), "Capture requested");
}

// ---------------------------------------------------------------------------
// Through the controller
// ---------------------------------------------------------------------------

#[test]
fn test_drag_pans_when_zoomed() {
    let (mut c, log) = open_loaded(&["A"], 0, 1600, 1200);
    c.zoom(ZoomDirection::In, false); // bounds 80x60
    assert!(c.pointer_down(PointerButton::Primary, true));
    assert_eq!(log.borrow().requests, 1);

    c.capture_changed(true);
    assert!(c.state().is_panning());
    assert!(c.pointer_motion(10.0, 5.0, false));
    assert_eq!(c.state().pan(), Pan::new(10.0, 5.0));

    c.pointer_up();
    assert!(!c.state().is_panning());
    assert_eq!(c.drag_phase(), DragPhase::Released);
    assert_eq!(log.borrow().releases, 1);
}

#[test]
fn test_drag_not_started_at_fit() {
    let (mut c, log) = open_loaded(&["A"], 0, 1600, 1200);
    assert!(!c.pointer_down(PointerButton::Primary, true));
    assert_eq!(log.borrow().requests, 0);
}

#[test]
fn test_drag_not_started_while_loading() {
    let (mut c, log) = controller();
    c.show(image_list(&["A"]), 0);
    assert!(!c.pointer_down(PointerButton::Primary, true));
    assert_eq!(log.borrow().requests, 0);
}

#[test]
fn test_capture_loss_force_releases() {
    let (mut c, log) = open_loaded(&["A"], 0, 1600, 1200);
    c.zoom(ZoomDirection::In, false);
    c.pointer_down(PointerButton::Primary, true);
    c.capture_changed(true);

    c.capture_changed(false);
    assert_eq!(c.drag_phase(), DragPhase::Released);
    assert!(!c.state().is_panning());
    assert!(log.borrow().releases >= 1);
    assert!(!c.pointer_motion(10.0, 10.0, false));
    assert_eq!(c.state().pan(), Pan::ZERO);
}

#[test]
fn test_capture_denied_by_platform() {
    let (mut c, log) = open_loaded(&["A"], 0, 1600, 1200);
    c.zoom(ZoomDirection::In, false);
    log.borrow_mut().deny = true;
    assert!(!c.pointer_down(PointerButton::Primary, true));
    assert_eq!(c.drag_phase(), DragPhase::Released);
}

#[test]
fn test_zoom_to_fit_ends_drag() {
    let (mut c, _) = open_loaded(&["A"], 0, 1600, 1200);
    c.zoom(ZoomDirection::In, false);
    c.pointer_down(PointerButton::Primary, true);
    c.capture_changed(true);
    c.pointer_motion(20.0, 20.0, false);

    c.zoom(ZoomDirection::Out, false);
    assert_relative_eq!(c.state().scale(), 0.5, epsilon = 1e-6);
    assert_eq!(c.drag_phase(), DragPhase::Released);
    assert_eq!(c.state().pan(), Pan::ZERO);
}

#[test]
fn test_double_activate_resets_and_releases() {
    let (mut c, log) = open_loaded(&["A"], 0, 1600, 1200);
    c.zoom(ZoomDirection::In, true);
    c.pointer_down(PointerButton::Primary, true);
    c.capture_changed(true);
    c.pointer_motion(40.0, 0.0, true);
    assert_relative_eq!(c.state().pan().x, 120.0);

    c.double_activate();
    assert_relative_eq!(c.state().scale(), 0.5);
    assert_eq!(c.state().pan(), Pan::ZERO);
    assert_eq!(log.borrow().releases, 1);
}
