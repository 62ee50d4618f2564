mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{image_list, write_png, MapSource};
use lightbox_core::bounds::Size;
use lightbox_core::controller::{LoadCommit, ViewerController};
use lightbox_core::image_list::Locator;
use lightbox_core::loader::{probe_dimensions, spawn_loader, FsImageSource, ImageSource};

// ---------------------------------------------------------------------------
// Filesystem source
// ---------------------------------------------------------------------------

#[test]
fn test_fs_source_decodes_png_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    write_png(&path, 12, 7);

    let img = FsImageSource.decode(&Locator::from(path.as_path())).unwrap();
    assert_eq!((img.width, img.height), (12, 7));
    assert_eq!(img.rgba.len(), 12 * 7 * 4);
    assert_eq!(img.size(), Size::new(12.0, 7.0));
}

#[test]
fn test_fs_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Locator::from(dir.path().join("gone.png"));
    assert!(FsImageSource.decode(&missing).is_err());
}

#[test]
fn test_fs_source_rejects_non_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.png");
    std::fs::write(&path, b"not a png at all").unwrap();
    assert!(FsImageSource.decode(&Locator::from(path)).is_err());
}

#[test]
fn test_probe_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("probe.png");
    write_png(&path, 30, 20);
    let size = probe_dimensions(&Locator::from(path)).unwrap();
    assert_eq!(size, Size::new(30.0, 20.0));
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

#[test]
fn test_worker_round_trip_with_controller() {
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    let loader = spawn_loader(MapSource::default().with("A", 640, 480), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    let mut c = ViewerController::new();
    c.on_container_resize(Size::new(320.0, 240.0));
    let req = c.show(image_list(&["A"]), 0).unwrap();
    loader.request(req).unwrap();

    let outcome = loader.recv().unwrap();
    assert!(matches!(c.complete_load(outcome), LoadCommit::Loaded(_)));
    assert_eq!(c.state().scale(), 0.5);
    assert!(wakes.load(Ordering::SeqCst) >= 1);
}

#[test]
fn test_worker_reports_failures() {
    let loader = spawn_loader(MapSource::default(), || {}).unwrap();
    let mut c = ViewerController::new();
    let req = c.show(image_list(&["missing"]), 0).unwrap();
    loader.request(req).unwrap();

    let outcome = loader.recv().unwrap();
    assert!(outcome.result.is_err());
    assert!(matches!(c.complete_load(outcome), LoadCommit::Failed(_)));
}

#[test]
fn test_worker_last_request_always_answered() {
    let loader = spawn_loader(
        MapSource::default()
            .with("A", 10, 10)
            .with("B", 20, 20)
            .with("C", 30, 30),
        || {},
    )
    .unwrap();

    let mut c = ViewerController::new();
    let mut last = c.show(image_list(&["A", "B", "C"]), 0).unwrap();
    loader.request(last.clone()).unwrap();
    for _ in 0..2 {
        last = c.navigate(1).unwrap();
        loader.request(last.clone()).unwrap();
    }

    // Earlier requests may be coalesced away; the newest is never dropped.
    loop {
        let outcome = loader.recv().unwrap();
        let id = outcome.id;
        let commit = c.complete_load(outcome);
        if id == last.id {
            assert!(matches!(commit, LoadCommit::Loaded(ref img) if img.width == 30));
            break;
        }
        assert!(matches!(commit, LoadCommit::Stale));
    }
    assert_eq!(c.displayed_locator(), Some(&Locator::new("C")));
}
