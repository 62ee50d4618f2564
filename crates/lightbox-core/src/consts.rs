use std::time::Duration;

/// Upper zoom limit, as a multiple of the image's natural size.
pub const MAX_SCALE: f32 = 10.0;

/// Zoom factor applied per wheel notch or zoom key.
pub const ZOOM_STEP: f32 = 1.2;

/// Zoom factor while the modifier key is held (3x the normal step).
pub const ZOOM_STEP_FAST: f32 = 3.6;

/// Pan speed multiplier for pointer motion while dragging.
pub const PAN_SPEED: f32 = 1.0;

/// Pan speed multiplier while the modifier key is held.
pub const PAN_SPEED_FAST: f32 = 3.0;

/// Pan bounds below this many pixels on both axes count as "no room to pan".
pub const PAN_COLLAPSE_EPSILON: f32 = 0.5;

/// Minimum spacing between two applied wheel zoom updates.
pub const WHEEL_THROTTLE: Duration = Duration::from_millis(50);

/// Quiet period after the last container resize before re-fitting.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Duration of the close fade-out.
pub const CLOSE_FADE: Duration = Duration::from_millis(200);

/// How long the host waits for its output directory to appear.
pub const ENVIRONMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll interval used while waiting for the environment.
pub const ENVIRONMENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Interval between two scans of the watched output directory.
pub const FEED_SCAN_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of batches kept in the tray.
pub const DEFAULT_MAX_BATCHES: usize = 8;

/// Default tray height in logical pixels.
pub const DEFAULT_TRAY_HEIGHT: f32 = 120.0;

/// Namespace prefix for persisted key/value settings.
pub const SETTINGS_NAMESPACE: &str = "lightbox";

/// File extensions recognized as images by the directory feed.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"];
