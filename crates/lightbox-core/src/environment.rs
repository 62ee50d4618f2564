use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::consts::{ENVIRONMENT_POLL_INTERVAL, ENVIRONMENT_TIMEOUT};
use crate::error::{LightboxError, Result};

/// Poll `probe` until it yields a value or `timeout` elapses.
///
/// Blocks the calling thread; hosts run it off the UI thread.
pub fn wait_for<T>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut probe: impl FnMut() -> Option<T>,
) -> Result<T> {
    let start = Instant::now();
    loop {
        if let Some(value) = probe() {
            tracing::debug!("{what} available after {:?}", start.elapsed());
            return Ok(value);
        }
        let waited = start.elapsed();
        if waited >= timeout {
            return Err(LightboxError::EnvironmentTimeout {
                what: what.to_string(),
                waited,
            });
        }
        std::thread::sleep(interval.min(timeout - waited));
    }
}

/// Wait for `dir` to exist as a directory, with the default timeout.
pub fn wait_for_directory(dir: &Path) -> Result<PathBuf> {
    wait_for_directory_within(dir, ENVIRONMENT_TIMEOUT)
}

pub fn wait_for_directory_within(dir: &Path, timeout: Duration) -> Result<PathBuf> {
    wait_for(
        &format!("directory {}", dir.display()),
        timeout,
        ENVIRONMENT_POLL_INTERVAL,
        || dir.is_dir().then(|| dir.to_path_buf()),
    )
}
