use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightboxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to load {locator}: {reason}")]
    LoadFailure { locator: String, reason: String },

    #[error("Timed out after {waited:?} waiting for {what}")]
    EnvironmentTimeout { what: String, waited: Duration },

    #[error("Pointer capture error: {0}")]
    CaptureError(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Loader worker disconnected")]
    WorkerDisconnected,
}

impl From<toml::de::Error> for LightboxError {
    fn from(e: toml::de::Error) -> Self {
        Self::Settings(e.to_string())
    }
}

impl From<toml::ser::Error> for LightboxError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Settings(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LightboxError>;
