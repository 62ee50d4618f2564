use std::path::PathBuf;

use lightbox_core::settings::TraySettings;

/// Results sent from helper threads (dialogs, environment wait) to the UI thread.
pub enum AppEvent {
    /// User picked an output directory to watch.
    FolderPicked { path: PathBuf },

    /// The watched directory appeared, or the wait gave up.
    FeedReady {
        path: PathBuf,
        result: Result<(), String>,
    },

    SettingsImported { settings: TraySettings },

    Log { message: String },
}
