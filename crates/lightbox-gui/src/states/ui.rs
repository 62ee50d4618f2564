use std::fmt;
use std::path::PathBuf;

/// Keep this many log lines for the status panel.
const MAX_LOG_LINES: usize = 200;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FeedStatus {
    #[default]
    NoFolder,
    /// Waiting for the directory to appear.
    Waiting,
    Watching,
    Unavailable(String),
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFolder => write!(f, "No folder"),
            Self::Waiting => write!(f, "Waiting for folder..."),
            Self::Watching => write!(f, "Watching"),
            Self::Unavailable(reason) => write!(f, "Unavailable: {reason}"),
        }
    }
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub watch_dir: Option<PathBuf>,
    pub feed_status: FeedStatus,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }
}
