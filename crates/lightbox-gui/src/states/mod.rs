mod ui;
mod viewport;

pub use ui::{FeedStatus, UIState};
pub use viewport::ViewportState;
