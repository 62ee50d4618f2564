pub mod bounds;
pub mod consts;
pub mod controller;
pub mod drag;
pub mod environment;
pub mod error;
pub mod feed;
pub mod image_list;
pub mod loader;
pub mod settings;
pub mod state;
pub mod throttle;
pub mod tray;
