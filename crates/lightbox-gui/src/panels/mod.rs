mod helpers;
pub mod lightbox;
pub mod menu_bar;
pub mod status;
pub mod tray;
