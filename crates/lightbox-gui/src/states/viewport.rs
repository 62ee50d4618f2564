use lightbox_core::bounds::Size;
use lightbox_core::image_list::Locator;

/// Lightbox display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Locator the texture was uploaded for.
    pub texture_locator: Option<Locator>,
    /// Last container size seen by the overlay, before debouncing.
    pub observed_container: Option<Size>,
}

impl ViewportState {
    /// Texture for `locator`, if the uploaded one matches.
    pub fn texture_for(&self, locator: Option<&Locator>) -> Option<&egui::TextureHandle> {
        match (self.texture.as_ref(), self.texture_locator.as_ref(), locator) {
            (Some(texture), Some(uploaded), Some(wanted)) if uploaded == wanted => Some(texture),
            _ => None,
        }
    }
}
