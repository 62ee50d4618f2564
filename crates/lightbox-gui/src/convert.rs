use lightbox_core::loader::DecodedImage;

/// Wrap decoded RGBA8 pixels as an egui ColorImage.
pub fn decoded_to_color_image(image: &DecodedImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width as usize, image.height as usize],
        &image.rgba,
    )
}

/// Downscaled RGBA thumbnail, longest side at most `max_side`.
pub fn thumbnail_color_image(img: &image::DynamicImage, max_side: u32) -> egui::ColorImage {
    let thumb = img.thumbnail(max_side, max_side).to_rgba8();
    let (w, h) = thumb.dimensions();
    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], thumb.as_raw())
}
