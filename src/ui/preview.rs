/// Preview surface for the most recent result
use iced::widget::image::Handle;
use image::DynamicImage;

/// Scale an image down to fit within the preview box.
/// Images that already fit are left at their original size.
pub fn fit_preview(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if image.width() <= max_width && image.height() <= max_height {
        image.clone()
    } else {
        image.thumbnail(max_width, max_height)
    }
}

/// Build an iced image handle from a result
pub fn preview_handle(image: &DynamicImage, max_width: u32, max_height: u32) -> Handle {
    let rgba = fit_preview(image, max_width, max_height).to_rgba8();
    let (width, height) = rgba.dimensions();
    Handle::from_rgba(width, height, rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_large_image_is_scaled_down() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(1000, 300));
        let preview = fit_preview(&image, 500, 300);
        assert_eq!((preview.width(), preview.height()), (500, 150));
    }

    #[test]
    fn test_small_image_is_not_enlarged() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(40, 20));
        let preview = fit_preview(&image, 500, 300);
        assert_eq!((preview.width(), preview.height()), (40, 20));
    }

    #[test]
    fn test_tall_image_fits_height() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(300, 900));
        let preview = fit_preview(&image, 500, 300);
        assert_eq!(preview.height(), 300);
        assert_eq!(preview.width(), 100);
    }
}
