/// Individual output files (`Result_<n>.<ext>`)
use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::state::data::OutputFormat;

/// Build the output path for the n-th result (1-based)
pub fn result_path(folder: &Path, n: usize, format: OutputFormat) -> PathBuf {
    folder.join(format!("Result_{}.{}", n, format.extension()))
}

/// Encode an image to disk in the requested format.
///
/// JPEG cannot store transparency, so transparent pixels are
/// composited onto white before encoding.
pub fn save_image(image: &DynamicImage, path: &Path, format: OutputFormat) -> Result<(), OutputError> {
    let result = if format.supports_alpha() {
        image.save_with_format(path, format.image_format())
    } else {
        DynamicImage::ImageRgb8(flatten_on_white(image))
            .save_with_format(path, format.image_format())
    };

    result.map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("💾 Wrote {}", path.display());
    Ok(())
}

/// Composite an RGBA image over an opaque white background
pub fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        flat.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn cutout(width: u32, height: u32) -> DynamicImage {
        // Left half opaque red, right half fully transparent
        let img = RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_result_path_naming() {
        let path = result_path(Path::new("/out"), 3, OutputFormat::Tiff);
        assert_eq!(path, PathBuf::from("/out/Result_3.tiff"));
    }

    #[test]
    fn test_saved_images_keep_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let image = cutout(37, 21);

        for (n, format) in OutputFormat::ALL.into_iter().enumerate() {
            let path = result_path(dir.path(), n + 1, format);
            save_image(&image, &path, format).unwrap();

            let reread = image::open(&path).unwrap();
            assert_eq!((reread.width(), reread.height()), (37, 21), "{format}");
        }
    }

    #[test]
    fn test_png_keeps_transparency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Result_1.png");
        save_image(&cutout(4, 2), &path, OutputFormat::Png).unwrap();

        let reread = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reread.get_pixel(3, 0)[3], 0);
        assert_eq!(reread.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_flatten_uses_white_background() {
        let flat = flatten_on_white(&cutout(4, 1));
        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(flat.get_pixel(3, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_write_into_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Result_1.png");
        assert!(save_image(&cutout(2, 2), &path, OutputFormat::Png).is_err());
    }
}
