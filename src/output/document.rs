/// Merged PDF output
///
/// A `DocumentBuilder` collects one A4 page per processed image and is
/// consumed when the document is written, so a finished document can't
/// be appended to by accident.

use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};

use crate::error::DocumentError;

/// File name of the merged document
pub const DOCUMENT_NAME: &str = "Results.pdf";

/// A4 portrait page size in points
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;

/// Points per millimetre
const MM: f32 = 72.0 / 25.4;

/// Images sit 10mm from the top-left corner
const MARGIN: f32 = 10.0 * MM;

/// Nominal image width (190mm, i.e. full width minus margins)
const IMAGE_WIDTH: f32 = 190.0 * MM;

/// Build the path of the merged document inside an output folder
pub fn document_path(folder: &Path) -> PathBuf {
    folder.join(DOCUMENT_NAME)
}

/// Accumulates pages for a single output PDF
pub struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl DocumentBuilder {
    /// Start an empty document
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append the image as a new page
    pub fn add_page(&mut self, image: &DynamicImage) -> Result<(), DocumentError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        // Split into colour samples and an alpha soft mask
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for pixel in rgba.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }

        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };

        if alpha.iter().any(|&a| a != 255) {
            let mask_id = self.doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width as i64,
                    "Height" => height as i64,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha,
            ));
            image_dict.set("SMask", mask_id);
        }

        let image_id = self.doc.add_object(Stream::new(image_dict, rgb));

        let (x, y, w, h) = placement(width, height);
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![w.into(), 0.into(), 0.into(), h.into(), x.into(), y.into()],
                ),
                Operation::new("Do", vec!["Im1".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im1" => image_id,
                },
            },
        });
        self.page_ids.push(page_id);

        Ok(())
    }

    /// Finish the document and save it.
    ///
    /// Refuses to write a document without pages.
    pub fn write_to(mut self, path: &Path) -> Result<(), DocumentError> {
        if self.page_ids.is_empty() {
            return Err(DocumentError::Empty);
        }

        let count = self.page_ids.len() as i64;
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        self.doc.compress();
        self.doc.save(path)?;

        log::info!("📄 Wrote {} page document: {}", count, path.display());
        Ok(())
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of an image on the page as (x, y, width, height) in points.
/// The image is 190mm wide unless that would run past the bottom margin.
fn placement(width: u32, height: u32) -> (f32, f32, f32, f32) {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;

    let max_height = PAGE_HEIGHT - 2.0 * MARGIN;
    let scale = (IMAGE_WIDTH / width).min(max_height / height);
    let (w, h) = (width * scale, height * scale);

    // PDF origin is bottom-left
    (MARGIN, PAGE_HEIGHT - MARGIN - h, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(width: u32, height: u32, alpha: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, alpha])))
    }

    #[test]
    fn test_empty_document_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = document_path(dir.path());

        let result = DocumentBuilder::new().write_to(&path);

        assert!(matches!(result, Err(DocumentError::Empty)));
        assert!(!path.exists());
    }

    #[test]
    fn test_one_page_per_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = document_path(dir.path());

        let mut builder = DocumentBuilder::new();
        builder.add_page(&solid(40, 30, 255)).unwrap();
        builder.add_page(&solid(30, 40, 0)).unwrap();
        builder.add_page(&solid(8, 8, 128)).unwrap();
        assert_eq!(builder.page_count(), 3);
        builder.write_to(&path).unwrap();

        let reread = Document::load(&path).unwrap();
        assert_eq!(reread.get_pages().len(), 3);
    }

    #[test]
    fn test_wide_image_spans_190mm() {
        let (x, y, w, h) = placement(1900, 1000);
        assert!((x - MARGIN).abs() < 0.01);
        assert!((w - IMAGE_WIDTH).abs() < 0.01);
        assert!((h - IMAGE_WIDTH * 1000.0 / 1900.0).abs() < 0.01);
        assert!((y + h - (PAGE_HEIGHT - MARGIN)).abs() < 0.01);
    }

    #[test]
    fn test_tall_image_fits_the_page() {
        let (_, y, w, h) = placement(100, 1000);
        assert!(y >= MARGIN - 0.01);
        assert!(w < IMAGE_WIDTH);
        assert!((h - (PAGE_HEIGHT - 2.0 * MARGIN)).abs() < 0.01);
    }
}
