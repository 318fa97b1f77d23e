/// Input selection helpers
///
/// Turns the user's file or folder choice into an ordered list of image paths.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted as input images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Check whether a path carries one of the accepted image extensions
pub fn is_image(path: &Path) -> bool {
    match path.extension() {
        Some(extension) => {
            let ext = extension.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Keep only paths with an accepted image extension, preserving order
pub fn filter_images(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.into_iter().filter(|p| is_image(p)).collect()
}

/// List the images directly inside a folder (no recursion).
///
/// Entries are returned sorted by file name so a folder always
/// produces the same batch order.
pub fn scan_folder(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let message = e.to_string();
            e.into_io_error()
                .unwrap_or_else(|| io::Error::other(message))
        })?;

        // Only regular files
        if !entry.file_type().is_file() {
            continue;
        }

        if is_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    log::info!("🔍 Found {} images in {}", images.len(), folder.display());
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(is_image(Path::new("/a/photo.JPG")));
        assert!(is_image(Path::new("/a/photo.Png")));
        assert!(is_image(Path::new("scan.bmp")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("no_extension")));
        assert!(!is_image(Path::new("image.tiff")));
    }

    #[test]
    fn test_filter_keeps_order() {
        let paths = vec![
            PathBuf::from("b.png"),
            PathBuf::from("readme.md"),
            PathBuf::from("a.jpeg"),
        ];
        assert_eq!(
            filter_images(paths),
            vec![PathBuf::from("b.png"), PathBuf::from("a.jpeg")]
        );
    }

    #[test]
    fn test_scan_folder_is_flat_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("c.PNG"), b"x").unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("b.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("d.png"), b"x").unwrap();

        let found = scan_folder(dir.path()).unwrap();

        assert_eq!(
            found,
            vec![dir.path().join("a.jpg"), dir.path().join("c.PNG")]
        );
    }

    #[test]
    fn test_scan_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_folder(&dir.path().join("missing")).is_err());
    }
}
