//! Random-choice classifier used until an inference backend exists.

use image::ImageReader;
use image::imageops::FilterType;
use rand::seq::SliceRandom;
use std::path::Path;

use super::{CATEGORIES, ImageClassifier, UNKNOWN_CATEGORY};

/// Model input edge length
const INPUT_SIZE: u32 = 224;

#[derive(Debug, Default, Clone)]
pub struct PlaceholderClassifier;

impl PlaceholderClassifier {
    pub fn new() -> Self {
        tracing::info!("Classifier initialized (placeholder mode)");
        Self
    }

    /// Decode and resize exactly as a model would need; pixels are discarded
    fn preprocess(image_path: &Path) -> image::ImageResult<()> {
        let img = ImageReader::open(image_path)?
            .with_guessed_format()?
            .decode()?;
        let _input = img.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
        Ok(())
    }
}

impl ImageClassifier for PlaceholderClassifier {
    fn predict(&self, image_path: &Path) -> String {
        if let Err(e) = Self::preprocess(image_path) {
            tracing::warn!(path = ?image_path, error = %e, "Error during prediction");
            return UNKNOWN_CATEGORY.to_string();
        }

        CATEGORIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(UNKNOWN_CATEGORY)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        RgbImage::new(32, 16)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_valid_image_gets_known_category() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "street.png");
        let classifier = PlaceholderClassifier::new();

        for _ in 0..20 {
            let label = classifier.predict(&path);
            assert!(CATEGORIES.contains(&label.as_str()), "got {label}");
        }
    }

    #[test]
    fn test_format_guessed_from_content() {
        let dir = TempDir::new().unwrap();
        let png = write_png(dir.path(), "street.png");
        let misnamed = dir.path().join("street.jpg");
        std::fs::rename(&png, &misnamed).unwrap();

        let label = PlaceholderClassifier::new().predict(&misnamed);
        assert_ne!(label, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_garbage_bytes_yield_unknown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        assert_eq!(PlaceholderClassifier::new().predict(&path), UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_missing_file_yields_unknown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.png");

        assert_eq!(PlaceholderClassifier::new().predict(&path), UNKNOWN_CATEGORY);
    }
}
