//! Image classification
//!
//! The lifecycle service only sees the [`ImageClassifier`] trait. The shipped
//! implementation is [`PlaceholderClassifier`], which validates the image and
//! picks a label at random until a real model is plugged in.

mod placeholder;

pub use placeholder::PlaceholderClassifier;

use std::path::Path;

/// Issue categories a classifier may return
pub const CATEGORIES: &[&str] = &["Pothole", "Garbage", "Broken Streetlight", "Normal"];

/// Label returned when the image cannot be read
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Image-in, label-out classification capability
///
/// Implementations never fail: unreadable input maps to
/// [`UNKNOWN_CATEGORY`]. `predict` may block on decoding, so callers on the
/// async runtime run it on the blocking pool.
pub trait ImageClassifier: Send + Sync + std::fmt::Debug {
    fn predict(&self, image_path: &Path) -> String;
}

/// Whether `label` is one a classifier can produce
pub fn is_known_label(label: &str) -> bool {
    label == UNKNOWN_CATEGORY || CATEGORIES.contains(&label)
}
