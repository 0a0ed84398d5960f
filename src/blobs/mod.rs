//! Connected-component blob extraction and pellet-strike filtering.
//!
//! The extractor grows 8-connected regions over the binary mask and keeps
//! first-moment sums per region; `filter_hits` then applies the per-call
//! [`DetectionConfig`] gates (area window, minimum circularity) and returns
//! the accepted centroids in pixel space.
mod extractor;

pub use extractor::extract_blobs;

use nalgebra::Point2;

/// Per-call detection gates derived from sensitivity.
///
/// Derived once per detection from the base parameters and the caller's
/// calibration (see `analyzer::params`), then passed into pure functions —
/// nothing is mutated on a detector instance between runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionConfig {
    pub min_area: f32,
    pub max_area: f32,
    pub min_circularity: f32,
}

/// One connected foreground component.
#[derive(Clone, Copy, Debug)]
pub struct Blob {
    /// First-moment centroid in pixel space.
    pub centroid: Point2<f32>,
    /// Pixel count of the component.
    pub area: f32,
    /// `4π·area / perimeter²`; 1.0 for an ideal disc, lower for elongated
    /// shapes. Perimeter counts exposed 4-neighbor faces.
    pub circularity: f32,
}

/// Keep blobs passing the area and circularity gates; returns centroids.
pub fn filter_hits(blobs: &[Blob], config: &DetectionConfig) -> Vec<Point2<f32>> {
    blobs
        .iter()
        .filter(|b| {
            b.area >= config.min_area
                && b.area <= config.max_area
                && b.circularity > config.min_circularity
        })
        .map(|b| b.centroid)
        .collect()
}
