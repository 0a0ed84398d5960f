#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod diagnostics;
pub mod image;
pub mod incremental;
pub mod types;

// Lower-level pipeline stages – public for tools and tests, but considered
// unstable internals.
pub mod blobs;
pub mod config;
pub mod edges;
pub mod preprocess;
pub mod ring;
pub mod stats;
pub mod threshold;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyzer::{set_ring, AnalyzerParams, HitDetectionParams, PatternAnalyzer};
pub use crate::diagnostics::{AnalysisReport, PipelineTrace};
pub use crate::ring::RingParams;
pub use crate::types::{
    AnalysisResult, Calibration, Centroid, Hit, HitMark, QuadrantDistribution, Ring,
    ZoneBreakdown,
};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pattern_detector::prelude::*;
///
/// # fn main() -> Result<(), String> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![255u8; w * h];
/// let img = ImageU8::from_slice(w, h, &gray);
///
/// let analyzer = PatternAnalyzer::new(AnalyzerParams::default());
/// let result = analyzer.detect(img, &Calibration::default())?;
/// println!("hits={} density={:.4}", result.hit_count, result.pattern_density);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{AnalysisResult, AnalyzerParams, Calibration, HitMark, PatternAnalyzer};
}
