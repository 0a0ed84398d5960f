//! Orchestrator sequencing the detection pipeline and the edit operations.
//!
//! Overview
//! - `detect` runs preprocess → adaptive threshold + morphology → blob
//!   extraction/filtering → ring transform → pattern statistics, and returns
//!   the assembled [`crate::types::AnalysisResult`].
//! - Manual edits (`add_hits`, `remove_hits`) go through the incremental
//!   recompute path, which never touches pixels.
//! - `set_ring` overrides the stored ring unconditionally, with no
//!   recomputation and no bounds validation.
//! - `reanalyze` replays the full pipeline against the original image under
//!   new calibration, discarding prior manual edits — the one operation that
//!   restores agreement between the full and incremental formulas.
//!
//! Modules
//! - [`params`] – analyzer-wide parameter types and the per-call
//!   [`crate::blobs::DetectionConfig`] derivation.
//! - `pipeline` – the [`PatternAnalyzer`] implementation.

pub mod params;
mod pipeline;

pub use params::{AnalyzerParams, HitDetectionParams};
pub use pipeline::{set_ring, PatternAnalyzer};
