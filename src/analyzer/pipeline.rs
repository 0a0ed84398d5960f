//! The analyzer driving detection end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use pattern_detector::{AnalyzerParams, Calibration, PatternAnalyzer};
//! use pattern_detector::image::ImageU8;
//!
//! # fn example(gray: ImageU8) -> Result<(), String> {
//! let analyzer = PatternAnalyzer::new(AnalyzerParams::default());
//! let result = analyzer.detect(gray, &Calibration::default())?;
//! println!("hits={} spread={:.2}", result.hit_count, result.spread);
//! # Ok(())
//! # }
//! ```
use super::params::AnalyzerParams;
use crate::blobs::{extract_blobs, filter_hits};
use crate::diagnostics::{
    AnalysisReport, BlobStage, InputDescriptor, PipelineTrace, RingStage, ThresholdStage,
    TimingBreakdown,
};
use crate::image::ImageU8;
use crate::incremental;
use crate::preprocess::preprocess;
use crate::ring::detect_ring;
use crate::stats::analyze_hits;
use crate::threshold::{adaptive_mean_threshold, morph_close, morph_open};
use crate::types::{AnalysisResult, Calibration, HitMark, Ring};
use log::debug;
use std::time::Instant;

/// Detection pipeline orchestrator. Holds only immutable parameters; all
/// per-call state (including the sensitivity-derived thresholds) lives on
/// the stack of a single call, so one analyzer can serve many images.
#[derive(Clone, Debug, Default)]
pub struct PatternAnalyzer {
    params: AnalyzerParams,
}

impl PatternAnalyzer {
    pub fn new(params: AnalyzerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Run the full pipeline on a grayscale photograph.
    pub fn detect(
        &self,
        gray: ImageU8,
        calibration: &Calibration,
    ) -> Result<AnalysisResult, String> {
        self.detect_with_diagnostics(gray, calibration)
            .map(|report| report.result)
    }

    /// Run the full pipeline and return the result plus a stage trace.
    pub fn detect_with_diagnostics(
        &self,
        gray: ImageU8,
        calibration: &Calibration,
    ) -> Result<AnalysisReport, String> {
        let calibration = calibration.sanitized();
        let (width, height) = (gray.w, gray.h);
        debug!(
            "PatternAnalyzer::detect start w={} h={} sensitivity={:.2} pix_per_cm={:.2}",
            width, height, calibration.sensitivity, calibration.pix_per_cm
        );
        let total_start = Instant::now();

        let pre_start = Instant::now();
        let prepared = preprocess(gray)?;
        let pre_ms = elapsed_ms(pre_start);

        let thresh_start = Instant::now();
        let raw_mask = adaptive_mean_threshold(&prepared, &self.params.threshold);
        let mask = morph_close(&morph_open(&raw_mask));
        let thresh_ms = elapsed_ms(thresh_start);
        let foreground_px = mask.count_foreground();

        let blob_start = Instant::now();
        let blobs = extract_blobs(&mask);
        let config = self.params.hits.derive(calibration.sensitivity);
        let hits_px = filter_hits(&blobs, &config);
        let blob_ms = elapsed_ms(blob_start);
        debug!(
            "PatternAnalyzer::detect blobs={} accepted={} (min_area={:.1} min_circ={:.2})",
            blobs.len(),
            hits_px.len(),
            config.min_area,
            config.min_circularity
        );

        let ring_start = Instant::now();
        let ring_detection = detect_ring(&prepared, &self.params.ring);
        let ring_ms = elapsed_ms(ring_start);

        let stats_start = Instant::now();
        let mut result = analyze_hits(&hits_px, width, height, &calibration);
        result.ring = ring_detection.ring;
        let stats_ms = elapsed_ms(stats_start);

        let total_ms = elapsed_ms(total_start);
        debug!(
            "PatternAnalyzer::detect done hits={} ring={} latency_ms={:.3}",
            result.hit_count,
            result.ring.is_some(),
            total_ms
        );

        let mut timings = TimingBreakdown::with_total(total_ms);
        timings.push("preprocess", pre_ms);
        timings.push("threshold", thresh_ms);
        timings.push("blobs", blob_ms);
        timings.push("ring", ring_ms);
        timings.push("stats", stats_ms);

        Ok(AnalysisReport {
            result,
            trace: PipelineTrace {
                input: InputDescriptor { width, height },
                timings,
                threshold: Some(ThresholdStage { foreground_px }),
                blobs: Some(BlobStage {
                    extracted: blobs.len(),
                    accepted: hits_px.len(),
                    min_area: config.min_area,
                    max_area: config.max_area,
                    min_circularity: config.min_circularity,
                }),
                ring: Some(RingStage {
                    candidates: ring_detection.candidates,
                    found: ring_detection.ring.is_some(),
                }),
            },
        })
    }

    /// Replay full detection against the original image under new
    /// calibration, discarding any prior manual edits and ring override.
    pub fn reanalyze(
        &self,
        gray: ImageU8,
        calibration: &Calibration,
    ) -> Result<AnalysisResult, String> {
        debug!("PatternAnalyzer::reanalyze replaying detection from scratch");
        self.detect(gray, calibration)
    }

    /// Append manual hits and recompute derived fields incrementally.
    pub fn add_hits(
        &self,
        result: &mut AnalysisResult,
        image_width: usize,
        image_height: usize,
        new_hits: &[HitMark],
    ) {
        incremental::add_hits(result, image_width, image_height, new_hits);
    }

    /// Remove hits by exact coordinate match; unmatched marks are ignored.
    pub fn remove_hits(&self, result: &mut AnalysisResult, remove: &[HitMark]) {
        incremental::remove_hits(result, remove);
    }
}

/// Manually place the calibration ring, replacing any auto-detected or
/// previously overridden value. Does not recompute statistics and does not
/// validate the ring against the image bounds.
pub fn set_ring(result: &mut AnalysisResult, center_x: f32, center_y: f32, radius_px: f32) {
    result.ring = Some(Ring {
        center_x,
        center_y,
        radius_px,
        confidence: None,
    });
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
