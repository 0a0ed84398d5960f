//! Structured diagnostics for a detection run.
//!
//! `detect_with_diagnostics` returns the [`AnalysisResult`] plus a
//! [`PipelineTrace`] describing what each stage did and how long it took.
//! Everything serializes to camelCase JSON for the demo tooling.
use crate::types::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Timing entry for a single pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one detection call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Input image description.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Threshold stage summary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdStage {
    /// Foreground pixels after morphology.
    pub foreground_px: usize,
}

/// Blob stage summary: components found vs. accepted as hits.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobStage {
    pub extracted: usize,
    pub accepted: usize,
    pub min_area: f32,
    pub max_area: f32,
    pub min_circularity: f32,
}

/// Ring stage summary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingStage {
    /// Accumulator peaks that survived thresholding.
    pub candidates: usize,
    pub found: bool,
}

/// Per-stage trace for one detection call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub threshold: Option<ThresholdStage>,
    pub blobs: Option<BlobStage>,
    pub ring: Option<RingStage>,
}

/// Detection result bundled with its pipeline trace.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub trace: PipelineTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timings_accumulate_in_order() {
        let mut t = TimingBreakdown::with_total(12.5);
        t.push("preprocess", 4.0);
        t.push("threshold", 3.0);
        assert_eq!(t.stages.len(), 2);
        assert_eq!(t.stages[0].label, "preprocess");
        assert_eq!(t.total_ms, 12.5);
    }
}
