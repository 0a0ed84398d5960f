//! Parameter types configuring the analyzer stages.
//!
//! Defaults are tuned for phone photographs of paper targets at common
//! resolutions. The sensitivity-dependent thresholds are derived per call
//! into an immutable [`DetectionConfig`] — detector instances hold no
//! mutable threshold state between runs.
use crate::blobs::DetectionConfig;
use crate::ring::RingParams;
use crate::threshold::ThresholdParams;
use serde::{Deserialize, Serialize};

/// Base thresholds for blob acceptance, before sensitivity scaling.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HitDetectionParams {
    /// Minimum blob area at sensitivity 0 (pixels²).
    pub base_min_area: f32,
    /// Maximum blob area; not affected by sensitivity.
    pub base_max_area: f32,
    /// Minimum circularity at sensitivity 0.5.
    pub base_min_circularity: f32,
}

impl Default for HitDetectionParams {
    fn default() -> Self {
        Self {
            base_min_area: 12.0,
            base_max_area: 600.0,
            base_min_circularity: 0.45,
        }
    }
}

impl HitDetectionParams {
    /// Derive the per-call gates from a sensitivity in [0, 1].
    ///
    /// `min_area` shrinks linearly with sensitivity (down to half the base
    /// at sensitivity 1), so raising sensitivity never tightens the area
    /// gate. `min_circularity` relaxes by 0.1 per unit of sensitivity above
    /// 0.5 and is clamped at zero.
    pub fn derive(&self, sensitivity: f32) -> DetectionConfig {
        let s = sensitivity.clamp(0.0, 1.0);
        DetectionConfig {
            min_area: self.base_min_area * (1.0 - 0.5 * s),
            max_area: self.base_max_area,
            min_circularity: (self.base_min_circularity - 0.1 * (s - 0.5)).max(0.0),
        }
    }
}

/// Analyzer-wide parameters controlling the pipeline stages.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerParams {
    pub threshold: ThresholdParams,
    pub hits: HitDetectionParams,
    pub ring: RingParams,
}
