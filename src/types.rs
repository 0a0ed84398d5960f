//! Core value and result types produced by the analysis pipeline.
//!
//! `AnalysisResult` is the unit of persistence and of manual edits: every
//! derived field is a pure function of the current hit list plus the stored
//! image dimensions, so the incremental edit path can rebuild the whole
//! document without the original pixels.
//!
//! Coordinate conventions
//! - Hits, centroid and the top-N lists are expressed as percentages of the
//!   image width/height (0–100).
//! - Ring fields are raw pixels.
//! - `spread`, `pattern_density` and `pattern_radius` are physical units
//!   scaled by `pix_per_cm` on the full-detection path; the incremental edit
//!   path leaves them in pixel units (see `incremental`).
use serde::{Deserialize, Serialize};

/// Number of entries kept in the closest/outer hit lists.
pub const TOP_N_HITS: usize = 5;

/// Detection tunables passed per call; never stored in the analyzer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    /// Detection sensitivity in [0, 1]; higher accepts smaller, less round blobs.
    pub sensitivity: f32,
    /// Pixel-to-physical scale (pixels per centimetre), > 0.
    pub pix_per_cm: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            sensitivity: 0.5,
            pix_per_cm: 1.0,
        }
    }
}

impl Calibration {
    /// Copy with `sensitivity` clamped to [0, 1] and a positive `pix_per_cm`.
    pub fn sanitized(&self) -> Self {
        Self {
            sensitivity: self.sensitivity.clamp(0.0, 1.0),
            pix_per_cm: if self.pix_per_cm > 0.0 {
                self.pix_per_cm
            } else {
                1.0
            },
        }
    }
}

/// One pellet strike in percent-of-image coordinates.
///
/// Hits have no identity beyond their coordinates; removal matches `x`/`y`
/// exactly (bit-for-bit), which is fragile under floating-point drift between
/// an add and a later remove.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub x: f32,
    pub y: f32,
    /// Distance from the pattern centroid; physical units after a full
    /// detection, pixel units after an incremental edit.
    pub distance_from_center: f32,
}

impl Hit {
    /// Coordinate-only equality used by hit removal.
    pub fn coords_match(&self, mark: &HitMark) -> bool {
        self.x == mark.x && self.y == mark.y
    }
}

/// Caller-supplied coordinate pair for manual add/remove edits (percent).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitMark {
    pub x: f32,
    pub y: f32,
}

/// Pattern centroid in percent-of-image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    pub x: f32,
    pub y: f32,
}

/// Calibration ring, auto-detected or manually placed. Pixel units.
///
/// Auto-detection fills `confidence` with a constant; a manual override
/// clears it. Both live in the same field and override is unconditional.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub center_x: f32,
    pub center_y: f32,
    pub radius_px: f32,
    pub confidence: Option<f32>,
}

/// One concentric band of the zone breakdown.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBucket {
    pub count: usize,
    pub hits: Vec<Hit>,
    /// Share of the total hit count, 0–100.
    pub percentage: f32,
}

/// Four fixed concentric bands around the centroid.
///
/// Band boundaries are fixed *pixel* radii (see [`crate::stats::ZONE_RADII_PX`])
/// regardless of image resolution or calibration — inherited behaviour, kept
/// as-is rather than rescaled.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBreakdown {
    pub inner: ZoneBucket,
    pub middle: ZoneBucket,
    pub outer: ZoneBucket,
    pub extreme: ZoneBucket,
}

/// Hit counts bucketed by the sign of the pixel offset from the centroid.
/// Offsets of exactly zero land in the bottom/right buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantDistribution {
    pub top_left: usize,
    pub top_right: usize,
    pub bottom_left: usize,
    pub bottom_right: usize,
}

/// Full analysis document: the unit of persistence and of manual edits.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub hits: Vec<Hit>,
    /// Always equals `hits.len()` after any operation.
    pub hit_count: usize,
    /// Absent when there are no hits.
    pub centroid: Option<Centroid>,
    /// Population standard deviation of hit distances from the centroid.
    pub spread: f32,
    /// Hits per unit area of the pattern's bounding circle (full path) or
    /// `hit_count / 100` after an incremental edit.
    pub pattern_density: f32,
    /// Maximum hit distance from the centroid.
    pub pattern_radius: f32,
    pub zones: Option<ZoneBreakdown>,
    pub quadrants: Option<QuadrantDistribution>,
    /// Up to [`TOP_N_HITS`] hits nearest the centroid.
    pub closest_hits: Vec<Hit>,
    /// Up to [`TOP_N_HITS`] hits farthest from the centroid.
    pub outer_hits: Vec<Hit>,
    pub ring: Option<Ring>,
    pub image_width: usize,
    pub image_height: usize,
    /// Calibration the result was last fully detected with.
    pub calibration: Calibration,
}

impl AnalysisResult {
    /// Well-formed zeroed result for the no-hits case.
    pub fn empty(image_width: usize, image_height: usize, calibration: Calibration) -> Self {
        Self {
            hits: Vec::new(),
            hit_count: 0,
            centroid: None,
            spread: 0.0,
            pattern_density: 0.0,
            pattern_radius: 0.0,
            zones: None,
            quadrants: None,
            closest_hits: Vec::new(),
            outer_hits: Vec::new(),
            ring: None,
            image_width,
            image_height,
            calibration,
        }
    }
}
