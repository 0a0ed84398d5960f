//! Hough-gradient detection of the calibration ring.
//!
//! Edge pixels above a magnitude threshold cast votes along ± the gradient
//! direction for every candidate radius, into a center accumulator at
//! `1/dp` resolution. Accumulator peaks above the vote threshold become
//! circle candidates, nearby candidates are deduplicated by `min_dist_px`,
//! and the **largest-radius** survivor is returned — the ring is the big
//! circle on the sheet, not necessarily the strongest one.
//!
//! `confidence` on the returned ring is the constant [`RING_CONFIDENCE`]
//! rather than a value derived from accumulator evidence; a fidelity gap
//! carried over from the source behaviour.
use crate::edges::sobel_gradients;
use crate::image::ImageF32;
use crate::types::Ring;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Confidence reported for every auto-detected ring.
pub const RING_CONFIDENCE: f32 = 0.9;

/// Fixed parameter set for the circle transform, tuned to typical target
/// photographs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RingParams {
    /// Skip ring detection entirely when false.
    pub enabled: bool,
    /// Accumulator downsampling factor (pixels per accumulator cell).
    pub dp: usize,
    /// Minimum distance between distinct circle centers (pixels).
    pub min_dist_px: f32,
    /// Gradient magnitude below which a pixel casts no votes.
    pub edge_thresh: f32,
    /// Minimum votes for an accumulator peak to become a candidate.
    pub accum_thresh: u32,
    pub min_radius_px: usize,
    pub max_radius_px: usize,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            enabled: true,
            dp: 2,
            min_dist_px: 100.0,
            edge_thresh: 0.1,
            accum_thresh: 40,
            min_radius_px: 50,
            max_radius_px: 300,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct CircleCandidate {
    cx: f32,
    cy: f32,
    radius: f32,
    votes: u32,
}

/// Output of one detection pass: the chosen ring plus how many candidates
/// survived thresholding (surfaced in diagnostics).
#[derive(Clone, Copy, Debug, Default)]
pub struct RingDetection {
    pub ring: Option<Ring>,
    pub candidates: usize,
}

/// Run the circle transform over a preprocessed buffer.
pub fn detect_ring(src: &ImageF32, params: &RingParams) -> RingDetection {
    if !params.enabled || src.w == 0 || src.h == 0 {
        return RingDetection::default();
    }
    let dp = params.dp.max(1);
    let max_radius = params.max_radius_px.min(src.w.max(src.h));
    if params.min_radius_px > max_radius {
        return RingDetection::default();
    }

    let grad = sobel_gradients(src);
    let mut edges: Vec<(f32, f32, f32, f32)> = Vec::new();
    for y in 0..src.h {
        for x in 0..src.w {
            let m = grad.mag.get(x, y);
            if m > params.edge_thresh {
                let inv = 1.0 / m;
                edges.push((
                    x as f32,
                    y as f32,
                    grad.gx.get(x, y) * inv,
                    grad.gy.get(x, y) * inv,
                ));
            }
        }
    }
    debug!(
        "detect_ring: {} edge pixels, radii {}..{}",
        edges.len(),
        params.min_radius_px,
        max_radius
    );
    if edges.is_empty() {
        return RingDetection::default();
    }

    let aw = src.w.div_ceil(dp);
    let ah = src.h.div_ceil(dp);
    let accum_thresh = params.accum_thresh;

    // One 2D accumulator per radius; radii vote independently.
    let mut candidates: Vec<CircleCandidate> = (params.min_radius_px..=max_radius)
        .into_par_iter()
        .flat_map_iter(|radius| {
            let r = radius as f32;
            let mut acc = vec![0u32; aw * ah];
            for &(x, y, dx, dy) in &edges {
                for sign in [-1.0f32, 1.0] {
                    let cx = x + sign * r * dx;
                    let cy = y + sign * r * dy;
                    if cx < 0.0 || cy < 0.0 {
                        continue;
                    }
                    let ax = cx as usize / dp;
                    let ay = cy as usize / dp;
                    if ax < aw && ay < ah {
                        acc[ay * aw + ax] += 1;
                    }
                }
            }
            peak_candidates(&acc, aw, ah, dp, r, accum_thresh)
        })
        .collect();

    let candidate_count = candidates.len();
    // Strongest first so dedup keeps the best-supported center per cluster.
    candidates.sort_by(|a, b| b.votes.cmp(&a.votes));
    let mut kept: Vec<CircleCandidate> = Vec::new();
    for cand in candidates {
        let close = kept.iter().any(|k| {
            let dx = k.cx - cand.cx;
            let dy = k.cy - cand.cy;
            (dx * dx + dy * dy).sqrt() < params.min_dist_px
        });
        if !close {
            kept.push(cand);
        }
    }

    let ring = kept
        .iter()
        .max_by(|a, b| a.radius.total_cmp(&b.radius))
        .map(|c| Ring {
            center_x: c.cx,
            center_y: c.cy,
            radius_px: c.radius,
            confidence: Some(RING_CONFIDENCE),
        });
    if let Some(r) = &ring {
        debug!(
            "detect_ring: selected center=({:.1},{:.1}) radius={:.1} from {} candidates",
            r.center_x, r.center_y, r.radius_px, candidate_count
        );
    } else {
        debug!("detect_ring: no circle above threshold");
    }
    RingDetection {
        ring,
        candidates: candidate_count,
    }
}

/// Cells at or above the threshold that are local 8-neighborhood maxima.
fn peak_candidates(
    acc: &[u32],
    aw: usize,
    ah: usize,
    dp: usize,
    radius: f32,
    thresh: u32,
) -> Vec<CircleCandidate> {
    let mut peaks = Vec::new();
    for ay in 0..ah {
        for ax in 0..aw {
            let votes = acc[ay * aw + ax];
            if votes < thresh {
                continue;
            }
            let mut is_peak = true;
            'scan: for ny in ay.saturating_sub(1)..=(ay + 1).min(ah - 1) {
                for nx in ax.saturating_sub(1)..=(ax + 1).min(aw - 1) {
                    if (nx, ny) != (ax, ay) && acc[ny * aw + nx] > votes {
                        is_peak = false;
                        break 'scan;
                    }
                }
            }
            if is_peak {
                peaks.push(CircleCandidate {
                    cx: (ax as f32 + 0.5) * dp as f32,
                    cy: (ay as f32 + 0.5) * dp as f32,
                    radius,
                    votes,
                });
            }
        }
    }
    peaks
}
