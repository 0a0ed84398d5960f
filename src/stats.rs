//! Pattern statistics for a detected hit set (full-pipeline formulas).
//!
//! Works in pixel space, scales distances to physical units by
//! `1 / pix_per_cm`, and re-expresses every output coordinate as a
//! percentage of the image dimensions. The incremental edit path in
//! [`crate::incremental`] intentionally uses different spread/density
//! formulas; do not unify them here.
//!
//! Zone boundaries are fixed *pixel* radii regardless of `pix_per_cm` or
//! image resolution, unlike the calibrated spread/density. Inherited
//! behaviour, kept as-is.
use crate::types::{
    AnalysisResult, Calibration, Centroid, Hit, QuadrantDistribution, ZoneBreakdown, ZoneBucket,
    TOP_N_HITS,
};
use nalgebra::Point2;

/// Concentric band boundaries around the centroid, in pixels.
/// Distances ≤ 100 are `inner`, ≤ 200 `middle`, ≤ 300 `outer`, else `extreme`.
pub const ZONE_RADII_PX: [f32; 3] = [100.0, 200.0, 300.0];

/// Compute the full statistics document from pixel-space hits.
///
/// Returns a zeroed result (absent centroid, zones, quadrants) when `hits`
/// is empty.
pub fn analyze_hits(
    hits_px: &[Point2<f32>],
    image_width: usize,
    image_height: usize,
    calibration: &Calibration,
) -> AnalysisResult {
    let calibration = calibration.sanitized();
    if hits_px.is_empty() {
        return AnalysisResult::empty(image_width, image_height, calibration);
    }

    let n = hits_px.len() as f32;
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for p in hits_px {
        cx += p.x;
        cy += p.y;
    }
    cx /= n;
    cy /= n;

    let scale = 1.0 / calibration.pix_per_cm;
    let pixel_dists: Vec<f32> = hits_px
        .iter()
        .map(|p| {
            let dx = p.x - cx;
            let dy = p.y - cy;
            (dx * dx + dy * dy).sqrt()
        })
        .collect();
    let physical_dists: Vec<f32> = pixel_dists.iter().map(|d| d * scale).collect();

    let spread = population_stdev(&physical_dists);
    let pattern_radius = physical_dists.iter().cloned().fold(0.0f32, f32::max);
    let pattern_density = if pattern_radius > 0.0 {
        hits_px.len() as f32 / (std::f32::consts::PI * pattern_radius * pattern_radius)
    } else {
        0.0
    };

    // percent-coordinate hits, physical distance attached
    let hits: Vec<Hit> = hits_px
        .iter()
        .zip(&physical_dists)
        .map(|(p, &dist)| Hit {
            x: to_percent(p.x, image_width),
            y: to_percent(p.y, image_height),
            distance_from_center: dist,
        })
        .collect();

    let zones = zone_breakdown(&hits, &pixel_dists);
    let quadrants = quadrant_distribution(hits_px, cx, cy);
    let (closest_hits, outer_hits) = top_hits(&hits);

    AnalysisResult {
        hit_count: hits.len(),
        hits,
        centroid: Some(Centroid {
            x: to_percent(cx, image_width),
            y: to_percent(cy, image_height),
        }),
        spread,
        pattern_density,
        pattern_radius,
        zones: Some(zones),
        quadrants: Some(quadrants),
        closest_hits,
        outer_hits,
        ring: None,
        image_width,
        image_height,
        calibration,
    }
}

/// Population standard deviation (divide by N, not N−1).
pub fn population_stdev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
    var.sqrt()
}

/// Bucket hits into the fixed concentric bands by *pixel* distance.
pub fn zone_breakdown(hits: &[Hit], pixel_dists: &[f32]) -> ZoneBreakdown {
    let mut zones = ZoneBreakdown::default();
    for (hit, &dist) in hits.iter().zip(pixel_dists) {
        let bucket = if dist <= ZONE_RADII_PX[0] {
            &mut zones.inner
        } else if dist <= ZONE_RADII_PX[1] {
            &mut zones.middle
        } else if dist <= ZONE_RADII_PX[2] {
            &mut zones.outer
        } else {
            &mut zones.extreme
        };
        bucket.count += 1;
        bucket.hits.push(*hit);
    }
    let total = hits.len() as f32;
    if total > 0.0 {
        for bucket in [
            &mut zones.inner,
            &mut zones.middle,
            &mut zones.outer,
            &mut zones.extreme,
        ] {
            bucket.percentage = bucket.count as f32 / total * 100.0;
        }
    }
    zones
}

/// Bucket hits by the sign of their pixel offset from the centroid.
pub fn quadrant_distribution(hits_px: &[Point2<f32>], cx: f32, cy: f32) -> QuadrantDistribution {
    let mut quads = QuadrantDistribution::default();
    for p in hits_px {
        let left = p.x < cx;
        let top = p.y < cy;
        match (top, left) {
            (true, true) => quads.top_left += 1,
            (true, false) => quads.top_right += 1,
            (false, true) => quads.bottom_left += 1,
            (false, false) => quads.bottom_right += 1,
        }
    }
    quads
}

/// Top-N hits by distance from the centroid, ascending and descending.
pub fn top_hits(hits: &[Hit]) -> (Vec<Hit>, Vec<Hit>) {
    let mut sorted: Vec<Hit> = hits.to_vec();
    sorted.sort_by(|a, b| a.distance_from_center.total_cmp(&b.distance_from_center));
    let closest = sorted.iter().take(TOP_N_HITS).cloned().collect();
    let outer = sorted.iter().rev().take(TOP_N_HITS).cloned().collect();
    (closest, outer)
}

#[inline]
fn to_percent(v: f32, dim: usize) -> f32 {
    if dim == 0 {
        0.0
    } else {
        v / dim as f32 * 100.0
    }
}
