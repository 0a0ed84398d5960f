//! Incremental recomputation after manual hit edits.
//!
//! Rebuilds the statistics of an existing [`AnalysisResult`] from its hit
//! list alone — no image pixels required. The formulas here deliberately
//! diverge from the full pipeline in [`crate::stats`]:
//!
//! - `spread` is the population stdev of **pixel** distances (no
//!   `pix_per_cm` scaling),
//! - `pattern_density` is `hit_count / 100.0` instead of hits per circle
//!   area,
//! - per-hit `distance_from_center` comes out in pixels.
//!
//! The divergence is inherited from the source behaviour and is preserved
//! rather than unified; a `reanalyze` is the only operation that brings both
//! paths back into agreement. Tests in `tests/edits.rs` pin the discrepancy.
use crate::stats::{population_stdev, quadrant_distribution, top_hits, zone_breakdown};
use crate::types::{AnalysisResult, Centroid, Hit, HitMark};
use log::debug;
use nalgebra::Point2;

/// Append manual hits (percent coordinates) and recompute all derived
/// fields. `image_width`/`image_height` are stored on the result so later
/// edits can convert back to pixel space.
pub fn add_hits(
    result: &mut AnalysisResult,
    image_width: usize,
    image_height: usize,
    new_hits: &[HitMark],
) {
    result.image_width = image_width;
    result.image_height = image_height;
    for mark in new_hits {
        result.hits.push(Hit {
            x: mark.x,
            y: mark.y,
            distance_from_center: 0.0,
        });
    }
    debug!(
        "add_hits: +{} -> {} hits",
        new_hits.len(),
        result.hits.len()
    );
    recompute(result);
}

/// Remove hits by exact coordinate match and recompute all derived fields.
///
/// Marks that match nothing are silent no-ops. Matching is bit-exact on
/// `x`/`y`, so floating-point drift between the add that created a hit and
/// the remove that targets it will make the removal miss; known fragility,
/// kept as-is.
pub fn remove_hits(result: &mut AnalysisResult, remove: &[HitMark]) {
    let before = result.hits.len();
    for mark in remove {
        if let Some(pos) = result.hits.iter().position(|h| h.coords_match(mark)) {
            result.hits.remove(pos);
        }
    }
    debug!(
        "remove_hits: {} requested, {} removed",
        remove.len(),
        before - result.hits.len()
    );
    recompute(result);
}

/// Recompute every derived field from the current hit list and stored image
/// dimensions, in place.
pub fn recompute(result: &mut AnalysisResult) {
    if result.hits.is_empty() {
        let empty =
            AnalysisResult::empty(result.image_width, result.image_height, result.calibration);
        result.hit_count = 0;
        result.centroid = None;
        result.spread = 0.0;
        result.pattern_density = 0.0;
        result.pattern_radius = 0.0;
        result.zones = empty.zones;
        result.quadrants = empty.quadrants;
        result.closest_hits.clear();
        result.outer_hits.clear();
        return;
    }

    let w = result.image_width as f32;
    let h = result.image_height as f32;
    let hits_px: Vec<Point2<f32>> = result
        .hits
        .iter()
        .map(|hit| Point2::new(from_percent(hit.x, w), from_percent(hit.y, h)))
        .collect();

    let n = hits_px.len() as f32;
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for p in &hits_px {
        cx += p.x;
        cy += p.y;
    }
    cx /= n;
    cy /= n;

    let pixel_dists: Vec<f32> = hits_px
        .iter()
        .map(|p| {
            let dx = p.x - cx;
            let dy = p.y - cy;
            (dx * dx + dy * dy).sqrt()
        })
        .collect();

    for (hit, &dist) in result.hits.iter_mut().zip(&pixel_dists) {
        hit.distance_from_center = dist;
    }

    result.hit_count = result.hits.len();
    result.centroid = Some(Centroid {
        x: to_percent(cx, w),
        y: to_percent(cy, h),
    });
    // pixel-unit spread and flat density: the edit path's own formulas
    result.spread = population_stdev(&pixel_dists);
    result.pattern_radius = pixel_dists.iter().cloned().fold(0.0f32, f32::max);
    result.pattern_density = result.hit_count as f32 / 100.0;
    result.zones = Some(zone_breakdown(&result.hits, &pixel_dists));
    result.quadrants = Some(quadrant_distribution(&hits_px, cx, cy));
    let (closest, outer) = top_hits(&result.hits);
    result.closest_hits = closest;
    result.outer_hits = outer;
}

#[inline]
fn from_percent(v: f32, dim: f32) -> f32 {
    if dim > 0.0 {
        v / 100.0 * dim
    } else {
        0.0
    }
}

#[inline]
fn to_percent(v: f32, dim: f32) -> f32 {
    if dim > 0.0 {
        v / dim * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Calibration;

    fn empty_result(w: usize, h: usize) -> AnalysisResult {
        AnalysisResult::empty(w, h, Calibration::default())
    }

    #[test]
    fn add_single_hit_on_empty_result() {
        let mut res = empty_result(0, 0);
        add_hits(&mut res, 200, 100, &[HitMark { x: 50.0, y: 50.0 }]);
        assert_eq!(res.hit_count, 1);
        let c = res.centroid.unwrap();
        assert_eq!(c.x, 50.0);
        assert_eq!(c.y, 50.0);
        assert_eq!(res.spread, 0.0);
        // edit-path density: 1 / 100
        assert!((res.pattern_density - 0.01).abs() < 1e-7);
    }

    #[test]
    fn remove_returns_result_to_empty_state() {
        let mut res = empty_result(200, 100);
        add_hits(&mut res, 200, 100, &[HitMark { x: 10.0, y: 10.0 }]);
        remove_hits(&mut res, &[HitMark { x: 10.0, y: 10.0 }]);
        assert_eq!(res.hit_count, 0);
        assert!(res.centroid.is_none());
        assert_eq!(res.spread, 0.0);
        assert_eq!(res.pattern_density, 0.0);
        assert!(res.closest_hits.is_empty());
    }

    #[test]
    fn unmatched_remove_is_a_silent_no_op() {
        let mut res = empty_result(200, 200);
        add_hits(&mut res, 200, 200, &[HitMark { x: 25.0, y: 25.0 }]);
        remove_hits(&mut res, &[HitMark { x: 24.999, y: 25.0 }]);
        assert_eq!(res.hit_count, 1);
    }

    #[test]
    fn spread_uses_pixel_distances() {
        let mut res = empty_result(400, 400);
        // pixels (100,200) and (300,200): both 100px from the centroid
        add_hits(
            &mut res,
            400,
            400,
            &[
                HitMark { x: 25.0, y: 50.0 },
                HitMark { x: 75.0, y: 50.0 },
            ],
        );
        assert!(res.spread.abs() < 1e-4, "equidistant hits -> spread 0");
        assert!((res.pattern_radius - 100.0).abs() < 1e-3);
        assert!((res.hits[0].distance_from_center - 100.0).abs() < 1e-3);
    }

    #[test]
    fn hit_count_tracks_list_length_through_edits() {
        let mut res = empty_result(100, 100);
        let marks: Vec<HitMark> = (0..6)
            .map(|i| HitMark {
                x: 10.0 + i as f32 * 5.0,
                y: 40.0,
            })
            .collect();
        add_hits(&mut res, 100, 100, &marks);
        assert_eq!(res.hit_count, res.hits.len());
        assert_eq!(res.hit_count, 6);
        remove_hits(&mut res, &marks[..2]);
        assert_eq!(res.hit_count, res.hits.len());
        assert_eq!(res.hit_count, 4);
    }

    #[test]
    fn duplicate_coordinates_remove_one_at_a_time() {
        let mut res = empty_result(100, 100);
        add_hits(
            &mut res,
            100,
            100,
            &[
                HitMark { x: 30.0, y: 30.0 },
                HitMark { x: 30.0, y: 30.0 },
            ],
        );
        remove_hits(&mut res, &[HitMark { x: 30.0, y: 30.0 }]);
        assert_eq!(res.hit_count, 1);
    }

    #[test]
    fn zones_and_quadrants_are_refreshed() {
        let mut res = empty_result(1000, 1000);
        add_hits(
            &mut res,
            1000,
            1000,
            &[
                HitMark { x: 10.0, y: 50.0 },
                HitMark { x: 90.0, y: 50.0 },
            ],
        );
        // pixels (100,500) and (900,500): 400px from centroid -> extreme zone
        let zones = res.zones.as_ref().unwrap();
        assert_eq!(zones.extreme.count, 2);
        remove_hits(&mut res, &[HitMark { x: 10.0, y: 50.0 }]);
        let zones = res.zones.as_ref().unwrap();
        assert_eq!(zones.extreme.count, 0);
        assert_eq!(zones.inner.count, 1);
    }
}
