mod common;

use common::synthetic_image::{blank_target, paint_disk, paint_ring};
use pattern_detector::image::ImageU8;
use pattern_detector::ring::RingParams;
use pattern_detector::{AnalyzerParams, Calibration, PatternAnalyzer};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn no_ring_params() -> AnalyzerParams {
    let mut params = AnalyzerParams::default();
    params.ring.enabled = false;
    params
}

#[test]
fn four_blob_pattern_is_detected() {
    init_logger();
    let (w, h) = (200usize, 200usize);
    let mut buf = blank_target(w, h);
    // four well-separated strikes, ~50px² each, centroid at the image center
    let centers = [(60.0, 60.0), (140.0, 60.0), (60.0, 140.0), (140.0, 140.0)];
    for &(cx, cy) in &centers {
        paint_disk(&mut buf, w, cx, cy, 4.0, 30);
    }

    let analyzer = PatternAnalyzer::new(no_ring_params());
    let result = analyzer
        .detect(ImageU8::from_slice(w, h, &buf), &Calibration::default())
        .expect("detection should succeed");

    assert_eq!(result.hit_count, 4, "hits: {:?}", result.hits);
    let centroid = result.centroid.expect("centroid present");
    assert!(
        (centroid.x - 50.0).abs() < 1.5,
        "centroid.x={}",
        centroid.x
    );
    assert!(
        (centroid.y - 50.0).abs() < 1.5,
        "centroid.y={}",
        centroid.y
    );
    // one strike per quadrant
    let quads = result.quadrants.expect("quadrants present");
    assert_eq!(quads.top_left, 1);
    assert_eq!(quads.bottom_right, 1);
    // percent bounds hold for every coordinate
    for hit in &result.hits {
        assert!((0.0..=100.0).contains(&hit.x));
        assert!((0.0..=100.0).contains(&hit.y));
    }
}

#[test]
fn blank_target_yields_zeroed_result() {
    init_logger();
    let (w, h) = (160usize, 120usize);
    let buf = blank_target(w, h);
    let analyzer = PatternAnalyzer::new(no_ring_params());
    let result = analyzer
        .detect(ImageU8::from_slice(w, h, &buf), &Calibration::default())
        .expect("blank target is not an error");

    assert_eq!(result.hit_count, 0);
    assert!(result.centroid.is_none());
    assert_eq!(result.spread, 0.0);
    assert_eq!(result.pattern_density, 0.0);
    assert!(result.ring.is_none());
}

#[test]
fn calibration_ring_is_found_alongside_hits() {
    init_logger();
    let (w, h) = (320usize, 320usize);
    let mut buf = blank_target(w, h);
    paint_ring(&mut buf, w, 160.0, 160.0, 110.0, 2.0, 40);
    paint_disk(&mut buf, w, 150.0, 150.0, 4.0, 30);
    paint_disk(&mut buf, w, 180.0, 170.0, 4.0, 30);

    let analyzer = PatternAnalyzer::new(AnalyzerParams::default());
    let result = analyzer
        .detect(ImageU8::from_slice(w, h, &buf), &Calibration::default())
        .expect("detection should succeed");

    let ring = result.ring.expect("ring should be detected");
    assert!(
        (ring.center_x - 160.0).abs() <= 8.0,
        "ring.center_x={}",
        ring.center_x
    );
    assert!(
        (ring.center_y - 160.0).abs() <= 8.0,
        "ring.center_y={}",
        ring.center_y
    );
    assert!(
        (ring.radius_px - 110.0).abs() <= 8.0,
        "ring.radius_px={}",
        ring.radius_px
    );
    assert_eq!(ring.confidence, Some(0.9));
    assert_eq!(result.hit_count, 2, "hits: {:?}", result.hits);
}

#[test]
fn higher_sensitivity_never_detects_fewer_hits() {
    init_logger();
    let (w, h) = (200usize, 200usize);
    let mut buf = blank_target(w, h);
    // mix of small and regular strikes
    paint_disk(&mut buf, w, 50.0, 50.0, 2.0, 30);
    paint_disk(&mut buf, w, 150.0, 50.0, 4.0, 30);
    paint_disk(&mut buf, w, 100.0, 150.0, 4.0, 30);

    let analyzer = PatternAnalyzer::new(no_ring_params());
    let low = analyzer
        .detect(
            ImageU8::from_slice(w, h, &buf),
            &Calibration {
                sensitivity: 0.1,
                pix_per_cm: 1.0,
            },
        )
        .unwrap();
    let high = analyzer
        .detect(
            ImageU8::from_slice(w, h, &buf),
            &Calibration {
                sensitivity: 0.9,
                pix_per_cm: 1.0,
            },
        )
        .unwrap();
    assert!(
        high.hit_count >= low.hit_count,
        "high sensitivity found {} < low {}",
        high.hit_count,
        low.hit_count
    );
    assert!(high.hit_count >= 2);
}

#[test]
fn reanalyze_discards_manual_edits() {
    init_logger();
    let (w, h) = (200usize, 200usize);
    let mut buf = blank_target(w, h);
    for &(cx, cy) in &[(60.0, 60.0), (140.0, 60.0), (100.0, 140.0)] {
        paint_disk(&mut buf, w, cx, cy, 4.0, 30);
    }
    let analyzer = PatternAnalyzer::new(no_ring_params());
    let img = ImageU8::from_slice(w, h, &buf);
    let mut edited = analyzer.detect(img, &Calibration::default()).unwrap();

    analyzer.add_hits(
        &mut edited,
        w,
        h,
        &[pattern_detector::HitMark { x: 5.0, y: 5.0 }],
    );
    pattern_detector::set_ring(&mut edited, 10.0, 10.0, 42.0);
    assert_eq!(edited.hit_count, 4);

    let replayed = analyzer.reanalyze(img, &Calibration::default()).unwrap();
    assert_eq!(replayed.hit_count, 3, "manual hit must be gone");
    assert!(replayed.ring.is_none(), "manual ring must be gone");
}

#[test]
fn reanalyze_with_new_calibration_rescales_physical_metrics() {
    init_logger();
    let (w, h) = (200usize, 200usize);
    let mut buf = blank_target(w, h);
    for &(cx, cy) in &[(60.0, 100.0), (140.0, 100.0)] {
        paint_disk(&mut buf, w, cx, cy, 4.0, 30);
    }
    let analyzer = PatternAnalyzer::new(no_ring_params());
    let img = ImageU8::from_slice(w, h, &buf);

    let base = analyzer.detect(img, &Calibration::default()).unwrap();
    let scaled = analyzer
        .reanalyze(
            img,
            &Calibration {
                sensitivity: 0.5,
                pix_per_cm: 10.0,
            },
        )
        .unwrap();
    assert_eq!(base.hit_count, 2);
    assert_eq!(scaled.hit_count, 2);
    // physical radius shrinks by 10x under the denser calibration
    assert!(
        (base.pattern_radius / scaled.pattern_radius - 10.0).abs() < 0.1,
        "base={} scaled={}",
        base.pattern_radius,
        scaled.pattern_radius
    );
    // percent coordinates are calibration-independent
    assert!((base.hits[0].x - scaled.hits[0].x).abs() < 1e-4);
}

#[test]
fn ring_detection_skipped_when_disabled() {
    init_logger();
    let (w, h) = (320usize, 320usize);
    let mut buf = blank_target(w, h);
    paint_ring(&mut buf, w, 160.0, 160.0, 110.0, 2.0, 40);

    let mut params = AnalyzerParams::default();
    params.ring = RingParams {
        enabled: false,
        ..Default::default()
    };
    let analyzer = PatternAnalyzer::new(params);
    let result = analyzer
        .detect(ImageU8::from_slice(w, h, &buf), &Calibration::default())
        .unwrap();
    assert!(result.ring.is_none());
}
