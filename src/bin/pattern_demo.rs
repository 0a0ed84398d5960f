use pattern_detector::config::{self, RuntimeConfig};
use pattern_detector::diagnostics::AnalysisReport;
use pattern_detector::image::io::{
    load_grayscale_image, save_grayscale_f32, save_mask_png, write_json_file,
};
use pattern_detector::preprocess::preprocess;
use pattern_detector::threshold::{adaptive_mean_threshold, morph_close, morph_open};
use pattern_detector::PatternAnalyzer;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "pattern_demo".to_string());
    let rest: Vec<String> = args.collect();
    let config = config::parse_cli(&program, &rest)?;

    let gray = load_grayscale_image(&config.input_path)?;
    let analyzer = PatternAnalyzer::new(config.params);
    let report = analyzer.detect_with_diagnostics(gray.as_view(), &config.calibration)?;

    print_text_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &config, &gray)?;
        println!("Debug artifacts written to {}", dir.display());
    }

    Ok(())
}

fn print_text_summary(report: &AnalysisReport) {
    let res = &report.result;
    println!(
        "image {}x{}  hits={}",
        res.image_width, res.image_height, res.hit_count
    );
    match &res.centroid {
        Some(c) => println!("centroid: ({:.1}%, {:.1}%)", c.x, c.y),
        None => println!("centroid: n/a (no hits)"),
    }
    println!(
        "spread={:.2}  density={:.4}  pattern_radius={:.2}",
        res.spread, res.pattern_density, res.pattern_radius
    );
    if let Some(zones) = &res.zones {
        println!(
            "zones: inner={} middle={} outer={} extreme={}",
            zones.inner.count, zones.middle.count, zones.outer.count, zones.extreme.count
        );
    }
    match &res.ring {
        Some(r) => println!(
            "ring: center=({:.1}, {:.1}) radius={:.1}px confidence={:?}",
            r.center_x, r.center_y, r.radius_px, r.confidence
        ),
        None => println!("ring: not found"),
    }
    println!("latency: {:.2} ms", report.trace.timings.total_ms);
    for stage in &report.trace.timings.stages {
        println!("  {:<12} {:.2} ms", stage.label, stage.elapsed_ms);
    }
}

/// Re-run the cheap front half of the pipeline to dump its buffers.
fn save_debug_artifacts(
    dir: &Path,
    config: &RuntimeConfig,
    gray: &pattern_detector::image::GrayBuffer,
) -> Result<(), String> {
    let prepared = preprocess(gray.as_view())?;
    save_grayscale_f32(&prepared, &dir.join("preprocessed.png"))?;
    let raw_mask = adaptive_mean_threshold(&prepared, &config.params.threshold);
    let mask = morph_close(&morph_open(&raw_mask));
    save_mask_png(&mask, &dir.join("mask.png"))?;
    Ok(())
}
