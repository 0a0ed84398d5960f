//! Runtime configuration for the demo binary.
//!
//! A JSON config file can carry everything; CLI flags override the common
//! knobs (calibration, output paths) on top of it.
use crate::analyzer::AnalyzerParams;
use crate::types::Calibration;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    /// Write the full JSON report here.
    pub json_out: Option<PathBuf>,
    /// Dump intermediate pipeline buffers (preprocessed image, binary mask)
    /// into this directory.
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub calibration: Calibration,
    #[serde(default)]
    pub params: AnalyzerParams,
}

/// Load a [`RuntimeConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

/// Parse the demo CLI: `<image> [--config FILE] [--sensitivity V]
/// [--pix-per-cm V] [--json-out FILE] [--debug-dir DIR] [--no-ring]`.
pub fn parse_cli(program: &str, args: &[String]) -> Result<RuntimeConfig, String> {
    let usage = format!(
        "Usage: {program} <image> [--config FILE] [--sensitivity V] [--pix-per-cm V] \
         [--json-out FILE] [--debug-dir DIR] [--no-ring]"
    );

    let mut input_path: Option<PathBuf> = None;
    let mut config: Option<RuntimeConfig> = None;
    let mut sensitivity: Option<f32> = None;
    let mut pix_per_cm: Option<f32> = None;
    let mut json_out: Option<PathBuf> = None;
    let mut debug_dir: Option<PathBuf> = None;
    let mut no_ring = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = next_value(&mut iter, "--config", &usage)?;
                config = Some(load_config(Path::new(&path))?);
            }
            "--sensitivity" => {
                sensitivity = Some(parse_number(
                    &next_value(&mut iter, "--sensitivity", &usage)?,
                    "--sensitivity",
                )?);
            }
            "--pix-per-cm" => {
                pix_per_cm = Some(parse_number(
                    &next_value(&mut iter, "--pix-per-cm", &usage)?,
                    "--pix-per-cm",
                )?);
            }
            "--json-out" => {
                json_out = Some(PathBuf::from(next_value(&mut iter, "--json-out", &usage)?));
            }
            "--debug-dir" => {
                debug_dir = Some(PathBuf::from(next_value(&mut iter, "--debug-dir", &usage)?));
            }
            "--no-ring" => no_ring = true,
            "--help" | "-h" => return Err(usage),
            other if !other.starts_with('-') && input_path.is_none() => {
                input_path = Some(PathBuf::from(other));
            }
            other => return Err(format!("Unknown argument '{other}'\n{usage}")),
        }
    }

    let mut config = match config {
        Some(cfg) => cfg,
        None => RuntimeConfig {
            input_path: PathBuf::new(),
            output: OutputConfig::default(),
            calibration: Calibration::default(),
            params: AnalyzerParams::default(),
        },
    };

    if let Some(path) = input_path {
        config.input_path = path;
    }
    if config.input_path.as_os_str().is_empty() {
        return Err(format!("Missing input image path\n{usage}"));
    }
    if let Some(s) = sensitivity {
        config.calibration.sensitivity = s;
    }
    if let Some(p) = pix_per_cm {
        config.calibration.pix_per_cm = p;
    }
    if json_out.is_some() {
        config.output.json_out = json_out;
    }
    if debug_dir.is_some() {
        config.output.debug_dir = debug_dir;
    }
    if no_ring {
        config.params.ring.enabled = false;
    }
    Ok(config)
}

fn next_value(iter: &mut std::slice::Iter<'_, String>, flag: &str, usage: &str) -> Result<String, String> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("Missing value for {flag}\n{usage}"))
}

fn parse_number(raw: &str, flag: &str) -> Result<f32, String> {
    raw.parse::<f32>()
        .map_err(|_| format!("Invalid number '{raw}' for {flag}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cli_requires_an_input_path() {
        assert!(parse_cli("demo", &args(&[])).is_err());
    }

    #[test]
    fn cli_overrides_calibration() {
        let cfg = parse_cli(
            "demo",
            &args(&["target.jpg", "--sensitivity", "0.8", "--pix-per-cm", "12.5"]),
        )
        .unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("target.jpg"));
        assert_eq!(cfg.calibration.sensitivity, 0.8);
        assert_eq!(cfg.calibration.pix_per_cm, 12.5);
    }

    #[test]
    fn cli_can_disable_ring_detection() {
        let cfg = parse_cli("demo", &args(&["t.png", "--no-ring"])).unwrap();
        assert!(!cfg.params.ring.enabled);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(parse_cli("demo", &args(&["t.png", "--bogus"])).is_err());
    }

    #[test]
    fn config_json_round_trips_defaults() {
        let json = r#"{ "inputPath": "shots/t1.jpg", "calibration": { "sensitivity": 0.6, "pixPerCm": 4.0 } }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("shots/t1.jpg"));
        assert_eq!(cfg.calibration.sensitivity, 0.6);
        // params fall back to defaults
        assert!(cfg.params.ring.enabled);
    }
}
