use serde::Deserialize;
use shape_detector::image::io::{load_rgb_image, save_grayscale_u8, write_json_file};
use shape_detector::mask::color_mask;
use shape_detector::{ShapeDetector, ShapeParams};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ShapeToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub detector: ShapeParams,
    pub output: ShapeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ShapeOutputConfig {
    pub result_json: PathBuf,
    /// Optional PNG dump of the color mask (mask path only).
    #[serde(default)]
    pub mask_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ShapeToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let rgb = load_rgb_image(&config.input)?;
    let detector = ShapeDetector::new(config.detector);
    let result = detector.process(&rgb);

    if let (Some(mask_path), Some(range)) = (&config.output.mask_image, &config.detector.mask) {
        let mask = color_mask(&rgb, range);
        save_grayscale_u8(&mask, mask_path)?;
        println!("Saved color mask to {}", mask_path.display());
    }

    write_json_file(&config.output.result_json, &result)?;

    println!(
        "Detected {} shapes and {} corners in {:.2} ms",
        result.shapes.len(),
        result.corners.len(),
        result.latency_ms
    );
    for shape in &result.shapes {
        println!(
            "  {:?}: area={:.1}px² centroid=({:.2}, {:.2}) norm=({:.3}, {:.3})",
            shape.kind,
            shape.area_px,
            shape.centroid_px[0],
            shape.centroid_px[1],
            shape.centroid_norm[0],
            shape.centroid_norm[1]
        );
    }
    println!("Saved result to {}", config.output.result_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: detect_shapes <config.json>".to_string()
}
