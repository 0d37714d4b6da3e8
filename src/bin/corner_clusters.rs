use serde::{Deserialize, Serialize};
use shape_detector::cluster::{kmeans, Clustering, KMeansOptions};
use shape_detector::corners::{detect_corners, CornerPoint, HarrisOptions};
use shape_detector::image::io::{load_grayscale_image, write_json_file};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CornerToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub corners: HarrisOptions,
    #[serde(default)]
    pub kmeans: KMeansOptions,
    pub output: CornerOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CornerOutputConfig {
    pub corners_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<CornerToolConfig, String> {
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

    let gray = load_grayscale_image(&config.input)?;
    let float = gray.to_f32();

    let corners = detect_corners(&float, &config.corners);
    let points: Vec<[f32; 2]> = corners.iter().map(|c| c.position()).collect();
    let clustering = kmeans(&points, &config.kmeans)?;

    let summary = CornerClusterSummary {
        width: gray.width(),
        height: gray.height(),
        corner_count: corners.len(),
        corners,
        clustering,
    };
    write_json_file(&config.output.corners_json, &summary)?;

    println!(
        "Found {} corners, clustered into {} centers ({} iterations, converged={})",
        summary.corner_count,
        summary.clustering.centers.len(),
        summary.clustering.iterations,
        summary.clustering.converged
    );
    for (i, c) in summary.clustering.centers.iter().enumerate() {
        println!("  center {i}: ({:.1}, {:.1})", c[0], c[1]);
    }
    println!("Saved summary to {}", config.output.corners_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: corner_clusters <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CornerClusterSummary {
    width: usize,
    height: usize,
    corner_count: usize,
    corners: Vec<CornerPoint>,
    clustering: Clustering,
}
