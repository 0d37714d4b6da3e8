use crate::cluster::Clustering;
use crate::contour::ShapeKind;
use crate::corners::CornerPoint;
use crate::diagnostics::TimingBreakdown;
use serde::Serialize;

/// One detected polygon, reported in both pixel and normalized coordinates.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedShape {
    pub kind: ShapeKind,
    pub vertices_px: Vec<[f32; 2]>,
    pub vertices_norm: Vec<[f32; 2]>,
    pub area_px: f32,
    pub perimeter_px: f32,
    pub centroid_px: [f32; 2],
    pub centroid_norm: [f32; 2],
    /// Principal-axis angle in radians, range [0, π).
    pub orientation_rad: f32,
}

/// Result of one `ShapeDetector::process` call.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeResult {
    /// True when at least one shape survived filtering.
    pub found: bool,
    pub shapes: Vec<DetectedShape>,
    /// Harris corners in pixel coordinates.
    pub corners: Vec<CornerPoint>,
    /// Corner clusters, present when `vertex_clusters` was requested and
    /// enough corners were found.
    pub vertex_clusters: Option<Clustering>,
    pub timing: TimingBreakdown,
    pub latency_ms: f64,
}
