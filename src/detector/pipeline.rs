//! Detector pipeline running binarization, contour classification, corner
//! detection and optional vertex clustering in one pass.
//!
//! Typical usage:
//! ```no_run
//! use shape_detector::{ShapeDetector, ShapeParams};
//! use shape_detector::image::RgbImageU8;
//!
//! # fn example(rgb: RgbImageU8) {
//! let detector = ShapeDetector::new(ShapeParams::default());
//! let result = detector.process(&rgb);
//! if result.found {
//!     println!("{} shapes", result.shapes.len());
//! }
//! # }
//! ```

use super::params::ShapeParams;
use crate::cluster::kmeans;
use crate::contour::extract_shapes;
use crate::coords::NormalizedFrame;
use crate::corners::detect_corners;
use crate::diagnostics::TimingBreakdown;
use crate::edges::{detect_edges_nms, edge_mask};
use crate::image::{GrayImageU8, ImageF32, ImageU8, ImageView, ImageViewMut, RgbImageU8};
use crate::mask::{color_mask, dilate3x3, erode3x3};
use crate::types::{DetectedShape, ShapeResult};
use log::debug;
use std::time::Instant;

/// Shape detector orchestrating the full pipeline. Stateless: one instance
/// can process any number of frames.
pub struct ShapeDetector {
    params: ShapeParams,
}

impl ShapeDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: ShapeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    /// Run the pipeline on an RGB image.
    ///
    /// Binarizes via the configured HSV mask, or via gradient edges when no
    /// mask range is set.
    pub fn process(&self, rgb: &RgbImageU8) -> ShapeResult {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let gray = rgb.to_grayscale();
        let float = gray.to_f32();

        let binarize_start = Instant::now();
        let binary = match &self.params.mask {
            Some(range) => {
                let mask = color_mask(rgb, range);
                if self.params.clean_mask {
                    dilate3x3(&erode3x3(&mask))
                } else {
                    mask
                }
            }
            None => self.edge_binary(&float),
        };
        timing.push(
            "binarize",
            binarize_start.elapsed().as_secs_f64() * 1000.0,
        );

        self.finish(&float, &binary, timing, total_start)
    }

    /// Run the pipeline on a borrowed grayscale view. Always binarizes via
    /// gradient edges; the color mask does not apply.
    pub fn process_gray(&self, gray: ImageU8<'_>) -> ShapeResult {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let float = view_to_f32(&gray);

        let binarize_start = Instant::now();
        let binary = self.edge_binary(&float);
        timing.push(
            "binarize",
            binarize_start.elapsed().as_secs_f64() * 1000.0,
        );

        self.finish(&float, &binary, timing, total_start)
    }

    /// Edge-path binarization: gradient NMS rasterized and dilated once so
    /// the traced boundary stays connected across corners.
    fn edge_binary(&self, float: &ImageF32) -> GrayImageU8 {
        let result = detect_edges_nms(float, self.params.edge_threshold);
        debug!(
            "edge path: {} edge samples (grad {:.2} ms, nms {:.2} ms)",
            result.edges.len(),
            result.gradient_ms,
            result.nms_ms
        );
        dilate3x3(&edge_mask(&result.edges, float.w, float.h))
    }

    fn finish(
        &self,
        float: &ImageF32,
        binary: &GrayImageU8,
        mut timing: TimingBreakdown,
        total_start: Instant,
    ) -> ShapeResult {
        let contour_start = Instant::now();
        let polygons = extract_shapes(binary, &self.params.contour);
        timing.push("contours", contour_start.elapsed().as_secs_f64() * 1000.0);

        let frame = NormalizedFrame::with_zoom(float.w, float.h, self.params.zoom);
        let shapes: Vec<DetectedShape> = polygons
            .into_iter()
            .map(|p| DetectedShape {
                kind: p.kind,
                vertices_norm: frame.normalize_points(&p.vertices),
                vertices_px: p.vertices,
                area_px: p.area,
                perimeter_px: p.perimeter,
                centroid_px: p.centroid,
                centroid_norm: frame.to_normalized(p.centroid),
                orientation_rad: p.orientation_rad,
            })
            .collect();

        let corner_start = Instant::now();
        let corners = detect_corners(float, &self.params.corners);
        timing.push("corners", corner_start.elapsed().as_secs_f64() * 1000.0);

        let vertex_clusters = match self.params.vertex_clusters {
            Some(k) if k > 0 => {
                let cluster_start = Instant::now();
                let points: Vec<[f32; 2]> = corners.iter().map(|c| c.position()).collect();
                let mut options = self.params.kmeans;
                options.clusters = k;
                let clustering = match kmeans(&points, &options) {
                    Ok(clustering) => Some(clustering),
                    Err(err) => {
                        debug!("vertex clustering skipped: {err}");
                        None
                    }
                };
                timing.push("cluster", cluster_start.elapsed().as_secs_f64() * 1000.0);
                clustering
            }
            _ => None,
        };

        let latency_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timing.total_ms = latency_ms;

        ShapeResult {
            found: !shapes.is_empty(),
            shapes,
            corners,
            vertex_clusters,
            timing,
            latency_ms,
        }
    }
}

fn view_to_f32(gray: &ImageU8<'_>) -> ImageF32 {
    let mut out = ImageF32::new(gray.w, gray.h);
    for y in 0..gray.h {
        let src = gray.row(y);
        let dst = out.row_mut(y);
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = s as f32 / 255.0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_finds_nothing() {
        let rgb = RgbImageU8::filled(32, 32, [30, 30, 30]);
        let detector = ShapeDetector::new(ShapeParams::default());
        let result = detector.process(&rgb);
        assert!(!result.found);
        assert!(result.shapes.is_empty());
        assert!(result.corners.is_empty());
        assert!(result.vertex_clusters.is_none());
        assert_eq!(result.timing.stages.len(), 3);
    }

    #[test]
    fn clustering_skipped_with_too_few_corners() {
        let rgb = RgbImageU8::filled(32, 32, [30, 30, 30]);
        let params = ShapeParams {
            vertex_clusters: Some(4),
            ..Default::default()
        };
        let result = ShapeDetector::new(params).process(&rgb);
        assert!(result.vertex_clusters.is_none());
    }
}
