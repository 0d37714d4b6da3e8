//! Contour tracing and polygon classification.
//!
//! The pipeline over a binary mask:
//!
//! - [`trace_contours`]: Suzuki-Abe border following (via `imageproc`),
//!   keeping outer borders and holes apart.
//! - [`simplify_polygon`]: Douglas-Peucker reduction of a closed contour to
//!   its salient vertices.
//! - [`classify_polygon`]: vertex count to [`ShapeKind`], plus area,
//!   perimeter, centroid and principal-axis orientation.
//! - [`extract_shapes`]: the composition, with area/vertex filtering.

mod approx;
mod shape;
mod trace;

pub use approx::simplify_polygon;
pub use shape::{classify_polygon, PolygonShape, ShapeKind};
pub use trace::{trace_contours, TracedContour};

use crate::image::GrayImageU8;
use log::debug;
use serde::Deserialize;

/// Options for [`extract_shapes`].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ContourOptions {
    /// Douglas–Peucker tolerance as a fraction of the contour perimeter.
    pub epsilon_frac: f32,
    /// Minimum polygon area in squared pixels.
    pub min_area_px: f32,
    /// Minimum number of vertices after simplification.
    pub min_vertices: usize,
    /// Keep hole borders (inner contours) as shapes.
    pub include_holes: bool,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            epsilon_frac: 0.02,
            min_area_px: 64.0,
            min_vertices: 3,
            include_holes: false,
        }
    }
}

/// Trace, simplify and classify every contour in a binary mask.
///
/// Contours below `min_area_px` or with fewer than `min_vertices` vertices
/// after simplification are dropped; holes are dropped unless
/// `include_holes` is set.
pub fn extract_shapes(mask: &GrayImageU8, options: &ContourOptions) -> Vec<PolygonShape> {
    let contours = trace_contours(mask);
    let traced = contours.len();

    let mut shapes = Vec::new();
    for contour in contours {
        if contour.is_hole && !options.include_holes {
            continue;
        }
        let perimeter = closed_polyline_length(&contour.points);
        let epsilon = (options.epsilon_frac * perimeter).max(0.5);
        let vertices = simplify_polygon(&contour.points, epsilon);
        if vertices.len() < options.min_vertices.max(3) {
            continue;
        }
        let shape = classify_polygon(&vertices);
        if shape.area < options.min_area_px {
            continue;
        }
        shapes.push(shape);
    }

    debug!(
        "extract_shapes: {} contours traced, {} shapes kept",
        traced,
        shapes.len()
    );
    shapes
}

fn closed_polyline_length(points: &[[f32; 2]]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut len = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        len += (dx * dx + dy * dy).sqrt();
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_rect_mask(w: usize, h: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> GrayImageU8 {
        let mut mask = GrayImageU8::zeros(w, h);
        for y in y0..y1 {
            for x in x0..x1 {
                mask.set(x, y, 255);
            }
        }
        mask
    }

    #[test]
    fn filled_rectangle_classifies_as_quadrilateral() {
        let mask = filled_rect_mask(64, 64, 10, 10, 40, 30);
        let shapes = extract_shapes(&mask, &ContourOptions::default());
        assert_eq!(shapes.len(), 1, "expected exactly one shape");
        let shape = &shapes[0];
        assert_eq!(shape.kind, ShapeKind::Quadrilateral);
        // Border following walks pixel centers, so the traced rectangle is
        // one pixel smaller than the filled region in each dimension.
        assert!(
            (shape.area - 29.0 * 19.0).abs() < 60.0,
            "unexpected area {}",
            shape.area
        );
        let c = shape.centroid;
        assert!((c[0] - 24.5).abs() < 1.5 && (c[1] - 19.5).abs() < 1.5, "centroid {c:?}");
    }

    #[test]
    fn empty_mask_yields_no_shapes() {
        let mask = GrayImageU8::zeros(32, 32);
        assert!(extract_shapes(&mask, &ContourOptions::default()).is_empty());
    }

    #[test]
    fn small_blobs_are_filtered_by_area() {
        let mask = filled_rect_mask(32, 32, 14, 14, 18, 18);
        let options = ContourOptions {
            min_area_px: 64.0,
            ..Default::default()
        };
        assert!(extract_shapes(&mask, &options).is_empty());
    }

    #[test]
    fn hole_borders_are_excluded_by_default() {
        // A ring: filled square with a hollow center.
        let mut mask = filled_rect_mask(40, 40, 5, 5, 35, 35);
        for y in 15..25 {
            for x in 15..25 {
                mask.set(x, y, 0);
            }
        }
        let outer_only = extract_shapes(&mask, &ContourOptions::default());
        assert_eq!(outer_only.len(), 1);
        let with_holes = extract_shapes(
            &mask,
            &ContourOptions {
                include_holes: true,
                ..Default::default()
            },
        );
        assert!(with_holes.len() >= 2, "expected hole border to be kept");
    }
}
