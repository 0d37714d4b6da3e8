//! Polygon measures and vertex-count classification.

use nalgebra::{Matrix2, SymmetricEigen};
use serde::Serialize;

/// Polygon family by vertex count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Triangle,
    Quadrilateral,
    Pentagon,
    Hexagon,
    /// Anything with more than six vertices.
    Polygon(usize),
}

impl ShapeKind {
    fn from_vertex_count(n: usize) -> Self {
        match n {
            3 => ShapeKind::Triangle,
            4 => ShapeKind::Quadrilateral,
            5 => ShapeKind::Pentagon,
            6 => ShapeKind::Hexagon,
            n => ShapeKind::Polygon(n),
        }
    }
}

/// A classified polygon in pixel coordinates.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonShape {
    pub kind: ShapeKind,
    pub vertices: Vec<[f32; 2]>,
    /// Shoelace area in squared pixels (orientation-independent).
    pub area: f32,
    pub perimeter: f32,
    /// Area-weighted polygon centroid; falls back to the vertex mean for
    /// degenerate (near-zero-area) polygons.
    pub centroid: [f32; 2],
    /// Principal-axis angle in radians, range [0, π).
    pub orientation_rad: f32,
}

/// Measure and classify a simplified closed polygon.
pub fn classify_polygon(vertices: &[[f32; 2]]) -> PolygonShape {
    PolygonShape {
        kind: ShapeKind::from_vertex_count(vertices.len()),
        vertices: vertices.to_vec(),
        area: polygon_area(vertices),
        perimeter: polygon_perimeter(vertices),
        centroid: polygon_centroid(vertices),
        orientation_rad: principal_axis(vertices),
    }
}

/// Absolute shoelace area of a closed polygon.
pub fn polygon_area(vertices: &[[f32; 2]]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0f32;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        twice_area += a[0] * b[1] - b[0] * a[1];
    }
    twice_area.abs() * 0.5
}

fn polygon_perimeter(vertices: &[[f32; 2]]) -> f32 {
    if vertices.len() < 2 {
        return 0.0;
    }
    let mut perimeter = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        perimeter += (dx * dx + dy * dy).sqrt();
    }
    perimeter
}

fn polygon_centroid(vertices: &[[f32; 2]]) -> [f32; 2] {
    if vertices.is_empty() {
        return [0.0, 0.0];
    }
    let mut twice_area = 0.0f32;
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let cross = a[0] * b[1] - b[0] * a[1];
        twice_area += cross;
        cx += (a[0] + b[0]) * cross;
        cy += (a[1] + b[1]) * cross;
    }
    if twice_area.abs() > 1e-6 {
        let scale = 1.0 / (3.0 * twice_area);
        [cx * scale, cy * scale]
    } else {
        let n = vertices.len() as f32;
        let sum = vertices
            .iter()
            .fold([0.0f32, 0.0f32], |acc, v| [acc[0] + v[0], acc[1] + v[1]]);
        [sum[0] / n, sum[1] / n]
    }
}

/// Principal axis of the vertex cloud from the 2×2 covariance eigenvectors.
fn principal_axis(vertices: &[[f32; 2]]) -> f32 {
    if vertices.len() < 2 {
        return 0.0;
    }
    let n = vertices.len() as f32;
    let mut mx = 0.0f32;
    let mut my = 0.0f32;
    for v in vertices {
        mx += v[0];
        my += v[1];
    }
    mx /= n;
    my /= n;

    let mut cxx = 0.0f32;
    let mut cyy = 0.0f32;
    let mut cxy = 0.0f32;
    for v in vertices {
        let dx = v[0] - mx;
        let dy = v[1] - my;
        cxx += dx * dx;
        cyy += dy * dy;
        cxy += dx * dy;
    }
    let cov = Matrix2::new(cxx / n, cxy / n, cxy / n, cyy / n);
    let eig = SymmetricEigen::new(cov);
    let vmax = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        eig.eigenvectors.column(0)
    } else {
        eig.eigenvectors.column(1)
    };
    let angle = vmax[1].atan2(vmax[0]);
    angle.rem_euclid(std::f32::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_measures() {
        let square = [[0.0f32, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let shape = classify_polygon(&square);
        assert_eq!(shape.kind, ShapeKind::Quadrilateral);
        assert!((shape.area - 100.0).abs() < 1e-3);
        assert!((shape.perimeter - 40.0).abs() < 1e-3);
        assert!((shape.centroid[0] - 5.0).abs() < 1e-3);
        assert!((shape.centroid[1] - 5.0).abs() < 1e-3);
    }

    #[test]
    fn area_is_orientation_independent() {
        let cw = [[0.0f32, 0.0], [0.0, 4.0], [6.0, 4.0], [6.0, 0.0]];
        let ccw = [[0.0f32, 0.0], [6.0, 0.0], [6.0, 4.0], [0.0, 4.0]];
        assert!((polygon_area(&cw) - polygon_area(&ccw)).abs() < 1e-5);
        assert!((polygon_area(&cw) - 24.0).abs() < 1e-3);
    }

    #[test]
    fn vertex_counts_map_to_kinds() {
        assert_eq!(ShapeKind::from_vertex_count(3), ShapeKind::Triangle);
        assert_eq!(ShapeKind::from_vertex_count(4), ShapeKind::Quadrilateral);
        assert_eq!(ShapeKind::from_vertex_count(5), ShapeKind::Pentagon);
        assert_eq!(ShapeKind::from_vertex_count(6), ShapeKind::Hexagon);
        assert_eq!(ShapeKind::from_vertex_count(9), ShapeKind::Polygon(9));
    }

    #[test]
    fn elongated_rectangle_orientation_follows_long_axis() {
        let flat = [[0.0f32, 0.0], [20.0, 0.0], [20.0, 2.0], [0.0, 2.0]];
        let angle = classify_polygon(&flat).orientation_rad;
        assert!(
            angle < 0.1 || angle > std::f32::consts::PI - 0.1,
            "expected near-horizontal axis, got {angle}"
        );

        let tall = [[0.0f32, 0.0], [2.0, 0.0], [2.0, 20.0], [0.0, 20.0]];
        let angle = classify_polygon(&tall).orientation_rad;
        assert!(
            (angle - std::f32::consts::FRAC_PI_2).abs() < 0.1,
            "expected near-vertical axis, got {angle}"
        );
    }

    #[test]
    fn degenerate_polygon_has_zero_area() {
        let line = [[0.0f32, 0.0], [5.0, 0.0], [10.0, 0.0]];
        assert!(polygon_area(&line) < 1e-6);
        // Centroid falls back to the vertex mean.
        let c = polygon_centroid(&line);
        assert!((c[0] - 5.0).abs() < 1e-3 && c[1].abs() < 1e-3);
    }
}
