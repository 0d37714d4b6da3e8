//! Pixel-space to normalized Cartesian mapping.
//!
//! Pixel space has its origin at the top-left corner with +y pointing down.
//! The normalized frame puts the origin at the image center with +y pointing
//! up, and scales both axes by the *shorter* image dimension so that the
//! midpoints of the shorter-dimension edges land on ±1. Corners of a
//! non-square image therefore exceed ±1 along the longer axis.
//!
//! The transform is
//!
//! ```text
//! norm_x =  (pixel_x - center_x) * 2 * zoom / shorter_dim
//! norm_y = -(pixel_y - center_y) * 2 * zoom / shorter_dim
//! ```
//!
//! `zoom > 1` maps a smaller pixel region onto the unit square.

/// Precomputed pixel ↔ normalized mapping for one image size.
#[derive(Clone, Copy, Debug)]
pub struct NormalizedFrame {
    center_x: f32,
    center_y: f32,
    scale: f32,
}

const MIN_ZOOM: f32 = 1e-6;

impl NormalizedFrame {
    /// Mapping for an image of the given pixel dimensions at `zoom = 1`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_zoom(width, height, 1.0)
    }

    /// Mapping with magnification. Non-finite or non-positive zoom values
    /// are clamped to a small positive minimum.
    pub fn with_zoom(width: usize, height: usize, zoom: f32) -> Self {
        let zoom = if zoom.is_finite() { zoom.max(MIN_ZOOM) } else { 1.0 };
        let shorter = width.min(height) as f32;
        let scale = if shorter > 0.0 {
            2.0 * zoom / shorter
        } else {
            1.0
        };
        Self {
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
            scale,
        }
    }

    /// Normalized units per pixel.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Map a pixel-space point into the normalized frame.
    #[inline]
    pub fn to_normalized(&self, p: [f32; 2]) -> [f32; 2] {
        [
            (p[0] - self.center_x) * self.scale,
            (self.center_y - p[1]) * self.scale,
        ]
    }

    /// Map a normalized point back to pixel space. Exact inverse of
    /// [`to_normalized`](Self::to_normalized) up to float rounding.
    #[inline]
    pub fn to_pixel(&self, p: [f32; 2]) -> [f32; 2] {
        [
            self.center_x + p[0] / self.scale,
            self.center_y - p[1] / self.scale,
        ]
    }

    /// Map a slice of pixel-space points into the normalized frame.
    pub fn normalize_points(&self, points: &[[f32; 2]]) -> Vec<[f32; 2]> {
        points.iter().map(|&p| self.to_normalized(p)).collect()
    }
}
