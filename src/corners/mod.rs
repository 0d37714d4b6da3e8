//! Harris corner response and corner picking.
//!
//! The structure tensor is accumulated over a square window of the gradient
//! products and scored with `R = det(M) − k·trace(M)²`. Candidates are
//! thresholded relative to the maximum response, then reduced to local
//! maxima. Rows of the response image are computed in parallel.

use crate::edges::{image_gradients, GradientKernel};
use crate::image::{ImageF32, ImageView};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Knobs for [`harris_response`] / [`detect_corners`].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct HarrisOptions {
    /// Half-width of the structure-tensor window (window side = 2r + 1).
    pub block_radius: usize,
    /// Derivative kernel feeding the structure tensor.
    pub kernel: GradientKernel,
    /// Harris sensitivity constant.
    pub k: f32,
    /// Response threshold as a fraction of the maximum response.
    pub rel_threshold: f32,
    /// Half-width of the local-maximum suppression window.
    pub nms_radius: usize,
}

impl Default for HarrisOptions {
    fn default() -> Self {
        Self {
            block_radius: 2,
            kernel: GradientKernel::Sobel,
            k: 0.04,
            rel_threshold: 1e-3,
            nms_radius: 1,
        }
    }
}

/// A detected corner with its Harris response.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerPoint {
    pub x: u32,
    pub y: u32,
    pub response: f32,
}

impl CornerPoint {
    pub fn position(&self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

/// Compute the Harris response image for a single-channel float image.
pub fn harris_response(l: &ImageF32, options: &HarrisOptions) -> ImageF32 {
    let grad = image_gradients(l, options.kernel);
    let w = l.w;
    let h = l.h;
    let mut response = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return response;
    }

    let r = options.block_radius as i64;
    let k = options.k;
    let gx = &grad.gx;
    let gy = &grad.gy;

    response
        .data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            for (x, out) in out_row.iter_mut().enumerate() {
                let mut sxx = 0.0f32;
                let mut syy = 0.0f32;
                let mut sxy = 0.0f32;
                for dy in -r..=r {
                    let yn = (y as i64 + dy).clamp(0, h as i64 - 1) as usize;
                    let gx_row = gx.row(yn);
                    let gy_row = gy.row(yn);
                    for dx in -r..=r {
                        let xn = (x as i64 + dx).clamp(0, w as i64 - 1) as usize;
                        let ix = gx_row[xn];
                        let iy = gy_row[xn];
                        sxx += ix * ix;
                        syy += iy * iy;
                        sxy += ix * iy;
                    }
                }
                let det = sxx * syy - sxy * sxy;
                let trace = sxx + syy;
                *out = det - k * trace * trace;
            }
        });

    response
}

/// Detect corners: relative-max thresholding of the Harris response followed
/// by local-maximum suppression within `nms_radius`.
///
/// Returned corners are in raster order. Equal-response plateaus keep only
/// their first pixel in raster order.
pub fn detect_corners(l: &ImageF32, options: &HarrisOptions) -> Vec<CornerPoint> {
    let response = harris_response(l, options);
    let max_response = response.max_value();
    if max_response <= 0.0 {
        debug!("detect_corners: no positive Harris response");
        return Vec::new();
    }
    let thresh = options.rel_threshold * max_response;
    let r = options.nms_radius as i64;
    let w = response.w;
    let h = response.h;

    let mut corners = Vec::new();
    for y in 0..h {
        let row = response.row(y);
        'pixels: for x in 0..w {
            let v = row[x];
            if v < thresh {
                continue;
            }
            for dy in -r..=r {
                let yn = y as i64 + dy;
                if yn < 0 || yn >= h as i64 {
                    continue;
                }
                let nrow = response.row(yn as usize);
                for dx in -r..=r {
                    let xn = x as i64 + dx;
                    if xn < 0 || xn >= w as i64 || (dx == 0 && dy == 0) {
                        continue;
                    }
                    let nv = nrow[xn as usize];
                    if nv > v {
                        continue 'pixels;
                    }
                    // Plateau tie-break: earlier raster position wins.
                    if nv == v && (yn, xn) < (y as i64, x as i64) {
                        continue 'pixels;
                    }
                }
            }
            corners.push(CornerPoint {
                x: x as u32,
                y: y as u32,
                response: v,
            });
        }
    }

    debug!(
        "detect_corners: {} corners above {:.3e} (max {:.3e})",
        corners.len(),
        thresh,
        max_response
    );
    corners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bright_square(size: usize, lo: usize, hi: usize) -> ImageF32 {
        let mut img = ImageF32::new(size, size);
        for y in lo..hi {
            for x in lo..hi {
                img.set(x, y, 1.0);
            }
        }
        img
    }

    #[test]
    fn flat_image_has_no_corners() {
        let img = ImageF32::new(24, 24);
        assert!(detect_corners(&img, &HarrisOptions::default()).is_empty());
    }

    #[test]
    fn square_corners_are_found() {
        let img = bright_square(32, 8, 24);
        let corners = detect_corners(&img, &HarrisOptions::default());
        assert!(corners.len() >= 4, "found only {} corners", corners.len());

        let expected = [[8.0f32, 8.0], [23.0, 8.0], [8.0, 23.0], [23.0, 23.0]];
        for target in expected {
            let hit = corners.iter().any(|c| {
                let dx = c.x as f32 - target[0];
                let dy = c.y as f32 - target[1];
                (dx * dx + dy * dy).sqrt() <= 4.0
            });
            assert!(hit, "no corner near {target:?}: {corners:?}");
        }
        // Everything detected should sit near one of the four corners.
        for c in &corners {
            let near = expected.iter().any(|t| {
                let dx = c.x as f32 - t[0];
                let dy = c.y as f32 - t[1];
                (dx * dx + dy * dy).sqrt() <= 6.0
            });
            assert!(near, "spurious corner at ({}, {})", c.x, c.y);
        }
    }

    #[test]
    fn edges_score_below_corners() {
        let img = bright_square(32, 8, 24);
        let response = harris_response(&img, &HarrisOptions::default());
        let corner = response.get(8, 8);
        let edge_mid = response.get(16, 8);
        assert!(
            corner > edge_mid,
            "corner {corner} should dominate edge {edge_mid}"
        );
    }
}
