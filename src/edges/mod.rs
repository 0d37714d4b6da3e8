//! Edge detection: image gradients plus non-maximum suppression.
//!
//! The binary map fed to contour tracing can come from two sources; this
//! module provides the gradient-based one. `detect_edges_nms` produces a
//! sparse list of [`EdgeElement`]s and `edge_mask` rasterizes that list back
//! into a two-valued [`GrayImageU8`] suitable for border following.

pub mod grad;
pub mod nms;

pub use grad::{image_gradients, Grad, GradientKernel};
pub use nms::{detect_edges_nms, run_nms, EdgeElement, EdgeMapResult};

use crate::image::GrayImageU8;

/// Rasterize a sparse edge list into a binary mask (255 on edges).
pub fn edge_mask(edges: &[EdgeElement], width: usize, height: usize) -> GrayImageU8 {
    let mut mask = GrayImageU8::zeros(width, height);
    for e in edges {
        let x = e.x as usize;
        let y = e.y as usize;
        if x < width && y < height {
            mask.set(x, y, 255);
        }
    }
    mask
}
