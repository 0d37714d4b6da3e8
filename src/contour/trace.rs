//! Border following over a binary mask.
//!
//! Uses `imageproc`'s Suzuki–Abe implementation and converts the integer
//! border points into float coordinates for the rest of the pipeline.

use crate::image::GrayImageU8;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use log::debug;

/// One traced border: the boundary points in raster order and whether the
/// border encloses a hole (inner border) rather than a filled region.
#[derive(Clone, Debug)]
pub struct TracedContour {
    pub points: Vec<[f32; 2]>,
    pub is_hole: bool,
}

/// Trace all borders in a binary mask (nonzero = foreground).
///
/// Contours with fewer than 3 points cannot form a polygon and are dropped.
pub fn trace_contours(mask: &GrayImageU8) -> Vec<TracedContour> {
    let buffer = match GrayImage::from_raw(
        mask.width() as u32,
        mask.height() as u32,
        mask.data().to_vec(),
    ) {
        Some(buffer) => buffer,
        None => {
            debug!("trace_contours: inconsistent mask buffer, returning no contours");
            return Vec::new();
        }
    };

    find_contours::<i32>(&buffer)
        .into_iter()
        .filter(|c| c.points.len() >= 3)
        .map(|c| TracedContour {
            points: c
                .points
                .iter()
                .map(|p| [p.x as f32, p.y as f32])
                .collect(),
            is_hole: c.border_type == BorderType::Hole,
        })
        .collect()
}
