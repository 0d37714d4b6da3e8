//! Parameter types configuring the detector stages.
//!
//! Defaults favor clean synthetic inputs; for photographs, start by tuning
//! the mask range (or `edge_threshold` on the edge path) and the contour
//! area filter.

use crate::cluster::KMeansOptions;
use crate::contour::ContourOptions;
use crate::corners::HarrisOptions;
use crate::mask::HsvRange;
use serde::Deserialize;

/// Detector-wide parameters controlling the pipeline stages.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    /// HSV range selecting the shape color. When unset the detector
    /// binarizes via gradient edges instead.
    pub mask: Option<HsvRange>,
    /// One erode + dilate pass to despeckle the color mask.
    pub clean_mask: bool,
    /// Gradient magnitude threshold for the edge path.
    pub edge_threshold: f32,
    /// Contour tracing, simplification and filtering.
    pub contour: ContourOptions,
    /// Harris corner detection.
    pub corners: HarrisOptions,
    /// When set, cluster the detected corners into this many vertex
    /// estimates.
    pub vertex_clusters: Option<usize>,
    /// K-means settings used for vertex clustering (`clusters` is overridden
    /// by `vertex_clusters`).
    pub kmeans: KMeansOptions,
    /// Magnification of the normalized output frame.
    pub zoom: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            mask: None,
            clean_mask: true,
            edge_threshold: 0.1,
            contour: ContourOptions::default(),
            corners: HarrisOptions::default(),
            vertex_clusters: None,
            kmeans: KMeansOptions::default(),
            zoom: 1.0,
        }
    }
}
