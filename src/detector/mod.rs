//! Shape detector orchestrating the binarize → trace → classify pipeline.
//!
//! Overview
//! - Binarizes the input either by HSV color masking (with one erode/dilate
//!   cleanup pass) or by Scharr-gradient NMS when no mask range is
//!   configured.
//! - Traces contours on the binary map, simplifies them with
//!   Douglas–Peucker, and classifies the survivors by vertex count.
//! - Detects Harris corners on the grayscale image and optionally clusters
//!   them into a requested number of vertex estimates with k-means.
//! - Reports everything in both pixel and normalized Cartesian coordinates,
//!   with a per-stage timing breakdown.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and the CLI
//!   tools.
//! - `pipeline` – the [`ShapeDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::ShapeParams;
pub use pipeline::ShapeDetector;
