#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod coords;
pub mod detector;
pub mod diagnostics;
pub mod image;
pub mod types;

// Building-block modules – public so callers can compose their own pipeline.
pub mod cluster;
pub mod contour;
pub mod corners;
pub mod edges;
pub mod flag;
pub mod mask;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{ShapeDetector, ShapeParams};
pub use crate::types::{DetectedShape, ShapeResult};

// Generally useful helpers.
pub use crate::coords::NormalizedFrame;
pub use crate::flag::{run_flag_exercise, FlagExerciseOptions, SharedFlag};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use shape_detector::prelude::*;
///
/// # fn main() {
/// let rgb = RgbImageU8::filled(64, 64, [0, 0, 0]);
/// let detector = ShapeDetector::new(ShapeParams::default());
/// let result = detector.process(&rgb);
/// println!("found={} latency_ms={:.3}", result.found, result.latency_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::contour::ShapeKind;
    pub use crate::image::{GrayImageU8, ImageU8, RgbImageU8};
    pub use crate::{NormalizedFrame, ShapeDetector, ShapeParams, ShapeResult};
}
