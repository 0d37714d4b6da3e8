//! HSV color masking and binary-mask morphology.
//!
//! The second binarization path next to gradient NMS: select pixels whose
//! color falls inside an [`HsvRange`] and clean the result up with one 3×3
//! erode/dilate pass. The mask is strictly two-valued (0 / 255) so it can be
//! fed straight into contour tracing.

use crate::image::{GrayImageU8, RgbImageU8};
use serde::{Deserialize, Serialize};

/// A color in HSV space: `h` in `[0, 360)`, `s` and `v` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Convert an 8-bit RGB triple to HSV.
///
/// Gray pixels (zero chroma) report hue 0 by convention.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let h = if chroma <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / chroma + 2.0)
    } else {
        60.0 * ((r - g) / chroma + 4.0)
    };
    let s = if max <= f32::EPSILON { 0.0 } else { chroma / max };

    Hsv { h, s, v: max }
}

/// Inclusive HSV bounds. The hue interval wraps around 360 when
/// `h_lo > h_hi` (e.g. red: 350 → 10).
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct HsvRange {
    pub h_lo: f32,
    pub h_hi: f32,
    pub s_lo: f32,
    pub s_hi: f32,
    pub v_lo: f32,
    pub v_hi: f32,
}

impl Default for HsvRange {
    fn default() -> Self {
        // Full hue circle, any saturation, everything but near-black.
        Self {
            h_lo: 0.0,
            h_hi: 360.0,
            s_lo: 0.0,
            s_hi: 1.0,
            v_lo: 0.1,
            v_hi: 1.0,
        }
    }
}

impl HsvRange {
    pub fn contains(&self, c: Hsv) -> bool {
        let hue_ok = if self.h_lo <= self.h_hi {
            c.h >= self.h_lo && c.h <= self.h_hi
        } else {
            c.h >= self.h_lo || c.h <= self.h_hi
        };
        hue_ok
            && c.s >= self.s_lo
            && c.s <= self.s_hi
            && c.v >= self.v_lo
            && c.v <= self.v_hi
    }
}

/// Binary mask of the pixels whose color falls inside `range` (255 in range,
/// 0 outside).
pub fn color_mask(image: &RgbImageU8, range: &HsvRange) -> GrayImageU8 {
    let w = image.width();
    let h = image.height();
    let mut mask = GrayImageU8::zeros(w, h);
    for y in 0..h {
        for x in 0..w {
            if range.contains(rgb_to_hsv(image.pixel(x, y))) {
                mask.set(x, y, 255);
            }
        }
    }
    mask
}

/// 3×3 binary dilation: a pixel turns on if any 8-neighbor (or itself) is on.
pub fn dilate3x3(mask: &GrayImageU8) -> GrayImageU8 {
    morph3x3(mask, true)
}

/// 3×3 binary erosion: a pixel stays on only if all 8-neighbors are on.
pub fn erode3x3(mask: &GrayImageU8) -> GrayImageU8 {
    morph3x3(mask, false)
}

fn morph3x3(mask: &GrayImageU8, dilate: bool) -> GrayImageU8 {
    let w = mask.width();
    let h = mask.height();
    let mut out = GrayImageU8::zeros(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    for y in 0..h {
        for x in 0..w {
            let mut extreme = if dilate { 0u8 } else { 255u8 };
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    // Border neighbors clamp to the image extents.
                    let xn = (x as i64 + dx).clamp(0, w as i64 - 1) as usize;
                    let yn = (y as i64 + dy).clamp(0, h as i64 - 1) as usize;
                    let v = mask.get(xn, yn);
                    extreme = if dilate { extreme.max(v) } else { extreme.min(v) };
                }
            }
            out.set(x, y, extreme);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn hsv_primaries() {
        let red = rgb_to_hsv([255, 0, 0]);
        assert!(approx_eq(red.h, 0.0) && approx_eq(red.s, 1.0) && approx_eq(red.v, 1.0));
        let green = rgb_to_hsv([0, 255, 0]);
        assert!(approx_eq(green.h, 120.0));
        let blue = rgb_to_hsv([0, 0, 255]);
        assert!(approx_eq(blue.h, 240.0));
    }

    #[test]
    fn hsv_grays_have_zero_saturation() {
        for v in [0u8, 64, 128, 255] {
            let c = rgb_to_hsv([v, v, v]);
            assert!(approx_eq(c.s, 0.0));
            assert!(approx_eq(c.h, 0.0));
        }
    }

    #[test]
    fn wrapping_hue_range_matches_reds() {
        let range = HsvRange {
            h_lo: 350.0,
            h_hi: 10.0,
            s_lo: 0.5,
            s_hi: 1.0,
            v_lo: 0.5,
            v_hi: 1.0,
        };
        assert!(range.contains(rgb_to_hsv([255, 0, 0])));
        assert!(range.contains(rgb_to_hsv([255, 0, 20])));
        assert!(!range.contains(rgb_to_hsv([0, 255, 0])));
    }

    #[test]
    fn color_mask_is_two_valued() {
        let mut img = RgbImageU8::filled(8, 8, [10, 10, 10]);
        for y in 2..6 {
            for x in 2..6 {
                img.set_pixel(x, y, [0, 200, 0]);
            }
        }
        let range = HsvRange {
            h_lo: 90.0,
            h_hi: 150.0,
            s_lo: 0.5,
            s_hi: 1.0,
            v_lo: 0.3,
            v_hi: 1.0,
        };
        let mask = color_mask(&img, &range);
        assert!(mask.data().iter().all(|&v| v == 0 || v == 255));
        let on = mask.data().iter().filter(|&&v| v == 255).count();
        assert_eq!(on, 16);
    }

    #[test]
    fn erode_then_dilate_removes_speckle() {
        let mut mask = GrayImageU8::zeros(9, 9);
        mask.set(4, 4, 255); // lone pixel
        let cleaned = dilate3x3(&erode3x3(&mask));
        assert!(cleaned.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn dilate_grows_a_block() {
        let mut mask = GrayImageU8::zeros(9, 9);
        for y in 3..6 {
            for x in 3..6 {
                mask.set(x, y, 255);
            }
        }
        let grown = dilate3x3(&mask);
        let on = grown.data().iter().filter(|&&v| v == 255).count();
        assert_eq!(on, 25);
    }
}
