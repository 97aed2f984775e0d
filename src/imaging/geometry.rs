//! Pure calculation functions for target-size resolution and placement.
//!
//! All functions here are pure and testable without any pixel data or I/O.
//! The transform module combines them with actual image operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("target size must constrain at least one axis")]
    Unconstrained,
}

/// A requested output size. Either axis may be left unspecified, meaning
/// "derive this axis from the source aspect ratio". A target with both
/// axes unspecified is invalid and rejected by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl TargetSize {
    /// Both axes fixed.
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Width fixed, height derived from the source aspect ratio.
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }

    /// Height fixed, width derived from the source aspect ratio.
    pub fn height(height: u32) -> Self {
        Self {
            width: None,
            height: Some(height),
        }
    }

    /// True when at least one axis is specified.
    pub fn is_constrained(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// A target with both axes pinned down against a concrete source.
///
/// `was_derived` records whether either axis of the original request was
/// absent. Downstream placement pads that case onto a transparent canvas
/// instead of treating the crop as final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub width: u32,
    pub height: u32,
    pub was_derived: bool,
}

impl ResolvedTarget {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Resolve a [`TargetSize`] against source dimensions.
///
/// A missing axis is derived by scaling the source aspect ratio against the
/// specified axis: `missing = source_other * (specified / source_specified)`,
/// truncated to an integer. The scaling ratio always comes from the source,
/// never from the target, so the derivation can never distort.
///
/// # Examples
/// ```
/// # use brandkit::imaging::{TargetSize, resolve};
/// // 1000x500 source, width-only 400 → height derived as 200
/// let r = resolve(TargetSize::width(400), (1000, 500)).unwrap();
/// assert_eq!((r.width, r.height, r.was_derived), (400, 200, true));
/// ```
pub fn resolve(target: TargetSize, source: (u32, u32)) -> Result<ResolvedTarget, GeometryError> {
    let (src_w, src_h) = source;
    match (target.width, target.height) {
        (None, None) => Err(GeometryError::Unconstrained),
        (Some(w), Some(h)) => Ok(ResolvedTarget {
            width: w,
            height: h,
            was_derived: false,
        }),
        (Some(w), None) => Ok(ResolvedTarget {
            width: w,
            height: (src_h as f64 * (w as f64 / src_w as f64)) as u32,
            was_derived: true,
        }),
        (None, Some(h)) => Ok(ResolvedTarget {
            width: (src_w as f64 * (h as f64 / src_h as f64)) as u32,
            height: h,
            was_derived: true,
        }),
    }
}

/// Uniform scale factor from source to target: `min(tw/sw, th/sh)`.
///
/// Kept as floating point; truncation to integer pixel counts happens once,
/// in [`scaled_dims`], to avoid accumulating rounding error.
pub fn contain_scale(source: (u32, u32), target: (u32, u32)) -> f64 {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;
    let rw = tgt_w as f64 / src_w as f64;
    let rh = tgt_h as f64 / src_h as f64;
    rw.min(rh)
}

/// Apply a uniform scale to source dimensions, truncating each axis.
pub fn scaled_dims(source: (u32, u32), scale: f64) -> (u32, u32) {
    let (src_w, src_h) = source;
    ((src_w as f64 * scale) as u32, (src_h as f64 * scale) as u32)
}

/// Signed placement offset of content on a canvas along one axis.
///
/// Negative when the content overhangs the canvas (a centered crop),
/// positive when it falls short (centered padding). Matches the centered
/// crop contract `left = (content - canvas) / 2` with floor division, so
/// odd overhangs bias the same way on both sides.
pub fn place_offset(content: u32, canvas: u32) -> i64 {
    -((content as i64 - canvas as i64).div_euclid(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // resolve tests
    // =========================================================================

    #[test]
    fn resolve_both_axes_passes_through() {
        let r = resolve(TargetSize::exact(800, 200), (1000, 500)).unwrap();
        assert_eq!(r.dimensions(), (800, 200));
        assert!(!r.was_derived);
    }

    #[test]
    fn resolve_derives_height_from_width() {
        // 1000x500 (2:1), width 400 → height 200
        let r = resolve(TargetSize::width(400), (1000, 500)).unwrap();
        assert_eq!(r.dimensions(), (400, 200));
        assert!(r.was_derived);
    }

    #[test]
    fn resolve_derives_width_from_height() {
        // Square source, height 630 → width 630
        let r = resolve(TargetSize::height(630), (500, 500)).unwrap();
        assert_eq!(r.dimensions(), (630, 630));
        assert!(r.was_derived);
    }

    #[test]
    fn resolve_derivation_truncates() {
        // 3:2 source, height 100 → width 150; 400x267 → int(400 * 100/267) = 149
        let r = resolve(TargetSize::height(100), (400, 267)).unwrap();
        assert_eq!(r.width, 149);
    }

    #[test]
    fn resolve_unconstrained_is_rejected() {
        let target = TargetSize {
            width: None,
            height: None,
        };
        assert_eq!(
            resolve(target, (100, 100)),
            Err(GeometryError::Unconstrained)
        );
    }

    #[test]
    fn target_constrained_flag() {
        assert!(TargetSize::width(16).is_constrained());
        assert!(TargetSize::exact(1, 1).is_constrained());
        assert!(
            !TargetSize {
                width: None,
                height: None
            }
            .is_constrained()
        );
    }

    // =========================================================================
    // contain_scale / scaled_dims tests
    // =========================================================================

    #[test]
    fn scale_picks_smaller_ratio() {
        // 1000x500 → 800x200: ratios 0.8 and 0.4
        assert_eq!(contain_scale((1000, 500), (800, 200)), 0.4);
    }

    #[test]
    fn scale_can_upscale() {
        assert_eq!(contain_scale((100, 100), (400, 200)), 2.0);
    }

    #[test]
    fn scaled_dims_matching_aspect_hits_target_exactly() {
        let scale = contain_scale((1000, 500), (400, 200));
        assert_eq!(scaled_dims((1000, 500), scale), (400, 200));
    }

    #[test]
    fn scaled_dims_mismatched_aspect_fits_within_target() {
        // Square into 1200x630: scale 0.63, both axes ≤ target
        let scale = contain_scale((1000, 1000), (1200, 630));
        let (w, h) = scaled_dims((1000, 1000), scale);
        assert!(w <= 1200 && h <= 630);
        assert_eq!(h, 630);
    }

    // =========================================================================
    // place_offset tests
    // =========================================================================

    #[test]
    fn offset_zero_when_sizes_match() {
        assert_eq!(place_offset(400, 400), 0);
    }

    #[test]
    fn offset_negative_when_content_overhangs() {
        // 600 content on 400 canvas → crop 100 off each side
        assert_eq!(place_offset(600, 400), -100);
    }

    #[test]
    fn offset_positive_when_content_falls_short() {
        // 630 content on 1200 canvas → 285 padding on the left
        assert_eq!(place_offset(630, 1200), 285);
    }

    #[test]
    fn offset_odd_difference_floors() {
        // (601 - 400) // 2 floors to 100, so the left crop is 100
        assert_eq!(place_offset(601, 400), -100);
        // padding side: (630 - 1201) // 2 floors to -286 → content at 286
        assert_eq!(place_offset(630, 1201), 286);
    }
}
