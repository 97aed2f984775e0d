//! In-memory geometry transforms over RGBA buffers.
//!
//! Every function takes an image by reference and returns a new image (or a
//! borrow, for the identity case). Nothing here touches the filesystem; the
//! emitter decides what to write and where.

use super::geometry::{GeometryError, TargetSize, contain_scale, place_offset, resolve, scaled_dims};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::borrow::Cow;

/// Padding fill for axes the target did not constrain: white at zero alpha.
const PADDING: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Scale, center-crop, and/or pad `source` to exactly match `target`.
///
/// The scaling step always preserves the source aspect ratio; the resolved
/// target is reached by cropping overhang and padding shortfall, both
/// centered. When the resolved target equals the source size the source is
/// returned as-is, borrowed.
///
/// Errors when `target` constrains neither axis.
pub fn fit_to_target(
    source: &RgbaImage,
    target: TargetSize,
) -> Result<Cow<'_, RgbaImage>, GeometryError> {
    let resolved = resolve(target, source.dimensions())?;
    if resolved.dimensions() == source.dimensions() {
        return Ok(Cow::Borrowed(source));
    }

    let scale = contain_scale(source.dimensions(), resolved.dimensions());
    let (new_w, new_h) = scaled_dims(source.dimensions(), scale);
    let resized = imageops::resize(source, new_w, new_h, FilterType::Lanczos3);

    Ok(Cow::Owned(place_centered(
        &resized,
        resolved.width,
        resolved.height,
    )))
}

/// Place `content` centered on a transparent canvas of exactly
/// `width` x `height`. Axes where the content overhangs the canvas are
/// cropped; axes where it falls short are padded with [`PADDING`].
fn place_centered(content: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, PADDING);
    let x = place_offset(content.width(), width);
    let y = place_offset(content.height(), height);
    imageops::overlay(&mut canvas, content, x, y);
    canvas
}

/// Composite `image` over an opaque canvas of the given color.
///
/// The background shows through wherever the source is transparent. Used to
/// produce the flattened white/black variants for outputs that cannot carry
/// an alpha channel.
pub fn flatten_over(image: &RgbaImage, color: Rgba<u8>) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), color);
    imageops::overlay(&mut canvas, image, 0, 0);
    canvas
}
