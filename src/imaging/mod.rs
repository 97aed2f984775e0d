//! Image geometry and encoding — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Resolve / place math** | [`geometry`] (pure, no pixels) |
//! | **Resize** | `image::imageops::resize`, Lanczos3 |
//! | **Crop / pad / flatten** | [`transform`] over RGBA buffers |
//! | **Encode** | [`encode`] — PNG, lossless WebP, multi-frame ICO |
//!
//! The module is split into:
//! - **Geometry**: pure functions for dimension math (unit testable)
//! - **Transform**: in-memory operations producing new images
//! - **Encode**: the [`VariantSink`] seam between pipelines and the filesystem

mod encode;
mod geometry;
mod transform;

pub use encode::{EncodeError, FileSink, OutputFormat, VariantSink};
pub use geometry::{
    GeometryError, ResolvedTarget, TargetSize, contain_scale, place_offset, resolve, scaled_dims,
};
pub use transform::{fit_to_target, flatten_over};

// Re-exported for emitter and QR pipeline tests
#[cfg(test)]
pub use encode::tests::{MockSink, RecordedWrite};
