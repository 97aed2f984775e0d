//! Encoding seam between in-memory transforms and files on disk.
//!
//! The [`VariantSink`] trait is the boundary the emitter and the QR pipeline
//! write through. The production implementation is [`FileSink`] — `image`
//! crate encoders, everything statically linked:
//!
//! | Output | Encoder |
//! |---|---|
//! | PNG | `image::codecs::png::PngEncoder` |
//! | WebP (lossless) | `image::codecs::webp::WebPEncoder` |
//! | ICO (multi-resolution) | `image::codecs::ico::IcoEncoder` |
//! | SVG | plain text write (vector markup comes from the QR renderer) |
//!
//! Tests swap in a recording mock so pipeline logic can be exercised without
//! encoding a single pixel.

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Non-fatal by policy: callers skip the format and continue.
    #[error("unsupported output format: {0}")]
    Unsupported(String),
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Raster output formats the emitter can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Webp,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Destination for encoded assets.
///
/// One method per container kind. Implementations always overwrite; the
/// pipelines never de-duplicate or skip existing files.
pub trait VariantSink {
    /// Encode a single RGBA image in the given raster format.
    fn write_image(
        &self,
        image: &RgbaImage,
        path: &Path,
        format: OutputFormat,
    ) -> Result<(), EncodeError>;

    /// Encode a multi-resolution ICO container, one entry per frame.
    fn write_ico(&self, frames: &[RgbaImage], path: &Path) -> Result<(), EncodeError>;

    /// Write pre-rendered text markup (SVG) verbatim.
    fn write_text(&self, contents: &str, path: &Path) -> Result<(), EncodeError>;
}

/// Production sink writing real files through the `image` crate.
pub struct FileSink;

impl FileSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantSink for FileSink {
    fn write_image(
        &self,
        image: &RgbaImage,
        path: &Path,
        format: OutputFormat,
    ) -> Result<(), EncodeError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        let result = match format {
            OutputFormat::Png => image.write_with_encoder(PngEncoder::new(writer)),
            OutputFormat::Webp => image.write_with_encoder(WebPEncoder::new_lossless(writer)),
        };
        result.map_err(|e| EncodeError::Encoding(format!("{}: {}", path.display(), e)))
    }

    fn write_ico(&self, frames: &[RgbaImage], path: &Path) -> Result<(), EncodeError> {
        let encoded: Vec<IcoFrame<'_>> = frames
            .iter()
            .map(|frame| {
                IcoFrame::as_png(
                    frame.as_raw(),
                    frame.width(),
                    frame.height(),
                    ExtendedColorType::Rgba8,
                )
            })
            .collect::<Result<_, _>>()
            .map_err(|e| EncodeError::Encoding(format!("{}: {}", path.display(), e)))?;

        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        IcoEncoder::new(writer)
            .encode_images(&encoded)
            .map_err(|e| EncodeError::Encoding(format!("{}: {}", path.display(), e)))
    }

    fn write_text(&self, contents: &str, path: &Path) -> Result<(), EncodeError> {
        std::fs::write(path, contents)?;
        Ok(())
    }
}
