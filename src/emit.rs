//! Variant emission — drives the geometry transform across the configured
//! image jobs and writes every derived asset.
//!
//! For each `(source logo, size list)` job the emitter loads the source once,
//! then per size emits the alpha-preserving variant in every configured
//! raster format plus one flattened composition per background color. Every
//! source additionally gets the favicon `.ico` set and the square touch
//! icons.
//!
//! ## Output Structure
//!
//! ```text
//! generated/
//! ├── logo_140x140.png             # Alpha-preserving variants
//! ├── logo_140x140.webp
//! ├── logo_140x140_white.png       # Flattened compositions
//! ├── logo_140x140_black.png
//! ├── logo_favicon_16x16.ico       # Multi-resolution containers
//! ├── logo_favicon_48x48.ico
//! └── logo_apple_180x180.png       # Square touch icons, no compositing
//! ```
//!
//! Existing files are always overwritten; nothing is de-duplicated.

use crate::config::AssetConfig;
use crate::imaging::{
    EncodeError, GeometryError, OutputFormat, TargetSize, VariantSink, fit_to_target, flatten_over,
};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("invalid target size for {file}: {source}")]
    Geometry {
        file: String,
        source: GeometryError,
    },
    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Everything written (or skipped) for one run of the emitter.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub sources: Vec<SourceReport>,
}

impl EmitReport {
    /// Total number of files written across all sources.
    pub fn total_files(&self) -> usize {
        self.sources
            .iter()
            .map(|s| {
                s.variants.iter().map(|v| v.files.len()).sum::<usize>()
                    + s.favicons.len()
                    + s.apple_icons.len()
            })
            .sum()
    }
}

/// Per-source breakdown of emitted assets.
#[derive(Debug, Default)]
pub struct SourceReport {
    pub file: String,
    pub variants: Vec<VariantRecord>,
    pub favicons: Vec<String>,
    pub apple_icons: Vec<String>,
    /// Filenames dropped because their format was unsupported by the sink.
    pub skipped: Vec<String>,
}

/// One resolved size and the filenames emitted for it.
#[derive(Debug)]
pub struct VariantRecord {
    pub width: u32,
    pub height: u32,
    pub files: Vec<String>,
}

/// Run the variant emitter over every configured image job.
///
/// Creates `out_dir` if absent. A missing or undecodable source is fatal;
/// an unsupported output format is skipped and recorded in the report.
pub fn emit_variants(
    sink: &impl VariantSink,
    config: &AssetConfig,
    source_dir: &Path,
    out_dir: &Path,
) -> Result<EmitReport, EmitError> {
    std::fs::create_dir_all(out_dir)?;

    let mut report = EmitReport::default();
    for job in &config.images {
        let source_path = source_dir.join(&job.file);
        let source = image::open(&source_path)
            .map_err(|e| EmitError::Decode {
                path: source_path,
                source: e,
            })?
            .to_rgba8();

        let mut entry = SourceReport {
            file: job.file.clone(),
            ..SourceReport::default()
        };
        let base = stem(&job.file);

        for &size in &job.sizes {
            entry
                .variants
                .push(emit_size(sink, config, &source, &job.file, &base, size, out_dir, &mut entry.skipped)?);
        }
        entry.favicons = emit_favicons(sink, config, &source, &job.file, &base, out_dir)?;
        entry.apple_icons =
            emit_apple_icons(sink, config, &source, &job.file, &base, out_dir, &mut entry.skipped)?;

        report.sources.push(entry);
        // source buffer dropped here; nothing outlives its job
    }
    Ok(report)
}

/// Filename without its extension; falls back to the full name.
fn stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
        .to_string()
}

#[allow(clippy::too_many_arguments)]
fn emit_size(
    sink: &impl VariantSink,
    config: &AssetConfig,
    source: &RgbaImage,
    file: &str,
    base: &str,
    size: TargetSize,
    out_dir: &Path,
    skipped: &mut Vec<String>,
) -> Result<VariantRecord, EmitError> {
    let variant = fit_to_target(source, size).map_err(|e| EmitError::Geometry {
        file: file.to_string(),
        source: e,
    })?;
    let (w, h) = variant.dimensions();
    let mut record = VariantRecord {
        width: w,
        height: h,
        files: Vec::new(),
    };

    for &format in &config.formats {
        let name = format!("{base}_{w}x{h}.{}", format.extension());
        write_or_skip(sink, &variant, out_dir, &name, format, &mut record.files, skipped)?;
    }
    for &bg in &config.backgrounds {
        let flattened = flatten_over(&variant, bg.color());
        for &format in &config.formats {
            let name = format!("{base}_{w}x{h}_{}.{}", bg.tag(), format.extension());
            write_or_skip(sink, &flattened, out_dir, &name, format, &mut record.files, skipped)?;
        }
    }
    Ok(record)
}

/// One `.ico` per configured favicon size, each a multi-resolution container
/// holding every configured size whose square box fits within the icon on
/// both axes. When nothing passes that filter (a strongly non-square source
/// at the smallest sizes) the icon itself is kept as the sole frame, since
/// an entry-less container is not a valid file.
fn emit_favicons(
    sink: &impl VariantSink,
    config: &AssetConfig,
    source: &RgbaImage,
    file: &str,
    base: &str,
    out_dir: &Path,
) -> Result<Vec<String>, EmitError> {
    let geometry = |e| EmitError::Geometry {
        file: file.to_string(),
        source: e,
    };

    let mut written = Vec::new();
    for &size in &config.favicon_sizes {
        let icon = fit_to_target(source, TargetSize::width(size)).map_err(geometry)?;
        let (w, h) = icon.dimensions();

        let mut frames = Vec::new();
        for &frame_size in &config.favicon_sizes {
            if frame_size > w || frame_size > h {
                continue;
            }
            // fit within the square box: the longer axis is the binding one
            let frame_target = if h > w {
                TargetSize::height(frame_size)
            } else {
                TargetSize::width(frame_size)
            };
            frames.push(fit_to_target(&icon, frame_target).map_err(geometry)?.into_owned());
        }
        if frames.is_empty() {
            frames.push(icon.into_owned());
        }

        let name = format!("{base}_favicon_{w}x{h}.ico");
        sink.write_ico(&frames, &out_dir.join(&name))?;
        written.push(name);
    }
    Ok(written)
}

/// Square platform icons, emitted per raster format without compositing.
#[allow(clippy::too_many_arguments)]
fn emit_apple_icons(
    sink: &impl VariantSink,
    config: &AssetConfig,
    source: &RgbaImage,
    file: &str,
    base: &str,
    out_dir: &Path,
    skipped: &mut Vec<String>,
) -> Result<Vec<String>, EmitError> {
    let mut written = Vec::new();
    for &size in &config.apple_sizes {
        let icon =
            fit_to_target(source, TargetSize::exact(size, size)).map_err(|e| EmitError::Geometry {
                file: file.to_string(),
                source: e,
            })?;
        let (w, h) = icon.dimensions();
        for &format in &config.formats {
            let name = format!("{base}_apple_{w}x{h}.{}", format.extension());
            write_or_skip(sink, &icon, out_dir, &name, format, &mut written, skipped)?;
        }
    }
    Ok(written)
}

/// Write one file, treating an unsupported format as a recorded skip rather
/// than a failure.
fn write_or_skip(
    sink: &impl VariantSink,
    image: &RgbaImage,
    out_dir: &Path,
    name: &str,
    format: OutputFormat,
    written: &mut Vec<String>,
    skipped: &mut Vec<String>,
) -> Result<(), EmitError> {
    match sink.write_image(image, &out_dir.join(name), format) {
        Ok(()) => {
            written.push(name.to_string());
            Ok(())
        }
        Err(EncodeError::Unsupported(_)) => {
            skipped.push(name.to_string());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
