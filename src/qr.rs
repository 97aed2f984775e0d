//! Campaign QR code generation.
//!
//! Each campaign URL (a base URL + target path + UTM query string) gets two
//! families of codes:
//!
//! - **Plain**: low-redundancy (`EcLevel::L`) black-on-white codes,
//!   `{name}_qr.{format}`.
//! - **Logo**: high-redundancy (`EcLevel::H`) codes with the brand logo
//!   alpha-composited at the center — the extra redundancy compensates for
//!   the modules the logo occludes. Emitted once over opaque white and once
//!   with the white background substituted to transparency,
//!   `{name}_qrlogo_bg_{bg}.{format}`.
//!
//! Raster variants are WebP and PNG; every family also gets one SVG from the
//! vector render path, which is always plain black-on-white (no logo, no
//! transparency — vector consumers restyle it themselves).
//!
//! Matrix encoding itself is delegated to the `qrcode` crate and is
//! deterministic: the same URL always yields the same matrix.

use crate::config::QrConfig;
use crate::imaging::{EncodeError, OutputFormat, VariantSink};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raster formats for QR output, in emission order.
const QR_RASTERS: [OutputFormat; 2] = [OutputFormat::Webp, OutputFormat::Png];

#[derive(Error, Debug)]
pub enum QrGenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("QR encoding failed for {url}: {source}")]
    Encode {
        url: String,
        source: qrcode::types::QrError,
    },
    #[error("failed to decode logo {path}: {source}")]
    Logo {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("encoding failed: {0}")]
    Sink(#[from] EncodeError),
}

/// Background treatment of a logo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrBackground {
    White,
    Transparent,
}

impl QrBackground {
    /// Filename tag. The transparent variant keeps the historical `None`
    /// tag that existing asset references point at.
    pub fn tag(self) -> &'static str {
        match self {
            QrBackground::White => "white",
            QrBackground::Transparent => "None",
        }
    }
}

/// One campaign code to generate: output basename plus the full tagged URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignJob {
    pub name: String,
    pub url: String,
}

/// Expand the configured targets × placements into concrete jobs.
///
/// Names follow `{placement}_to_{target}`; URLs carry the UTM query string
/// with source, medium, and the placement's campaign code, in that order.
pub fn campaign_jobs(config: &QrConfig) -> Vec<CampaignJob> {
    let mut jobs = Vec::new();
    for target in &config.targets {
        for placement in &config.placements {
            jobs.push(CampaignJob {
                name: format!("{}_to_{}", placement.name, target.name),
                url: format!(
                    "{}{}?utm_source={}&utm_medium={}&utm_campaign={}",
                    config.base_url,
                    target.path,
                    config.utm_source,
                    config.utm_medium,
                    placement.campaign
                ),
            });
        }
    }
    jobs
}

/// Substitute exact opaque-white pixels with fully transparent ones.
///
/// Only the three color channels are matched; alpha is ignored, so running
/// the pass twice is a no-op. Everything that is not exactly white — the
/// dark modules, any logo pixels — passes through unchanged.
pub fn white_to_transparent(image: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let p = *image.get_pixel(x, y);
        if p.0[..3] == [255, 255, 255] {
            Rgba([255, 255, 255, 0])
        } else {
            p
        }
    })
}

/// Resize the logo to a fixed width (aspect preserved) and alpha-composite
/// it at the center of the code.
pub fn overlay_logo(code_img: &RgbaImage, logo: &RgbaImage, logo_width: u32) -> RgbaImage {
    let scale = logo_width as f64 / logo.width() as f64;
    let logo_height = (logo.height() as f64 * scale) as u32;
    let scaled = imageops::resize(logo, logo_width, logo_height, FilterType::Lanczos3);

    let mut out = code_img.clone();
    let x = (out.width() as i64 - scaled.width() as i64) / 2;
    let y = (out.height() as i64 - scaled.height() as i64) / 2;
    imageops::overlay(&mut out, &scaled, x, y);
    out
}

fn encode(url: &str, level: EcLevel) -> Result<QrCode, QrGenError> {
    QrCode::with_error_correction_level(url, level).map_err(|e| QrGenError::Encode {
        url: url.to_string(),
        source: e,
    })
}

/// Render a matrix to RGBA, black modules on opaque white, with the
/// default 4-module quiet zone.
fn render_rgba(code: &QrCode, module_px: u32) -> RgbaImage {
    let luma = code
        .render::<image::Luma<u8>>()
        .module_dimensions(module_px, module_px)
        .build();
    DynamicImage::ImageLuma8(luma).to_rgba8()
}

fn render_svg(code: &QrCode, module_px: u32) -> String {
    code.render()
        .module_dimensions(module_px, module_px)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build()
}

/// Everything written (or skipped) for one run of the QR pipeline.
#[derive(Debug, Default)]
pub struct QrReport {
    pub codes: Vec<CodeReport>,
}

#[derive(Debug)]
pub struct CodeReport {
    pub name: String,
    pub url: String,
    pub files: Vec<String>,
    /// Filenames dropped because their format was unsupported by the sink.
    pub skipped: Vec<String>,
}

/// Generate every configured campaign code into `out_dir`.
///
/// A missing or undecodable logo is fatal; an unsupported raster format is
/// skipped per file and recorded in the report.
pub fn generate(
    sink: &impl VariantSink,
    config: &QrConfig,
    source_dir: &Path,
    out_dir: &Path,
) -> Result<QrReport, QrGenError> {
    std::fs::create_dir_all(out_dir)?;

    let logo_path = source_dir.join(&config.logo);
    let logo = image::open(&logo_path)
        .map_err(|e| QrGenError::Logo {
            path: logo_path,
            source: e,
        })?
        .to_rgba8();

    let mut report = QrReport::default();
    for job in campaign_jobs(config) {
        let mut entry = CodeReport {
            name: job.name.clone(),
            url: job.url.clone(),
            files: Vec::new(),
            skipped: Vec::new(),
        };

        // Logo codes: higher redundancy, larger modules
        let code = encode(&job.url, EcLevel::H)?;
        let rendered = render_rgba(&code, config.logo_module_px);
        for bg in [QrBackground::White, QrBackground::Transparent] {
            let based = match bg {
                QrBackground::White => rendered.clone(),
                QrBackground::Transparent => white_to_transparent(&rendered),
            };
            let composed = overlay_logo(&based, &logo, config.logo_width);
            for format in QR_RASTERS {
                let name = format!("{}_qrlogo_bg_{}.{}", job.name, bg.tag(), format.extension());
                write_or_skip(sink, &composed, out_dir, &name, format, &mut entry)?;
            }
            let svg_name = format!("{}_qrlogo_bg_{}.svg", job.name, bg.tag());
            sink.write_text(
                &render_svg(&code, config.logo_module_px),
                &out_dir.join(&svg_name),
            )?;
            entry.files.push(svg_name);
        }

        // Plain codes: lower redundancy, smaller modules
        let code = encode(&job.url, EcLevel::L)?;
        let plain = render_rgba(&code, config.plain_module_px);
        for format in QR_RASTERS {
            let name = format!("{}_qr.{}", job.name, format.extension());
            write_or_skip(sink, &plain, out_dir, &name, format, &mut entry)?;
        }
        let svg_name = format!("{}_qr.svg", job.name);
        sink.write_text(
            &render_svg(&code, config.plain_module_px),
            &out_dir.join(&svg_name),
        )?;
        entry.files.push(svg_name);

        report.codes.push(entry);
    }
    Ok(report)
}

fn write_or_skip(
    sink: &impl VariantSink,
    image: &RgbaImage,
    out_dir: &Path,
    name: &str,
    format: OutputFormat,
    entry: &mut CodeReport,
) -> Result<(), QrGenError> {
    match sink.write_image(image, &out_dir.join(name), format) {
        Ok(()) => {
            entry.files.push(name.to_string());
            Ok(())
        }
        Err(EncodeError::Unsupported(_)) => {
            entry.skipped.push(name.to_string());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
