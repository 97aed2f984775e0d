//! # brandkit
//!
//! A brand-asset generator. Point it at a directory of source logos and it
//! emits every size variant, favicon, touch icon, and campaign QR code the
//! site references — deterministic filenames, one command.
//!
//! # Architecture: Two Independent Pipelines
//!
//! ```text
//! 1. Images   logos + size tables  →  generated/   (variants, favicons, touch icons)
//! 2. QR       campaign URL table   →  generated/   (plain + logo codes, raster + SVG)
//! ```
//!
//! The pipelines share no runtime state and run strictly sequentially. Each
//! source image is loaded once and released after all of its derived
//! variants are written; iterations are independent of each other.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Geometry math, RGBA transforms, and the encoding seam |
//! | [`emit`] | Variant emitter — drives the transform across the configured size tables |
//! | [`qr`] | Campaign QR pipeline — plain and logo-overlaid codes |
//! | [`config`] | `brandkit.toml` loading and the stock production tables |
//! | [`output`] | CLI output formatting — per-source display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Contain, Never Distort
//!
//! Every variant is produced by one geometry contract: scale uniformly by
//! `min(target_w/source_w, target_h/source_h)`, then center the result on a
//! canvas of exactly the target size, cropping overhang and padding
//! shortfall with transparency. The scale ratio always comes from the
//! source, so no output is ever stretched. A target may leave one axis
//! unspecified — that axis is derived from the source aspect ratio — but a
//! target constraining neither axis is rejected before any work starts.
//!
//! ## Pure-Rust Imaging
//!
//! All pixel work goes through the `image` crate (Lanczos3 resampling, PNG /
//! lossless WebP / multi-frame ICO encoders) and the `qrcode` crate for
//! matrix encoding and SVG rendering. No ImageMagick, no system libraries:
//! the binary is fully self-contained.
//!
//! ## Deterministic Filenames
//!
//! Output names follow fixed patterns (`{base}_{w}x{h}[_{bg}].{format}`,
//! `{base}_favicon_{w}x{h}.ico`, `{name}_qr.{format}`,
//! `{name}_qrlogo_bg_{bg}.{format}`) because the web front end references
//! them literally. Existing files are always overwritten; the generator is
//! the only writer of its output directory.
//!
//! ## Configuration as Data
//!
//! Which logos get which sizes, and which campaign URLs get codes, are
//! business constants — they live in [`config`] as stock defaults and can be
//! sparsely overridden by a `brandkit.toml`, never hardcoded at call sites.

pub mod config;
pub mod emit;
pub mod imaging;
pub mod output;
pub mod qr;
