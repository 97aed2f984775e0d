//! End-to-end pipeline tests: real source files in, real encoded assets out.
//!
//! These use tiny synthetic logos so a full build stays fast while still
//! exercising decode → transform → encode → filesystem for every output
//! family.

use brandkit::config::{AssetConfig, Background, Config, ImageJob, QrConfig, QrPlacement, QrTarget};
use brandkit::imaging::{FileSink, OutputFormat, TargetSize};
use brandkit::{emit, qr};
use image::{Rgba, RgbaImage};
use std::path::Path;
use tempfile::TempDir;

/// A 64x32 logo: opaque blue with a transparent right half.
fn write_logo(dir: &Path, name: &str) {
    let img = RgbaImage::from_fn(64, 32, |x, _| {
        if x < 32 {
            Rgba([20, 40, 200, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    img.save(dir.join(name)).unwrap();
}

fn small_asset_config() -> AssetConfig {
    AssetConfig {
        images: vec![ImageJob {
            file: "logo.png".into(),
            sizes: vec![
                TargetSize::exact(32, 32),
                TargetSize::width(128),
                TargetSize::height(48),
            ],
        }],
        formats: vec![OutputFormat::Png, OutputFormat::Webp],
        backgrounds: vec![Background::White, Background::Black],
        favicon_sizes: vec![16, 32, 48],
        apple_sizes: vec![76],
    }
}

#[test]
fn image_pipeline_writes_every_expected_file() {
    let tmp = TempDir::new().unwrap();
    write_logo(tmp.path(), "logo.png");
    let out = tmp.path().join("generated");

    let report =
        emit::emit_variants(&FileSink::new(), &small_asset_config(), tmp.path(), &out).unwrap();

    // 3 sizes x (1 plain + 2 backgrounds) x 2 formats
    let expected = [
        "logo_32x32.png",
        "logo_32x32.webp",
        "logo_32x32_white.png",
        "logo_32x32_white.webp",
        "logo_32x32_black.png",
        "logo_32x32_black.webp",
        "logo_128x64.png",
        "logo_96x48.png",
        "logo_favicon_16x8.ico",
        "logo_favicon_32x16.ico",
        "logo_favicon_48x24.ico",
        "logo_apple_76x76.png",
        "logo_apple_76x76.webp",
    ];
    for name in expected {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    assert_eq!(report.total_files(), 18 + 3 + 2);
}

#[test]
fn emitted_variants_decode_to_their_stated_dimensions() {
    let tmp = TempDir::new().unwrap();
    write_logo(tmp.path(), "logo.png");
    let out = tmp.path().join("generated");

    emit::emit_variants(&FileSink::new(), &small_asset_config(), tmp.path(), &out).unwrap();

    // Derived axis: 2:1 source at width 128 → 128x64
    let wide = image::open(out.join("logo_128x64.png")).unwrap();
    assert_eq!((wide.width(), wide.height()), (128, 64));

    // Square crop/pad of a 2:1 source stays exactly 32x32
    let square = image::open(out.join("logo_32x32.png")).unwrap();
    assert_eq!((square.width(), square.height()), (32, 32));
}

#[test]
fn flattened_variants_have_no_transparency() {
    let tmp = TempDir::new().unwrap();
    write_logo(tmp.path(), "logo.png");
    let out = tmp.path().join("generated");

    emit::emit_variants(&FileSink::new(), &small_asset_config(), tmp.path(), &out).unwrap();

    let white = image::open(out.join("logo_32x32_white.png")).unwrap().to_rgba8();
    assert!(white.pixels().all(|p| p.0[3] == 255));

    let black = image::open(out.join("logo_32x32_black.png")).unwrap().to_rgba8();
    assert!(black.pixels().all(|p| p.0[3] == 255));

    // the alpha-preserving variant keeps its transparent region
    let plain = image::open(out.join("logo_32x32.png")).unwrap().to_rgba8();
    assert!(plain.pixels().any(|p| p.0[3] == 0));
}

fn small_qr_config() -> QrConfig {
    QrConfig {
        targets: vec![QrTarget {
            name: "home".into(),
            path: "".into(),
        }],
        placements: vec![QrPlacement {
            name: "vetrina".into(),
            campaign: "v".into(),
        }],
        ..QrConfig::default()
    }
}

#[test]
fn qr_pipeline_writes_raster_and_vector_files() {
    let tmp = TempDir::new().unwrap();
    write_logo(tmp.path(), "logo.png");
    let out = tmp.path().join("qr");

    let report = qr::generate(&FileSink::new(), &small_qr_config(), tmp.path(), &out).unwrap();
    assert_eq!(report.codes.len(), 1);

    for name in [
        "vetrina_to_home_qr.png",
        "vetrina_to_home_qr.webp",
        "vetrina_to_home_qr.svg",
        "vetrina_to_home_qrlogo_bg_white.png",
        "vetrina_to_home_qrlogo_bg_white.webp",
        "vetrina_to_home_qrlogo_bg_white.svg",
        "vetrina_to_home_qrlogo_bg_None.png",
        "vetrina_to_home_qrlogo_bg_None.webp",
        "vetrina_to_home_qrlogo_bg_None.svg",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }

    let svg = std::fs::read_to_string(out.join("vetrina_to_home_qr.svg")).unwrap();
    assert!(svg.contains("<svg") || svg.starts_with("<?xml"));
}

#[test]
fn transparent_qr_variant_really_is_transparent() {
    let tmp = TempDir::new().unwrap();
    write_logo(tmp.path(), "logo.png");
    let out = tmp.path().join("qr");

    qr::generate(&FileSink::new(), &small_qr_config(), tmp.path(), &out).unwrap();

    let transparent = image::open(out.join("vetrina_to_home_qrlogo_bg_None.png"))
        .unwrap()
        .to_rgba8();
    // quiet-zone corner was white → now alpha 0
    assert_eq!(transparent.get_pixel(0, 0).0[3], 0);
    // dark modules stay opaque
    assert!(transparent.pixels().any(|p| p.0 == [0, 0, 0, 255]));

    let white = image::open(out.join("vetrina_to_home_qrlogo_bg_white.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(white.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn qr_output_is_reproducible_across_runs() {
    let tmp = TempDir::new().unwrap();
    write_logo(tmp.path(), "logo.png");
    let out_a = tmp.path().join("a");
    let out_b = tmp.path().join("b");

    qr::generate(&FileSink::new(), &small_qr_config(), tmp.path(), &out_a).unwrap();
    qr::generate(&FileSink::new(), &small_qr_config(), tmp.path(), &out_b).unwrap();

    let a = std::fs::read(out_a.join("vetrina_to_home_qr.png")).unwrap();
    let b = std::fs::read(out_b.join("vetrina_to_home_qr.png")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn build_reruns_overwrite_existing_outputs() {
    let tmp = TempDir::new().unwrap();
    write_logo(tmp.path(), "logo.png");
    let out = tmp.path().join("generated");

    let config = small_asset_config();
    emit::emit_variants(&FileSink::new(), &config, tmp.path(), &out).unwrap();
    // second run must succeed and overwrite, not skip or fail
    emit::emit_variants(&FileSink::new(), &config, tmp.path(), &out).unwrap();
    assert!(out.join("logo_32x32.png").is_file());
}

#[test]
fn stock_config_drives_a_full_build_when_sources_exist() {
    let tmp = TempDir::new().unwrap();
    for name in ["logo.png", "logoG.png", "logo-big.png", "notfound.png"] {
        write_logo(tmp.path(), name);
    }
    let out = tmp.path().join("generated");

    let config = Config::default();
    let report = emit::emit_variants(&FileSink::new(), &config.assets, tmp.path(), &out).unwrap();
    assert_eq!(report.sources.len(), 4);
    // stock table: logo.png has 11 sizes
    assert_eq!(report.sources[0].variants.len(), 11);
    assert!(out.join("notfound_200x200.png").is_file());
}
