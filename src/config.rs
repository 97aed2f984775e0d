//! Asset configuration module.
//!
//! The two pipelines are driven entirely by explicit configuration passed
//! into their entry points — there is no module-level state. Stock defaults
//! carry the full production tables (which logos get which sizes, and which
//! campaign URLs get QR codes); a sparse `brandkit.toml` in the source
//! directory overrides just the values it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown in `brandkit gen-config`
//!
//! [assets]
//! formats = ["png", "webp"]       # Raster formats for every variant
//! backgrounds = ["white", "black"] # Flattened compositions to emit
//! favicon_sizes = [16, 32, 48]    # Multi-resolution .ico entries
//! apple_sizes = [180, 152, 120, 76] # Square touch-icon sizes
//!
//! [[assets.images]]
//! file = "logo.png"
//! # Omit an axis to derive it from the source aspect ratio.
//! sizes = [{ width = 16, height = 16 }, { height = 630 }, { width = 1200 }]
//!
//! [qr]
//! base_url = "https://www.glitch-vra.com"
//! logo = "logo.png"               # Overlaid at the center of logo codes
//! logo_width = 300                # Logo resized to this width, aspect kept
//! plain_module_px = 10            # Module size for plain codes
//! logo_module_px = 20             # Module size for logo codes
//! utm_source = "g"
//! utm_medium = "qr"
//!
//! [[qr.targets]]
//! name = "home"
//! path = ""
//!
//! [[qr.placements]]
//! name = "vetrina"
//! campaign = "v"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{OutputFormat, TargetSize};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration for both pipelines.
///
/// All fields have production defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logo variant / favicon / touch icon generation.
    pub assets: AssetConfig,
    /// Campaign QR code generation.
    pub qr: QrConfig,
}

impl Config {
    /// Load a config file, falling back to stock defaults when `dir` has no
    /// `brandkit.toml`.
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("brandkit.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values before any pipeline work starts.
    ///
    /// In particular, a target size constraining neither axis is rejected
    /// here — the same precondition the transform enforces — so a bad table
    /// fails before a single file is written.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.formats.is_empty() {
            return Err(ConfigError::Validation(
                "assets.formats must not be empty".into(),
            ));
        }
        for job in &self.assets.images {
            if job.sizes.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "assets.images entry '{}' has no sizes",
                    job.file
                )));
            }
            for size in &job.sizes {
                if !size.is_constrained() {
                    return Err(ConfigError::Validation(format!(
                        "assets.images entry '{}' has a size with neither width nor height",
                        job.file
                    )));
                }
            }
        }
        if self.assets.favicon_sizes.iter().any(|&s| s == 0)
            || self.assets.apple_sizes.iter().any(|&s| s == 0)
        {
            return Err(ConfigError::Validation(
                "favicon and apple icon sizes must be non-zero".into(),
            ));
        }
        if self.qr.logo_width == 0 {
            return Err(ConfigError::Validation("qr.logo_width must be > 0".into()));
        }
        if self.qr.plain_module_px == 0 || self.qr.logo_module_px == 0 {
            return Err(ConfigError::Validation(
                "qr module sizes must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// One source logo and the variant sizes to emit for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageJob {
    /// Source filename, relative to the source directory.
    pub file: String,
    pub sizes: Vec<TargetSize>,
}

/// Named background color used to flatten transparent variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    White,
    Black,
}

impl Background {
    pub fn color(self) -> Rgba<u8> {
        match self {
            Background::White => Rgba([255, 255, 255, 255]),
            Background::Black => Rgba([0, 0, 0, 255]),
        }
    }

    /// Filename tag for the flattened variant.
    pub fn tag(self) -> &'static str {
        match self {
            Background::White => "white",
            Background::Black => "black",
        }
    }
}

/// Variant emitter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    pub formats: Vec<OutputFormat>,
    pub backgrounds: Vec<Background>,
    pub favicon_sizes: Vec<u32>,
    pub apple_sizes: Vec<u32>,
    /// Kept last so the serialized stock config lists scalar options before
    /// the per-image tables.
    pub images: Vec<ImageJob>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        let exact = TargetSize::exact;
        Self {
            formats: vec![OutputFormat::Png, OutputFormat::Webp],
            backgrounds: vec![Background::White, Background::Black],
            favicon_sizes: vec![16, 32, 48],
            apple_sizes: vec![180, 152, 120, 76],
            images: vec![
                ImageJob {
                    file: "logo.png".into(),
                    sizes: vec![
                        exact(16, 16),
                        exact(32, 32),
                        exact(140, 140),
                        exact(400, 400),
                        exact(192, 192),
                        exact(512, 512),
                        TargetSize::height(630),
                        TargetSize::height(200),
                        TargetSize::width(1200),
                        exact(800, 200),
                        exact(1200, 630),
                    ],
                },
                ImageJob {
                    file: "logoG.png".into(),
                    sizes: [16, 32, 140, 400, 192, 512]
                        .into_iter()
                        .map(TargetSize::width)
                        .collect(),
                },
                ImageJob {
                    file: "logo-big.png".into(),
                    sizes: vec![
                        TargetSize::width(480),
                        TargetSize::width(800),
                        TargetSize::height(630),
                        TargetSize::height(200),
                        TargetSize::width(1200),
                    ],
                },
                ImageJob {
                    file: "notfound.png".into(),
                    sizes: vec![exact(200, 200), exact(400, 400)],
                },
            ],
        }
    }
}

/// One QR destination under the base URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QrTarget {
    pub name: String,
    /// Path appended to `base_url`, empty for the root.
    pub path: String,
}

/// Physical placement a code is printed on; its campaign code lands in
/// `utm_campaign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QrPlacement {
    pub name: String,
    pub campaign: String,
}

/// QR pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrConfig {
    pub base_url: String,
    /// Logo overlaid on the high-redundancy codes, relative to the source dir.
    pub logo: String,
    pub logo_width: u32,
    pub plain_module_px: u32,
    pub logo_module_px: u32,
    pub utm_source: String,
    pub utm_medium: String,
    pub targets: Vec<QrTarget>,
    pub placements: Vec<QrPlacement>,
}

impl Default for QrConfig {
    fn default() -> Self {
        let target = |name: &str, path: &str| QrTarget {
            name: name.into(),
            path: path.into(),
        };
        let placement = |name: &str, campaign: &str| QrPlacement {
            name: name.into(),
            campaign: campaign.into(),
        };
        Self {
            base_url: "https://www.glitch-vra.com".into(),
            logo: "logo.png".into(),
            logo_width: 300,
            plain_module_px: 10,
            logo_module_px: 20,
            utm_source: "g".into(),
            utm_medium: "qr".into(),
            targets: vec![
                target("home", ""),
                target("events", "/events"),
                target("book", "/book"),
            ],
            placements: vec![
                placement("vetrina", "v"),
                placement("biglietto_da_visita", "b"),
                placement("locandina", "l"),
                placement("locandina_jungleparty2025", "ljp25"),
            ],
        }
    }
}

/// A documented stock config, suitable for `brandkit gen-config > brandkit.toml`.
pub fn stock_config_toml() -> String {
    let stock = Config::default();
    let body = toml::to_string_pretty(&stock).expect("stock config serializes");
    format!(
        "# brandkit configuration — stock defaults.\n\
         # Every key is optional; a sparse file overrides only what it names.\n\
         # Omit width or height in a size entry to derive it from the source\n\
         # aspect ratio. A size must constrain at least one axis.\n\n{body}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_tables_match_production_values() {
        let config = Config::default();
        assert_eq!(config.assets.images.len(), 4);
        assert_eq!(config.assets.images[0].file, "logo.png");
        assert_eq!(config.assets.images[0].sizes.len(), 11);
        assert_eq!(config.assets.favicon_sizes, vec![16, 32, 48]);
        assert_eq!(config.assets.apple_sizes, vec![180, 152, 120, 76]);
        assert_eq!(config.qr.targets.len(), 3);
        assert_eq!(config.qr.placements.len(), 4);
        assert_eq!(config.qr.placements[3].campaign, "ljp25");
    }

    #[test]
    fn stock_toml_round_trips_to_defaults() {
        let parsed: Config = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[qr]
base_url = "https://example.org"
"#,
        )
        .unwrap();
        assert_eq!(config.qr.base_url, "https://example.org");
        // untouched sections keep stock values
        assert_eq!(config.qr.logo_width, 300);
        assert_eq!(config.assets.favicon_sizes, vec![16, 32, 48]);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
[assets]
formatz = ["png"]
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unconstrained_size_rejected_by_validate() {
        let mut config = Config::default();
        config.assets.images[0].sizes.push(TargetSize {
            width: None,
            height: None,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("neither width nor height"));
    }

    #[test]
    fn empty_formats_rejected() {
        let mut config = Config::default();
        config.assets.formats.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_without_file_uses_stock() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_validates_file_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brandkit.toml");
        std::fs::write(
            &path,
            r#"
[[assets.images]]
file = "logo.png"
sizes = [{}]
"#,
        )
        .unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn background_colors_and_tags() {
        assert_eq!(Background::White.color().0, [255, 255, 255, 255]);
        assert_eq!(Background::Black.color().0, [0, 0, 0, 255]);
        assert_eq!(Background::White.tag(), "white");
        assert_eq!(Background::Black.tag(), "black");
    }
}
