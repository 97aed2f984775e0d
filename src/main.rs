use brandkit::imaging::FileSink;
use brandkit::{config, emit, output, qr};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // clap wants 'static; leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "brandkit")]
#[command(about = "Generate brand assets: logo variants, favicons, and campaign QR codes")]
#[command(long_about = "\
Generate brand assets: logo variants, favicons, and campaign QR codes

Point brandkit at a directory of source logos. The stock configuration
carries the full production tables; drop a sparse brandkit.toml next to the
logos to override them.

Source structure:

  assets/
  ├── brandkit.toml            # Optional sparse overrides
  ├── logo.png                 # Referenced by the size tables and QR overlay
  ├── logoG.png
  ├── logo-big.png
  └── notfound.png

Outputs (always overwritten, never de-duplicated):

  generated/
  ├── logo_140x140.png                     # Alpha-preserving variants
  ├── logo_140x140_white.webp              # Flattened compositions
  ├── logo_favicon_16x16.ico               # Multi-resolution containers
  ├── logo_apple_180x180.png               # Square touch icons
  ├── vetrina_to_home_qr.png               # Plain campaign codes (+ SVG)
  └── vetrina_to_home_qrlogo_bg_white.png  # Logo codes, white/transparent

Run 'brandkit gen-config' to print the documented stock brandkit.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing the source logos (and optional brandkit.toml)
    #[arg(long, default_value = "assets", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "generated", global = true)]
    output: PathBuf,

    /// Explicit config file (default: <source>/brandkit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate logo size variants, favicons, and touch icons
    Images,
    /// Generate campaign QR codes
    Qr,
    /// Run both pipelines: images, then QR codes
    Build,
    /// Print a stock brandkit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::load_or_default(&cli.source)?,
    };
    let sink = FileSink::new();

    match cli.command {
        Command::Images => {
            let report = emit::emit_variants(&sink, &config.assets, &cli.source, &cli.output)?;
            output::print_emit_report(&report);
        }
        Command::Qr => {
            let report = qr::generate(&sink, &config.qr, &cli.source, &cli.output)?;
            output::print_qr_report(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Image variants from {}", cli.source.display());
            let report = emit::emit_variants(&sink, &config.assets, &cli.source, &cli.output)?;
            output::print_emit_report(&report);

            println!("==> Stage 2: Campaign QR codes");
            let report = qr::generate(&sink, &config.qr, &cli.source, &cli.output)?;
            output::print_qr_report(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
