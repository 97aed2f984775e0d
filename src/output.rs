//! CLI output formatting for both pipelines.
//!
//! Output is information-centric: the header line for every entity is its
//! semantic identity (source logo, campaign code) with per-variant detail on
//! indented context lines. Skipped formats are always called out so a run
//! that silently dropped an output is visible in the log.
//!
//! # Output Format
//!
//! ```text
//! Images
//! logo.png (11 sizes)
//!     140x140: 6 files
//!     1200x630: 6 files
//!     favicons: logo_favicon_16x16.ico, logo_favicon_32x32.ico
//!     apple icons: 8
//!
//! QR codes
//! vetrina_to_home
//!     URL: https://www.glitch-vra.com?utm_source=g&utm_medium=qr&utm_campaign=v
//!     9 files
//! ```
//!
//! # Architecture
//!
//! Each pipeline has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::emit::EmitReport;
use crate::qr::QrReport;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format the variant emitter report.
pub fn format_emit_report(report: &EmitReport) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    for source in &report.sources {
        lines.push(format!("{} ({} sizes)", source.file, source.variants.len()));
        for variant in &source.variants {
            lines.push(format!(
                "{}{}x{}: {} files",
                indent(1),
                variant.width,
                variant.height,
                variant.files.len()
            ));
        }
        if !source.favicons.is_empty() {
            lines.push(format!(
                "{}favicons: {}",
                indent(1),
                source.favicons.join(", ")
            ));
        }
        if !source.apple_icons.is_empty() {
            lines.push(format!(
                "{}apple icons: {}",
                indent(1),
                source.apple_icons.len()
            ));
        }
        for name in &source.skipped {
            lines.push(format!("{}skipped (unsupported format): {}", indent(1), name));
        }
    }
    lines.push(format!("Generated {} files", report.total_files()));
    lines
}

pub fn print_emit_report(report: &EmitReport) {
    for line in format_emit_report(report) {
        println!("{line}");
    }
}

/// Format the QR pipeline report.
pub fn format_qr_report(report: &QrReport) -> Vec<String> {
    let mut lines = vec!["QR codes".to_string()];
    let mut total = 0;
    for code in &report.codes {
        lines.push(code.name.clone());
        lines.push(format!("{}URL: {}", indent(1), code.url));
        lines.push(format!("{}{} files", indent(1), code.files.len()));
        for name in &code.skipped {
            lines.push(format!("{}skipped (unsupported format): {}", indent(1), name));
        }
        total += code.files.len();
    }
    lines.push(format!("Generated {total} files"));
    lines
}

pub fn print_qr_report(report: &QrReport) {
    for line in format_qr_report(report) {
        println!("{line}");
    }
}
