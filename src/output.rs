//! CLI output formatting for all pipeline results.
//!
//! Output is information-centric, not file-centric: the header line of every
//! report is the artifact's identity (output name and dimensions, or source
//! name for `inspect`) and everything else appears as indented context
//! lines. Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! watermarked-image.jpg (1000x1080)
//!     Source: IMG_0423.jpg
//!     Model: iPhone 15 Pro
//!     Date: 2024/01/15 10:30
//!     Exposure: 24mm f/1.78 1/250 ISO100
//!     Mark: Apple (image)
//! ```

use crate::brands::{BRAND_TABLE, Mark};
use crate::pipeline::{InspectReport, MarkOutcome};

const INDENT: &str = "    ";

/// Describe the mark a brand resolves to, for report lines.
fn mark_description(brand: &str) -> String {
    match crate::brands::resolve(brand) {
        Some(entry) => match entry.mark {
            Mark::Image { .. } => format!("{brand} (image)"),
            Mark::Glyph { .. } => format!("{brand} (glyph)"),
        },
        None => "none".to_string(),
    }
}

// ============================================================================
// mark
// ============================================================================

pub fn format_mark_report(outcome: &MarkOutcome) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} ({}x{})",
            outcome.output.display(),
            outcome.canvas_width,
            outcome.canvas_height
        ),
        format!("{INDENT}Source: {}", outcome.source_name),
    ];

    match &outcome.info {
        Some(info) => {
            lines.push(format!("{INDENT}Model: {}", info.model));
            lines.push(format!("{INDENT}Date: {}", info.display_date()));
            lines.push(format!("{INDENT}Exposure: {}", info.info_line()));
            lines.push(format!("{INDENT}Mark: {}", mark_description(&info.brand)));
        }
        None => {
            lines.push(format!(
                "{INDENT}No EXIF metadata found - exported without a caption band"
            ));
        }
    }

    if let Some(warning) = &outcome.mark_warning {
        lines.push(format!("{INDENT}Warning: {warning}"));
    }

    lines
}

pub fn print_mark_report(outcome: &MarkOutcome) {
    for line in format_mark_report(outcome) {
        println!("{line}");
    }
}

// ============================================================================
// inspect
// ============================================================================

pub fn format_inspect_report(report: &InspectReport) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({}x{})", report.file_name, report.width, report.height),
        format!(
            "{INDENT}Band: {}px -> canvas {}x{}",
            report.band_height, report.canvas_width, report.canvas_height
        ),
    ];

    if let Some(modified) = &report.modified {
        lines.push(format!("{INDENT}Modified: {modified}"));
    }

    match &report.camera_info {
        Some(info) => {
            lines.push(format!("{INDENT}Brand: {}", info.brand));
            lines.push(format!("{INDENT}Model: {}", info.model));
            lines.push(format!("{INDENT}Date: {}", info.display_date()));
            lines.push(format!("{INDENT}Exposure: {}", info.info_line()));
            lines.push(format!("{INDENT}Mark: {}", mark_description(&info.brand)));
        }
        None => {
            lines.push(format!("{INDENT}No EXIF metadata found"));
        }
    }

    lines
}

pub fn print_inspect_report(report: &InspectReport) {
    for line in format_inspect_report(report) {
        println!("{line}");
    }
}

// ============================================================================
// brands
// ============================================================================

pub fn format_brand_table() -> Vec<String> {
    let mut lines = vec!["Camera brands".to_string()];
    for (index, entry) in BRAND_TABLE.iter().enumerate() {
        let mark = match entry.mark {
            Mark::Image { asset } => format!("image: {asset}"),
            Mark::Glyph { ch } => format!("glyph: {ch}"),
        };
        lines.push(format!(
            "{:0>3} {:<20} {:<24} {}",
            index + 1,
            entry.name,
            mark,
            entry.style
        ));
    }
    lines
}

pub fn print_brand_table() {
    for line in format_brand_table() {
        println!("{line}");
    }
}
