//! EXIF metadata extraction and field formatting.
//!
//! The extractor reads the EXIF block embedded in the normalized image bytes
//! and produces one [`CameraInfo`] per photo — the record that ends up
//! printed on the caption band.
//!
//! ## Field formatting rules
//!
//! | field | present | absent |
//! |---|---|---|
//! | `brand` / `model` | trimmed tag value | literal `"Unknown"` |
//! | `focal_length` | `"24mm"` | `None` |
//! | `aperture` | `"f/1.78"` | `None` |
//! | `shutter_speed` | `"1/250"` (reciprocal, rounded) | `None` |
//! | `iso` | `"ISO100"` | `None` |
//! | `date_time` | raw `DateTimeOriginal` | current local time |
//!
//! The `Option` fields distinguish *genuinely absent* from
//! *empty-by-formatting*: a missing tag is `None` here and renders as an
//! empty string on the band. Missing numeric tags are never errors.
//!
//! A photo with no parseable EXIF block at all yields no `CameraInfo`
//! ([`extract`] returns `None`) and the pipeline exports the image without a
//! caption band.
//!
//! ## Shutter speed
//!
//! Printed as reciprocal seconds: `1/round(1/t)`. An exposure time of zero
//! would divide by zero — that tag value is treated as absent rather than
//! rendered as infinity.

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use serde::Serialize;
use std::io::Cursor;

/// Fallback string for missing make/model tags.
const UNKNOWN: &str = "Unknown";

/// EXIF timestamp layout (`2024:01:15 10:30:00`).
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Camera metadata for one photo, formatted for the caption band.
///
/// Created once per successful extraction; the manual-mode CLI flags may
/// overwrite `brand` and `model` in place before compositing. Serialized
/// field names match the `inspect --json` output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    pub brand: String,
    pub model: String,
    pub focal_length: Option<String>,
    pub aperture: Option<String>,
    pub shutter_speed: Option<String>,
    pub iso: Option<String>,
    pub date_time: String,
}

impl CameraInfo {
    /// The right-aligned exposure line: focal length, aperture, shutter
    /// speed, and ISO joined by single spaces.
    ///
    /// Absent fields join as empty strings, so the line keeps its slot
    /// structure (including double spaces) instead of collapsing. Byte-level
    /// compatibility with the reference rendition wins over tidiness here.
    pub fn info_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.focal_length.as_deref().unwrap_or(""),
            self.aperture.as_deref().unwrap_or(""),
            self.shutter_speed.as_deref().unwrap_or(""),
            self.iso.as_deref().unwrap_or(""),
        )
    }

    /// Capture date formatted for the band: `2024/01/15 10:30`.
    ///
    /// Timestamps that don't parse as EXIF datetimes are shown verbatim —
    /// wrong-looking output beats dropping the line.
    pub fn display_date(&self) -> String {
        match NaiveDateTime::parse_from_str(&self.date_time, EXIF_DATETIME_FORMAT) {
            Ok(dt) => dt.format("%Y/%m/%d %H:%M").to_string(),
            Err(_) => self.date_time.clone(),
        }
    }
}

/// Parse the EXIF block out of image bytes and build a [`CameraInfo`].
///
/// Returns `None` when the bytes carry no parseable EXIF block — by
/// contract that skips compositing rather than raising an error.
pub fn extract(bytes: &[u8]) -> Option<CameraInfo> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new().read_from_container(&mut cursor).ok()?;
    Some(camera_info_from_exif(&exif))
}

fn camera_info_from_exif(exif: &exif::Exif) -> CameraInfo {
    CameraInfo {
        brand: string_field(exif, Tag::Make).unwrap_or_else(|| UNKNOWN.to_string()),
        model: string_field(exif, Tag::Model).unwrap_or_else(|| UNKNOWN.to_string()),
        focal_length: rational_field(exif, Tag::FocalLength).map(|mm| format!("{mm}mm")),
        aperture: rational_field(exif, Tag::FNumber).map(|f| format!("f/{f}")),
        shutter_speed: rational_field(exif, Tag::ExposureTime).and_then(format_shutter_speed),
        iso: uint_field(exif, Tag::PhotographicSensitivity).map(|iso| format!("ISO{iso}")),
        date_time: string_field(exif, Tag::DateTimeOriginal).unwrap_or_else(now_exif_datetime),
    }
}

/// Render an exposure time as a reciprocal-seconds fraction.
///
/// `t == 0` (and anything non-finite) is treated as an absent tag.
fn format_shutter_speed(t: f64) -> Option<String> {
    if t > 0.0 && t.is_finite() {
        Some(format!("1/{}", (1.0 / t).round() as u32))
    } else {
        None
    }
}

fn now_exif_datetime() -> String {
    chrono::Local::now().format(EXIF_DATETIME_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// EXIF field coercion
// ---------------------------------------------------------------------------

/// Read an ASCII tag as a trimmed string.
///
/// Goes through the raw bytes rather than `display_value()`, which wraps
/// ASCII values in quotes.
fn string_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(vecs) => vecs
            .first()
            .map(|v| String::from_utf8_lossy(v).trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

/// Read a rational tag as `f64`.
fn rational_field(exif: &exif::Exif, tag: Tag) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(v) => v.first().map(|r| r.to_f64()),
        _ => None,
    }
}

/// Read a short or long tag as `u32` (ISO is a short in practice, but EXIF
/// allows long).
fn uint_field(exif: &exif::Exif, tag: Tag) -> Option<u32> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Short(v) => v.first().map(|&n| u32::from(n)),
        Value::Long(v) => v.first().copied(),
        _ => None,
    }
}
