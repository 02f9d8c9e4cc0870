//! Pipeline orchestration: one upload in, one JPEG out.
//!
//! Each invocation is an independent run that owns every piece of state it
//! touches — the upload bytes, the `CameraInfo`, the canvas. Nothing is
//! shared across runs, so the stale-callback hazards of a long-lived UI
//! simply don't exist here; determinism falls out of the structure.
//!
//! Error policy (the whole taxonomy):
//!
//! - HEIC transcode failure and undecodable bytes abort the run with an
//!   error; the CLI boundary collapses them into one generic user-facing
//!   message while the specific cause stays in the error chain.
//! - Missing metadata *fields* are not errors — they print as gaps.
//! - A photo with no EXIF block at all is exported without a caption band.
//! - An unknown brand, or a known brand with no logo file on disk, composes
//!   without a mark; the latter also surfaces a warning line.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Serialize;
use thiserror::Error;

use crate::brands::{self, Mark};
use crate::config::MarkConfig;
use crate::export::{self, ExportError};
use crate::imaging::{FontError, FontSet, MarkArt, Quality, caption_layout, compose};
use crate::metadata::{self, CameraInfo};
use crate::normalize::{self, NormalizeError, Upload};

/// The one-line guidance shown for any upload the pipeline can't use.
pub const USER_HINT: &str = "Could not process the photo. Please use a JPG or PNG image.";

#[derive(Error, Debug)]
pub enum MarkError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        source: image::ImageError,
    },
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Per-run options from the CLI.
///
/// `brand`/`model` are the manual mode of the original tool: when set, they
/// overwrite the extracted fields before layout. They apply only when an
/// EXIF block produced a `CameraInfo` to edit.
#[derive(Debug, Clone, Default)]
pub struct MarkOptions {
    pub output: Option<PathBuf>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

/// What a `mark` run produced, for display.
#[derive(Debug)]
pub struct MarkOutcome {
    /// Logical source filename after normalization (`.heic` → `.jpg`).
    pub source_name: String,
    pub output: PathBuf,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// `None` means the photo had no EXIF block and shipped without a band.
    pub info: Option<CameraInfo>,
    pub mark_warning: Option<String>,
}

impl MarkOutcome {
    pub fn watermarked(&self) -> bool {
        self.info.is_some()
    }
}

/// Run the full pipeline on one photo.
pub fn run_mark(
    input: &Path,
    config: &MarkConfig,
    opts: &MarkOptions,
) -> Result<MarkOutcome, MarkError> {
    let upload = normalize::normalize(normalize::read_upload(input)?)?;
    let photo = decode(&upload)?;
    let mut info = metadata::extract(&upload.bytes);

    if let Some(info) = info.as_mut() {
        if let Some(brand) = &opts.brand {
            info.brand = brand.clone();
        }
        if let Some(model) = &opts.model {
            info.model = model.clone();
        }
    }

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.filename));
    let quality = Quality::new(config.output.quality);

    let Some(info) = info else {
        // No EXIF block: the photo ships unwatermarked at its own size.
        export::write_jpeg(&photo.to_rgba8(), &output, quality)?;
        return Ok(MarkOutcome {
            source_name: upload.file_name,
            output,
            canvas_width: photo.width(),
            canvas_height: photo.height(),
            info: None,
            mark_warning: None,
        });
    };

    let (mark, mark_warning) = load_mark(&info.brand, &config.logos.dir);
    let fonts = FontSet::bundled()?;
    let canvas = compose(&photo, &info, mark.as_ref(), &fonts);
    export::write_jpeg(&canvas, &output, quality)?;

    Ok(MarkOutcome {
        source_name: upload.file_name,
        output,
        canvas_width: canvas.width(),
        canvas_height: canvas.height(),
        info: Some(info),
        mark_warning,
    })
}

/// Metadata report for `photomark inspect`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub band_height: f32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Source file modification time; transcoding preserves the original's.
    pub modified: Option<String>,
    pub camera_info: Option<CameraInfo>,
}

/// Normalize and extract, stopping before any drawing.
pub fn run_inspect(input: &Path) -> Result<InspectReport, MarkError> {
    let upload = normalize::normalize(normalize::read_upload(input)?)?;
    let photo = decode(&upload)?;
    let layout = caption_layout(photo.width(), photo.height());

    Ok(InspectReport {
        file_name: upload.file_name,
        width: photo.width(),
        height: photo.height(),
        band_height: layout.band_height,
        canvas_width: layout.canvas_width,
        canvas_height: layout.canvas_height,
        modified: upload.modified.map(|t| {
            chrono::DateTime::<chrono::Local>::from(t)
                .format("%Y/%m/%d %H:%M")
                .to_string()
        }),
        camera_info: metadata::extract(&upload.bytes),
    })
}

fn decode(upload: &Upload) -> Result<DynamicImage, MarkError> {
    image::load_from_memory(&upload.bytes).map_err(|source| MarkError::Decode {
        name: upload.file_name.clone(),
        source,
    })
}

/// Resolve a brand string to loaded mark artwork.
///
/// Image-kind marks read their PNG from the logo directory here so the
/// compositor stays I/O-free. An unknown brand is silent; a known brand
/// whose file is missing or unreadable returns a warning alongside "no
/// mark".
fn load_mark(brand: &str, logo_dir: &Path) -> (Option<MarkArt>, Option<String>) {
    match brands::resolve(brand).map(|entry| entry.mark) {
        None => (None, None),
        Some(Mark::Glyph { ch }) => (Some(MarkArt::Glyph(ch)), None),
        Some(Mark::Image { asset }) => {
            let path = logo_dir.join(asset);
            match image::open(&path) {
                Ok(logo) => (Some(MarkArt::Image(logo.to_rgba8())), None),
                Err(_) => (
                    None,
                    Some(format!(
                        "no logo at {}; composing without a mark",
                        path.display()
                    )),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn unknown_brand_resolves_to_no_mark_silently() {
        let (mark, warning) = load_mark("Samsung", Path::new("logos"));
        assert!(mark.is_none());
        assert!(warning.is_none());
    }

    #[test]
    fn glyph_brand_needs_no_asset() {
        let (mark, warning) = load_mark("DJI", Path::new("/nonexistent"));
        assert!(matches!(mark, Some(MarkArt::Glyph('🚁'))));
        assert!(warning.is_none());
    }

    #[test]
    fn image_brand_with_missing_asset_warns() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (mark, warning) = load_mark("Apple", tmp.path());
        assert!(mark.is_none());
        let warning = warning.unwrap();
        assert!(warning.contains("apple.png"), "{warning}");
    }

    #[test]
    fn image_brand_loads_asset_from_logo_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let logo = RgbaImage::from_pixel(8, 4, Rgba([255, 0, 0, 255]));
        logo.save(tmp.path().join("apple.png")).unwrap();

        let (mark, warning) = load_mark("Apple", tmp.path());
        assert!(matches!(mark, Some(MarkArt::Image(_))));
        assert!(warning.is_none());
    }
}
