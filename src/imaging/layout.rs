//! Pure calculation of caption-band geometry.
//!
//! Everything on the band is a fixed fraction of the band height, and the
//! band height is a fixed fraction of the image height with a floor. These
//! proportions are design constants, not configuration: any two renditions
//! of the same photo must agree on them to be visually interchangeable.
//!
//! All functions here are pure and testable without any I/O or images.

/// Band height as a fraction of image height.
const BAND_FRACTION: f32 = 0.08;
/// Band height floor in pixels, so small images still get a readable band.
const BAND_MIN: f32 = 60.0;

const PADDING_FRACTION: f32 = 0.25;
const MODEL_SIZE_FRACTION: f32 = 0.32;
const DATE_SIZE_FRACTION: f32 = 0.22;
const INFO_SIZE_FRACTION: f32 = 0.25;

const MODEL_BASELINE_FRACTION: f32 = 0.40;
const DATE_BASELINE_FRACTION: f32 = 0.75;
const INFO_BASELINE_FRACTION: f32 = 0.58;

const GLYPH_SIZE_FRACTION: f32 = 0.40;
const GLYPH_BASELINE_FRACTION: f32 = 0.60;
const LOGO_HEIGHT_FRACTION: f32 = 0.45;
const LOGO_TOP_FRACTION: f32 = 0.28;

/// Caption-band geometry for one photo.
///
/// Baselines are measured from the canvas top (image top), not from the
/// band, so the compositor can use them directly as draw anchors. The
/// fractional band height is kept for anchor math; canvas dimensions are
/// whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionLayout {
    pub image_width: u32,
    pub image_height: u32,
    /// `max(0.08 * image_height, 60)`, always ≥ 60.
    pub band_height: f32,
    pub canvas_width: u32,
    /// `image_height + floor(band_height)`.
    pub canvas_height: u32,
    /// Left/right inset for the text columns.
    pub text_padding: f32,
    /// Font sizes in pixels, floored to integers.
    pub model_size: u32,
    pub date_size: u32,
    pub info_size: u32,
    /// Text baselines, from canvas top.
    pub model_baseline: f32,
    pub date_baseline: f32,
    pub info_baseline: f32,
    /// Glyph-kind mark: font size and baseline.
    pub glyph_size: f32,
    pub glyph_baseline: f32,
    /// Image-kind mark: target height and top edge.
    pub logo_height: f32,
    pub logo_top: f32,
}

impl CaptionLayout {
    /// Width for an image-kind mark scaled to [`Self::logo_height`],
    /// preserving the source aspect ratio.
    pub fn logo_width(&self, source_width: u32, source_height: u32) -> f32 {
        if source_height == 0 {
            return 0.0;
        }
        source_width as f32 / source_height as f32 * self.logo_height
    }
}

/// Compute the band geometry for an image of the given pixel dimensions.
pub fn caption_layout(image_width: u32, image_height: u32) -> CaptionLayout {
    let h = (image_height as f32 * BAND_FRACTION).max(BAND_MIN);
    let top = image_height as f32;

    CaptionLayout {
        image_width,
        image_height,
        band_height: h,
        canvas_width: image_width,
        canvas_height: image_height + h.floor() as u32,
        text_padding: h * PADDING_FRACTION,
        model_size: (h * MODEL_SIZE_FRACTION).floor() as u32,
        date_size: (h * DATE_SIZE_FRACTION).floor() as u32,
        info_size: (h * INFO_SIZE_FRACTION).floor() as u32,
        model_baseline: top + h * MODEL_BASELINE_FRACTION,
        date_baseline: top + h * DATE_BASELINE_FRACTION,
        info_baseline: top + h * INFO_BASELINE_FRACTION,
        glyph_size: h * GLYPH_SIZE_FRACTION,
        glyph_baseline: top + h * GLYPH_BASELINE_FRACTION,
        logo_height: h * LOGO_HEIGHT_FRACTION,
        logo_top: top + h * LOGO_TOP_FRACTION,
    }
}
