//! The draw pipeline: photo, caption band, text columns, brand mark.
//!
//! Draw order is strict and every step is fully opaque over the previous:
//!
//! 1. source photo at the origin
//! 2. solid white caption band below it
//! 3. camera model — left column, bold, ink
//! 4. capture date — left column, book face, muted gray
//! 5. exposure line — right column, monospace, ink
//! 6. brand mark — centered, image marks scaled to the band, glyph marks
//!    drawn through the text path
//!
//! Anchors coming out of [`layout`](super::layout) are text *baselines* (the
//! canvas-2D convention the proportions were designed against); `imageproc`
//! positions text by the glyph-box top, so every draw converts baseline →
//! top through the face's ascent at the target size.
//!
//! [`compose`] is a pure function of its inputs. Re-running it on the same
//! photo and metadata yields a pixel-identical canvas; callers re-run it in
//! full whenever either input changes, because the band geometry depends on
//! both.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use super::fonts::FontSet;
use super::layout::caption_layout;
use crate::metadata::CameraInfo;

/// Default text ink (`#262626`).
const INK: Rgba<u8> = Rgba([0x26, 0x26, 0x26, 0xFF]);
/// Muted gray for the date line (`#666666`).
const MUTED: Rgba<u8> = Rgba([0x66, 0x66, 0x66, 0xFF]);
/// Caption band fill.
const BAND: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

/// Brand mark artwork, resolved and loaded by the caller so the compositor
/// stays free of I/O.
pub enum MarkArt {
    /// Decoded logo image, scaled to the band preserving aspect ratio.
    Image(RgbaImage),
    /// Single character drawn at the glyph anchor.
    Glyph(char),
}

/// Composite one photo and its metadata onto a fresh canvas.
pub fn compose(
    photo: &DynamicImage,
    info: &CameraInfo,
    mark: Option<&MarkArt>,
    fonts: &FontSet,
) -> RgbaImage {
    let layout = caption_layout(photo.width(), photo.height());
    let mut canvas = RgbaImage::new(layout.canvas_width, layout.canvas_height);

    imageops::overlay(&mut canvas, &photo.to_rgba8(), 0, 0);

    let band_px = layout.canvas_height - layout.image_height;
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, layout.image_height as i32).of_size(layout.canvas_width, band_px),
        BAND,
    );

    let left = layout.text_padding.round() as i32;
    draw_at_baseline(
        &mut canvas,
        &fonts.bold,
        layout.model_size as f32,
        left,
        layout.model_baseline,
        INK,
        &info.model,
    );
    draw_at_baseline(
        &mut canvas,
        &fonts.sans,
        layout.date_size as f32,
        left,
        layout.date_baseline,
        MUTED,
        &info.display_date(),
    );

    let line = info.info_line();
    let line_width = text_size(PxScale::from(layout.info_size as f32), &fonts.mono, &line).0;
    let right = (layout.canvas_width as f32 - layout.text_padding - line_width as f32).round() as i32;
    draw_at_baseline(
        &mut canvas,
        &fonts.mono,
        layout.info_size as f32,
        right,
        layout.info_baseline,
        INK,
        &line,
    );

    match mark {
        Some(MarkArt::Image(logo)) => {
            let logo_width = layout.logo_width(logo.width(), logo.height());
            if logo_width > 0.0 {
                let scaled = imageops::resize(
                    logo,
                    (logo_width.round() as u32).max(1),
                    (layout.logo_height.round() as u32).max(1),
                    FilterType::Lanczos3,
                );
                let x = (layout.canvas_width as f32 / 2.0 - logo_width / 2.0).round() as i64;
                imageops::overlay(&mut canvas, &scaled, x, layout.logo_top.round() as i64);
            }
        }
        Some(MarkArt::Glyph(ch)) => {
            let text = ch.to_string();
            let glyph_width =
                text_size(PxScale::from(layout.glyph_size), &fonts.sans, &text).0;
            let x = (layout.canvas_width as f32 / 2.0 - glyph_width as f32 / 2.0).round() as i32;
            draw_at_baseline(
                &mut canvas,
                &fonts.sans,
                layout.glyph_size,
                x,
                layout.glyph_baseline,
                INK,
                &text,
            );
        }
        None => {}
    }

    canvas
}

/// Draw text with its baseline (not its glyph-box top) at `baseline`.
fn draw_at_baseline(
    canvas: &mut RgbaImage,
    font: &FontRef<'static>,
    size: f32,
    x: i32,
    baseline: f32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = PxScale::from(size);
    let top = baseline - font.as_scaled(scale).ascent();
    draw_text_mut(canvas, color, x, top.round() as i32, scale, font, text);
}
