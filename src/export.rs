//! Stage 5 — serialize a finished canvas to a downloadable JPEG.

use crate::imaging::Quality;
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Fixed output filename when the caller doesn't override it.
pub const DEFAULT_OUTPUT_NAME: &str = "watermarked-image.jpg";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JPEG encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encode an RGBA canvas as JPEG bytes.
///
/// JPEG has no alpha channel; the canvas is flattened to RGB first. The
/// compositor only ever produces fully opaque pixels, so nothing is lost.
pub fn encode_jpeg(canvas: &RgbaImage, quality: Quality) -> Result<Vec<u8>, ExportError> {
    let rgb = DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.value() as u8);
    rgb.write_with_encoder(encoder)?;
    Ok(buf.into_inner())
}

/// Encode and write a canvas to disk.
pub fn write_jpeg(canvas: &RgbaImage, path: &Path, quality: Quality) -> Result<(), ExportError> {
    let bytes = encode_jpeg(canvas, quality)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
