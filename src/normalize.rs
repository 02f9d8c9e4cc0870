//! Format normalization — stage 1 of the pipeline.
//!
//! Downstream decoding handles JPEG, PNG, TIFF, and WebP directly. The one
//! container that needs help is HEIC/HEIF: the default iPhone capture format
//! with no pure-Rust decoder. The normalizer detects it (by extension or by
//! sniffing the `ftyp` box) and transcodes it to a JPEG byte stream at
//! quality 90, renaming the logical filename to `.jpg` and keeping the
//! original modification timestamp. Everything else passes through
//! byte-for-byte.
//!
//! Transcoding drops the container, so the EXIF payload the HEIC carried is
//! re-embedded into the output JPEG as an APP1 segment — the metadata
//! extractor only ever sees normalized bytes and must still find it there.
//!
//! HEVC decoding binds the system `libheif` library and lives behind the
//! `heif` cargo feature. Without the feature a HEIC input fails fast with a
//! distinct error; undecodable bytes never continue down the pipeline.

use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HEIC conversion failed: {0}")]
    HeifTranscode(String),
    #[error("HEIC input needs the `heif` cargo feature (system libheif)")]
    HeifSupportDisabled,
}

/// One logical upload: the bytes of a user-selected file plus the identity
/// that travels with them through the pipeline.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Logical filename. Rewritten to `.jpg` when the bytes are transcoded.
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Source file modification time, preserved across transcoding.
    pub modified: Option<SystemTime>,
}

/// Read a file from disk into an [`Upload`].
pub fn read_upload(path: &Path) -> Result<Upload, NormalizeError> {
    let bytes = std::fs::read(path)?;
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Upload {
        file_name,
        bytes,
        modified,
    })
}

/// Normalize an upload: HEIC/HEIF is transcoded to JPEG, anything else is
/// returned unchanged.
pub fn normalize(upload: Upload) -> Result<Upload, NormalizeError> {
    if !is_heif(&upload) {
        return Ok(upload);
    }
    let jpeg = transcode_heif(&upload.bytes)?;
    Ok(Upload {
        file_name: rename_to_jpg(&upload.file_name),
        bytes: jpeg,
        modified: upload.modified,
    })
}

/// HEIC detection: filename extension first, container sniff second.
///
/// The sniff catches misnamed files; the extension catches truncated ones.
fn is_heif(upload: &Upload) -> bool {
    has_heif_extension(&upload.file_name) || sniff_heif(&upload.bytes)
}

fn has_heif_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".heic") || lower.ends_with(".heif")
}

/// `ftyp` major brands that identify a HEIF-family container.
const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1",
];

/// Check for an ISO-BMFF `ftyp` box with a HEIF major brand.
fn sniff_heif(bytes: &[u8]) -> bool {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return false;
    }
    let major = &bytes[8..12];
    HEIF_BRANDS.iter().any(|b| major == b.as_slice())
}

/// Rewrite the logical filename extension to `.jpg`.
fn rename_to_jpg(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) => format!("{}.jpg", &name[..dot]),
        None => format!("{name}.jpg"),
    }
}

/// Transcoded HEIC output quality, matching the exporter's JPEG quality.
#[cfg(feature = "heif")]
const TRANSCODE_QUALITY: u8 = 90;

/// Decode a HEIC container with libheif and re-encode as JPEG, carrying the
/// EXIF payload over into an APP1 segment.
#[cfg(feature = "heif")]
fn transcode_heif(bytes: &[u8]) -> Result<Vec<u8>, NormalizeError> {
    use image::ImageEncoder;
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let err = |e: &dyn std::fmt::Display| NormalizeError::HeifTranscode(e.to_string());

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(bytes).map_err(|e| err(&e))?;
    let handle = ctx.primary_image_handle().map_err(|e| err(&e))?;
    let exif_tiff = heif_exif_payload(&handle);

    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| err(&e))?;
    let width = decoded.width();
    let height = decoded.height();
    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| NormalizeError::HeifTranscode("no interleaved RGB plane".into()))?;

    // Rows may be padded to the stride; repack tightly for the encoder.
    let stride = plane.stride;
    let row_bytes = width as usize * 3;
    let mut rgb = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        rgb.extend_from_slice(&plane.data[start..start + row_bytes]);
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, TRANSCODE_QUALITY)
        .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| err(&e))?;
    let jpeg = buf.into_inner();

    Ok(match exif_tiff {
        Some(tiff) => embed_exif_app1(&jpeg, &tiff).unwrap_or(jpeg),
        None => jpeg,
    })
}

#[cfg(not(feature = "heif"))]
fn transcode_heif(_bytes: &[u8]) -> Result<Vec<u8>, NormalizeError> {
    Err(NormalizeError::HeifSupportDisabled)
}

/// Pull the raw EXIF TIFF bytes out of a HEIF image handle.
///
/// HEIF stores the Exif item as a 4-byte big-endian offset to the TIFF
/// header, then the payload (which may itself start with `Exif\0\0`).
#[cfg(feature = "heif")]
fn heif_exif_payload(handle: &libheif_rs::ImageHandle) -> Option<Vec<u8>> {
    let meta = handle
        .all_metadata()
        .into_iter()
        .find(|m| m.item_type == "Exif")?;
    let raw = meta.raw_data;
    if raw.len() < 4 {
        return None;
    }
    let offset = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
    let body = raw.get(4 + offset..)?;
    let body = body.strip_prefix(b"Exif\0\0").unwrap_or(body);
    (body.len() >= 8).then(|| body.to_vec())
}

// ---------------------------------------------------------------------------
// JPEG APP1 embedding
// ---------------------------------------------------------------------------

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP1: [u8; 2] = [0xFF, 0xE1];
const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// Largest EXIF TIFF payload that fits one APP1 segment (u16 length field
/// covers itself plus the `Exif\0\0` header).
const MAX_APP1_PAYLOAD: usize = u16::MAX as usize - 2 - EXIF_HEADER.len();

/// Insert an EXIF TIFF block into a JPEG as an APP1 segment directly after
/// SOI.
///
/// Returns `None` when the input isn't a JPEG or the payload exceeds the
/// one-segment limit — callers then keep the unannotated JPEG rather than
/// producing a corrupt file.
pub fn embed_exif_app1(jpeg: &[u8], exif_tiff: &[u8]) -> Option<Vec<u8>> {
    if jpeg.len() < 2 || jpeg[0..2] != SOI || exif_tiff.len() > MAX_APP1_PAYLOAD {
        return None;
    }
    let seg_len = (exif_tiff.len() + EXIF_HEADER.len() + 2) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + exif_tiff.len() + 10);
    out.extend_from_slice(&SOI);
    out.extend_from_slice(&APP1);
    out.extend_from_slice(&seg_len.to_be_bytes());
    out.extend_from_slice(EXIF_HEADER);
    out.extend_from_slice(exif_tiff);
    out.extend_from_slice(&jpeg[2..]);
    Some(out)
}
