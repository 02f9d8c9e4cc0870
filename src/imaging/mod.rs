//! Raster work — pure Rust, no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | **Band geometry** | [`layout`] (pure math, no I/O) |
//! | **Text** | `imageproc::drawing::draw_text_mut` + `ab_glyph`, bundled DejaVu faces |
//! | **Logo scaling** | `image::imageops::resize`, Lanczos3 |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Layout**: pure functions for caption-band geometry (unit testable)
//! - **Params**: encoding quality newtype shared by exporter and transcoder
//! - **Fonts**: the embedded typefaces used on the band
//! - **Compositor**: the draw pipeline that produces the finished canvas

pub mod compositor;
pub mod fonts;
pub mod layout;
mod params;

pub use compositor::{MarkArt, compose};
pub use fonts::{FontError, FontSet};
pub use layout::{CaptionLayout, caption_layout};
pub use params::Quality;
