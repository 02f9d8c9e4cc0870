//! # Photomark
//!
//! A command-line tool that stamps EXIF camera metadata watermarks onto
//! photos. Feed it one photograph and it appends a white caption band below
//! the image carrying the camera model, capture date, exposure parameters,
//! and the manufacturer's mark, then writes the result as a JPEG.
//!
//! # Architecture: Single-Shot Pipeline
//!
//! Every invocation is one independent, idempotent run through a linear
//! pipeline. No stage retains state across runs:
//!
//! ```text
//! 1. Normalize   raw file      →  browser-decodable bytes (HEIC → JPEG)
//! 2. Extract     image bytes   →  CameraInfo (EXIF make/model/exposure)
//! 3. Layout      dimensions    →  caption band geometry (pure math)
//! 4. Compose     photo + info  →  RGBA canvas with band, text, brand mark
//! 5. Export      canvas        →  watermarked-image.jpg
//! ```
//!
//! The separation exists for the same reasons the stages are separate at all:
//!
//! - **Testability**: layout and metadata formatting are pure functions,
//!   exercised without touching a canvas or the filesystem.
//! - **Debuggability**: `photomark inspect` stops the pipeline after stage 2
//!   and shows exactly what would be printed on the band.
//! - **Fidelity**: the band proportions are fixed design constants; keeping
//!   them in one module makes the compatibility contract auditable.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`normalize`] | Stage 1 — format sniffing and HEIC → JPEG transcoding |
//! | [`metadata`] | Stage 2 — EXIF parsing into a [`metadata::CameraInfo`] |
//! | [`imaging`] | Stages 3–4 — band geometry, fonts, and the compositor |
//! | [`brands`] | Static manufacturer table: visual mark + style tag |
//! | [`export`] | Stage 5 — JPEG encoding of the finished canvas |
//! | [`pipeline`] | Orchestration of the stages plus the error rollup |
//! | [`config`] | Optional `photomark.toml` loading and validation |
//! | [`output`] | CLI output formatting — report display of pipeline results |
//!
//! # Design Decisions
//!
//! ## JPEG-Only Output
//!
//! The composited image is always encoded as JPEG at quality 90. A caption
//! band full of anti-aliased text survives JPEG fine, every viewer on earth
//! opens it, and a single output format keeps the export stage a one-liner.
//!
//! ## Pure-Rust Imaging, One Gated Exception
//!
//! Decoding, text rasterization, and encoding use the `image`, `imageproc`,
//! and `ab_glyph` crates — pure Rust, statically linked, no system
//! dependencies. The one exception is HEIC: no pure-Rust HEVC decoder
//! exists, so HEIC transcoding binds the system `libheif` library behind the
//! off-by-default `heif` cargo feature. Builds without it reject HEIC input
//! with a distinct error instead of silently passing undecodable bytes
//! downstream.
//!
//! ## Bundled Fonts, Unbundled Logos
//!
//! The three DejaVu faces used on the band (bold for the model line, book
//! for the date, mono for the exposure line) are embedded in the binary so
//! rendering is identical on every machine. Manufacturer logos are the
//! opposite case — trademarked artwork the repository cannot ship — so
//! image-kind marks resolve against a user-provided logo directory and
//! degrade to no mark when the file is absent.
//!
//! ## Fixed Proportions
//!
//! Band height is `max(8% of image height, 60px)`; every font size and
//! baseline on the band is a fixed fraction of that height. The constants
//! live in [`imaging::layout`] and are not configurable: output must be
//! visually interchangeable with the reference rendition, pixel for pixel.

pub mod brands;
pub mod config;
pub mod export;
pub mod imaging;
pub mod metadata;
pub mod normalize;
pub mod output;
pub mod pipeline;
