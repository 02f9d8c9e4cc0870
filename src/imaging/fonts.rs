//! Typefaces for the caption band, embedded in the binary.
//!
//! Three DejaVu faces cover the three text roles: bold for the model line,
//! book for the date line, mono for the exposure parameters. Embedding them
//! keeps rendering identical on every machine — no fontconfig lookups, no
//! "works on my laptop" kerning differences.

use ab_glyph::FontRef;
use thiserror::Error;

static SANS_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
static BOLD_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");
static MONO_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSansMono.ttf");

#[derive(Error, Debug)]
#[error("bundled font data is invalid: {0}")]
pub struct FontError(&'static str);

/// The three parsed typefaces the compositor draws with.
pub struct FontSet {
    /// Book weight — date line and glyph-kind brand marks.
    pub sans: FontRef<'static>,
    /// Bold weight — the camera model line.
    pub bold: FontRef<'static>,
    /// Monospace — the right-aligned exposure line.
    pub mono: FontRef<'static>,
}

impl FontSet {
    /// Parse the embedded faces. Only fails if the compiled-in bytes are
    /// corrupt, which a single test run catches forever.
    pub fn bundled() -> Result<Self, FontError> {
        Ok(Self {
            sans: FontRef::try_from_slice(SANS_BYTES).map_err(|_| FontError("DejaVuSans"))?,
            bold: FontRef::try_from_slice(BOLD_BYTES).map_err(|_| FontError("DejaVuSans-Bold"))?,
            mono: FontRef::try_from_slice(MONO_BYTES).map_err(|_| FontError("DejaVuSansMono"))?,
        })
    }
}
