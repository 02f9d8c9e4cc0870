//! Static camera-brand table: manufacturer name → visual mark + style tag.
//!
//! The table mirrors the fixed set the manual-mode picker offers. Lookup is
//! a case-sensitive exact match on the EXIF `Make` string as manufacturers
//! write it (`"NIKON CORPORATION"`, not `"Nikon"`). A miss means the caption
//! band is composed without a mark — never an error — which also covers
//! user-edited brands like `"Samsung"` that the table doesn't carry.
//!
//! Marks come in two structurally distinct kinds:
//!
//! - [`Mark::Image`] — a PNG wordmark resolved against the configured logo
//!   directory at composite time. Logo artwork is trademarked and therefore
//!   not bundled; a missing file degrades to no mark.
//! - [`Mark::Glyph`] — a single character drawn through the text pipeline.
//!
//! The kind is encoded in the type, not sniffed from string shape.

/// Visual mark for a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// PNG filename, resolved against the logo directory.
    Image { asset: &'static str },
    /// Single character drawn at the glyph anchor.
    Glyph { ch: char },
}

/// Style tag carried per brand. Reserved for differentiated band styling;
/// currently inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Modern,
    Classic,
    Premium,
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Style::Modern => "modern",
            Style::Classic => "classic",
            Style::Premium => "premium",
        };
        f.write_str(tag)
    }
}

/// One row of the brand table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandEntry {
    pub name: &'static str,
    pub mark: Mark,
    pub style: Style,
}

/// The fixed brand table. Order is display order for the `brands` command.
pub const BRAND_TABLE: &[BrandEntry] = &[
    BrandEntry {
        name: "Apple",
        mark: Mark::Image { asset: "apple.png" },
        style: Style::Modern,
    },
    BrandEntry {
        name: "NIKON CORPORATION",
        mark: Mark::Image { asset: "nikon.png" },
        style: Style::Modern,
    },
    BrandEntry {
        name: "Canon",
        mark: Mark::Image { asset: "canon.png" },
        style: Style::Classic,
    },
    BrandEntry {
        name: "HUAWEI",
        mark: Mark::Glyph { ch: '📱' },
        style: Style::Modern,
    },
    BrandEntry {
        name: "Xiaomi",
        mark: Mark::Glyph { ch: '📱' },
        style: Style::Modern,
    },
    BrandEntry {
        name: "DJI",
        mark: Mark::Glyph { ch: '🚁' },
        style: Style::Modern,
    },
    BrandEntry {
        name: "SONY",
        mark: Mark::Image { asset: "sony.png" },
        style: Style::Classic,
    },
    BrandEntry {
        name: "FUJIFILM",
        mark: Mark::Glyph { ch: '📸' },
        style: Style::Classic,
    },
    BrandEntry {
        name: "Leica",
        mark: Mark::Glyph { ch: '📸' },
        style: Style::Premium,
    },
    BrandEntry {
        name: "Hasselblad",
        mark: Mark::Image {
            asset: "hasselblad.png",
        },
        style: Style::Premium,
    },
];

/// Look up a brand by exact name. `None` means "no mark".
pub fn resolve(brand: &str) -> Option<&'static BrandEntry> {
    BRAND_TABLE.iter().find(|entry| entry.name == brand)
}
