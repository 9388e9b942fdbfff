//! The fixed color palette offered by the editor toolbox.
//!
//! Notes store the raw color token, and nothing in the model checks palette
//! membership; [`lookup`] therefore passes unknown tokens through unchanged.

/// Token used for new notes and after clearing formatting.
pub const DEFAULT_COLOR: &str = "#e5e7eb";

/// A named palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// All palette entries in toolbox order.
pub const PALETTE: [PaletteColor; 8] = [
    PaletteColor { name: "Default", value: DEFAULT_COLOR },
    PaletteColor { name: "Red", value: "#fecaca" },
    PaletteColor { name: "Orange", value: "#fed7aa" },
    PaletteColor { name: "Yellow", value: "#fef08a" },
    PaletteColor { name: "Green", value: "#bbf7d0" },
    PaletteColor { name: "Blue", value: "#bfdbfe" },
    PaletteColor { name: "Purple", value: "#e9d5ff" },
    PaletteColor { name: "Pink", value: "#fbcfe8" },
];

/// Resolves a palette name (case-insensitive) to its token, or returns
/// `input` unchanged when it is not a palette name.
pub fn lookup(input: &str) -> String {
    PALETTE
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(input.trim()))
        .map(|c| c.value.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Returns the palette name for a token, if it is one of ours.
pub fn name_of(value: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|c| c.value.eq_ignore_ascii_case(value))
        .map(|c| c.name)
}
