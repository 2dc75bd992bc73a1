use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// A color string that is not of the form `#RRGGBB`.
#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("expected 7-character hex color of the form #RRGGBB, got {0:?}")]
    BadFormat(String),
    #[error("invalid hex digits in color {0:?}")]
    BadDigits(String),
}

/// Normalized RGBA color, one per vertex, uploadable as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from normalized RGB channels.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses a `#RRGGBB` picker string. Channels are normalized by 255;
    /// alpha is always 1.0.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6)
            .ok_or_else(|| ColorParseError::BadFormat(hex.to_string()))?;
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::BadDigits(hex.to_string()))?;

        let r = ((packed >> 16) & 0xff) as f32 / 255.0;
        let g = ((packed >> 8) & 0xff) as f32 / 255.0;
        let b = (packed & 0xff) as f32 / 255.0;
        Ok(Self::opaque(r, g, b))
    }
}
