use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Affine, Point, Vec2};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Construct a color from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Keep R/G/B and replace alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> CardResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(CardError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |i: usize| -> CardResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CardError::validation(format!("color '{s}': {e}")))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

/// Fixed pixel dimensions of the output card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 628,
        }
    }
}

impl CanvasSize {
    /// Reject sizes the rasterizer cannot allocate.
    pub fn validate(self) -> CardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CardError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(CardError::validation("canvas width/height exceed u16"));
        }
        Ok(())
    }
}

/// Rotation about `center`, post-multiplied onto `base`.
pub fn rotate_about(base: Affine, angle_radians: f64, center: Point) -> Affine {
    base * Affine::rotate_about(angle_radians, center)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
