//! Per-run parameters for the card pipeline.
//!
//! Every field has a default matching the stock card, so `CardConfig::default()` renders
//! the standard layout and a JSON file only needs the fields it changes.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{CanvasSize, Rgba8, Vec2};
use crate::foundation::error::{CardError, CardResult};

/// Everything one run of the pipeline needs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Output dimensions.
    pub canvas: CanvasSize,
    /// Background raster, drawn unscaled at the origin.
    pub background_path: PathBuf,
    /// Destination PNG.
    pub output_path: PathBuf,
    /// Translucent panel behind the text.
    pub overlay: OverlayStyle,
    /// Wrapped headline.
    pub title: TitleStyle,
    /// Single-line link in the bottom-left corner.
    pub site_link: SiteLinkStyle,
    /// Circular profile photo.
    pub avatar: AvatarStyle,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            background_path: PathBuf::from("background.jpg"),
            output_path: PathBuf::from("output.png"),
            overlay: OverlayStyle::default(),
            title: TitleStyle::default(),
            site_link: SiteLinkStyle::default(),
            avatar: AvatarStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Inset from every canvas edge.
    pub margin: f64,
    pub color: Rgba8,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            margin: 20.0,
            color: Rgba8::rgba(0, 0, 0, 204),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    pub text: String,
    pub font_path: PathBuf,
    pub font_size: f32,
    /// Left edge; the wrap width is `canvas.width - 2 * margin_x`.
    pub margin_x: f64,
    /// Top edge of the first line box.
    pub margin_y: f64,
    /// Baseline-to-baseline distance in multiples of the font height.
    pub line_spacing: f64,
    /// Ceiling for the wrapped block height.
    pub max_height: f64,
    pub color: Rgba8,
    pub shadow_color: Rgba8,
    pub shadow_offset: Vec2,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            text: "Who Goes Blogging 6:\n3 Steps to Better Hugo RSS Feeds!".to_string(),
            font_path: ["fonts", "Merriweather", "Merriweather-Regular.ttf"]
                .iter()
                .collect(),
            font_size: 90.0,
            margin_x: 60.0,
            margin_y: 90.0,
            line_spacing: 1.65,
            max_height: 400.0,
            color: Rgba8::WHITE,
            shadow_color: Rgba8::BLACK,
            shadow_offset: Vec2::new(1.0, 1.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SiteLinkStyle {
    pub text: String,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub x: f64,
    /// Gap between the text box and the bottom canvas edge.
    pub margin_bottom: f64,
    /// Base color; only its R/G/B survive into the muted color.
    pub color: Rgba8,
    pub muted_alpha: u8,
}

impl Default for SiteLinkStyle {
    fn default() -> Self {
        Self {
            text: "https://jdheyburn.co.uk/".to_string(),
            font_path: ["fonts", "Source_Code_Pro", "SourceCodePro-Medium.ttf"]
                .iter()
                .collect(),
            font_size: 60.0,
            x: 70.0,
            margin_bottom: 10.0,
            color: Rgba8::WHITE,
            muted_alpha: 200,
        }
    }
}

impl SiteLinkStyle {
    /// Base color with alpha replaced by `muted_alpha`.
    pub fn muted_color(&self) -> Rgba8 {
        self.color.with_alpha(self.muted_alpha)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AvatarStyle {
    pub source_path: PathBuf,
    /// Width after resizing; height follows the source aspect ratio.
    pub target_width: u32,
    pub placement: AvatarPlacement,
    /// When set, the cropped avatar is also written here for inspection.
    pub debug_crop_path: Option<PathBuf>,
}

impl Default for AvatarStyle {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("me.jpg"),
            target_width: 180,
            placement: AvatarPlacement::default(),
            debug_crop_path: None,
        }
    }
}

/// Stock avatar layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Bottom-right corner, tilted 10°, white ring.
    #[default]
    Tilted,
    /// Fixed offset near the top-right corner, upright, no ring.
    Classic,
}

/// Where the cropped avatar lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AvatarAnchor {
    /// Center at `(W - w/2 - margin_x, H - h/2)`: half the avatar hangs off the bottom edge.
    BottomRight {
        /// Gap to the right canvas edge.
        margin_x: f64,
    },
    /// Center at a fixed canvas point.
    Fixed {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
    },
}

impl AvatarAnchor {
    /// Avatar center for an avatar of `avatar_size` on a canvas of `canvas`.
    pub fn center(self, canvas: CanvasSize, avatar_size: (u32, u32)) -> (f64, f64) {
        match self {
            Self::BottomRight { margin_x } => (
                f64::from(canvas.width) - f64::from(avatar_size.0 / 2) - margin_x,
                f64::from(canvas.height) - f64::from(avatar_size.1 / 2),
            ),
            Self::Fixed { x, y } => (x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AvatarBorder {
    pub color: Rgba8,
    pub width: f64,
}

impl Default for AvatarBorder {
    fn default() -> Self {
        Self {
            color: Rgba8::WHITE,
            width: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AvatarPlacement {
    pub anchor: AvatarAnchor,
    /// Clockwise tilt applied about the anchor.
    pub rotation_degrees: f64,
    pub border: Option<AvatarBorder>,
}

impl Default for AvatarPlacement {
    fn default() -> Self {
        Self::preset(LayoutVariant::default())
    }
}

impl AvatarPlacement {
    pub fn preset(variant: LayoutVariant) -> Self {
        match variant {
            LayoutVariant::Tilted => Self {
                anchor: AvatarAnchor::BottomRight { margin_x: 10.0 },
                rotation_degrees: 10.0,
                border: Some(AvatarBorder::default()),
            },
            LayoutVariant::Classic => Self {
                anchor: AvatarAnchor::Fixed {
                    x: 1050.0,
                    y: 140.0,
                },
                rotation_degrees: 0.0,
                border: None,
            },
        }
    }
}

impl CardConfig {
    /// Replace the avatar placement with a stock layout.
    pub fn with_layout(mut self, variant: LayoutVariant) -> Self {
        self.avatar.placement = AvatarPlacement::preset(variant);
        self
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CardResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| CardError::validation(format!("parse card config: {e}")))?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: &Path) -> CardResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("open card config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Check the parameters before any drawing starts.
    pub fn validate(&self) -> CardResult<()> {
        self.canvas.validate()?;
        let (w, h) = (f64::from(self.canvas.width), f64::from(self.canvas.height));

        let m = self.overlay.margin;
        if !m.is_finite() || m < 0.0 || 2.0 * m >= w.min(h) {
            return Err(CardError::validation(
                "overlay margin must be >= 0 and leave a non-empty panel",
            ));
        }

        let t = &self.title;
        if t.text.trim().is_empty() {
            return Err(CardError::validation("title text must be non-empty"));
        }
        check_font_size("title", t.font_size)?;
        if !t.margin_x.is_finite() || w - 2.0 * t.margin_x <= 0.0 {
            return Err(CardError::validation(
                "title margin_x leaves no room for text",
            ));
        }
        if !t.margin_y.is_finite() {
            return Err(CardError::validation("title margin_y must be finite"));
        }
        if !t.line_spacing.is_finite() || t.line_spacing < 1.0 {
            return Err(CardError::validation("title line_spacing must be >= 1"));
        }
        if !t.max_height.is_finite() || t.max_height <= 0.0 {
            return Err(CardError::validation("title max_height must be > 0"));
        }

        let s = &self.site_link;
        if s.text.trim().is_empty() {
            return Err(CardError::validation("site link text must be non-empty"));
        }
        check_font_size("site link", s.font_size)?;
        if !s.x.is_finite() || !s.margin_bottom.is_finite() {
            return Err(CardError::validation("site link position must be finite"));
        }

        let a = &self.avatar;
        if a.target_width == 0 {
            return Err(CardError::validation("avatar target_width must be > 0"));
        }
        if !a.placement.rotation_degrees.is_finite() {
            return Err(CardError::validation("avatar rotation must be finite"));
        }
        let anchor_finite = match a.placement.anchor {
            AvatarAnchor::BottomRight { margin_x } => margin_x.is_finite(),
            AvatarAnchor::Fixed { x, y } => x.is_finite() && y.is_finite(),
        };
        if !anchor_finite {
            return Err(CardError::validation("avatar anchor must be finite"));
        }
        if let Some(border) = a.placement.border
            && (!border.width.is_finite() || border.width <= 0.0)
        {
            return Err(CardError::validation("avatar border width must be > 0"));
        }
        Ok(())
    }
}

fn check_font_size(what: &str, size: f32) -> CardResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(CardError::validation(format!(
            "{what} font size must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
