use std::path::{Path, PathBuf};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// A loaded font at a fixed nominal size.
#[derive(Clone)]
pub struct FontFace {
    path: PathBuf,
    family: String,
    size: f32,
    data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("path", &self.path)
            .field("family", &self.family)
            .field("size", &self.size)
            .finish()
    }
}

impl FontFace {
    /// File the face was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Primary family name registered from the font bytes.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Nominal size; glyphs are rasterized at this many pixels per em.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Line height unit used for layout: the em height of a point-sized face at 96 dpi.
    pub fn height(&self) -> f64 {
        f64::from(self.size) * 72.0 / 96.0
    }

    pub(crate) fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

/// Stateful helper that registers fonts and builds Parley layouts for them.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Read a font file and register it at `size`.
    pub fn load_font(&mut self, path: &Path, size: f32) -> CardResult<FontFace> {
        let bytes = std::fs::read(path).map_err(|e| CardError::font_load(path, e.to_string()))?;
        self.load_font_bytes(path, bytes, size)
    }

    /// Register in-memory font bytes at `size`. `path` is only used for diagnostics.
    pub fn load_font_bytes(
        &mut self,
        path: &Path,
        font_bytes: Vec<u8>,
        size: f32,
    ) -> CardResult<FontFace> {
        if !size.is_finite() || size <= 0.0 {
            return Err(CardError::validation("font size must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::font_load(path, "no font families in file"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::font_load(path, "registered font family has no name"))?
            .to_string();

        tracing::debug!(path = %path.display(), %family, size, "loaded font");

        Ok(FontFace {
            path: path.to_path_buf(),
            family,
            size,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    /// Shape `text` with `face`, breaking lines at `max_width_px` when given.
    pub fn layout_plain(
        &mut self,
        text: &str,
        face: &FontFace,
        brush: Rgba8,
        max_width_px: Option<f32>,
    ) -> parley::Layout<Rgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(face.size));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout
    }

    /// Greedy word wrap that only breaks at spaces and explicit newlines.
    ///
    /// A word wider than `max_width_px` stays whole on its own line, and blank
    /// paragraphs produce no line. Lines are trimmed.
    pub fn word_wrap(&mut self, text: &str, face: &FontFace, max_width_px: f64) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            for (word, gap) in split_words(paragraph) {
                let (w, _) = self.measure(&format!("{current}{word}"), face);
                if w > max_width_px {
                    if current.is_empty() {
                        lines.push(word.to_string());
                        continue;
                    }
                    lines.push(std::mem::take(&mut current));
                }
                current.push_str(word);
                current.push_str(gap);
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .collect()
    }

    /// Advance width of the widest line and the face height.
    pub fn measure(&mut self, text: &str, face: &FontFace) -> (f64, f64) {
        let layout = self.layout_plain(text, face, Rgba8::default(), None);
        (f64::from(layout.width()), face.height())
    }
}

/// Splits `s` into `(word, following spaces)` pairs; leading spaces form an empty word.
fn split_words(s: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let word_end = rest.find(' ').unwrap_or(rest.len());
        let (word, tail) = rest.split_at(word_end);
        let gap_end = tail.find(|c| c != ' ').unwrap_or(tail.len());
        let (gap, next) = tail.split_at(gap_end);
        out.push((word, gap));
        rest = next;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
