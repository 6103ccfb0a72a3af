use std::path::Path;

use crate::assets::decode::load_image;
use crate::config::OverlayStyle;
use crate::foundation::error::CardResult;
use crate::render::canvas::Canvas;

/// Decode the background and blit it unscaled at the canvas origin.
///
/// An undersized background is accepted; the uncovered area stays transparent.
#[tracing::instrument(skip(canvas))]
pub fn draw_background(canvas: &mut Canvas, path: &Path) -> CardResult<()> {
    let img = load_image(path)?;
    if img.width() < canvas.width() || img.height() < canvas.height() {
        tracing::warn!(
            width = img.width(),
            height = img.height(),
            canvas_width = canvas.width(),
            canvas_height = canvas.height(),
            "background is smaller than the canvas; uncovered area stays transparent"
        );
    }
    canvas.draw_image_at(&img, 0.0, 0.0)
}

/// Fill the translucent panel inset by `style.margin` on every side.
pub fn draw_overlay(canvas: &mut Canvas, style: &OverlayStyle) {
    let m = style.margin;
    let w = f64::from(canvas.width()) - 2.0 * m;
    let h = f64::from(canvas.height()) - 2.0 * m;
    tracing::debug!(x = m, y = m, w, h, "overlay");
    canvas.fill_rectangle(m, m, w, h, style.color);
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
