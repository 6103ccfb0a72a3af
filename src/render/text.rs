use crate::config::{SiteLinkStyle, TitleStyle};
use crate::foundation::error::{CardError, CardResult};
use crate::render::canvas::{Canvas, TextAlign};

/// Height of a wrapped block: `n·fh·s − (s − 1)·fh`.
///
/// The last line carries no inter-line spacing, so a single line is exactly `fh` tall.
pub fn title_block_height(lines: usize, font_height: f64, line_spacing: f64) -> f64 {
    if lines == 0 {
        return 0.0;
    }
    let n = lines as f64;
    n * font_height * line_spacing - (line_spacing - 1.0) * font_height
}

/// Wrap `text` with the active font and fail if the block would exceed `max_height`.
///
/// Returns the wrapped line count.
pub fn validate_title_height(
    canvas: &mut Canvas,
    text: &str,
    max_width: f64,
    line_spacing: f64,
    max_height: f64,
) -> CardResult<usize> {
    let lines = canvas.word_wrap(text, max_width)?.len();
    let height = title_block_height(lines, canvas.font_height()?, line_spacing);
    if height > max_height {
        return Err(CardError::TitleTooLong {
            lines,
            height,
            max_height,
        });
    }
    Ok(lines)
}

/// Draw the wrapped title twice: the shadow at `shadow_offset`, then the foreground.
#[tracing::instrument(skip_all)]
pub fn draw_title(canvas: &mut Canvas, style: &TitleStyle) -> CardResult<()> {
    canvas.load_font(&style.font_path, style.font_size)?;

    let (x, y) = (style.margin_x, style.margin_y);
    let max_width = f64::from(canvas.width()) - 2.0 * style.margin_x;
    let lines = validate_title_height(
        canvas,
        &style.text,
        max_width,
        style.line_spacing,
        style.max_height,
    )?;
    tracing::debug!(lines, max_width, "title layout");

    let off = style.shadow_offset;
    canvas.set_color(style.shadow_color);
    canvas.draw_wrapped_text(
        &style.text,
        x + off.x,
        y + off.y,
        max_width,
        style.line_spacing,
        TextAlign::Left,
    )?;
    canvas.set_color(style.color);
    canvas.draw_wrapped_text(
        &style.text,
        x,
        y,
        max_width,
        style.line_spacing,
        TextAlign::Left,
    )
}

/// Draw the site link in its muted color, anchored to the bottom-left.
#[tracing::instrument(skip_all)]
pub fn draw_site_link(canvas: &mut Canvas, style: &SiteLinkStyle) -> CardResult<()> {
    canvas.load_font(&style.font_path, style.font_size)?;
    canvas.set_color(style.muted_color());

    let (_, text_height) = canvas.measure_text(&style.text)?;
    let y = f64::from(canvas.height()) - text_height - style.margin_bottom;
    tracing::debug!(x = style.x, y, "site link baseline");
    canvas.draw_string(&style.text, style.x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
