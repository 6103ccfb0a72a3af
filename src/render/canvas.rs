use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use vello_cpu::kurbo::Shape as _;

use crate::assets::encode::write_png;
use crate::assets::font::{FontFace, TextLayoutEngine};
use crate::foundation::core::{Affine, CanvasSize, Point, Rgba8, rotate_about};
use crate::foundation::error::{CardError, CardResult};
use crate::render::composite::{premultiply, unpremultiply_in_place};

/// Horizontal alignment of wrapped lines within their box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered in the box.
    Center,
    /// Flush right.
    Right,
}

#[derive(Clone, Copy, Debug)]
struct DrawState {
    color: Rgba8,
    transform: Affine,
}

/// Fixed-size raster surface that every pipeline step draws into.
///
/// Draw calls are recorded into a `vello_cpu` render context and rasterized on
/// [`Canvas::to_rgba_image`]. Color and transform form the current drawing state;
/// [`Canvas::push`] / [`Canvas::pop`] save and restore it.
pub struct Canvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    state: DrawState,
    saved: Vec<DrawState>,
    text: TextLayoutEngine,
    font: Option<FontFace>,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(size: CanvasSize) -> CardResult<Self> {
        size.validate()?;
        let width = u16::try_from(size.width)
            .map_err(|_| CardError::validation("canvas width exceeds u16"))?;
        let height = u16::try_from(size.height)
            .map_err(|_| CardError::validation("canvas height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            state: DrawState {
                color: Rgba8::BLACK,
                transform: Affine::IDENTITY,
            },
            saved: Vec::new(),
            text: TextLayoutEngine::new(),
            font: None,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Active color for text and strokes.
    pub fn set_color(&mut self, color: Rgba8) {
        self.state.color = color;
    }

    pub fn color(&self) -> Rgba8 {
        self.state.color
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Save color and transform.
    pub fn push(&mut self) {
        self.saved.push(self.state);
    }

    /// Restore the state saved by the matching [`Canvas::push`].
    pub fn pop(&mut self) -> CardResult<()> {
        self.state = self
            .saved
            .pop()
            .ok_or_else(|| CardError::validation("canvas pop without matching push"))?;
        Ok(())
    }

    /// Rotate subsequent draws by `angle_radians` about `(cx, cy)`.
    pub fn rotate_about(&mut self, angle_radians: f64, cx: f64, cy: f64) {
        self.state.transform =
            rotate_about(self.state.transform, angle_radians, Point::new(cx, cy));
    }

    pub fn fill_rectangle(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8) {
        self.prepare(color);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x, y, x + w, y + h));
    }

    /// Stroke a circle outline in the active color.
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, line_width: f64) {
        self.prepare(self.state.color);
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
        let circle = vello_cpu::kurbo::Circle::new((cx, cy), r);
        self.ctx.stroke_path(&circle.to_path(0.1));
    }

    /// Draw `img` with its top-left corner at `(x, y)`.
    pub fn draw_image_at(&mut self, img: &RgbaImage, x: f64, y: f64) -> CardResult<()> {
        let paint = image_to_paint(img)?;
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(
            self.state.transform * Affine::translate((x, y)),
        ));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(img.width()),
            f64::from(img.height()),
        ));
        Ok(())
    }

    /// Draw `img` so that its point `(ax·w, ay·h)` lands on `(x, y)`.
    pub fn draw_image_anchored(
        &mut self,
        img: &RgbaImage,
        x: f64,
        y: f64,
        ax: f64,
        ay: f64,
    ) -> CardResult<()> {
        let x = x - ax * f64::from(img.width());
        let y = y - ay * f64::from(img.height());
        self.draw_image_at(img, x, y)
    }

    /// Load a font file and make it the active face.
    pub fn load_font(&mut self, path: &Path, size: f32) -> CardResult<()> {
        let face = self.text.load_font(path, size)?;
        self.font = Some(face);
        Ok(())
    }

    pub fn font(&self) -> Option<&FontFace> {
        self.font.as_ref()
    }

    /// Height of the active face, see [`FontFace::height`].
    pub fn font_height(&self) -> CardResult<f64> {
        Ok(self.active_font()?.height())
    }

    /// `(width, height)` of `s` set in the active face.
    pub fn measure_text(&mut self, s: &str) -> CardResult<(f64, f64)> {
        let face = self.active_font()?.clone();
        Ok(self.text.measure(s, &face))
    }

    /// Break `s` into lines no wider than `max_width`.
    pub fn word_wrap(&mut self, s: &str, max_width: f64) -> CardResult<Vec<String>> {
        let face = self.active_font()?.clone();
        Ok(self.text.word_wrap(s, &face, max_width))
    }

    /// Draw one line of text with its baseline at `y`.
    pub fn draw_string(&mut self, s: &str, x: f64, y: f64) -> CardResult<()> {
        self.fill_text(s, x, y)
    }

    /// Draw one line anchored at `(x, y)`: `ax` shifts by the text width, `ay` by the font height.
    pub fn draw_string_anchored(
        &mut self,
        s: &str,
        x: f64,
        y: f64,
        ax: f64,
        ay: f64,
    ) -> CardResult<()> {
        let (w, h) = self.measure_text(s)?;
        self.fill_text(s, x - ax * w, y + ay * h)
    }

    /// Word-wrap `s` to `max_width` and draw the lines top-down from `(x, y)`.
    ///
    /// Line `i` has its baseline at `y + fh + i·fh·line_spacing`.
    pub fn draw_wrapped_text(
        &mut self,
        s: &str,
        x: f64,
        y: f64,
        max_width: f64,
        line_spacing: f64,
        align: TextAlign,
    ) -> CardResult<()> {
        let lines = self.word_wrap(s, max_width)?;
        let fh = self.font_height()?;
        let (x, ax) = match align {
            TextAlign::Left => (x, 0.0),
            TextAlign::Center => (x + max_width / 2.0, 0.5),
            TextAlign::Right => (x + max_width, 1.0),
        };
        let mut y = y;
        for line in &lines {
            self.draw_string_anchored(line, x, y, ax, 1.0)?;
            y += fh * line_spacing;
        }
        Ok(())
    }

    /// Rasterize everything drawn so far into straight-alpha RGBA8.
    pub fn to_rgba_image(&mut self) -> CardResult<RgbaImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_in_place(&mut data);
        RgbaImage::from_raw(self.width(), self.height(), data)
            .ok_or_else(|| CardError::encode("canvas readback length mismatch"))
    }

    /// Rasterize and write the canvas as a PNG.
    pub fn encode_png(&mut self, path: &Path) -> CardResult<()> {
        let img = self.to_rgba_image()?;
        write_png(&img, path)
    }

    fn active_font(&self) -> CardResult<&FontFace> {
        self.font
            .as_ref()
            .ok_or_else(|| CardError::validation("no font loaded on canvas"))
    }

    fn prepare(&mut self, color: Rgba8) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx.set_paint(color_to_cpu(color));
    }

    fn fill_text(&mut self, s: &str, x: f64, baseline: f64) -> CardResult<()> {
        let face = self.active_font()?.clone();
        let layout = self.text.layout_plain(s, &face, self.state.color, None);
        self.prepare(self.state.color);

        let mut first_baseline: Option<f32> = None;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let origin = *first_baseline.get_or_insert(run.baseline());

                let brush = run.style().brush;
                self.ctx.set_paint(color_to_cpu(brush));

                let (ox, oy) = (x as f32, baseline as f32 - origin);
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: ox + g.x,
                    y: oy + g.y,
                });
                self.ctx
                    .glyph_run(face.data())
                    .font_size(face.size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_to_paint(img: &RgbaImage) -> CardResult<vello_cpu::Image> {
    let w: u16 = img
        .width()
        .try_into()
        .map_err(|_| CardError::validation("image width exceeds u16"))?;
    let h: u16 = img
        .height()
        .try_into()
        .map_err(|_| CardError::validation("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(img.width() as usize * img.height() as usize);
    for px in img.pixels() {
        let [r, g, b, a] = premultiply(px.0);
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 { r, g, b, a });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
