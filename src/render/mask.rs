use image::RgbaImage;

use crate::render::composite::{over, premultiply, unpremultiply};

/// Virtual alpha mask that is opaque inside a circle and clear outside it.
///
/// The mask is never rasterized; [`CircleMask::alpha_at`] is evaluated per queried
/// pixel. Pixel `(x, y)` is tested at its center `(x + 0.5, y + 0.5)`, so a mask of
/// radius `r` centered at `(cx, cy)` covers exactly the square `[cx-r, cx+r)²` when
/// intersected with its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircleMask {
    /// Center x in pixels.
    pub cx: i32,
    /// Center y in pixels.
    pub cy: i32,
    /// Radius in pixels.
    pub r: i32,
}

impl CircleMask {
    /// Mask centered at `(cx, cy)` with radius `r`.
    pub fn new(cx: i32, cy: i32, r: i32) -> Self {
        Self { cx, cy, r: r.max(0) }
    }

    /// Mask inscribed in a `width × height` raster: center `(w/2, h/2)`, radius `min(w, h)/2`.
    pub fn inscribed(width: u32, height: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self::new(w / 2, h / 2, w.min(h) / 2)
    }

    /// Bounding square `(x0, y0, x1, y1)`, max-exclusive.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (
            self.cx - self.r,
            self.cy - self.r,
            self.cx + self.r,
            self.cy + self.r,
        )
    }

    /// 255 when `(x - cx + 0.5)² + (y - cy + 0.5)² < r²`, else 0.
    pub fn alpha_at(&self, x: i32, y: i32) -> u8 {
        let (x0, y0, x1, y1) = self.bounds();
        if x < x0 || x >= x1 || y < y0 || y >= y1 {
            return 0;
        }
        // Doubled to stay in integers: (2dx + 1)² + (2dy + 1)² < (2r)².
        let dx = 2 * i64::from(x - self.cx) + 1;
        let dy = 2 * i64::from(y - self.cy) + 1;
        let rr = 2 * i64::from(self.r);
        if dx * dx + dy * dy < rr * rr { 255 } else { 0 }
    }
}

/// Composite `src` through `mask` onto a fresh transparent raster of the same size.
pub fn apply_circle_mask(src: &RgbaImage, mask: &CircleMask) -> RgbaImage {
    let mut dst = RgbaImage::new(src.width(), src.height());
    let (x0, y0, x1, y1) = mask.bounds();
    let max_x = i32::try_from(src.width()).unwrap_or(i32::MAX);
    let max_y = i32::try_from(src.height()).unwrap_or(i32::MAX);

    for y in y0.max(0)..y1.min(max_y) {
        for x in x0.max(0)..x1.min(max_x) {
            let coverage = mask.alpha_at(x, y);
            if coverage == 0 {
                continue;
            }
            let (ux, uy) = (x as u32, y as u32);
            let s = premultiply(src.get_pixel(ux, uy).0);
            let d = premultiply(dst.get_pixel(ux, uy).0);
            dst.put_pixel(ux, uy, image::Rgba(unpremultiply(over(d, s, coverage))));
        }
    }
    dst
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
