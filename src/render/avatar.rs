use std::path::Path;

use image::RgbaImage;
use image::imageops::FilterType;

use crate::assets::decode::load_image;
use crate::assets::encode::write_png;
use crate::config::{AvatarPlacement, AvatarStyle};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{CardError, CardResult};
use crate::render::canvas::Canvas;
use crate::render::mask::{CircleMask, apply_circle_mask};

/// Height that keeps the `width × height` aspect ratio at `target_width`.
pub fn resized_height(width: u32, height: u32, target_width: u32) -> CardResult<u32> {
    if target_width == 0 {
        return Err(CardError::resize("target width must be > 0"));
    }
    if width == 0 || height == 0 {
        return Err(CardError::resize("source image has empty bounds"));
    }
    let h = (f64::from(height) * f64::from(target_width) / f64::from(width)).round();
    Ok((h as u32).max(1))
}

/// Lanczos3 resize to `target_width`, preserving aspect ratio.
pub fn resize_to_width(src: &RgbaImage, target_width: u32) -> CardResult<RgbaImage> {
    let target_height = resized_height(src.width(), src.height(), target_width)?;
    Ok(image::imageops::resize(
        src,
        target_width,
        target_height,
        FilterType::Lanczos3,
    ))
}

/// Cut the largest centered circle out of `src`; everything outside it becomes transparent.
pub fn crop_circle(src: &RgbaImage) -> RgbaImage {
    if src.width() != src.height() {
        tracing::warn!(
            width = src.width(),
            height = src.height(),
            "avatar is not square; cropping the inscribed circle"
        );
    }
    apply_circle_mask(src, &CircleMask::inscribed(src.width(), src.height()))
}

/// Decode, resize and circle-crop the avatar source.
pub fn load_avatar(path: &Path, target_width: u32) -> CardResult<RgbaImage> {
    let src = load_image(path)?;
    let resized = resize_to_width(&src, target_width)?;
    tracing::debug!(
        width = resized.width(),
        height = resized.height(),
        "resized avatar"
    );
    Ok(crop_circle(&resized))
}

/// Draw an already-cropped avatar: optional ring first, then the (possibly rotated) image.
///
/// Rotation happens inside a push/pop pair so later draws are unaffected.
pub fn place_avatar(
    canvas: &mut Canvas,
    avatar: &RgbaImage,
    placement: &AvatarPlacement,
) -> CardResult<()> {
    let size = CanvasSize {
        width: canvas.width(),
        height: canvas.height(),
    };
    let (cx, cy) = placement
        .anchor
        .center(size, (avatar.width(), avatar.height()));
    tracing::debug!(cx, cy, rotation = placement.rotation_degrees, "avatar anchor");

    if let Some(border) = placement.border {
        canvas.push();
        canvas.set_color(border.color);
        let radius = CircleMask::inscribed(avatar.width(), avatar.height()).r;
        canvas.stroke_circle(cx, cy, f64::from(radius), border.width);
        canvas.pop()?;
    }

    canvas.push();
    canvas.rotate_about(placement.rotation_degrees.to_radians(), cx, cy);
    let drawn = canvas.draw_image_anchored(avatar, cx, cy, 0.5, 0.5);
    canvas.pop()?;
    drawn
}

/// Full avatar step: crop in memory, optionally dump the crop, then place it.
#[tracing::instrument(skip_all)]
pub fn draw_avatar(canvas: &mut Canvas, style: &AvatarStyle) -> CardResult<()> {
    let avatar = load_avatar(&style.source_path, style.target_width)?;
    if let Some(path) = &style.debug_crop_path {
        write_png(&avatar, path)?;
    }
    place_avatar(canvas, &avatar, &style.placement)
}

#[cfg(test)]
#[path = "../../tests/unit/render/avatar.rs"]
mod tests;
