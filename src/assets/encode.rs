use std::io::{BufWriter, Write as _};
use std::path::Path;

use image::{ImageEncoder as _, RgbaImage};

use crate::foundation::error::{CardError, CardResult};

/// Encode `img` as an RGBA8 PNG at `path`, creating the parent directory if needed.
pub fn write_png(img: &RgbaImage, path: &Path) -> CardResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CardError::write(parent, e))?;
    }

    let file = std::fs::File::create(path).map_err(|e| CardError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    image::codecs::png::PngEncoder::new(&mut writer)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| match e {
            image::ImageError::IoError(io) => CardError::write(path, io),
            other => CardError::encode(other.to_string()),
        })?;
    writer.flush().map_err(|e| CardError::write(path, e))?;

    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

/// Encode `img` as PNG into memory.
pub fn encode_png(img: &RgbaImage) -> CardResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| CardError::encode(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
