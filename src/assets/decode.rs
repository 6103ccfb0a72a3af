use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::foundation::error::{CardError, CardResult};

/// Raster formats the card pipeline accepts as input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupportedFormat {
    /// PNG.
    Png,
    /// JPEG.
    Jpeg,
}

impl SupportedFormat {
    fn as_image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Detect the format from the leading bytes; the file extension is never consulted.
pub fn sniff_format(bytes: &[u8]) -> CardResult<SupportedFormat> {
    let format = image::guess_format(bytes)
        .map_err(|e| CardError::image_decode(format!("unrecognized image data: {e}")))?;
    match format {
        ImageFormat::Png => Ok(SupportedFormat::Png),
        ImageFormat::Jpeg => Ok(SupportedFormat::Jpeg),
        other => Err(CardError::unsupported_format(format!(
            "{} (expected png or jpeg)",
            other.extensions_str().first().copied().unwrap_or("unknown")
        ))),
    }
}

/// Decode PNG or JPEG bytes into a straight-alpha RGBA8 raster.
pub fn decode_image(bytes: &[u8]) -> CardResult<RgbaImage> {
    let format = sniff_format(bytes)?;
    let dyn_img = image::load_from_memory_with_format(bytes, format.as_image_format())
        .map_err(|e| CardError::image_decode(format!("{format:?}: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(CardError::image_decode("decoded image has empty bounds"));
    }
    Ok(rgba)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> CardResult<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| CardError::image_load(path, e))?;
    let img = decode_image(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "decoded image"
    );
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
