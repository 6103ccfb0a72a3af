use std::path::PathBuf;

/// Convenience result type used across ogcard.
pub type CardResult<T> = Result<T, CardError>;

/// Error taxonomy for every step of the card pipeline.
///
/// The pipeline driver wraps these with step context via [`anyhow::Context`]; callers
/// recover the typed value with `anyhow::Error::downcast_ref::<CardError>()`.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// A source image file could not be read.
    #[error("image load error: '{}': {source}", .path.display())]
    ImageLoad {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Image bytes match no known format, or a PNG/JPEG could not be decoded.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Sniffed image content is a recognized format other than PNG or JPEG.
    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    /// A font file was missing or did not contain a usable face.
    #[error("font load error: '{}': {reason}", .path.display())]
    FontLoad {
        /// Font path that failed.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// Wrapped title would exceed the configured height ceiling.
    #[error("title is too long: {lines} lines need {height:.1}px, limit is {max_height:.1}px")]
    TitleTooLong {
        /// Wrapped line count.
        lines: usize,
        /// Computed block height in pixels.
        height: f64,
        /// Configured ceiling in pixels.
        max_height: f64,
    },

    /// Invalid resize request.
    #[error("resize error: {0}")]
    Resize(String),

    /// PNG encoding failed for a reason other than IO.
    #[error("encode error: {0}")]
    Encode(String),

    /// Output could not be written to disk.
    #[error("write error: '{}': {source}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration or drawing arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::ImageLoad`] value.
    pub fn image_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ImageLoad {
            path: path.into(),
            source,
        }
    }

    /// Build a [`CardError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`CardError::UnsupportedImageFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedImageFormat(msg.into())
    }

    /// Build a [`CardError::FontLoad`] value.
    pub fn font_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FontLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`CardError::Resize`] value.
    pub fn resize(msg: impl Into<String>) -> Self {
        Self::Resize(msg.into())
    }

    /// Build a [`CardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CardError::Write`] value.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
