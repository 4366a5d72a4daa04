//! Error types for gauge construction and rendering.
//!
//! Invalid configuration fails fast when a gauge is built or re-configured.
//! Values outside the gauge range are never errors; they are clamped.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gauge operations.
#[derive(Error, Debug)]
pub enum GaugeError {
    // === Configuration Errors ===
    /// The range is empty or inverted.
    #[error("invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange {
        /// Lower bound as configured.
        min: f64,
        /// Upper bound as configured.
        max: f64,
    },

    /// One of the bounds is NaN or infinite.
    #[error("range bounds must be finite (min = {min}, max = {max})")]
    NonFiniteRange {
        /// Lower bound as configured.
        min: f64,
        /// Upper bound as configured.
        max: f64,
    },

    /// The gauge is too small to lay out ticks and labels.
    #[error("gauge size {size}px is below the minimum of {min}px")]
    SizeTooSmall {
        /// Requested size in pixels.
        size: u32,
        /// Smallest supported size in pixels.
        min: u32,
    },

    /// Needle length must be a fraction of the radius in `(0, 1]`.
    #[error("needle length {0} is outside (0, 1]")]
    InvalidNeedleLength(f64),

    /// Too many decimals requested for the value readout.
    #[error("value decimals {value} exceeds the maximum of {max}")]
    InvalidDecimals {
        /// Requested number of decimals.
        value: u8,
        /// Largest supported number of decimals.
        max: u8,
    },

    /// More tick divisions than can be drawn legibly.
    #[error("tick count {count} exceeds the maximum of {max}")]
    TooManyTicks {
        /// Requested number of divisions.
        count: u32,
        /// Largest supported number of divisions.
        max: u32,
    },

    /// A color string could not be parsed.
    #[error("invalid color '{value}': {message}")]
    InvalidColor {
        /// The rejected input.
        value: String,
        /// Description of what went wrong.
        message: String,
    },

    /// An element id contains characters that cannot be embedded verbatim.
    #[error("invalid element id '{0}': use ASCII letters, digits, '-' or '_'")]
    InvalidId(String),

    // === Background Errors ===
    /// The background image file could not be read.
    #[error("failed to read background image {path}: {source}")]
    BackgroundRead {
        /// Path of the image file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The background bytes are not a supported image.
    #[error("unsupported background image{}: {source}", display_path(.path))]
    BackgroundFormat {
        /// Path of the image file, if it came from disk.
        path: Option<PathBuf>,
        /// The underlying error.
        #[source]
        source: image::ImageError,
    },

    // === Output Errors ===
    /// The SVG could not be parsed or rasterized.
    #[error("failed to rasterize gauge: {0}")]
    Rasterize(String),

    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    PngEncode(#[source] image::ImageError),

    /// Profile JSON could not be parsed or produced.
    #[error("profile serialization failed: {0}")]
    Profile(#[from] serde_json::Error),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Result type alias using [`GaugeError`].
pub type Result<T> = std::result::Result<T, GaugeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_display() {
        let err = GaugeError::InvalidRange { min: 10.0, max: 5.0 };
        assert_eq!(
            err.to_string(),
            "invalid range: min (10) must be less than max (5)"
        );
    }

    #[test]
    fn background_format_display_without_path() {
        let source = image::guess_format(b"definitely not an image").unwrap_err();
        let err = GaugeError::BackgroundFormat { path: None, source };
        assert!(err.to_string().starts_with("unsupported background image: "));
    }

    #[test]
    fn tick_limit_display() {
        let err = GaugeError::TooManyTicks { count: 500, max: 360 };
        assert_eq!(err.to_string(), "tick count 500 exceeds the maximum of 360");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GaugeError = io.into();
        assert!(matches!(err, GaugeError::Io(_)));
    }
}
