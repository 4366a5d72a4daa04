//! Background images embedded inline as `data:` URIs.
//!
//! A gauge background is a static picture (typically a PNG face with printed
//! graduations) placed behind the needle. It is read once, base64 encoded, and
//! referenced from an SVG `<image>` element so the markup stays self-contained.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::{GaugeError, Result};
use crate::layer::svg::encode_png;

/// An image ready to be inlined into SVG markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    source: Option<PathBuf>,
    format: ImageFormat,
    width: u32,
    height: u32,
    data_uri: String,
}

impl EmbeddedImage {
    /// Reads and encodes an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| GaugeError::BackgroundRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(bytes, Some(path.to_path_buf()))
    }

    /// Like [`load`](Self::load), but logs and returns `None` on failure.
    ///
    /// A gauge with an unusable background still renders, with its plain face.
    pub fn load_or_skip(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(image) => {
                tracing::debug!(
                    path = %path.display(),
                    width = image.width,
                    height = image.height,
                    "embedded background image"
                );
                Some(image)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "background image skipped");
                None
            }
        }
    }

    /// Encodes in-memory image bytes (any format the `image` crate recognizes).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::decode(bytes, None)
    }

    /// Encodes a pixel buffer as PNG.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        Self::from_bytes(encode_png(image)?)
    }

    fn decode(bytes: Vec<u8>, source: Option<PathBuf>) -> Result<Self> {
        let format_error = |source_path: &Option<PathBuf>, err: image::ImageError| GaugeError::BackgroundFormat {
            path: source_path.clone(),
            source: err,
        };

        let format = image::guess_format(&bytes).map_err(|e| format_error(&source, e))?;
        let (width, height) = ImageReader::with_format(Cursor::new(&bytes), format)
            .into_dimensions()
            .map_err(|e| format_error(&source, e))?;

        let data_uri = format!(
            "data:{};base64,{}",
            format.to_mime_type(),
            STANDARD.encode(&bytes)
        );

        Ok(Self {
            source,
            format,
            width,
            height,
            data_uri,
        })
    }

    /// Path the image was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Pixel dimensions of the encoded image.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The `data:` URI for use in an `href` attribute.
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}
