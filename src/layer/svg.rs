//! SVG markup helpers and rasterization using resvg/usvg.
//!
//! The writing half is shared by every layer; the rasterizing half turns a
//! finished fragment into pixels for previews and PNG snapshots.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{GaugeError, Result};

// ============================================================================
// Markup
// ============================================================================

/// Formats a coordinate or angle with at most two decimals.
///
/// Trailing zeros are trimmed and negative zero prints as `0`, so equal
/// geometry always yields byte-identical markup.
pub fn fmt_num(value: f64) -> String {
    fmt_decimals(value, 2)
}

/// Formats a number with at most `decimals` decimals, trailing zeros trimmed.
pub fn fmt_decimals(value: f64, decimals: usize) -> String {
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Formats a readout value with exactly `decimals` decimals.
pub fn fmt_fixed(value: f64, decimals: u8) -> String {
    let decimals = usize::from(decimals);
    let text = format!("{value:.decimals$}");
    // "-0.0" reads oddly on a dial
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Escapes text for use in element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The `rotate(angle, cx, cy)` transform for a needle.
pub fn rotate_transform(angle: f64, cx: f64, cy: f64) -> String {
    format!("rotate({}, {}, {})", fmt_num(angle), fmt_num(cx), fmt_num(cy))
}

// ============================================================================
// Rasterization
// ============================================================================

/// Renders an SVG string to an RGBA image, scaling its intrinsic size by `scale`.
pub fn rasterize(svg_data: &str, scale: f32) -> Result<RgbaImage> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(GaugeError::Rasterize(format!("invalid scale {scale}")));
    }

    let mut opts = Options::default();
    opts.fontdb_mut().load_system_fonts();
    let tree =
        Tree::from_str(svg_data, &opts).map_err(|e| GaugeError::Rasterize(e.to_string()))?;

    let svg_size = tree.size();
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| GaugeError::Rasterize(format!("cannot allocate {width}x{height} canvas")))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Encodes an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(GaugeError::PngEncode)?;
    Ok(bytes)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = pixmap.pixel(x, y) {
                // tiny_skia stores premultiplied alpha
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                img.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
