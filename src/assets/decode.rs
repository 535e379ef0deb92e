use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap premultiplied RGBA8 bytes, checking the buffer length.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> PosterResult<Self> {
        let size = PixelSize::new(width, height)?;
        if bytes.len() != size.rgba8_len() {
            return Err(PosterError::validation(format!(
                "bitmap byte len {} does not match {width}x{height}",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut bytes: Vec<u8>) -> PosterResult<Self> {
        premultiply_rgba8_in_place(&mut bytes);
        Self::from_premul_rgba8(width, height, bytes)
    }

    /// Natural pixel dimensions.
    pub fn natural_size(&self) -> PixelSize {
        PixelSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode an image from memory.
///
/// Raster formats go through `image`. Inputs that look like SVG documents are parsed with `usvg`
/// and rasterized at their intrinsic size.
pub fn decode_image(bytes: &[u8]) -> PosterResult<Bitmap> {
    if looks_like_svg(bytes) {
        return decode_svg(bytes);
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PosterError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Bitmap::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn decode_image_file(path: &Path) -> PosterResult<Bitmap> {
    let bytes = std::fs::read(path)
        .map_err(|e| PosterError::decode(format!("read image '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // A multibyte character cut off by the window end.
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return false,
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

fn decode_svg(bytes: &[u8]) -> PosterResult<Bitmap> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| PosterError::decode(format!("parse svg tree: {e}")))?;
    let (width, height) = svg_intrinsic_size(&tree)?;
    let rgba8_premul = rasterize_svg_to_premul_rgba8(&tree, width, height)?;
    Bitmap::from_premul_rgba8(width, height, rgba8_premul)
}

fn svg_intrinsic_size(tree: &usvg::Tree) -> PosterResult<(u32, u32)> {
    fn to_px(v: f32) -> PosterResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(PosterError::decode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let w = to_px(size.width())?;
    let h = to_px(size.height())?;

    const MAX_DIM: u32 = 16_384;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(PosterError::decode(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PosterResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PosterError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
