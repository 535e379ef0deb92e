use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::frame::FrameRGBA;

/// File name downloads are saved under unless configured otherwise.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "sweet of madeena 2025.png";

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode `frame` as PNG (straight alpha).
pub fn encode_png(frame: &FrameRGBA) -> PosterResult<Vec<u8>> {
    let size = frame.size();
    if frame.data.len() != size.rgba8_len() {
        return Err(PosterError::render(format!(
            "frame data is {} bytes, expected {} for {}x{}",
            frame.data.len(),
            size.rgba8_len(),
            frame.width,
            frame.height
        )));
    }

    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| PosterError::render("frame buffer does not match its dimensions"))?;

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| PosterError::render(format!("png encode: {e}")))?;
    Ok(out)
}

/// `data:image/png;base64,...` URL for already-encoded PNG bytes.
pub fn png_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len().div_ceil(3) * 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
