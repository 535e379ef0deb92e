use crate::foundation::core::{PixelSize, Rect};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Whole-pixel placement of a layer inside a larger frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LayerRect {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) size: PixelSize,
}

impl LayerRect {
    /// `bounds` grown outward to whole pixels and clipped to `frame`.
    ///
    /// Returns `None` when nothing of `bounds` lies inside the frame.
    pub(crate) fn covering(bounds: Rect, frame: PixelSize) -> Option<Self> {
        let x0 = bounds.x0.floor().max(0.0);
        let y0 = bounds.y0.floor().max(0.0);
        let x1 = bounds.x1.ceil().min(f64::from(frame.width));
        let y1 = bounds.y1.ceil().min(f64::from(frame.height));
        if !(x1 > x0 && y1 > y0) {
            return None;
        }
        let size = PixelSize::new((x1 - x0) as u32, (y1 - y0) as u32).ok()?;
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            size,
        })
    }
}

/// Porter-Duff source-over for one premultiplied pixel, with extra layer opacity.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite `src` over `dst` in place; both are equal-length premultiplied RGBA8 buffers.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> PosterResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PosterError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite a layer covering only `rect` over the `frame`-sized buffer `dst`.
pub(crate) fn over_rect_in_place(
    dst: &mut [u8],
    frame: PixelSize,
    src: &[u8],
    rect: LayerRect,
    opacity: f32,
) -> PosterResult<()> {
    if dst.len() != frame.rgba8_len() || src.len() != rect.size.rgba8_len() {
        return Err(PosterError::render(
            "over_rect_in_place expects frame- and rect-sized rgba8 buffers",
        ));
    }
    if u64::from(rect.x) + u64::from(rect.size.width) > u64::from(frame.width)
        || u64::from(rect.y) + u64::from(rect.size.height) > u64::from(frame.height)
    {
        return Err(PosterError::render("layer rect extends past the frame"));
    }

    let row = rect.size.width as usize * 4;
    let stride = frame.width as usize * 4;
    for (i, src_row) in src.chunks_exact(row).enumerate() {
        let start = (rect.y as usize + i) * stride + rect.x as usize * 4;
        over_in_place(&mut dst[start..start + row], src_row, opacity)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
