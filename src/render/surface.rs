use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use kurbo::PathEl;

use crate::assets::decode::Bitmap;
use crate::foundation::core::{Affine, BezPath, PixelSize, Rect};
use crate::foundation::error::{PosterError, PosterResult};

/// Resampling quality used when an image is drawn scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingQuality {
    /// Nearest-neighbour.
    Low,
    /// Bilinear.
    Medium,
    /// Bicubic; the equivalent of `imageSmoothingQuality = "high"`.
    #[default]
    High,
}

impl SamplingQuality {
    fn to_cpu(self) -> vello_cpu::peniko::ImageQuality {
        match self {
            Self::Low => vello_cpu::peniko::ImageQuality::Low,
            Self::Medium => vello_cpu::peniko::ImageQuality::Medium,
            Self::High => vello_cpu::peniko::ImageQuality::High,
        }
    }
}

/// Off-screen drawing surface backed by a `vello_cpu` render context.
///
/// Created, drawn once, and consumed by [`RasterSurface::finish`].
pub(crate) struct RasterSurface {
    size: PixelSize,
    ctx: vello_cpu::RenderContext,
}

impl RasterSurface {
    pub(crate) fn new(size: PixelSize) -> PosterResult<Self> {
        let (w, h) = size.to_u16()?;
        Ok(Self {
            size,
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    pub(crate) fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Rasterize everything recorded so far into premultiplied RGBA8 bytes.
    pub(crate) fn finish(mut self) -> PosterResult<Vec<u8>> {
        let (w, h) = self.size.to_u16()?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

/// Clip pushed onto a render context for the lifetime of the guard.
///
/// Dropping the guard pops the clip layer and resets the transform, so the context is unclipped
/// again on every exit path, early returns and `?` included.
pub(crate) struct ClipScope<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
}

impl<'a> ClipScope<'a> {
    /// Push `clip` (in surface pixel coordinates) and return the guard.
    pub(crate) fn push(ctx: &'a mut vello_cpu::RenderContext, clip: &BezPath) -> Self {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&bezpath_to_cpu(clip));
        Self { ctx }
    }
}

impl Deref for ClipScope<'_> {
    type Target = vello_cpu::RenderContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ClipScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ClipScope<'_> {
    fn drop(&mut self) {
        self.ctx.pop_layer();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

/// Image paint for `bitmap`, anchored at the user-space origin.
pub(crate) fn image_paint(
    bitmap: &Bitmap,
    quality: SamplingQuality,
) -> PosterResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&bitmap.rgba8_premul, bitmap.width, bitmap.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler {
            quality: quality.to_cpu(),
            ..vello_cpu::peniko::ImageSampler::default()
        },
    })
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Pixmap> {
    let size = PixelSize::new(width, height)?;
    let (w, h) = size.to_u16()?;
    if bytes.len() != size.rgba8_len() {
        return Err(PosterError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
