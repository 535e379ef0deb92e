use crate::assets::decode::Bitmap;
use crate::crop::region::CropRegion;
use crate::foundation::core::{Affine, DisplaySize, PixelSize, Rect};
use crate::foundation::error::{PosterError, PosterResult};
use crate::render::surface::{
    RasterSurface, SamplingQuality, affine_to_cpu, image_paint, rect_to_cpu,
};

/// Cut the selected region out of `source` at source resolution.
///
/// `region` is in the coordinate space of the image as displayed at `display`; it is mapped back
/// to natural pixels with the display-to-natural scale factors. The output surface is
/// `round(crop * device_pixel_ratio)` pixels per side and the crop is resampled with high
/// quality to fill it exactly.
#[tracing::instrument(skip(source, display), fields(src_w = source.width, src_h = source.height))]
pub fn rasterize_crop(
    source: &Bitmap,
    display: DisplaySize,
    region: &CropRegion,
    device_pixel_ratio: f64,
) -> PosterResult<Bitmap> {
    if !display.is_valid() {
        return Err(PosterError::validation(
            "displayed image size must be finite and > 0",
        ));
    }
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return Err(PosterError::validation(
            "device pixel ratio must be finite and > 0",
        ));
    }
    if region.is_degenerate() {
        return Err(PosterError::validation("crop region has no area"));
    }

    let scale_x = f64::from(source.width) / display.width;
    let scale_y = f64::from(source.height) / display.height;
    let src_rect = Rect::new(
        region.x * scale_x,
        region.y * scale_y,
        (region.x + region.width) * scale_x,
        (region.y + region.height) * scale_y,
    );
    let (d_width, d_height) = (src_rect.width(), src_rect.height());

    let out_w = (d_width * device_pixel_ratio).round();
    let out_h = (d_height * device_pixel_ratio).round();
    if out_w < 1.0 || out_h < 1.0 {
        return Err(PosterError::validation(format!(
            "crop region rounds to an empty surface ({out_w}x{out_h})"
        )));
    }
    let size = PixelSize::new(out_w as u32, out_h as u32)?;

    let mut surface = RasterSurface::new(size)?;
    let paint = image_paint(source, SamplingQuality::High)?;
    let transform = Affine::scale_non_uniform(out_w / d_width, out_h / d_height)
        * Affine::translate((-src_rect.x0, -src_rect.y0));
    let ctx = surface.ctx();
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);
    ctx.fill_rect(&rect_to_cpu(src_rect));

    let bytes = surface.finish()?;
    tracing::debug!(
        out_w = size.width,
        out_h = size.height,
        "crop rasterized"
    );
    Bitmap::from_premul_rgba8(size.width, size.height, bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/crop/rasterize.rs"]
mod tests;
