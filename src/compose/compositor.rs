use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::decode::Bitmap;
use crate::assets::text::{FontSource, LineExtent, TextBrushRgba8, TextLayoutEngine, line_extent};
use crate::compose::layout::{PosterLayout, ResolvedLayout};
use crate::compose::style::{ShadowStyle, TextStyle};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, PixelSize, Point, Rect, Vec2};
use crate::foundation::error::{PosterError, PosterResult};
use crate::render::blur::{blur_rgba8_premul, shadow_blur_params};
use crate::render::composite::{LayerRect, over_in_place, over_rect_in_place};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{
    ClipScope, RasterSurface, SamplingQuality, affine_to_cpu, image_paint, rect_to_cpu,
};

type NameLayout = parley::Layout<TextBrushRgba8>;

/// Composites a photo and a name onto the poster.
///
/// The compositor owns the text shaping state, so it is reused across calls rather than rebuilt
/// per frame. For fixed inputs the output is byte-identical between calls.
pub struct PosterCompositor {
    layout: PosterLayout,
    style: TextStyle,
    font_bytes: Option<Arc<Vec<u8>>>,
    text_engine: TextLayoutEngine,
    fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for PosterCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterCompositor")
            .field("layout", &self.layout)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl PosterCompositor {
    /// Validate `layout` and `style`, and read the style's font file if it names one.
    pub fn new(layout: PosterLayout, style: TextStyle) -> PosterResult<Self> {
        layout.validate()?;
        style.validate()?;
        let font_bytes = match &style.font_path {
            Some(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    PosterError::validation(format!("read font '{}': {e}", path.display()))
                })?;
                Some(Arc::new(bytes))
            }
            None => None,
        };
        Ok(Self {
            layout,
            style,
            font_bytes,
            text_engine: TextLayoutEngine::new(),
            fonts: HashMap::new(),
        })
    }

    /// Anchor fractions in use.
    pub fn layout(&self) -> &PosterLayout {
        &self.layout
    }

    /// Text style in use.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Draw `photo` into the poster's circle and `name` under it.
    ///
    /// The output has the poster's natural size. Pixels outside the circle and the text are the
    /// poster's own pixels, untouched.
    #[tracing::instrument(
        skip(self, poster, photo, name),
        fields(poster_w = poster.width, poster_h = poster.height, name_len = name.len())
    )]
    pub fn compose(&mut self, poster: &Bitmap, photo: &Bitmap, name: &str) -> PosterResult<FrameRGBA> {
        let size = poster.natural_size();
        let resolved = self.layout.resolve(size);

        let mut base = poster.rgba8_premul.as_ref().clone();

        let photo_layer = photo_layer(size, &resolved, photo)?;
        over_in_place(&mut base, &photo_layer, 1.0)?;

        if name.is_empty() {
            tracing::debug!("empty name; skipping text");
        } else {
            self.draw_name(&mut base, size, &resolved, name)?;
        }

        Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data: base,
            premultiplied: true,
        })
    }

    fn draw_name(
        &mut self,
        base: &mut [u8],
        size: PixelSize,
        resolved: &ResolvedLayout,
        name: &str,
    ) -> PosterResult<()> {
        let color = self.style.color;
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let font = match &self.font_bytes {
            Some(bytes) => FontSource::Bytes(bytes.as_slice()),
            None => FontSource::Family(&self.style.family),
        };
        let text = self.text_engine.layout_line(
            name,
            font,
            self.style.size_px,
            self.style.bold,
            brush,
        )?;

        let Some(extent) = line_extent(&text) else {
            tracing::debug!("name produced no lines");
            return Ok(());
        };
        // Centered on the anchor x, first baseline on the anchor y.
        let origin = Point::new(
            resolved.name_anchor.x - f64::from(extent.width) / 2.0,
            resolved.name_anchor.y - f64::from(extent.baseline),
        );

        let Some(rect) = self.name_rect(size, origin, extent) else {
            tracing::debug!("name lies outside the poster");
            return Ok(());
        };

        if let Some(shadow) = self.style.shadow {
            let layer = self.shadow_layer(rect, &text, origin, shadow)?;
            over_rect_in_place(base, size, &layer, rect, 1.0)?;
        }
        let layer = self.glyph_layer(rect, &text, origin, color)?;
        over_rect_in_place(base, size, &layer, rect, 1.0)
    }

    /// Poster pixels the name and its shadow can touch.
    ///
    /// The margin keeps every blurred sample that reads past the glyphs inside the layer, so the
    /// blur sees the same transparent surroundings it would on a full-size layer.
    fn name_rect(&self, size: PixelSize, origin: Point, extent: LineExtent) -> Option<LayerRect> {
        let mut margin = (f64::from(self.style.size_px) * 0.5).ceil() + 2.0;
        if let Some(shadow) = self.style.shadow {
            let (radius, _) = shadow_blur_params(shadow.blur);
            margin += f64::from(shadow.offset_x.abs().max(shadow.offset_y.abs())).ceil()
                + f64::from(radius);
        }
        let bounds = Rect::new(
            origin.x,
            origin.y,
            origin.x + f64::from(extent.width),
            origin.y + f64::from(extent.height),
        )
        .inflate(margin, margin);
        LayerRect::covering(bounds, size)
    }

    fn shadow_layer(
        &mut self,
        rect: LayerRect,
        text: &NameLayout,
        origin: Point,
        shadow: ShadowStyle,
    ) -> PosterResult<Vec<u8>> {
        let at = Point::new(
            origin.x + f64::from(shadow.offset_x),
            origin.y + f64::from(shadow.offset_y),
        );
        let layer = self.glyph_layer(rect, text, at, shadow.color)?;
        let (radius, sigma) = shadow_blur_params(shadow.blur);
        blur_rgba8_premul(&layer, rect.size.width, rect.size.height, radius, sigma)
    }

    /// Rasterize every glyph run of `text` in `color` onto a transparent layer covering `rect`.
    ///
    /// `origin` is in poster pixels.
    fn glyph_layer(
        &mut self,
        rect: LayerRect,
        text: &NameLayout,
        origin: Point,
        color: Rgba8,
    ) -> PosterResult<Vec<u8>> {
        let mut surface = RasterSurface::new(rect.size)?;
        let ctx = surface.ctx();
        let local = origin - Vec2::new(f64::from(rect.x), f64::from(rect.y));
        ctx.set_transform(affine_to_cpu(Affine::translate(local.to_vec2())));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));

        for line in text.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let run_font = run.run().font();
                let font = self
                    .fonts
                    .entry((run_font.data.id(), run_font.index))
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(run_font.data.data().to_vec()),
                            run_font.index,
                        )
                    });
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        surface.finish()
    }
}

/// The photo stretched over the circle's bounding square, clipped to the circle.
fn photo_layer(size: PixelSize, resolved: &ResolvedLayout, photo: &Bitmap) -> PosterResult<Vec<u8>> {
    let square = resolved.photo_square();
    let (pw, ph) = (f64::from(photo.width), f64::from(photo.height));
    let transform = Affine::translate((square.x0, square.y0))
        * Affine::scale_non_uniform(square.width() / pw, square.height() / ph);
    let paint = image_paint(photo, SamplingQuality::High)?;
    let clip = resolved.photo_circle().to_path(0.1);

    let mut surface = RasterSurface::new(size)?;
    {
        let mut scope = ClipScope::push(surface.ctx(), &clip);
        scope.set_transform(affine_to_cpu(transform));
        scope.set_paint(paint);
        scope.fill_rect(&rect_to_cpu(Rect::new(0.0, 0.0, pw, ph)));
    }
    surface.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
