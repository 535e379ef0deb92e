use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::foundation::error::{PosterError, PosterResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Where the glyphs for a text layout come from.
#[derive(Clone, Copy, Debug)]
pub(crate) enum FontSource<'a> {
    /// Raw font file bytes, registered into the font collection on use.
    Bytes(&'a [u8]),
    /// A family name or CSS generic family (`sans-serif`, `serif`, ...) resolved from system fonts.
    Family(&'a str),
}

/// Extent and first baseline of a laid-out line, in layout space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LineExtent {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) baseline: f32,
}

/// Stateful helper for building single-line Parley layouts.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: HashMap<u64, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine").finish_non_exhaustive()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Shape and lay out `text` on a single line (no wrapping).
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: FontSource<'_>,
        size_px: f32,
        bold: bool,
        brush: TextBrushRgba8,
    ) -> PosterResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = match font {
            FontSource::Bytes(bytes) => self.register_font(bytes)?,
            FontSource::Family(name) => {
                if name.trim().is_empty() {
                    return Err(PosterError::validation("font family must be non-empty"));
                }
                name.to_owned()
            }
        };

        let weight = if bold {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Family name for `bytes`, registering them into the collection the first time they are seen.
    fn register_font(&mut self, bytes: &[u8]) -> PosterResult<String> {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        let key = hasher.finish();
        if let Some(name) = self.registered.get(&key) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PosterError::validation("no font families registered from font bytes"))?;

        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PosterError::validation("registered font family has no name"))?
            .to_string();
        self.registered.insert(key, name.clone());
        Ok(name)
    }
}

/// Size and first-line baseline of `layout`, or `None` when it produced no lines.
pub(crate) fn line_extent(layout: &parley::Layout<TextBrushRgba8>) -> Option<LineExtent> {
    let first = layout.lines().next()?;
    Some(LineExtent {
        width: layout.width(),
        height: layout.height(),
        baseline: first.metrics().baseline,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
