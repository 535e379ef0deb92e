use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;
use crate::foundation::error::{PosterError, PosterResult};

/// How the entered name is drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f32,
    /// Use the bold weight.
    pub bold: bool,
    /// Fill color.
    pub color: Rgba8,
    /// Family name or generic family used when no `font_path` is given.
    pub family: String,
    /// Font file to use instead of a system family.
    pub font_path: Option<PathBuf>,
    /// Drop shadow drawn under the fill; `null` disables it.
    pub shadow: Option<ShadowStyle>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size_px: 106.0,
            bold: true,
            color: Rgba8::WHITE,
            family: "sans-serif".to_owned(),
            font_path: None,
            shadow: Some(ShadowStyle::default()),
        }
    }
}

impl TextStyle {
    /// Check sizes and shadow parameters.
    pub fn validate(&self) -> PosterResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(PosterError::validation("text.size_px must be finite and > 0"));
        }
        if self.font_path.is_none() && self.family.trim().is_empty() {
            return Err(PosterError::validation(
                "text.family must be non-empty when text.font_path is not set",
            ));
        }
        if let Some(shadow) = &self.shadow {
            shadow.validate()?;
        }
        Ok(())
    }
}

/// Soft drop shadow, modelled on 2D-canvas `shadow*` properties.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowStyle {
    /// Shadow color.
    pub color: Rgba8,
    /// Blur amount (canvas `shadowBlur`).
    pub blur: f32,
    /// Horizontal offset in pixels.
    pub offset_x: f32,
    /// Vertical offset in pixels.
    pub offset_y: f32,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::rgba(0, 0, 0, 128),
            blur: 4.0,
            offset_x: 2.0,
            offset_y: 2.0,
        }
    }
}

impl ShadowStyle {
    fn validate(&self) -> PosterResult<()> {
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(PosterError::validation("text.shadow.blur must be finite and >= 0"));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(PosterError::validation("text.shadow offsets must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/style.rs"]
mod tests;
