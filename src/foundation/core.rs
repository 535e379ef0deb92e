use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};

/// Pixel dimensions of a decoded bitmap or an output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Create a size, rejecting zero-area dimensions.
    pub fn new(width: u32, height: u32) -> PosterResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterError::validation(format!(
                "pixel size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// The size as floating-point display dimensions (1 pixel = 1 display unit).
    pub fn as_display(self) -> DisplaySize {
        DisplaySize {
            width: f64::from(self.width),
            height: f64::from(self.height),
        }
    }

    /// Return `(width, height)` as `u16`, the limit of the CPU raster backend.
    pub(crate) fn to_u16(self) -> PosterResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| PosterError::render(format!("surface width {} exceeds u16", self.width)))?;
        let h: u16 = self.height.try_into().map_err(|_| {
            PosterError::render(format!("surface height {} exceeds u16", self.height))
        })?;
        Ok((w, h))
    }
}

/// Rendered (on-screen) size of a previewed image, possibly scaled from its natural size.
///
/// Crop selections are expressed in this coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplaySize {
    /// Displayed width.
    pub width: f64,
    /// Displayed height.
    pub height: f64,
}

impl DisplaySize {
    /// Return `true` when both dimensions are finite and strictly positive.
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Display size for `natural` constrained to `max_width`, preserving aspect ratio.
    ///
    /// Images narrower than `max_width` are shown at natural size.
    pub fn fit_width(natural: PixelSize, max_width: Option<f64>) -> Self {
        let nat = natural.as_display();
        match max_width {
            Some(max) if max.is_finite() && max > 0.0 && nat.width > max => Self {
                width: max,
                height: nat.height * (max / nat.width),
            },
            _ => nat,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
