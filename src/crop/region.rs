use crate::foundation::core::{DisplaySize, Rect};

/// Fraction of the shorter displayed side covered by the default square selection.
pub const DEFAULT_CROP_FRACTION: f64 = 0.9;

/// Rectangle in displayed-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl CropRegion {
    /// Build a region from its origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square region with its top-left corner at `(x, y)`.
    pub fn square(x: f64, y: f64, side: f64) -> Self {
        Self::new(x, y, side, side)
    }

    /// Return `true` when the region has no usable area or non-finite coordinates.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        !finite || self.width <= 0.0 || self.height <= 0.0
    }

    /// Return `true` when the region lies inside `display` (with a small tolerance).
    pub fn is_within(&self, display: DisplaySize) -> bool {
        const EPS: f64 = 1e-6;
        self.x >= -EPS
            && self.y >= -EPS
            && self.x + self.width <= display.width + EPS
            && self.y + self.height <= display.height + EPS
    }

    /// The region as a `kurbo` rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Express this region in percent units of `display`.
    pub fn to_percent(&self, display: DisplaySize) -> PercentCrop {
        PercentCrop {
            x: self.x / display.width * 100.0,
            y: self.y / display.height * 100.0,
            width: self.width / display.width * 100.0,
            height: self.height / display.height * 100.0,
        }
    }
}

/// Rectangle in percent units (`0..=100`) of the displayed image, independent of display size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PercentCrop {
    /// Left edge, percent of displayed width.
    pub x: f64,
    /// Top edge, percent of displayed height.
    pub y: f64,
    /// Width, percent of displayed width.
    pub width: f64,
    /// Height, percent of displayed height.
    pub height: f64,
}

impl PercentCrop {
    /// Resolve to displayed-pixel coordinates.
    pub fn to_pixels(&self, display: DisplaySize) -> CropRegion {
        CropRegion {
            x: self.x * display.width / 100.0,
            y: self.y * display.height / 100.0,
            width: self.width * display.width / 100.0,
            height: self.height * display.height / 100.0,
        }
    }
}

/// Default selection shown when a photo is opened for cropping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefaultCrop {
    /// Selection in percent units.
    pub percent: PercentCrop,
    /// Selection in displayed pixels.
    pub pixels: CropRegion,
}

/// Centered 1:1 square covering [`DEFAULT_CROP_FRACTION`] of the shorter displayed side.
pub fn default_square_crop(display: DisplaySize) -> DefaultCrop {
    let side = DEFAULT_CROP_FRACTION * display.width.min(display.height);
    let pixels = CropRegion::square(
        (display.width - side) / 2.0,
        (display.height - side) / 2.0,
        side,
    );
    DefaultCrop {
        percent: pixels.to_percent(display),
        pixels,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/region.rs"]
mod tests;
