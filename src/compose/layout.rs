use serde::{Deserialize, Serialize};

use crate::foundation::core::{Circle, PixelSize, Point, Rect};
use crate::foundation::error::{PosterError, PosterResult};

/// Anchor points of the poster design, as fractions of the poster's natural size.
///
/// The defaults match the bundled poster artwork.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterLayout {
    /// Photo circle center x, fraction of poster width.
    pub photo_center_x: f64,
    /// Photo circle center y, fraction of poster height.
    pub photo_center_y: f64,
    /// Photo circle diameter, fraction of poster width.
    pub photo_diameter: f64,
    /// Name baseline y, fraction of poster height. The name is centered on the photo's x.
    pub name_baseline_y: f64,
}

impl Default for PosterLayout {
    fn default() -> Self {
        Self {
            photo_center_x: 212.0 / 530.0,
            photo_center_y: 0.59,
            photo_diameter: 180.0 / 490.0,
            name_baseline_y: 0.77,
        }
    }
}

impl PosterLayout {
    /// Check every fraction is finite and within `0..=1`, and the diameter is non-zero.
    pub fn validate(&self) -> PosterResult<()> {
        let fields = [
            ("photo_center_x", self.photo_center_x),
            ("photo_center_y", self.photo_center_y),
            ("photo_diameter", self.photo_diameter),
            ("name_baseline_y", self.name_baseline_y),
        ];
        for (name, v) in fields {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(PosterError::validation(format!(
                    "layout.{name} must be a fraction within 0..=1, got {v}"
                )));
            }
        }
        if self.photo_diameter <= 0.0 {
            return Err(PosterError::validation("layout.photo_diameter must be > 0"));
        }
        Ok(())
    }

    /// Absolute anchors for a poster of `poster` pixels.
    pub fn resolve(&self, poster: PixelSize) -> ResolvedLayout {
        let w = f64::from(poster.width);
        let h = f64::from(poster.height);
        let photo_center = Point::new(w * self.photo_center_x, h * self.photo_center_y);
        ResolvedLayout {
            photo_center,
            photo_diameter: w * self.photo_diameter,
            name_anchor: Point::new(photo_center.x, h * self.name_baseline_y),
        }
    }
}

/// Poster anchors in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLayout {
    /// Center of the photo circle.
    pub photo_center: Point,
    /// Diameter of the photo circle.
    pub photo_diameter: f64,
    /// Horizontal center and baseline of the name.
    pub name_anchor: Point,
}

impl ResolvedLayout {
    /// Circle the photo is clipped to.
    pub fn photo_circle(&self) -> Circle {
        Circle::new(self.photo_center, self.photo_diameter / 2.0)
    }

    /// Bounding square of the photo circle; the photo is stretched to fill it.
    pub fn photo_square(&self) -> Rect {
        let r = self.photo_diameter / 2.0;
        Rect::new(
            self.photo_center.x - r,
            self.photo_center.y - r,
            self.photo_center.x + r,
            self.photo_center.y + r,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
