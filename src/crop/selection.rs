use crate::crop::region::{CropRegion, default_square_crop};
use crate::foundation::core::DisplaySize;

/// Headless model of the 1:1 crop selector shown over the preview.
///
/// Tracks the selection being dragged and the last completed one. Regions are constrained the
/// way the on-screen selector constrains them: square, and clamped inside the displayed image.
#[derive(Clone, Debug, PartialEq)]
pub struct CropSelection {
    display: DisplaySize,
    in_progress: Option<CropRegion>,
    completed: Option<CropRegion>,
}

impl CropSelection {
    /// Empty selection over an image displayed at `display`.
    pub fn new(display: DisplaySize) -> Self {
        Self {
            display,
            in_progress: None,
            completed: None,
        }
    }

    /// Selection initialized with the centered default square, already completed.
    pub fn with_default(display: DisplaySize) -> Self {
        let region = default_square_crop(display).pixels;
        Self {
            display,
            in_progress: Some(region),
            completed: Some(region),
        }
    }

    /// Displayed size of the image under the selector.
    pub fn display(&self) -> DisplaySize {
        self.display
    }

    /// Region currently being dragged, if any.
    pub fn in_progress(&self) -> Option<CropRegion> {
        self.in_progress
    }

    /// Last completed region, if any.
    pub fn completed(&self) -> Option<CropRegion> {
        self.completed
    }

    /// Record an in-progress drag.
    pub fn update(&mut self, region: CropRegion) {
        self.in_progress = Some(self.constrain(region));
    }

    /// Record a finished drag; it becomes both the in-progress and the completed region.
    pub fn complete(&mut self, region: CropRegion) {
        let region = self.constrain(region);
        self.in_progress = Some(region);
        self.completed = Some(region);
    }

    /// Forget both regions.
    pub fn clear(&mut self) {
        self.in_progress = None;
        self.completed = None;
    }

    /// Square `region` (shorter side wins) and clamp it inside the displayed bounds.
    pub fn constrain(&self, region: CropRegion) -> CropRegion {
        if region.is_degenerate() || !self.display.is_valid() {
            return region;
        }
        let max_side = self.display.width.min(self.display.height);
        let side = region.width.min(region.height).min(max_side);
        let x = region.x.clamp(0.0, self.display.width - side);
        let y = region.y.clamp(0.0, self.display.height - side);
        CropRegion::square(x, y, side)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/selection.rs"]
mod tests;
