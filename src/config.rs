use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compose::layout::PosterLayout;
use crate::compose::style::TextStyle;
use crate::export::png::DEFAULT_EXPORT_FILE_NAME;
use crate::export::sink::validate_file_name;
use crate::foundation::error::{PosterError, PosterResult};

/// Tool configuration, usually read from a JSON file.
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterConfig {
    /// Background poster image.
    pub poster: Option<PathBuf>,
    /// Name downloads are saved under.
    pub export_file_name: String,
    /// Output pixels per displayed pixel when rasterizing a crop.
    pub device_pixel_ratio: f64,
    /// Maximum displayed width of the crop preview; wider photos are scaled down to fit.
    pub preview_max_width: Option<f64>,
    /// Anchor points on the poster.
    pub layout: PosterLayout,
    /// Name text style.
    pub text: TextStyle,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            poster: None,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            device_pixel_ratio: 1.0,
            preview_max_width: None,
            layout: PosterLayout::default(),
            text: TextStyle::default(),
        }
    }
}

impl PosterConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PosterResult<Self> {
        serde_json::from_reader(r).map_err(|e| PosterError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration file. Relative `poster` and `text.font_path` entries are resolved
    /// against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PosterError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let Some(root) = path.parent() {
            cfg.resolve_relative_to(root);
        }
        Ok(cfg)
    }

    /// Check value ranges of every section.
    pub fn validate(&self) -> PosterResult<()> {
        validate_file_name(&self.export_file_name)?;
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(PosterError::validation(
                "device_pixel_ratio must be finite and > 0",
            ));
        }
        if let Some(w) = self.preview_max_width
            && (!w.is_finite() || w <= 0.0)
        {
            return Err(PosterError::validation(
                "preview_max_width must be finite and > 0",
            ));
        }
        self.layout.validate()?;
        self.text.validate()
    }

    fn resolve_relative_to(&mut self, root: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        if let Some(p) = self.poster.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.text.font_path.as_mut() {
            resolve(p);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
