use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{PosterError, PosterResult};

/// Destination for exported PNG files.
pub trait ExportSink {
    /// Persist `png` under `file_name` and return where it went.
    fn save(&mut self, file_name: &str, png: &[u8]) -> PosterResult<PathBuf>;
}

/// Writes exports into a directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySink {
    /// Sink writing into `dir` (created on first save), replacing existing files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
        }
    }

    /// Refuse to replace a file that already exists when `overwrite` is false.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, file_name: &str, png: &[u8]) -> PosterResult<PathBuf> {
        validate_file_name(file_name)?;
        let path = self.dir.join(file_name);
        if !self.overwrite && path.exists() {
            return Err(PosterError::validation(format!(
                "refusing to overwrite '{}'",
                path.display()
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = png.len(), "export saved");
        Ok(path)
    }
}

/// Keeps exports in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    saved: Vec<(String, Vec<u8>)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves in call order, as `(file_name, png_bytes)`.
    pub fn saved(&self) -> &[(String, Vec<u8>)] {
        &self.saved
    }
}

impl ExportSink for InMemorySink {
    fn save(&mut self, file_name: &str, png: &[u8]) -> PosterResult<PathBuf> {
        validate_file_name(file_name)?;
        self.saved.push((file_name.to_owned(), png.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}

/// A bare file name: non-empty, no separators, not `.`/`..`.
pub(crate) fn validate_file_name(file_name: &str) -> PosterResult<()> {
    let bad = file_name.trim().is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\']);
    if bad {
        return Err(PosterError::validation(format!(
            "export file name must be a bare file name, got '{file_name}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
