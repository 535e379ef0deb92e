//! Posterkit composites a cropped portrait and a name onto a fixed poster and exports it as PNG.
//!
//! The flow mirrors a single-page poster tool:
//!
//! - Load the background poster once into a [`PosterHandle`]
//! - Upload a photo and crop it to a square with [`CropSelection`] and [`rasterize_crop`]
//! - Composite poster, photo and name with a [`PosterCompositor`]
//! - Encode with [`encode_png`] and save through an [`ExportSink`]
//!
//! [`PosterSession`] sequences all of the above as a small state machine.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod config;
mod crop;
mod export;
mod foundation;
mod render;
mod session;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{
    Affine, BezPath, Circle, DisplaySize, PixelSize, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::assets::decode::{Bitmap, decode_image, decode_image_file};
pub use crate::assets::poster::{PosterHandle, PosterState};
pub use crate::compose::compositor::PosterCompositor;
pub use crate::compose::layout::{PosterLayout, ResolvedLayout};
pub use crate::compose::style::{ShadowStyle, TextStyle};
pub use crate::config::PosterConfig;
pub use crate::crop::rasterize::rasterize_crop;
pub use crate::crop::region::{
    CropRegion, DEFAULT_CROP_FRACTION, DefaultCrop, PercentCrop, default_square_crop,
};
pub use crate::crop::selection::CropSelection;
pub use crate::export::png::{DEFAULT_EXPORT_FILE_NAME, encode_png, png_data_url};
pub use crate::export::sink::{DirectorySink, ExportSink, InMemorySink};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::SamplingQuality;
pub use crate::session::controller::{DownloadOutcome, PosterSession, UploadTicket};
pub use crate::session::state::{Screen, UiEvent, UiState};
