use std::path::Path;

use image::{RgbImage, RgbaImage};

use crate::{error::Result, imaging::types::OutputFormat};

/// Image capabilities the collage composer relies on
///
/// The composer never touches codecs or resampling directly. Everything goes
/// through this trait so that tests (or alternative pipelines) can substitute
/// their own implementation.
pub trait ImageBackend {
    /// Returns a short name for logging
    fn name(&self) -> &str;

    /// Check whether `path` refers to something that exists on disk
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Decode the image at `path` into RGBA
    fn decode(&self, path: &Path) -> Result<RgbaImage>;

    /// Scale `image` to the `width` x `height` box
    fn resize(&self, image: &RgbaImage, width: u32, height: u32) -> RgbaImage;

    /// Rotate `image` clockwise by `degrees` about its center
    ///
    /// The result may be larger than the input so the rotated corners fit.
    /// Pixels outside the rotated source are fully transparent.
    fn rotate(&self, image: &RgbaImage, degrees: f64) -> RgbaImage;

    /// Encode `image` to `path` in the given format
    fn encode(&self, image: &RgbImage, format: OutputFormat, path: &Path) -> Result<()>;

    /// Decode, resize, then rotate: the full thumbnail pipeline for one input
    fn thumbnail(&self, path: &Path, width: u32, height: u32, degrees: f64) -> Result<RgbaImage> {
        let source = self.decode(path)?;
        let resized = self.resize(&source, width, height);
        Ok(self.rotate(&resized, degrees))
    }
}
