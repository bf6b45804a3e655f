//! # Collage
//!
//! Compose a random collage from a set of images: every input is shrunk to a
//! random size, rotated by a random angle and dropped at a random position on a
//! blank canvas.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collage::{CollageComposer, CollageRequest, Config, OutputFormat};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! # fn main() -> collage::Result<()> {
//! let config = Config::default();
//! let composer = CollageComposer::from_config(&config);
//!
//! let request = CollageRequest::new("collage.png", 800, 600, ["cat.jpg", "dog.png"])?;
//! let mut rng = SmallRng::seed_from_u64(42);
//!
//! let collage = composer.compose_request(&request, &mut rng)?;
//! composer.write(&collage, request.output_path(), OutputFormat::Png)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`collage`] - Canvas, random placement and the composer itself
//! - [`imaging`] - Decode/resize/rotate/encode behind the [`ImageBackend`] trait
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! ## Custom Backends
//!
//! Anything implementing [`ImageBackend`] can stand in for the standard one:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use collage::{ImageBackend, OutputFormat, Result};
//! use image::{RgbImage, RgbaImage};
//!
//! struct Placeholder;
//!
//! impl ImageBackend for Placeholder {
//!     fn name(&self) -> &str {
//!         "placeholder"
//!     }
//!
//!     fn decode(&self, _path: &Path) -> Result<RgbaImage> {
//!         Ok(RgbaImage::new(64, 64))
//!     }
//!
//!     fn resize(&self, _image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
//!         RgbaImage::new(width, height)
//!     }
//!
//!     fn rotate(&self, image: &RgbaImage, _degrees: f64) -> RgbaImage {
//!         image.clone()
//!     }
//!
//!     fn encode(&self, image: &RgbImage, _format: OutputFormat, path: &Path) -> Result<()> {
//!         image.save(path).map_err(|e| collage::CollageError::generic(e.to_string()))
//!     }
//! }
//! ```

pub mod collage;
pub mod config;
pub mod error;
pub mod imaging;

// Re-export commonly used types for convenience
pub use crate::{
    collage::{Collage, CollageComposer, CollageRequest, CompositionReport, Placement},
    config::Config,
    error::{CollageError, Result},
    imaging::{ImageBackend, OutputFormat, StandardBackend},
};
