//! # Imaging
//!
//! Decoding, resampling, rotation and encoding behind the [`ImageBackend`] trait.
//! [`StandardBackend`] is the implementation used by the command-line tool.

pub mod backend;
pub mod standard;
pub mod types;

pub use backend::ImageBackend;
pub use standard::{rotated_bounds, StandardBackend};
pub use types::{OutputFormat, ResizeFilter, RotationSampling};
