//! # Collage Composition
//!
//! Turns a [`CollageRequest`] into a finished [`Collage`]: a blank canvas with one
//! randomly placed, sized and rotated thumbnail per existing input.

pub mod canvas;
pub mod composer;
pub mod placement;
pub mod request;

// Re-exports for convenience
pub use canvas::Canvas;
pub use composer::{
    Collage, CollageComposer, CompositionReport, PlacedThumbnail, SkipReason, SkippedInput,
};
pub use placement::Placement;
pub use request::CollageRequest;
