use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    collage::{canvas::Canvas, placement::Placement, request::CollageRequest},
    config::Config,
    error::{CollageError, ImagingError, InputError, Result},
    imaging::{ImageBackend, OutputFormat, StandardBackend},
};

const WHITE: [u8; 3] = [255, 255, 255];

/// An input that made it onto the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedThumbnail {
    pub path: PathBuf,
    pub placement: Placement,
}

/// Why an input was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
    Unreadable(String),
}

/// An input that was left out of the collage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInput {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// What happened to each input during one composition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositionReport {
    pub placed: Vec<PlacedThumbnail>,
    pub skipped: Vec<SkippedInput>,
}

/// A finished collage and the record of how it was built
#[derive(Debug, Clone)]
pub struct Collage {
    pub canvas: Canvas,
    pub report: CompositionReport,
}

/// Draws randomly placed, sized and rotated thumbnails onto a blank canvas
///
/// Inputs are processed strictly in order, so later thumbnails cover earlier
/// ones. Missing inputs are reported and skipped; they never fail the run.
pub struct CollageComposer<B = StandardBackend> {
    backend: B,
    background: [u8; 3],
    skip_unreadable: bool,
}

impl CollageComposer<StandardBackend> {
    /// Create a composer using the standard backend configured from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(StandardBackend::from_config(config))
            .with_background(config.canvas.background)
            .with_skip_unreadable(config.skip_unreadable)
    }
}

impl<B: ImageBackend> CollageComposer<B> {
    /// Create a composer drawing on white with the given backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            background: WHITE,
            skip_unreadable: false,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    /// Skip inputs that exist but cannot be decoded instead of failing
    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Compose the inputs of `request`
    pub fn compose_request<R: Rng + ?Sized>(
        &self,
        request: &CollageRequest,
        rng: &mut R,
    ) -> Result<Collage> {
        self.compose(request.input_paths(), request.width(), request.height(), rng)
    }

    /// Compose a `width` x `height` collage from `inputs`
    ///
    /// # Arguments
    ///
    /// * `inputs` - Image paths, drawn in order
    /// * `width`, `height` - Canvas size in pixels, both non-zero
    /// * `rng` - Source of every placement decision
    pub fn compose<P, R>(&self, inputs: &[P], width: u32, height: u32, rng: &mut R) -> Result<Collage>
    where
        P: AsRef<Path>,
        R: Rng + ?Sized,
    {
        if width == 0 || height == 0 {
            return Err(InputError::InvalidDimensions { width, height }.into());
        }

        info!("Composing {}x{} collage from {} inputs", width, height, inputs.len());
        debug!("Using {} image backend", self.backend.name());

        let mut canvas = Canvas::new_filled(width, height, self.background);
        let mut report = CompositionReport::default();

        for input in inputs {
            let path = input.as_ref();

            if !self.backend.exists(path) {
                let missing = missing_input(path);
                warn!("{}", missing.user_message());
                report.skipped.push(SkippedInput {
                    path: path.to_path_buf(),
                    reason: SkipReason::Missing,
                });
                continue;
            }

            let placement = Placement::random(rng, width, height);
            debug!(
                "Placing {:?}: {}x{} at ({}, {}) rotated {:.1} degrees",
                path, placement.width, placement.height, placement.x, placement.y, placement.angle
            );

            let thumbnail = match self.backend.thumbnail(
                path,
                placement.width,
                placement.height,
                placement.angle,
            ) {
                Ok(thumbnail) => thumbnail,
                Err(CollageError::Imaging(ImagingError::DecodeFailed { reason, .. }))
                    if self.skip_unreadable =>
                {
                    warn!("Could not read {}: {}. Skipping", display_name(path), reason);
                    report.skipped.push(SkippedInput {
                        path: path.to_path_buf(),
                        reason: SkipReason::Unreadable(reason),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            canvas.draw(&thumbnail, placement.x, placement.y);
            report.placed.push(PlacedThumbnail {
                path: path.to_path_buf(),
                placement,
            });
        }

        info!(
            "Collage done: {} placed, {} skipped",
            report.placed.len(),
            report.skipped.len()
        );

        Ok(Collage { canvas, report })
    }

    /// Encode `collage` to `path`
    pub fn write<P: AsRef<Path>>(&self, collage: &Collage, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        self.backend.encode(&collage.canvas.to_rgb(), format, path)?;

        info!("Collage written to {:?} as {}", path, format.name());
        Ok(())
    }
}

/// The error a missing input is reported as before it is skipped
fn missing_input(path: &Path) -> CollageError {
    InputError::MissingFile { path: display_name(path) }.into()
}

/// File name for diagnostics, falling back to the whole path
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
