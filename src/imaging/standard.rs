use std::{io::Cursor, path::Path};

use image::{
    imageops, io::Reader as ImageReader, GenericImageView, ImageFormat, ImageOutputFormat, Rgba,
    RgbImage, RgbaImage,
};
use imageproc::geometric_transformations::rotate_about_center;
use tracing::debug;

use crate::{
    config::Config,
    error::{ImagingError, Result},
    imaging::{
        backend::ImageBackend,
        types::{OutputFormat, ResizeFilter, RotationSampling},
    },
};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Image backend built on the `image` and `imageproc` crates
#[derive(Debug, Clone)]
pub struct StandardBackend {
    filter: ResizeFilter,
    sampling: RotationSampling,
    keep_aspect_ratio: bool,
    jpeg_quality: u8,
}

impl Default for StandardBackend {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl StandardBackend {
    /// Create a backend with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend from the thumbnail and output settings of `config`
    pub fn from_config(config: &Config) -> Self {
        Self {
            filter: config.thumbnail.filter,
            sampling: config.thumbnail.interpolation,
            keep_aspect_ratio: config.thumbnail.keep_aspect_ratio,
            jpeg_quality: config.output.jpeg_quality,
        }
    }

    /// Use `filter` when scaling source images
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Fit thumbnails inside their box instead of stretching them
    pub fn with_keep_aspect_ratio(mut self, keep: bool) -> Self {
        self.keep_aspect_ratio = keep;
        self
    }
}

impl ImageBackend for StandardBackend {
    fn name(&self) -> &str {
        "standard"
    }

    fn decode(&self, path: &Path) -> Result<RgbaImage> {
        let decode_failed = |reason: String| ImagingError::DecodeFailed {
            path: path.display().to_string(),
            reason,
        };

        // Sniff the header instead of trusting the extension
        let image = ImageReader::open(path)
            .map_err(|e| decode_failed(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| decode_failed(e.to_string()))?
            .decode()
            .map_err(|e| decode_failed(e.to_string()))?;

        let (width, height) = image.dimensions();
        debug!("Decoded {:?}: {}x{}", path, width, height);
        Ok(image.into_rgba8())
    }

    fn resize(&self, image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
        let (width, height) = if self.keep_aspect_ratio {
            fit_within(image.width(), image.height(), width, height)
        } else {
            (width.max(1), height.max(1))
        };

        imageops::resize(image, width, height, self.filter.into())
    }

    fn rotate(&self, image: &RgbaImage, degrees: f64) -> RgbaImage {
        let degrees = degrees.rem_euclid(360.0);
        if degrees == 0.0 {
            return image.clone();
        }

        let (width, height) = (image.width(), image.height());
        let (bound_width, bound_height) = rotated_bounds(width, height, degrees);

        // The work area has to hold both the source and the rotated result,
        // otherwise one of them gets clipped before or after the rotation.
        let work_width = width.max(bound_width);
        let work_height = height.max(bound_height);

        let mut work = RgbaImage::from_pixel(work_width, work_height, TRANSPARENT);
        imageops::replace(
            &mut work,
            image,
            (work_width - width) as i64 / 2,
            (work_height - height) as i64 / 2,
        );

        let rotated = rotate_about_center(
            &work,
            degrees.to_radians() as f32,
            self.sampling.into(),
            TRANSPARENT,
        );

        if (work_width, work_height) == (bound_width, bound_height) {
            return rotated;
        }

        imageops::crop_imm(
            &rotated,
            (work_width - bound_width) / 2,
            (work_height - bound_height) / 2,
            bound_width,
            bound_height,
        )
        .to_image()
    }

    fn encode(&self, image: &RgbImage, format: OutputFormat, path: &Path) -> Result<()> {
        let write_failed = |reason: String| ImagingError::OutputWriteFailed {
            path: path.display().to_string(),
            reason,
        };

        let output_format = match format {
            OutputFormat::Jpeg => ImageOutputFormat::Jpeg(self.jpeg_quality),
            _ => ImageFormat::from(format).into(),
        };

        // Encode fully in memory so a failed encode never leaves a partial file
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), output_format)
            .map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(path, &bytes).map_err(|e| write_failed(e.to_string()))?;

        debug!("Encoded {}x{} {} to {:?}", image.width(), image.height(), format.name(), path);
        Ok(())
    }
}

/// Size of the axis-aligned box holding a `width` x `height` rectangle rotated by `degrees`
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let (width, height) = (width as f64, height as f64);

    let bound_width = (width * cos + height * sin).round() as u32;
    let bound_height = (width * sin + height * cos).round() as u32;

    (bound_width.max(1), bound_height.max(1))
}

/// Largest size with the source's aspect ratio that fits the target box
fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (max_width.max(1), max_height.max(1));
    }

    let ratio = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );

    let fitted_width = (width as f64 * ratio).round() as u32;
    let fitted_height = (height as f64 * ratio).round() as u32;

    (fitted_width.clamp(1, max_width.max(1)), fitted_height.clamp(1, max_height.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_resize_to_exact_box() {
        let backend = StandardBackend::new();
        let resized = backend.resize(&solid(64, 32, [255, 0, 0, 255]), 10, 30);
        assert_eq!(resized.dimensions(), (10, 30));
    }

    #[test]
    fn test_resize_keeping_aspect_ratio() {
        let backend = StandardBackend::new().with_keep_aspect_ratio(true);
        let resized = backend.resize(&solid(64, 32, [255, 0, 0, 255]), 16, 16);
        assert_eq!(resized.dimensions(), (16, 8));
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let backend = StandardBackend::new();
        let image = solid(7, 3, [1, 2, 3, 255]);

        assert_eq!(backend.rotate(&image, 0.0), image);
        assert_eq!(backend.rotate(&image, 360.0), image);
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let backend = StandardBackend::new();
        let rotated = backend.rotate(&solid(40, 10, [0, 255, 0, 255]), 90.0);
        assert_eq!(rotated.dimensions(), (10, 40));
    }

    #[test]
    fn test_rotation_grows_bounds_with_transparent_corners() {
        let backend = StandardBackend::new();
        let rotated = backend.rotate(&solid(20, 20, [0, 0, 255, 255]), 45.0);

        assert_eq!(rotated.dimensions(), (28, 28));
        assert_eq!(rotated.get_pixel(0, 0)[3], 0);
        let center = rotated.get_pixel(14, 14);
        assert!(center[2] > 200 && center[3] > 200);
    }

    #[test]
    fn test_rotated_bounds() {
        assert_eq!(rotated_bounds(30, 10, 0.0), (30, 10));
        assert_eq!(rotated_bounds(30, 10, 180.0), (30, 10));
        assert_eq!(rotated_bounds(30, 10, 270.0), (10, 30));
        assert_eq!(rotated_bounds(10, 10, 45.0), (14, 14));
    }

    #[test]
    fn test_decode_missing_file_fails() {
        let backend = StandardBackend::new();
        let result = backend.decode(Path::new("definitely/not/here.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        let err = StandardBackend::new().decode(&path).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_encode_then_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let backend = StandardBackend::new();

        let image = RgbImage::from_pixel(5, 4, image::Rgb([9, 8, 7]));
        backend.encode(&image, OutputFormat::Png, &path).unwrap();

        let decoded = backend.decode(&path).unwrap();
        assert_eq!(decoded.dimensions(), (5, 4));
        assert_eq!(decoded.get_pixel(2, 2), &Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn test_encode_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let backend = StandardBackend::new();

        let image = RgbImage::from_pixel(16, 16, image::Rgb([200, 10, 10]));
        backend.encode(&image, OutputFormat::Jpeg, &path).unwrap();

        assert_eq!(backend.decode(&path).unwrap().dimensions(), (16, 16));
    }

    #[test]
    fn test_failed_jpeg_write_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let missing_dir = dir.path().join("missing");
        let path = missing_dir.join("out.jpg");

        let image = RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3]));
        let err = StandardBackend::new()
            .encode(&image, OutputFormat::Jpeg, &path)
            .unwrap_err();

        assert!(err.is_output_failure());
        assert!(!path.exists());
        assert!(!missing_dir.exists());
    }

    #[test]
    fn test_builders_apply_settings() {
        let mut config = Config::default();
        config.thumbnail.keep_aspect_ratio = true;

        let fitted = StandardBackend::from_config(&config)
            .with_filter(ResizeFilter::Nearest)
            .resize(&solid(40, 10, [5, 5, 5, 255]), 20, 20);
        assert_eq!(fitted.dimensions(), (20, 5));

        let stretched = StandardBackend::from_config(&config)
            .with_keep_aspect_ratio(false)
            .resize(&solid(40, 10, [5, 5, 5, 255]), 20, 20);
        assert_eq!(stretched.dimensions(), (20, 20));
    }

    #[test]
    fn test_encode_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        let image = RgbImage::new(2, 2);
        let err = StandardBackend::new()
            .encode(&image, OutputFormat::Png, &path)
            .unwrap_err();

        assert!(err.is_output_failure());
    }
}
