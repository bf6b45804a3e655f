use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

/// The raster a collage is drawn onto
///
/// Dimensions are fixed at creation. Thumbnails are composited with
/// source-over alpha and anything falling outside the canvas is clipped.
#[derive(Clone, Debug)]
pub struct Canvas {
    buffer: RgbaImage,
}

impl Canvas {
    /// Create a canvas of the given dimensions filled with `background`
    ///
    /// A canvas with a zero side is empty and has nothing to fill.
    pub fn new_filled(width: u32, height: u32, background: [u8; 3]) -> Self {
        let mut buffer = RgbaImage::new(width, height);
        if width == 0 || height == 0 {
            return Self { buffer };
        }

        let [r, g, b] = background;

        draw_filled_rect_mut(
            &mut buffer,
            Rect::at(0, 0).of_size(width, height),
            Rgba([r, g, b, 255]),
        );

        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let pixel = self.buffer.get_pixel(x, y);
        [pixel[0], pixel[1], pixel[2]]
    }

    /// Composite `image` with its top-left corner at (`x`, `y`)
    pub fn draw(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.buffer, image, x, y);
    }

    /// Check whether every pixel has the given color
    pub fn is_filled_with(&self, color: [u8; 3]) -> bool {
        self.buffer
            .pixels()
            .all(|pixel| [pixel[0], pixel[1], pixel[2]] == color)
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Flatten to opaque RGB for encoding
    pub fn to_rgb(&self) -> RgbImage {
        DynamicImage::ImageRgba8(self.buffer.clone()).into_rgb8()
    }
}
