use rand::Rng;

/// Where and how one thumbnail lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Thumbnail width before rotation
    pub width: u32,

    /// Thumbnail height before rotation
    pub height: u32,

    /// Left edge of the rotated thumbnail, may be negative
    pub x: i64,

    /// Top edge of the rotated thumbnail, may be negative
    pub y: i64,

    /// Clockwise rotation in degrees, in `[0, 360)`
    pub angle: f64,
}

impl Placement {
    /// Draw a random placement for a `canvas_width` x `canvas_height` canvas
    ///
    /// The thumbnail height is offset by an eighth of the canvas *width*, not
    /// of its height.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, canvas_width: u32, canvas_height: u32) -> Self {
        let width = (below(rng, canvas_width / 2) + canvas_width / 8).max(1);
        let height = (below(rng, canvas_height / 2) + canvas_width / 8).max(1);

        let x = i64::from(below(rng, canvas_width)) - i64::from(width / 2);
        let y = i64::from(below(rng, canvas_height)) - i64::from(height / 2);

        let angle = rng.gen_range(0.0..360.0);

        Self { width, height, x, y, angle }
    }
}

/// Uniform integer in `[0, bound)`, or 0 for an empty range
fn below<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}
