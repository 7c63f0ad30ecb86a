//! Contains the Canvas struct, which describes a relationship between
//! a square of pixels centered on 0,0 and a window onto the complex
//! plane, and between those same pixels and the linear offsets of an
//! image buffer.
use itertools::{iproduct, Product};
use num::Complex;
use std::ops::Range;

/// Describes the x, y of a pixel measured from the center of the
/// canvas.  Both components run over `-half_width..half_width`, and y
/// grows upwards, as it does on the complex plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub i64, pub i64);

/// Contains the definitions of two planes: a square integral plane
/// `2 * half_width` pixels on a side, centered on the origin, and the
/// window of the complex plane it samples.  Maps points from one to
/// the other.
#[derive(Copy, Clone, Debug)]
pub struct Canvas {
    half_width: i64,
    // The width of a single pixel on the complex plane.
    unit: f64,
    offset: Complex<f64>,
}

impl Canvas {
    /// Constructor.  `scale` is the width of the complex window mapped
    /// onto `half_width` pixels; `offset` moves that window around.
    pub fn new(half_width: usize, scale: f64, offset: Complex<f64>) -> Canvas {
        Canvas {
            half_width: half_width as i64,
            unit: scale / (half_width as f64),
            offset,
        }
    }

    /// The distance, in pixels, from the center to an edge.
    pub fn half_width(&self) -> usize {
        self.half_width as usize
    }

    /// The number of pixels on a side.
    pub fn side(&self) -> usize {
        2 * self.half_width()
    }

    /// The total number of pixels on the canvas.  Used to calculate
    /// memory needs.
    pub fn len(&self) -> usize {
        self.side() * self.side()
    }

    /// Describes that the canvas is of a size.
    pub fn is_empty(&self) -> bool {
        self.half_width == 0
    }

    /// Every pixel on the canvas, column by column.
    pub fn pixels(&self) -> Pixels {
        let w = self.half_width;
        Pixels(iproduct!(-w..w, -w..w))
    }

    /// Given a pixel, the point on the complex plane it samples:
    /// `(x + iy) * (scale / half_width) + offset`.
    pub fn pixel_to_point(&self, pixel: Pixel) -> Complex<f64> {
        Complex::new(pixel.0 as f64, pixel.1 as f64) * self.unit + self.offset
    }

    /// The linear offset of a pixel in the image buffer.  The row is
    /// counted down from the top, `half_width - y`, and the column
    /// across from the left, `x + half_width`, on a `2 * half_width`
    /// stride; the result is taken modulo the buffer length.
    ///
    /// The row of the top edge, `y = half_width - 1`, is 1, and the
    /// row of the bottom edge, `y = -half_width`, is `2 * half_width`,
    /// which wraps around to 0.  The rows are therefore a rotation of
    /// `0..2 * half_width` and every pixel on the canvas lands on its
    /// own cell: the bottom row of the image is written first.
    pub fn pixel_to_offset(&self, pixel: Pixel) -> usize {
        let side = 2 * self.half_width;
        let column = pixel.0 + self.half_width;
        let row = self.half_width - pixel.1;
        (row * side + column).rem_euclid(side * side) as usize
    }
}

/// An iterator over every pixel of a canvas.
pub struct Pixels(Product<Range<i64>, Range<i64>>);

impl Iterator for Pixels {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        self.0.next().map(|(x, y)| Pixel(x, y))
    }
}
