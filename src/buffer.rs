// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel buffer.  Pixels are computed in whatever order the
//! renderer likes and dropped into the cell `Canvas::pixel_to_offset`
//! picks for them; the buffer is then read once, front to back, when
//! it is written out as a plain-text PPM.

use color::Rgb;
use planes::{Canvas, Pixel};
use std::io::{self, Write};

/// A square buffer of colors, owned by a single render.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    canvas: Canvas,
    cells: Vec<Option<Rgb>>,
}

impl PixelBuffer {
    /// An empty buffer sized for the canvas, `4 * half_width^2` cells.
    pub fn new(canvas: Canvas) -> PixelBuffer {
        PixelBuffer {
            canvas,
            cells: vec![None; canvas.len()],
        }
    }

    /// The number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Describes that the buffer has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The canvas this buffer was sized for.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Store the color of a pixel.
    pub fn set(&mut self, pixel: Pixel, color: Rgb) {
        let offset = self.canvas.pixel_to_offset(pixel);
        self.cells[offset] = Some(color);
    }

    /// The color stored for a pixel, if it has been painted.
    pub fn get(&self, pixel: Pixel) -> Option<Rgb> {
        self.cells[self.canvas.pixel_to_offset(pixel)]
    }

    /// The cells in buffer order.
    pub fn cells(&self) -> &[Option<Rgb>] {
        &self.cells
    }

    /// How many cells have not been painted.
    pub fn unset(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Write the buffer as a plain-text (`P3`) PPM.  Each color is
    /// followed by a single space, and a line break follows every
    /// `half_width`-th color, so one image row spans two lines.
    /// Unpainted cells are written as `Rgb::FALLBACK`.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let side = self.canvas.side();
        let period = self.canvas.half_width();
        let unset = self.unset();
        if unset > 0 {
            warn!("{} of {} pixels were never painted", unset, self.len());
        }
        write!(out, "P3\n{} {}\n255\n", side, side)?;
        for (i, cell) in self.cells.iter().enumerate() {
            write!(out, "{} ", cell.unwrap_or(Rgb::FALLBACK))?;
            if (i + 1) % period == 0 {
                writeln!(out)?;
            }
        }
        out.flush()
    }
}
