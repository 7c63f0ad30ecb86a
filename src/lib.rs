#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time and orbit-trap fractal renderer
//!
//! The Mandelbrot set, the Julia sets, and Newton's fractals are all
//! drawn the same way: take a pixel, map it to a point on the complex
//! plane, and feed that point through some function over and over.
//! How quickly the result runs away to infinity (escape time), or how
//! closely it brushes past some shape on the plane (orbit trap),
//! decides the color of the pixel.
//!
//! Everything about the drawing is a parameter of a `Fractal`: the
//! size of the image, the window onto the plane, the function being
//! iterated, the colors, a warp applied to the starting angle of each
//! point, and the trap.  A `Movie` interpolates those parameters from
//! frame to frame to produce an animation, one image per frame.

extern crate crossbeam;
extern crate failure;
#[macro_use]
extern crate failure_derive;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

#[cfg(test)]
extern crate tempfile;

pub mod buffer;
pub mod color;
pub mod engine;
pub mod error;
pub mod fractal;
pub mod lerp;
pub mod movie;
pub mod painters;
pub mod planes;
pub mod render;
pub mod rules;

pub use buffer::PixelBuffer;
pub use color::Rgb;
pub use engine::Sample;
pub use error::{FractalError, Result};
pub use fractal::{Fractal, FractalBuilder};
pub use lerp::{lerp, lerp_frame, Lerp};
pub use movie::{Blend, Movie, MovieBuilder};
pub use planes::{Canvas, Pixel};
pub use render::{CommandConverter, Converter, NoConversion, PngConverter};
pub use rules::{ColorRule, TrapRule, UpdateRule, WarpRule};
