// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render configuration: everything needed to draw one image.
//! A `Fractal` is assembled with a `FractalBuilder`, validated once
//! when it is built, and never changes afterwards.

use error::{FractalError, Result};
use num::Complex;
use painters;
use planes::Canvas;
use rules::{self, ColorRule, TrapRule, UpdateRule, WarpRule};
use std::fmt;

/// Default distance, in pixels, from the center of the image to an edge.
pub const DEFAULT_WIDTH: usize = 100;
/// Default iteration cap.
pub const DEFAULT_DEPTH: usize = 100;
/// Default width of the complex window.
pub const DEFAULT_SCALE: f64 = 2.5;
/// Default bailout radius.
pub const DEFAULT_BAILOUT: f64 = 5.0;

/// The parameters of a single render.  Which iteration is used is
/// decided by the trap alone: with a trap the fractal is drawn as an
/// orbit trap, without one as an escape-time fractal.
#[derive(Clone)]
pub struct Fractal {
    width: usize,
    depth: usize,
    scale: f64,
    bailout: f64,
    offset: Complex<f64>,
    update: UpdateRule,
    paint: ColorRule,
    warp: WarpRule,
    trap: Option<TrapRule>,
    start: Option<Complex<f64>>,
}

impl Fractal {
    /// Start building a fractal from the defaults.
    pub fn builder() -> FractalBuilder {
        FractalBuilder::default()
    }

    /// Half of the side of the output image, in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The iteration cap.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The width of the complex window.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The magnitude past which an iterate has escaped.
    pub fn bailout(&self) -> f64 {
        self.bailout
    }

    /// Where the center of the image sits on the complex plane.
    pub fn offset(&self) -> Complex<f64> {
        self.offset
    }

    /// The iteration step.
    pub fn update(&self) -> &UpdateRule {
        &self.update
    }

    /// The color rule.
    pub fn paint(&self) -> &ColorRule {
        &self.paint
    }

    /// The warp applied to the starting angle.
    pub fn warp(&self) -> &WarpRule {
        &self.warp
    }

    /// The orbit trap, if this is an orbit-trap fractal.
    pub fn trap(&self) -> Option<&TrapRule> {
        self.trap.as_ref()
    }

    /// The fixed starting point, if iteration does not start at the pixel.
    pub fn start(&self) -> Option<Complex<f64>> {
        self.start
    }

    /// The pixel grid and complex window this fractal is drawn on.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.scale, self.offset)
    }
}

impl fmt::Debug for Fractal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Fractal")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("scale", &self.scale)
            .field("bailout", &self.bailout)
            .field("offset", &self.offset)
            .field("trap", &self.trap.is_some())
            .field("start", &self.start)
            .finish()
    }
}

/// Builder-pattern constructor for `Fractal`.  Every field is
/// optional; see the `DEFAULT_*` constants for what is used otherwise.
#[derive(Clone)]
pub struct FractalBuilder {
    width: usize,
    depth: usize,
    scale: f64,
    bailout: f64,
    offset: Complex<f64>,
    update: UpdateRule,
    paint: ColorRule,
    warp: WarpRule,
    trap: Option<TrapRule>,
    start: Option<Complex<f64>>,
}

impl Default for FractalBuilder {
    fn default() -> Self {
        FractalBuilder {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            scale: DEFAULT_SCALE,
            bailout: DEFAULT_BAILOUT,
            offset: Complex::new(0.0, 0.0),
            update: rules::mandelbrot(),
            paint: painters::black_white(),
            warp: rules::identity_warp(),
            trap: None,
            start: None,
        }
    }
}

impl FractalBuilder {
    /// Half of the side of the output image, in pixels.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// The iteration cap.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// The width of the complex window.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// The bailout radius.
    pub fn bailout(mut self, bailout: f64) -> Self {
        self.bailout = bailout;
        self
    }

    /// Move the window on the complex plane.
    pub fn offset(mut self, offset: Complex<f64>) -> Self {
        self.offset = offset;
        self
    }

    /// The iteration step.
    pub fn update(mut self, update: UpdateRule) -> Self {
        self.update = update;
        self
    }

    /// The color rule.
    pub fn paint(mut self, paint: ColorRule) -> Self {
        self.paint = paint;
        self
    }

    /// The warp applied to the starting angle.
    pub fn warp(mut self, warp: WarpRule) -> Self {
        self.warp = warp;
        self
    }

    /// Draw an orbit trap, or with `None`, an escape-time fractal.
    pub fn trap<T: Into<Option<TrapRule>>>(mut self, trap: T) -> Self {
        self.trap = trap.into();
        self
    }

    /// Start every orbit at a fixed point, or with `None`, at the pixel.
    pub fn start<T: Into<Option<Complex<f64>>>>(mut self, start: T) -> Self {
        self.start = start.into();
        self
    }

    /// Validate the parameters and produce the fractal.
    pub fn build(self) -> Result<Fractal> {
        if self.width == 0 {
            return Err(FractalError::config("width", "must be at least one pixel"));
        }
        if self.depth == 0 {
            return Err(FractalError::config("depth", "must be at least one iteration"));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(FractalError::config(
                "scale",
                format!("{} is not a positive number", self.scale),
            ));
        }
        if !(self.bailout > 0.0) {
            return Err(FractalError::config(
                "bailout",
                format!("{} is not a positive number", self.bailout),
            ));
        }
        Ok(Fractal {
            width: self.width,
            depth: self.depth,
            scale: self.scale,
            bailout: self.bailout,
            offset: self.offset,
            update: self.update,
            paint: self.paint,
            warp: self.warp,
            trap: self.trap,
            start: self.start,
        })
    }
}
