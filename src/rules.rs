// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pluggable behaviors of a fractal: how a point is iterated,
//! how its starting angle is warped, and what "closeness" means for
//! an orbit trap.  Color rules live in `painters`.
//!
//! Every rule is a shared closure so that configurations can be
//! cloned cheaply and handed to worker threads.

use color::Rgb;
use num::{pow, Complex};
use std::f64::consts::PI;
use std::sync::Arc;

/// `z(n+1) = update(z(n), c)`, where `c` is the mapped pixel.
pub type UpdateRule = Arc<dyn Fn(Complex<f64>, Complex<f64>) -> Complex<f64> + Send + Sync>;

/// Turns a normalized shading value in [0, 1] and the final complex
/// value into a color.
pub type ColorRule = Arc<dyn Fn(f64, Complex<f64>) -> Rgb + Send + Sync>;

/// Maps the polar angle of the starting point to a new angle.
pub type WarpRule = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// The distance from a point to the trap.
pub type TrapRule = Arc<dyn Fn(Complex<f64>) -> f64 + Send + Sync>;

/// The classic Mandelbrot/Julia step, `z^2 + c`.
pub fn mandelbrot() -> UpdateRule {
    Arc::new(|z: Complex<f64>, c: Complex<f64>| z * z + c)
}

/// `z^p + c` for a positive integral power.
pub fn power(p: usize) -> UpdateRule {
    Arc::new(move |z: Complex<f64>, c: Complex<f64>| pow(z, p) + c)
}

/// `z^-p + c`.  Blows up to a non-finite value at the origin.
pub fn inverse_power(p: usize) -> UpdateRule {
    Arc::new(move |z: Complex<f64>, c: Complex<f64>| {
        Complex::new(1.0, 0.0) / pow(z, p) + c
    })
}

/// One step of Newton's method on `z^3 - 1`.  The pixel is ignored;
/// the critical point at the origin produces a non-finite iterate.
pub fn newton_cubic() -> UpdateRule {
    Arc::new(|z: Complex<f64>, _c: Complex<f64>| {
        let p = pow(z, 3) - 1.0;
        let dp = z * z * 3.0;
        z - p / dp
    })
}

/// `exp(z^3) + k`, a Julia-style map with a fixed constant.
pub fn exp_cubic(k: Complex<f64>) -> UpdateRule {
    Arc::new(move |z: Complex<f64>, _c: Complex<f64>| pow(z, 3).exp() + k)
}

/// `z^2 + k`: the Julia set for a fixed `k`.
pub fn julia(k: Complex<f64>) -> UpdateRule {
    Arc::new(move |z: Complex<f64>, _c: Complex<f64>| z * z + k)
}

/// Leaves the starting angle alone.
pub fn identity_warp() -> WarpRule {
    Arc::new(|a: f64| a)
}

/// Rotates the starting point by a fixed angle.
pub fn rotate(theta: f64) -> WarpRule {
    Arc::new(move |a: f64| a + theta)
}

/// Multiplies the starting angle, folding the plane `n` times around
/// the origin.  This is the snowflake.
pub fn fold(n: f64) -> WarpRule {
    Arc::new(move |a: f64| a * n)
}

/// Twists the angle by an amount that wraps once per half-turn.
pub fn twist(amount: f64) -> WarpRule {
    Arc::new(move |a: f64| a + amount * (a / PI).sin())
}

/// The L1 distance from a point to its projection on the unit circle.
pub fn unit_circle() -> TrapRule {
    Arc::new(|z: Complex<f64>| {
        let mag = z.norm();
        let td = z * ((mag - 1.0) / mag);
        td.im.abs() + td.re.abs()
    })
}

/// Euclidean distance to a fixed point.
pub fn point_trap(p: Complex<f64>) -> TrapRule {
    Arc::new(move |z: Complex<f64>| (z - p).norm())
}

/// Distance to the nearer of the two axes.
pub fn cross_trap() -> TrapRule {
    Arc::new(|z: Complex<f64>| z.re.abs().min(z.im.abs()))
}
