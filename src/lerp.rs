// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Linear interpolation over every kind of value a fractal can be
//! configured with.  A position is either a fraction in [0, 1] or a
//! `(frame, total)` pair, where `total` is the index of the last
//! frame.  Real values follow `from * (1 - t) + to * t`.  Integral and
//! color values step as `from + (to - from) * t` and are truncated,
//! which holds them fixed when both ends agree.
//!
//! Rules are interpolated too: the blend of two rules evaluates both
//! and interpolates their results.

use color::Rgb;
use num::Complex;
use rules::{ColorRule, UpdateRule, WarpRule};
use std::sync::Arc;

/// Values that can be linearly interpolated.
pub trait Lerp: Sized {
    /// The value at fraction `t` of the way from `from` to `to`.
    fn lerp(from: &Self, to: &Self, t: f64) -> Self;
}

/// The fractional position of `frame` in an animation whose last
/// frame is `total`.  A single-frame animation sits at its start.
#[inline]
pub fn fraction(frame: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        frame as f64 / total as f64
    }
}

/// Interpolate at a fraction in [0, 1].
pub fn lerp<T: Lerp>(t: f64, from: &T, to: &T) -> T {
    T::lerp(from, to, t)
}

/// Interpolate at `frame` of an animation whose last frame is `total`.
pub fn lerp_frame<T: Lerp>(frame: usize, total: usize, from: &T, to: &T) -> T {
    T::lerp(from, to, fraction(frame, total))
}

#[inline]
fn mix(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

#[inline]
fn step(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Lerp for f64 {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        mix(*from, *to, t)
    }
}

impl Lerp for f32 {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        mix(f64::from(*from), f64::from(*to), t) as f32
    }
}

impl Lerp for i32 {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        step(f64::from(*from), f64::from(*to), t) as i32
    }
}

impl Lerp for usize {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        step(*from as f64, *to as f64, t) as usize
    }
}

impl Lerp for Complex<f64> {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        *from * (1.0 - t) + *to * t
    }
}

impl Lerp for Rgb {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        let c = |f: u8, s: u8| step(f64::from(f), f64::from(s), t) as u8;
        Rgb(c(from.0, to.0), c(from.1, to.1), c(from.2, to.2))
    }
}

impl Lerp for UpdateRule {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        let (from, to) = (from.clone(), to.clone());
        Arc::new(move |z: Complex<f64>, c: Complex<f64>| {
            lerp(t, &from(z, c), &to(z, c))
        })
    }
}

impl Lerp for WarpRule {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        let (from, to) = (from.clone(), to.clone());
        Arc::new(move |a: f64| mix(from(a), to(a), t))
    }
}

impl Lerp for ColorRule {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        let (from, to) = (from.clone(), to.clone());
        Arc::new(move |v: f64, z: Complex<f64>| lerp(t, &from(v, z), &to(v, z)))
    }
}
