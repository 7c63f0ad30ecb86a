// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stock color rules.  Every rule here answers `Rgb::FALLBACK` when
//! the shading value is NaN or infinite, which is what a Newton map
//! produces when it lands on a critical point.

use color::{channel, Rgb};
use num::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rules::ColorRule;
use std::f64::consts::PI;
use std::sync::Arc;

/// Black for points that escape at once, white for points that never
/// escape.
pub fn black_white() -> ColorRule {
    Arc::new(|v: f64, _z: Complex<f64>| {
        if !v.is_finite() {
            return Rgb::FALLBACK;
        }
        Rgb::gray(channel(v * 255.0))
    })
}

/// The inverse of `black_white`.
pub fn white_black() -> ColorRule {
    Arc::new(|v: f64, _z: Complex<f64>| {
        if !v.is_finite() {
            return Rgb::FALLBACK;
        }
        Rgb::gray(channel((1.0 - v) * 255.0))
    })
}

/// Fades from white to a saturated blue.
pub fn blue_white() -> ColorRule {
    Arc::new(|v: f64, _z: Complex<f64>| {
        if !v.is_finite() {
            return Rgb::FALLBACK;
        }
        let bw = channel((1.0 - v) * 255.0);
        Rgb(bw, bw, 255)
    })
}

fn random_color(v: f64) -> Rgb {
    let mut prng = StdRng::seed_from_u64((v * 256.0) as i64 as u64);
    Rgb(prng.gen(), prng.gen(), prng.gen())
}

/// A random color per shading band.  The same band always gets the
/// same color, so it is stable from frame to frame.
pub fn random() -> ColorRule {
    Arc::new(|v: f64, _z: Complex<f64>| {
        if !v.is_finite() {
            return Rgb::FALLBACK;
        }
        random_color(v)
    })
}

/// `random`, with every channel rotated by `n`.  Blending `n` across
/// an animation cycles the palette.
pub fn random_shifted(n: u8) -> ColorRule {
    Arc::new(move |v: f64, _z: Complex<f64>| {
        if !v.is_finite() {
            return Rgb::FALLBACK;
        }
        let Rgb(r, g, b) = random_color(v);
        Rgb(r.wrapping_add(n), g.wrapping_add(n), b.wrapping_add(n))
    })
}

/// Colors a Newton fractal by which third of the circle the final
/// value's argument falls in, with the shading value on the
/// remaining channel.
pub fn newton() -> ColorRule {
    Arc::new(|v: f64, z: Complex<f64>| {
        let ang = z.arg();
        if !v.is_finite() || ang.is_nan() {
            return Rgb::FALLBACK;
        }
        let (a1, a2, a3) = (PI, PI / 3.0, -PI / 3.0);
        let shade = v * 255.0;
        if -PI < ang && ang <= a3 {
            let g = ang + a1;
            let r = a3 - ang;
            Rgb::from_channels(r / (r + g) * 255.0, g / (r + g) * 255.0, shade)
        } else if a3 < ang && ang <= a2 {
            let b = ang - a3;
            let g = a2 - ang;
            Rgb::from_channels(shade, g / (b + g) * 255.0, b / (b + g) * 255.0)
        } else {
            let r = ang - a2;
            let b = a1 - ang;
            Rgb::from_channels(r / (b + r) * 255.0, shade, b / (b + r) * 255.0)
        }
    })
}

/// For orbit traps: a glow that falls off with the magnitude of the
/// closest approach.  The shading value is ignored.
pub fn trap_glow() -> ColorRule {
    Arc::new(|_v: f64, z: Complex<f64>| {
        let mag = z.norm();
        if mag.is_nan() {
            return Rgb::FALLBACK;
        }
        Rgb::gray(channel((-mag).exp() * 255.0))
    })
}
