// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The iteration engine.  A pixel is mapped onto the complex plane,
//! its starting point is warped, and then it is iterated one of two
//! ways:
//!
//! * Escape time: iterate until the point leaves the bailout radius
//!   or the iteration cap is reached, and report how long that took
//!   along with the last iterate.
//!
//! * Orbit trap: iterate exactly `depth` times, no matter what, and
//!   report the iterate that came closest to the trap.  The count
//!   reported is the index of the *last* iteration that was outside
//!   the bailout radius, which says how late the orbit was still
//!   wandering; it is not the trap distance.

use fractal::Fractal;
use num::Complex;
use planes::Pixel;
use rules::TrapRule;

/// The outcome of iterating one pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Escape time: iterations executed.  Orbit trap: the last
    /// iteration at which the orbit was outside the bailout radius.
    pub count: usize,
    /// Escape time: the final iterate.  Orbit trap: the iterate
    /// closest to the trap.
    pub value: Complex<f64>,
}

impl Fractal {
    /// The point at which iteration begins for a sample point `c`:
    /// the fixed start if there is one, otherwise `c`, with its polar
    /// angle passed through the warp and its magnitude kept.
    pub fn start_point(&self, c: Complex<f64>) -> Complex<f64> {
        let z0 = self.start().unwrap_or(c);
        let (mag, ang) = z0.to_polar();
        Complex::from_polar(&mag, &(self.warp())(ang))
    }

    /// Iterate a pixel with whichever method this fractal uses.
    pub fn sample(&self, pixel: Pixel) -> Sample {
        match self.trap() {
            Some(trap) => self.orbit_trap(pixel, trap),
            None => self.escape_time(pixel),
        }
    }

    /// Escape-time iteration.  Never runs more than `depth`
    /// iterations, and calls the update rule at most `depth - 1`
    /// times.
    pub fn escape_time(&self, pixel: Pixel) -> Sample {
        let c = self.canvas().pixel_to_point(pixel);
        let mut z = self.start_point(c);
        let mut n = 0;
        while z.norm() < self.bailout() {
            n += 1;
            if n >= self.depth() {
                break;
            }
            z = (self.update())(z, c);
        }
        Sample { count: n, value: z }
    }

    /// Orbit-trap iteration.  Always calls the update rule exactly
    /// `depth` times.
    pub fn orbit_trap(&self, pixel: Pixel, trap: &TrapRule) -> Sample {
        let c = self.canvas().pixel_to_point(pixel);
        let mut z = self.start_point(c);
        let mut best = (::std::f64::INFINITY, self.start().unwrap_or(c));
        let mut n = 0;
        for i in 0..self.depth() {
            z = (self.update())(z, c);
            if z.norm() > self.bailout() {
                n = i;
            }
            let d = trap(z);
            if d < best.0 {
                best = (d, z);
            }
        }
        Sample {
            count: n,
            value: best.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules;
    use std::f64::consts::PI;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn scenario() -> ::fractal::FractalBuilder {
        Fractal::builder()
            .width(2)
            .depth(50)
            .scale(2.5)
            .bailout(2.0)
    }

    #[test]
    fn the_origin_never_escapes() {
        let f = scenario().build().unwrap();
        let s = f.sample(Pixel(0, 0));
        assert_eq!(s.count, 50);
        assert_eq!(s.value, Complex::new(0.0, 0.0));
    }

    #[test]
    fn far_points_escape_quickly() {
        let f = scenario().build().unwrap();
        assert!(f.sample(Pixel(2, 2)).count < 5);
        assert!(f.sample(Pixel(-2, -2)).count < 5);
    }

    #[test]
    fn escape_time_is_bounded_by_depth() {
        let f = scenario().depth(17).build().unwrap();
        for p in f.canvas().pixels() {
            assert!(f.sample(p).count <= 17);
        }
    }

    #[test]
    fn identity_warp_changes_nothing() {
        let plain = scenario().build().unwrap();
        let warped = scenario().warp(Arc::new(|a: f64| a)).build().unwrap();
        for p in plain.canvas().pixels() {
            let (a, b) = (plain.sample(p), warped.sample(p));
            assert_eq!(a.count, b.count);
            assert!((a.value - b.value).norm() < 1e-9);
        }
    }

    #[test]
    fn warps_rotate_the_start() {
        let f = scenario().warp(rules::rotate(PI / 2.0)).build().unwrap();
        let z = f.start_point(Complex::new(2.0, 0.0));
        assert!((z - Complex::new(0.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn fixed_starts_replace_the_pixel() {
        let f = scenario()
            .start(Complex::new(0.0, 0.0))
            .update(rules::julia(Complex::new(5.0, 0.0)))
            .build()
            .unwrap();
        // z = 0, then 5, which is outside: one iteration no matter the pixel.
        assert_eq!(f.sample(Pixel(0, 0)).count, 1);
        assert_eq!(f.sample(Pixel(-1, 1)).count, 1);
    }

    fn counting(calls: &Arc<AtomicUsize>) -> rules::UpdateRule {
        let calls = calls.clone();
        Arc::new(move |z: Complex<f64>, c: Complex<f64>| {
            calls.fetch_add(1, Ordering::SeqCst);
            z * z + c
        })
    }

    #[test]
    fn the_trap_selects_the_iteration() {
        let calls = Arc::new(AtomicUsize::new(0));
        let escape = scenario().update(counting(&calls)).build().unwrap();
        escape.sample(Pixel(2, 2));
        assert!(calls.load(Ordering::SeqCst) < 50);

        calls.store(0, Ordering::SeqCst);
        escape.sample(Pixel(0, 0));
        assert_eq!(calls.load(Ordering::SeqCst), 49);

        let trapped = scenario()
            .update(counting(&calls))
            .trap(rules::unit_circle())
            .build()
            .unwrap();
        for p in &[Pixel(2, 2), Pixel(0, 0), Pixel(-1, 1)] {
            calls.store(0, Ordering::SeqCst);
            trapped.sample(*p);
            assert_eq!(calls.load(Ordering::SeqCst), 50);
        }
    }

    #[test]
    fn orbit_traps_remember_the_last_escape() {
        // Alternates between 3 and 0: outside the radius on every even iteration.
        let f = Fractal::builder()
            .width(2)
            .depth(6)
            .bailout(2.0)
            .update(Arc::new(|z: Complex<f64>, _c: Complex<f64>| {
                if z.norm() > 1.0 {
                    Complex::new(0.0, 0.0)
                } else {
                    Complex::new(3.0, 0.0)
                }
            }))
            .trap(rules::point_trap(Complex::new(3.0, 0.0)))
            .build()
            .unwrap();
        let s = f.sample(Pixel(0, 0));
        assert_eq!(s.count, 4);
        assert_eq!(s.value, Complex::new(3.0, 0.0));
    }

    #[test]
    fn orbit_traps_track_the_closest_approach() {
        // z -> z / 2 from 2: the orbit closest to the unit circle is z = 1.
        let f = Fractal::builder()
            .width(1)
            .depth(8)
            .start(Complex::new(2.0, 0.0))
            .update(Arc::new(|z: Complex<f64>, _c: Complex<f64>| z * 0.5))
            .trap(rules::unit_circle())
            .build()
            .unwrap();
        let s = f.sample(Pixel(0, 0));
        assert_eq!(s.count, 0);
        assert!((s.value - Complex::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn non_finite_iterates_stop_escape_time() {
        let f = scenario()
            .update(rules::newton_cubic())
            .start(Complex::new(0.0, 0.0))
            .bailout(1e37)
            .build()
            .unwrap();
        let s = f.sample(Pixel(1, 1));
        assert_eq!(s.count, 1);
        assert!(!s.value.re.is_finite() || !s.value.im.is_finite());
    }
}
