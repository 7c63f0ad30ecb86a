// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color triples.  The plain-text raster format wants every pixel as
//! three decimal channel values separated by spaces, so that is both
//! the `Display` and the `FromStr` form of an `Rgb`.

use error::FractalError;
use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The color used whenever a color rule is handed a non-finite
    /// shading value.
    pub const FALLBACK: Rgb = Rgb(0, 0, 0);

    /// A gray with all three channels equal.
    pub fn gray(v: u8) -> Rgb {
        Rgb(v, v, v)
    }

    /// Build a color from three unbounded channel values.  See
    /// `channel`.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Rgb {
        Rgb(channel(r), channel(g), channel(b))
    }
}

/// Convert an unbounded channel value into a byte: truncated toward
/// zero and clamped to 0..=255.  NaN becomes 0.
#[inline]
pub fn channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FractalError::ParseColor(s.to_string());
        let channels = s
            .split_whitespace()
            .map(|c| u8::from_str(c).map_err(|_| bad()))
            .collect::<Result<Vec<u8>, FractalError>>()?;
        match channels.as_slice() {
            [r, g, b] => Ok(Rgb(*r, *g, *b)),
            _ => Err(bad()),
        }
    }
}
