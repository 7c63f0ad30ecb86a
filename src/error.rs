// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error taxonomy shared by the whole crate.  Configuration
//! mistakes are caught when a fractal or movie is built; the only
//! errors that can happen while drawing are I/O and conversion
//! failures.

use image::ImageError;
use std::io;
use std::process::ExitStatus;

/// Everything that can go wrong while configuring or drawing a fractal.
#[derive(Debug, Fail)]
pub enum FractalError {
    /// A configuration field was rejected at build time.
    #[fail(display = "invalid {}: {}", field, reason)]
    InvalidConfig {
        /// The name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A frame index outside of the animation was requested.
    #[fail(display = "frame {} is outside of a {}-frame movie", frame, frames)]
    InvalidFrame {
        /// The requested frame.
        frame: usize,
        /// The number of frames in the movie.
        frames: usize,
    },

    /// A color triple could not be parsed from text.
    #[fail(display = "could not parse color triple {:?}", _0)]
    ParseColor(String),

    /// Writing the raster output failed.
    #[fail(display = "i/o failure: {}", _0)]
    Io(#[cause] io::Error),

    /// The in-process format conversion failed.
    #[fail(display = "image conversion failure: {}", _0)]
    Image(#[cause] ImageError),

    /// The external format conversion program exited unsuccessfully.
    #[fail(display = "conversion program {} exited with {}", program, status)]
    Conversion {
        /// The program that was run.
        program: String,
        /// Its exit status.
        status: ExitStatus,
    },

    /// A frame worker thread panicked.
    #[fail(display = "a frame worker thread panicked")]
    Worker,
}

impl FractalError {
    /// Shorthand for an `InvalidConfig` error.
    pub fn config<S: Into<String>>(field: &'static str, reason: S) -> Self {
        FractalError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for FractalError {
    fn from(err: io::Error) -> Self {
        FractalError::Io(err)
    }
}

impl From<ImageError> for FractalError {
    fn from(err: ImageError) -> Self {
        FractalError::Image(err)
    }
}

/// The crate's result type.
pub type Result<T> = ::std::result::Result<T, FractalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_field() {
        let err = FractalError::config("depth", "must be positive");
        assert_eq!(format!("{}", err), "invalid depth: must be positive");
    }

    #[test]
    fn io_errors_convert() {
        let err: FractalError = io::Error::new(io::ErrorKind::Other, "disk full").into();
        match err {
            FractalError::Io(_) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
