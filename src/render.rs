// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single-image renderer.  Every pixel of the canvas is iterated
//! on its own, colored, and dropped into a buffer; the buffer is then
//! written out as a plain-text PPM and, optionally, handed to a
//! converter that turns it into something more compact.

use buffer::PixelBuffer;
use engine::Sample;
use error::{FractalError, Result};
use fractal::Fractal;
use image;
use planes::Pixel;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;

impl Fractal {
    /// Color one iterated pixel and store it.  The shading value
    /// handed to the color rule is the sample's count divided by the
    /// iteration cap.
    pub fn paint_pixel(&self, buffer: &mut PixelBuffer, pixel: Pixel, sample: Sample) {
        let v = sample.count as f64 / self.depth() as f64;
        buffer.set(pixel, (self.paint())(v, sample.value));
    }

    /// Iterate every pixel of the canvas into a fresh buffer.
    pub fn render(&self) -> PixelBuffer {
        let canvas = self.canvas();
        debug!(
            "rendering {0}x{0} {1} fractal, depth {2}",
            canvas.side(),
            if self.trap().is_some() { "orbit-trap" } else { "escape-time" },
            self.depth()
        );
        let mut buffer = PixelBuffer::new(canvas);
        for pixel in canvas.pixels() {
            let sample = self.sample(pixel);
            self.paint_pixel(&mut buffer, pixel, sample);
        }
        buffer
    }

    /// Render the fractal to `<name>.ppm`, then convert it.  Returns
    /// the path of the PPM.
    pub fn draw<P: AsRef<Path>>(&self, name: P, converter: &dyn Converter) -> Result<PathBuf> {
        let buffer = self.render();
        let ppm = ppm_name(name.as_ref());
        write_ppm(&ppm, &buffer)?;
        converter.convert(&ppm)?;
        Ok(ppm)
    }
}

/// `name` with `.ppm` appended, keeping any dots already in it.
fn ppm_name(name: &Path) -> PathBuf {
    let mut file = name.as_os_str().to_owned();
    file.push(".ppm");
    PathBuf::from(file)
}

/// Write a buffer to a PPM file.
pub fn write_ppm(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    buffer.write_ppm(&mut out)?;
    Ok(())
}

/// Turns a freshly written PPM into another format.  The PPM itself
/// is left in place.
pub trait Converter: Send + Sync {
    /// Convert the PPM at `ppm`.
    fn convert(&self, ppm: &Path) -> Result<()>;
}

/// Leaves the PPM as it is.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoConversion;

impl Converter for NoConversion {
    fn convert(&self, _ppm: &Path) -> Result<()> {
        Ok(())
    }
}

/// Decodes the PPM and writes a PNG beside it.
#[derive(Copy, Clone, Debug, Default)]
pub struct PngConverter;

impl Converter for PngConverter {
    fn convert(&self, ppm: &Path) -> Result<()> {
        let png = ppm.with_extension("png");
        image::open(ppm)?.save(&png)?;
        debug!("converted {} to {}", ppm.display(), png.display());
        Ok(())
    }
}

/// Runs an external program as `program <ppm> <name>.<extension>`,
/// ImageMagick's `convert` being the obvious candidate.
#[derive(Clone, Debug)]
pub struct CommandConverter {
    program: String,
    extension: String,
}

impl CommandConverter {
    /// A converter that runs `program` and produces files with the
    /// given extension.
    pub fn new<S: Into<String>, E: Into<String>>(program: S, extension: E) -> Self {
        CommandConverter {
            program: program.into(),
            extension: extension.into(),
        }
    }
}

impl Converter for CommandConverter {
    fn convert(&self, ppm: &Path) -> Result<()> {
        let target = ppm.with_extension(&self.extension);
        let status = Command::new(&self.program).arg(ppm).arg(&target).status()?;
        if !status.success() {
            return Err(FractalError::Conversion {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}
