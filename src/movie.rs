// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Animations.  A `Movie` holds one blend per fractal parameter; a
//! blend maps `(frame, last)` to the parameter's value at that frame,
//! where `last` is the index of the final frame (one less than the
//! frame count), so that a linear blend starts exactly on its first
//! value at frame 0 and lands exactly on its second at the last frame.
//!
//! Frames share nothing, so they can be drawn in any order, on any
//! number of threads; each frame builds its own `Fractal` and owns its
//! own pixel buffer.

use crossbeam;
use crossbeam::thread::ScopedJoinHandle;
use error::{FractalError, Result};
use fractal::{Fractal, DEFAULT_BAILOUT, DEFAULT_DEPTH, DEFAULT_WIDTH};
use lerp::{lerp_frame, Lerp};
use num::Complex;
use painters;
use render::Converter;
use rules::{self, ColorRule, TrapRule, UpdateRule, WarpRule};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// The value of one parameter at `(frame, last)`.  Blends must be
/// pure: the driver may call them in any order, any number of times.
pub type Blend<T> = Arc<dyn Fn(usize, usize) -> T + Send + Sync>;

/// Wrap a closure as a blend.
pub fn blend<T, F>(f: F) -> Blend<T>
where
    F: Fn(usize, usize) -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A blend that never changes.
pub fn constant<T: Clone + Send + Sync + 'static>(value: T) -> Blend<T> {
    Arc::new(move |_: usize, _: usize| value.clone())
}

/// A blend that moves linearly from `from` at the first frame to `to`
/// at the last.
pub fn linear<T: Lerp + Send + Sync + 'static>(from: T, to: T) -> Blend<T> {
    Arc::new(move |f: usize, n: usize| lerp_frame(f, n, &from, &to))
}

/// Default width of the complex window in an animation.
pub const DEFAULT_MOVIE_SCALE: f64 = 1.0;

/// A fractal animation.
#[derive(Clone)]
pub struct Movie {
    frames: usize,
    width: Blend<usize>,
    depth: Blend<usize>,
    scale: Blend<f64>,
    bailout: Blend<f64>,
    offset: Blend<Complex<f64>>,
    update: Blend<UpdateRule>,
    paint: Blend<ColorRule>,
    warp: Blend<WarpRule>,
    trap: Blend<Option<TrapRule>>,
    start: Blend<Option<Complex<f64>>>,
}

impl Movie {
    /// Start building a movie from the defaults.
    pub fn builder() -> MovieBuilder {
        MovieBuilder::default()
    }

    /// The number of frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The fractal drawn at `frame`.  Every blend is evaluated at
    /// `(frame, frames - 1)`.
    pub fn frame(&self, frame: usize) -> Result<Fractal> {
        if frame >= self.frames {
            return Err(FractalError::InvalidFrame {
                frame,
                frames: self.frames,
            });
        }
        let last = self.frames - 1;
        Fractal::builder()
            .width((self.width)(frame, last))
            .depth((self.depth)(frame, last))
            .scale((self.scale)(frame, last))
            .bailout((self.bailout)(frame, last))
            .offset((self.offset)(frame, last))
            .update((self.update)(frame, last))
            .paint((self.paint)(frame, last))
            .warp((self.warp)(frame, last))
            .trap((self.trap)(frame, last))
            .start((self.start)(frame, last))
            .build()
    }

    /// The name a frame is written under, without an extension.
    pub fn frame_name(dir: &Path, frame: usize) -> PathBuf {
        dir.join(format!("frame{}", frame))
    }

    /// Draw a single frame into `dir`.  Returns the path of its PPM.
    pub fn draw_frame(
        &self,
        frame: usize,
        dir: &Path,
        converter: &dyn Converter,
    ) -> Result<PathBuf> {
        info!("drawing frame {}", frame);
        let ppm = self.frame(frame)?.draw(Movie::frame_name(dir, frame), converter)?;
        info!("drew frame {}", frame);
        Ok(ppm)
    }

    /// Draw every frame, in order, into `dir`, creating it if needed.
    /// Stops at the first frame that fails; frames already drawn stay
    /// on disk.
    pub fn draw(&self, dir: &Path, converter: &dyn Converter) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        (0..self.frames)
            .map(|frame| self.draw_frame(frame, dir, converter))
            .collect()
    }

    /// Draw every frame into `dir` on a pool of `threads` workers,
    /// each taking the next undrawn frame until none are left.  After
    /// the first failure no new frames are started, and that failure
    /// is returned.
    pub fn draw_threaded(
        &self,
        dir: &Path,
        converter: &dyn Converter,
        threads: usize,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let frames = Arc::new(Mutex::new(0..self.frames));
        let failed = AtomicBool::new(false);
        let failed = &failed;

        let results = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Result<Vec<(usize, PathBuf)>>>> = (0..threads.max(1))
                .map(|_| {
                    let frames = frames.clone();
                    spawner.spawn(move |_| -> Result<Vec<(usize, PathBuf)>> {
                        let mut drawn = vec![];
                        loop {
                            if failed.load(Ordering::SeqCst) {
                                break;
                            }
                            let frame = {
                                let mut frames = frames.lock().map_err(|_| FractalError::Worker)?;
                                frames.next()
                            };
                            match frame {
                                Some(frame) => match self.draw_frame(frame, dir, converter) {
                                    Ok(ppm) => drawn.push((frame, ppm)),
                                    Err(e) => {
                                        failed.store(true, Ordering::SeqCst);
                                        return Err(e);
                                    }
                                },
                                None => {
                                    break;
                                }
                            }
                        }
                        Ok(drawn)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|_| Err(FractalError::Worker)))
                .collect::<Vec<_>>()
        })
        .map_err(|_| FractalError::Worker)?;

        let mut drawn = vec![];
        for result in results {
            drawn.extend(result?);
        }
        drawn.sort_by_key(|&(frame, _)| frame);
        Ok(drawn.into_iter().map(|(_, ppm)| ppm).collect())
    }
}

/// Builder-pattern constructor for `Movie`.  Each parameter can be
/// set to a constant, or with the `_blend` variant, to a blend.
#[derive(Clone)]
pub struct MovieBuilder {
    frames: usize,
    width: Blend<usize>,
    depth: Blend<usize>,
    scale: Blend<f64>,
    bailout: Blend<f64>,
    offset: Blend<Complex<f64>>,
    update: Blend<UpdateRule>,
    paint: Blend<ColorRule>,
    warp: Blend<WarpRule>,
    trap: Blend<Option<TrapRule>>,
    start: Blend<Option<Complex<f64>>>,
}

impl Default for MovieBuilder {
    fn default() -> Self {
        MovieBuilder {
            frames: 1,
            width: constant(DEFAULT_WIDTH),
            depth: constant(DEFAULT_DEPTH),
            scale: constant(DEFAULT_MOVIE_SCALE),
            bailout: constant(DEFAULT_BAILOUT),
            offset: constant(Complex::new(0.0, 0.0)),
            update: constant(rules::mandelbrot()),
            paint: constant(painters::black_white()),
            warp: constant(rules::identity_warp()),
            trap: constant(None),
            start: constant(None),
        }
    }
}

macro_rules! parameter {
    ($name:ident, $with:ident, $t:ty, $doc:expr) => {
        #[doc = $doc]
        pub fn $name(mut self, value: $t) -> Self {
            self.$name = constant(value);
            self
        }

        #[doc = $doc]
        #[doc = ""]
        #[doc = "Blended across the animation."]
        pub fn $with(mut self, blend: Blend<$t>) -> Self {
            self.$name = blend;
            self
        }
    };
}

impl MovieBuilder {
    /// The number of frames in the animation.
    pub fn frames(mut self, frames: usize) -> Self {
        self.frames = frames;
        self
    }

    parameter!(width, width_blend, usize, "Half of the side of each image, in pixels.");
    parameter!(depth, depth_blend, usize, "The iteration cap.");
    parameter!(scale, scale_blend, f64, "The width of the complex window.");
    parameter!(bailout, bailout_blend, f64, "The bailout radius.");
    parameter!(offset, offset_blend, Complex<f64>, "Where the center of each image sits.");
    parameter!(update, update_blend, UpdateRule, "The iteration step.");
    parameter!(paint, paint_blend, ColorRule, "The color rule.");
    parameter!(warp, warp_blend, WarpRule, "The warp applied to the starting angle.");
    parameter!(trap, trap_blend, Option<TrapRule>, "The orbit trap, if any.");
    parameter!(start, start_blend, Option<Complex<f64>>, "The fixed starting point, if any.");

    /// Validate the frame count and produce the movie.  Everything
    /// else is validated frame by frame, since blends can wander out
    /// of range partway through.
    pub fn build(self) -> Result<Movie> {
        if self.frames == 0 {
            return Err(FractalError::config("frames", "must be at least one frame"));
        }
        Ok(Movie {
            frames: self.frames,
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

#[cfg(test)]
mod tests {
    use super::*;
    use render::NoConversion;
    use std::collections::HashSet;
    use tempfile::tempdir;

    #[test]
    fn scale_blends_land_on_their_endpoints() {
        let movie = Movie::builder()
            .frames(2)
            .scale_blend(linear(50.0, 2.5))
            .build()
            .unwrap();
        assert_eq!(movie.frame(0).unwrap().scale(), 50.0);
        assert_eq!(movie.frame(1).unwrap().scale(), 2.5);
    }

    #[test]
    fn blends_see_the_last_index() {
        let seen = Arc::new(Mutex::new(HashSet::new()));
        let record = seen.clone();
        let movie = Movie::builder()
            .frames(4)
            .depth_blend(blend(move |f, n| {
                record.lock().unwrap().insert((f, n));
                10 + f
            }))
            .build()
            .unwrap();
        for f in 0..4 {
            assert_eq!(movie.frame(f).unwrap().depth(), 10 + f);
        }
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|&(_, n)| n == 3));
    }

    #[test]
    fn flat_linear_blends_stay_flat() {
        let movie = Movie::builder()
            .frames(30)
            .width_blend(linear(100, 100))
            .depth_blend(linear(255, 255))
            .build()
            .unwrap();
        for f in 0..30 {
            let frame = movie.frame(f).unwrap();
            assert_eq!(frame.width(), 100);
            assert_eq!(frame.depth(), 255);
        }
    }

    #[test]
    fn frames_outside_the_movie_are_rejected() {
        let movie = Movie::builder().frames(3).build().unwrap();
        match movie.frame(3) {
            Err(FractalError::InvalidFrame { frame: 3, frames: 3 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn single_frames_use_the_starting_values() {
        let movie = Movie::builder()
            .scale_blend(linear(4.0, 8.0))
            .offset_blend(linear(Complex::new(1.0, 1.0), Complex::new(0.0, 0.0)))
            .build()
            .unwrap();
        let f = movie.frame(0).unwrap();
        assert_eq!(f.scale(), 4.0);
        assert_eq!(f.offset(), Complex::new(1.0, 1.0));
    }

    #[test]
    fn defaults() {
        let f = Movie::builder().build().unwrap().frame(0).unwrap();
        assert_eq!(f.width(), 100);
        assert_eq!(f.depth(), 100);
        assert_eq!(f.scale(), 1.0);
        assert_eq!(f.bailout(), 5.0);
        assert!(f.trap().is_none());
        assert!(f.start().is_none());
    }

    #[test]
    fn every_parameter_is_blended() {
        let movie = Movie::builder()
            .frames(3)
            .width_blend(linear(2, 6))
            .bailout_blend(linear(2.0, 4.0))
            .warp(rules::rotate(1.0))
            .paint_blend(linear(painters::black_white(), painters::white_black()))
            .update_blend(linear(rules::mandelbrot(), rules::power(3)))
            .trap_blend(blend(|f, _| if f == 2 { Some(rules::cross_trap()) } else { None }))
            .start(Some(Complex::new(0.5, 0.0)))
            .build()
            .unwrap();
        let mid = movie.frame(1).unwrap();
        assert_eq!(mid.width(), 4);
        assert_eq!(mid.bailout(), 3.0);
        assert_eq!(mid.warp()(0.0), 1.0);
        assert_eq!(mid.paint()(1.0, Complex::new(0.0, 0.0)), ::color::Rgb::gray(127));
        let z = Complex::new(2.0, 0.0);
        assert_eq!(mid.update()(z, Complex::new(0.0, 0.0)), Complex::new(6.0, 0.0));
        assert!(mid.trap().is_none());
        assert!(movie.frame(2).unwrap().trap().is_some());
        assert_eq!(mid.start(), Some(Complex::new(0.5, 0.0)));
    }

    #[test]
    fn empty_movies_are_rejected() {
        assert!(Movie::builder().frames(0).build().is_err());
    }

    fn small(frames: usize) -> Movie {
        Movie::builder()
            .frames(frames)
            .width(3)
            .depth(20)
            .scale_blend(linear(3.0, 1.0))
            .build()
            .unwrap()
    }

    #[test]
    fn movies_write_one_file_per_frame() {
        let dir = tempdir().unwrap();
        let frames = dir.path().join("frames");
        let drawn = small(3).draw(&frames, &NoConversion).unwrap();
        assert_eq!(
            drawn,
            (0..3)
                .map(|f| frames.join(format!("frame{}.ppm", f)))
                .collect::<Vec<_>>()
        );
        assert!(drawn.iter().all(|p| p.exists()));
    }

    #[test]
    fn threaded_movies_match_sequential_ones() {
        let dir = tempdir().unwrap();
        let (one, many) = (dir.path().join("one"), dir.path().join("many"));
        let movie = small(5);
        let sequential = movie.draw(&one, &NoConversion).unwrap();
        let threaded = movie.draw_threaded(&many, &NoConversion, 3).unwrap();
        assert_eq!(threaded.len(), 5);
        for (a, b) in sequential.iter().zip(threaded.iter()) {
            assert_eq!(a.file_name(), b.file_name());
            assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
        }
    }

    #[test]
    fn a_bad_frame_stops_the_movie() {
        let dir = tempdir().unwrap();
        let movie = Movie::builder()
            .frames(3)
            .width(2)
            .depth_blend(blend(|f, _| if f == 1 { 0 } else { 10 }))
            .build()
            .unwrap();
        match movie.draw(dir.path(), &NoConversion) {
            Err(FractalError::InvalidConfig { field: "depth", .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(dir.path().join("frame0.ppm").exists());
        assert!(!dir.path().join("frame2.ppm").exists());
        assert!(movie.draw_threaded(dir.path(), &NoConversion, 2).is_err());
    }
}
