extern crate clap;
extern crate env_logger;
extern crate escapade;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use escapade::movie::{constant, linear};
use escapade::{
    painters, rules, ColorRule, CommandConverter, Converter, Fractal, Movie, NoConversion,
    PngConverter, TrapRule, UpdateRule, WarpRule,
};
use num::Complex;
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_complex(s: &str, err: &str) -> Result<(), String> {
    match parse_complex(s) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_positive(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(v) if v > 0.0 => Ok(()),
        _ => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const DEPTH: &str = "depth";
const SCALE: &str = "scale";
const SCALE_TO: &str = "scale-to";
const BAILOUT: &str = "bailout";
const OFFSET: &str = "offset";
const START: &str = "start";
const UPDATE: &str = "update";
const CONSTANT: &str = "constant";
const PALETTE: &str = "palette";
const WARP: &str = "warp";
const WARP_AMOUNT: &str = "warp-amount";
const TRAP: &str = "trap";
const FRAMES: &str = "frames";
const THREADS: &str = "threads";
const CONVERT: &str = "convert";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("escapade")
        .version("0.1.0")
        .about("Escape-time and orbit-trap fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("out")
                .help("Output name, without extension; the frame directory for animations"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1_usize,
                        4096,
                        "Could not parse half-width",
                        "Half-width must be between 1 and 4096",
                    )
                })
                .help("Distance from the center of the image to an edge, in pixels"),
        )
        .arg(
            Arg::with_name(DEPTH)
                .long(DEPTH)
                .short("d")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1_usize,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Maximum number of iterations per pixel"),
        )
        .arg(
            Arg::with_name(SCALE)
                .long(SCALE)
                .short("s")
                .takes_value(true)
                .default_value("2.5")
                .validator(|s| validate_positive(&s, "Scale must be a positive number"))
                .help("Width of the complex window"),
        )
        .arg(
            Arg::with_name(SCALE_TO)
                .long(SCALE_TO)
                .takes_value(true)
                .validator(|s| validate_positive(&s, "Scale must be a positive number"))
                .help("Width of the complex window at the last frame of an animation"),
        )
        .arg(
            Arg::with_name(BAILOUT)
                .long(BAILOUT)
                .short("b")
                .takes_value(true)
                .default_value("5.0")
                .validator(|s| validate_positive(&s, "Bailout must be a positive number"))
                .help("Magnitude past which a point has escaped"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .long(OFFSET)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,0")
                .validator(|s| validate_complex(&s, "Could not parse offset"))
                .help("Center of the image on the complex plane"),
        )
        .arg(
            Arg::with_name(START)
                .long(START)
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_complex(&s, "Could not parse starting point"))
                .help("Fixed starting point for every orbit"),
        )
        .arg(
            Arg::with_name(UPDATE)
                .long(UPDATE)
                .short("u")
                .takes_value(true)
                .default_value("mandelbrot")
                .possible_values(&["mandelbrot", "cubic", "julia", "newton", "exp-cubic", "inverse-sixth"])
                .help("Iteration step"),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .long(CONSTANT)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.59,0")
                .validator(|s| validate_complex(&s, "Could not parse constant"))
                .help("Constant for the julia and exp-cubic steps"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("black-white")
                .possible_values(&["black-white", "white-black", "blue-white", "random", "newton", "trap-glow"])
                .help("Color rule"),
        )
        .arg(
            Arg::with_name(WARP)
                .long(WARP)
                .takes_value(true)
                .default_value("identity")
                .possible_values(&["identity", "rotate", "fold", "twist"])
                .help("Warp applied to the starting angle"),
        )
        .arg(
            Arg::with_name(WARP_AMOUNT)
                .long(WARP_AMOUNT)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0")
                .validator(|s| match f64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse warp amount".to_string()),
                })
                .help("Angle, fold count or twist passed to the warp"),
        )
        .arg(
            Arg::with_name(TRAP)
                .long(TRAP)
                .takes_value(true)
                .default_value("none")
                .possible_values(&["none", "unit-circle", "cross", "origin"])
                .help("Orbit trap; anything but none draws an orbit-trap fractal"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1_usize,
                        100_000,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 100000",
                    )
                })
                .help("Number of frames; more than one draws an animation"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of frames drawn at once"),
        )
        .arg(
            Arg::with_name(CONVERT)
                .long(CONVERT)
                .short("c")
                .takes_value(true)
                .default_value("png")
                .help("png, none, or the name of a program run as PROGRAM SRC.ppm DST.png"),
        )
        .get_matches()
}

// Every value below has been through a validator or has a default.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    match matches.value_of(name).map(T::from_str) {
        Some(Ok(v)) => v,
        _ => unreachable!("{} was validated", name),
    }
}

fn complex(matches: &ArgMatches, name: &str) -> Option<Complex<f64>> {
    matches.value_of(name).and_then(parse_complex)
}

fn update_rule(matches: &ArgMatches) -> UpdateRule {
    let k = complex(matches, CONSTANT).unwrap_or(Complex::new(-0.59, 0.0));
    match matches.value_of(UPDATE) {
        Some("cubic") => rules::power(3),
        Some("julia") => rules::julia(k),
        Some("newton") => rules::newton_cubic(),
        Some("exp-cubic") => rules::exp_cubic(k),
        Some("inverse-sixth") => rules::inverse_power(6),
        _ => rules::mandelbrot(),
    }
}

fn color_rule(matches: &ArgMatches) -> ColorRule {
    match matches.value_of(PALETTE) {
        Some("white-black") => painters::white_black(),
        Some("blue-white") => painters::blue_white(),
        Some("random") => painters::random(),
        Some("newton") => painters::newton(),
        Some("trap-glow") => painters::trap_glow(),
        _ => painters::black_white(),
    }
}

fn warp_rule(matches: &ArgMatches) -> WarpRule {
    let amount: f64 = value(matches, WARP_AMOUNT);
    match matches.value_of(WARP) {
        Some("rotate") => rules::rotate(amount),
        Some("fold") => rules::fold(amount),
        Some("twist") => rules::twist(amount),
        _ => rules::identity_warp(),
    }
}

fn trap_rule(matches: &ArgMatches) -> Option<TrapRule> {
    match matches.value_of(TRAP) {
        Some("unit-circle") => Some(rules::unit_circle()),
        Some("cross") => Some(rules::cross_trap()),
        Some("origin") => Some(rules::point_trap(Complex::new(0.0, 0.0))),
        _ => None,
    }
}

fn converter(matches: &ArgMatches) -> Box<dyn Converter> {
    match matches.value_of(CONVERT) {
        Some("none") => Box::new(NoConversion),
        Some("png") | None => Box::new(PngConverter),
        Some(program) => Box::new(CommandConverter::new(program, "png")),
    }
}

fn run(matches: &ArgMatches) -> escapade::Result<()> {
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("out"));
    let frames: usize = value(matches, FRAMES);
    let threads: usize = value(matches, THREADS);
    let scale: f64 = value(matches, SCALE);
    let converter = converter(matches);

    if frames == 1 {
        let fractal = Fractal::builder()
            .width(value(matches, WIDTH))
            .depth(value(matches, DEPTH))
            .scale(scale)
            .bailout(value(matches, BAILOUT))
            .offset(complex(matches, OFFSET).unwrap_or(Complex::new(0.0, 0.0)))
            .start(complex(matches, START))
            .update(update_rule(matches))
            .paint(color_rule(matches))
            .warp(warp_rule(matches))
            .trap(trap_rule(matches))
            .build()?;
        let ppm = fractal.draw(output, converter.as_ref())?;
        info!("wrote {}", ppm.display());
        return Ok(());
    }

    let scale_blend = match matches.value_of(SCALE_TO) {
        Some(_) => linear(scale, value(matches, SCALE_TO)),
        None => constant(scale),
    };
    let movie = Movie::builder()
        .frames(frames)
        .width(value(matches, WIDTH))
        .depth(value(matches, DEPTH))
        .scale_blend(scale_blend)
        .bailout(value(matches, BAILOUT))
        .offset(complex(matches, OFFSET).unwrap_or(Complex::new(0.0, 0.0)))
        .start(complex(matches, START))
        .update(update_rule(matches))
        .paint(color_rule(matches))
        .warp(warp_rule(matches))
        .trap(trap_rule(matches))
        .build()?;
    let drawn = if threads > 1 {
        movie.draw_threaded(output, converter.as_ref(), threads)?
    } else {
        movie.draw(output, converter.as_ref())?
    };
    info!("wrote {} frames to {}", drawn.len(), output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        error!("Render failure: {}", e);
        std::process::exit(1);
    }
}
