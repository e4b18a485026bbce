// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate buddhabrot;
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate num_cpus;

use buddhabrot::raster;
use buddhabrot::{
    stretch, ConfigError, Fractal, IterationBand, RenderConfig, RenderError, Renderer,
    StretchOutcome, ViewWindow,
};
use clap::{App, Arg, ArgMatches};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
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

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
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

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const REAL: &str = "real";
const IMAG: &str = "imag";
const BAND: &str = "band";
const SAMPLES: &str = "samples";
const DENSITY: &str = "density";
const THREADS: &str = "threads";
const PERCENTILE: &str = "percentile";
const FRACTAL: &str = "fractal";
const SEED: &str = "seed";
const DEPTH: &str = "depth";
const CSV: &str = "csv";
const VERBOSE: &str = "verbose";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get() * 4;

    App::new("buddha")
        .version("0.3.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Buddhabrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; .png, otherwise a PGM graymap. Named after the parameters if omitted"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("800")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65_535,
                        "Could not parse image width",
                        "Image width must be between 1 and 65535",
                    )
                })
                .help("Width of output image; the height follows from the window"),
        )
        .arg(
            Arg::with_name(REAL)
                .long(REAL)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse real interval"))
                .help("Real interval of the view window, as low,high"),
        )
        .arg(
            Arg::with_name(IMAG)
                .long(IMAG)
                .short("i")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse imaginary interval"))
                .help("Imaginary interval of the view window, as low,high"),
        )
        .arg(
            Arg::with_name(BAND)
                .long(BAND)
                .short("b")
                .takes_value(true)
                .default_value("0,1000")
                .validator(|s| validate_pair::<usize>(&s, ',', "Could not parse iteration band"))
                .help("Plot orbits escaping strictly between these iterations, as min,max"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .long(SAMPLES)
                .short("p")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse sample count",
                        "Sample count must be at least 1",
                    )
                })
                .help("Number of random seeds to draw [default: 1000000]"),
        )
        .arg(
            Arg::with_name(DENSITY)
                .long(DENSITY)
                .short("d")
                .takes_value(true)
                .conflicts_with(SAMPLES)
                .validator(|s| {
                    validate_range(
                        &s,
                        0.0,
                        1_000.0,
                        "Could not parse sample density",
                        "Sample density must be between 0 and 1000",
                    )
                })
                .help("Seeds to draw per canvas pixel, instead of --samples"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver [default: all cores]"),
        )
        .arg(
            Arg::with_name(PERCENTILE)
                .long(PERCENTILE)
                .short("s")
                .takes_value(true)
                .default_value("3")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.0,
                        100.0,
                        "Could not parse stretch percentile",
                        "Stretch percentile must be between 0 and 100",
                    )
                })
                .help("Brightest percentage of pixels to calibrate the stretch against; 0 for linear"),
        )
        .arg(
            Arg::with_name(FRACTAL)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .possible_values(&["quadratic", "cubic"])
                .default_value("quadratic")
                .help("Map to iterate"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    u64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse random seed".to_string())
                })
                .help("Seed for the random streams, for a reproducible render"),
        )
        .arg(
            Arg::with_name(DEPTH)
                .long(DEPTH)
                .takes_value(true)
                .possible_values(&["8", "16"])
                .default_value("8")
                .help("Bits per pixel of the output image; 16 requires PNG"),
        )
        .arg(
            Arg::with_name(CSV)
                .long(CSV)
                .takes_value(true)
                .help("Also write the raw histogram as comma-separated 16-bit levels"),
        )
        .arg(
            Arg::with_name(VERBOSE)
                .long(VERBOSE)
                .short("v")
                .help("Log progress"),
        )
        .get_matches()
}

// Every value has already been through its validator.
fn pair<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<(T, T)> {
    matches.value_of(name).and_then(|s| parse_pair(s, ','))
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    matches.value_of(name).and_then(|s| T::from_str(s).ok())
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig, ConfigError> {
    let defaults = RenderConfig::default();
    let fractal = match matches.value_of(FRACTAL) {
        Some(name) => Fractal::from_str(name)?,
        None => defaults.fractal,
    };
    let band = pair::<usize>(matches, BAND)
        .map(|(min, max)| IterationBand::new(min, max))
        .unwrap_or(defaults.band);
    let mut config = RenderConfig {
        width: value(matches, WIDTH).unwrap_or(defaults.width),
        window: ViewWindow::new(
            pair(matches, REAL).unwrap_or(defaults.window.real),
            pair(matches, IMAG).unwrap_or(defaults.window.imag),
        ),
        band,
        samples: value(matches, SAMPLES).unwrap_or(defaults.samples),
        threads: value(matches, THREADS).unwrap_or(defaults.threads),
        percentile: value(matches, PERCENTILE).unwrap_or(defaults.percentile),
        fractal,
        seed: value(matches, SEED),
    };
    if let Some(density) = value::<f64>(matches, DENSITY) {
        config.samples = config.samples_for_density(density);
    }
    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    let config = config_from(matches)?;
    let depth: u8 = value(matches, DEPTH).unwrap_or(8);
    let output = matches
        .value_of(OUTPUT)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config.default_file_name()));
    raster::validate_depth(&output, depth)?;

    let percentile = config.percentile;
    let renderer = Renderer::new(config)?;
    let histogram = renderer.render()?;

    if let Some(csv) = matches.value_of(CSV) {
        let out = BufWriter::new(File::create(csv)?);
        raster::write_grid(&raster::histogram_levels(&histogram), histogram.width(), out)?;
        info!("histogram written to '{}'", csv);
    }

    let stretched = stretch(&histogram, percentile);
    match stretched.outcome {
        StretchOutcome::TooDark | StretchOutcome::Saturated | StretchOutcome::Flat => {
            warn!("{}; writing the linear image", stretched.outcome)
        }
        ref outcome => info!("stretch | {}", outcome),
    }
    raster::write_image(&output, &stretched.image, depth)
}

fn main() {
    let matches = args();
    let level = if matches.is_present(VERBOSE) { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
