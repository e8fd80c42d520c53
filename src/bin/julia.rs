// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate image;
extern crate juliaset;
extern crate log;
extern crate num;

use clap::{App, Arg, ArgMatches};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use juliaset::{Coloring, GeneratorConfig, PixelBuffer, Runner};
use log::debug;
use num::Complex;
use std::fs::File;
use std::io;
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

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CONSTANT: &str = "constant";
const ITERATIONS: &str = "iterations";
const ZOOM: &str = "zoom";
const OFFSET: &str = "offset";
const SMOOTH: &str = "smooth";

fn args<'a>() -> ArgMatches<'a> {
    App::new("julia")
        .version("0.1.0")
        .about("Julia set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.ppm/.pnm written as binary PPM, others by extension)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u32>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .required(false)
                .long(CONSTANT)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.7,0.27015")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse the constant c"))
                .help("The constant c in z^2 + c, as real,imaginary"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("500")
                .validator(|s| validate_number::<u32>(&s, "Could not parse iteration count"))
                .help("Maximum number of iterations per pixel"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse zoom"))
                .help("Size of the visible window; larger values show more of the plane"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .required(false)
                .long(OFFSET)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse offset"))
                .help("Pan of the visible window, as x,y"),
        )
        .arg(
            Arg::with_name(SMOOTH)
                .long(SMOOTH)
                .help("Use continuous coloring instead of bands"),
        )
        .get_matches()
}

fn config_from(matches: &ArgMatches) -> Option<GeneratorConfig> {
    let (width, height) = parse_pair::<u32>(matches.value_of(SIZE)?, 'x')?;
    let c = parse_complex(matches.value_of(CONSTANT)?)?;
    let offset = parse_complex(matches.value_of(OFFSET)?)?;
    let iterations = u32::from_str(matches.value_of(ITERATIONS)?).ok()?;
    let zoom = f64::from_str(matches.value_of(ZOOM)?).ok()?;

    let mut config = GeneratorConfig::new(width, height, c.re, c.im, iterations);
    config
        .set_zoom(zoom)
        .set_offset_x(offset.re)
        .set_offset_y(offset.im);
    if matches.is_present(SMOOTH) {
        config.set_coloring(Coloring::Smooth);
    }
    Some(config)
}

fn write_image(outfile: &str, image: PixelBuffer) -> Result<(), io::Error> {
    let path = Path::new(outfile);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_ref().map(String::as_str) {
        Some("ppm") | Some("pnm") => {
            let output = File::create(&path)?;
            let mut encoder =
                PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
            encoder.encode(
                image.as_bytes(),
                image.width(),
                image.height(),
                ColorType::RGB(8),
            )
        }
        _ => {
            let (width, height) = (image.width(), image.height());
            image
                .into_image()
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "short pixel buffer"))?
                .save(&path)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{}x{}: {}", width, height, e)))
        }
    }
}

fn main() {
    env_logger::init();
    let matches = args();
    let config = match config_from(&matches) {
        Some(config) => config,
        None => {
            eprintln!("Could not parse the render parameters");
            std::process::exit(1);
        }
    };
    debug!("{:?}", config);

    let (runner, outcomes) = Runner::with_channel();
    if let Err(e) = runner.start(&config) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }

    match outcomes.recv() {
        Err(_) => {
            eprintln!("Render failure: the worker went away");
            std::process::exit(1);
        }
        Ok(Err(e)) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(Ok(rendered)) => {
            println!(
                "Rendered {}x{} in {} ms",
                rendered.image.width(),
                rendered.image.height(),
                rendered.duration_ms
            );
            let image = match std::sync::Arc::try_unwrap(rendered.image) {
                Ok(image) => image,
                Err(shared) => (*shared).clone(),
            };
            if let Err(e) = write_image(matches.value_of(OUTPUT).unwrap_or_default(), image) {
                eprintln!("Could not write image: {}", e);
                std::process::exit(1);
            }
        }
    }
}
