//! Shared plumbing for the `qrgen` and `bulkgen` binaries: the
//! encode-render-save pipeline, argument parsing helpers, and console
//! logging.

pub mod logging;

use std::path::Path;
use std::str::FromStr;

use clap::{Error, ErrorKind};
use qrgen::{Ecl, Symbol, Version};
use qrgen_png::RenderError;

/// One unit of work for the front ends: a payload plus every encoding and
/// rendering knob.
pub struct Job<'a> {
    pub data: &'a str,
    pub minversion: Version,
    pub maxversion: Version,
    pub ecl: Ecl,
    pub resolution: u32,
    pub border: u32,
}

/// Encodes the payload and writes the raster to `path`; the file
/// extension picks the image format.
pub fn generate<P: AsRef<Path>>(job: &Job, path: P) -> Result<Symbol, RenderError> {
    logging::info(&format!("Encoding {} payload bytes", job.data.len()), 2);
    let symbol = Symbol::encode_in_range(
        job.data.as_bytes(),
        job.minversion,
        job.maxversion,
        job.ecl,
    )?;
    logging::info(
        &format!(
            "Selected version {} at level {} with mask {}",
            symbol.version().value(),
            symbol.ecl(),
            symbol.mask().value()
        ),
        2,
    );
    qrgen_png::save(&symbol, path, job.resolution, job.border)?;
    Ok(symbol)
}

/// Parses a `--minversion`/`--maxversion` value or exits via clap's error
/// path.
pub fn parse_version(s: &str) -> Version {
    let number = s
        .parse::<u8>()
        .unwrap_or_else(|_| invalid_exit("version must be a number between 1 and 40"));
    Version::new(number).unwrap_or_else(|_| invalid_exit("version must be between 1 and 40"))
}

/// Parses a `--resolution` value or exits via clap's error path.
pub fn parse_resolution(s: &str) -> u32 {
    s.parse()
        .unwrap_or_else(|_| invalid_exit("resolution must be a number of pixels"))
}

/// Parses an `--ecl` letter or exits via clap's error path.
pub fn parse_ecl(s: &str) -> Ecl {
    Ecl::from_str(s)
        .unwrap_or_else(|_| invalid_exit("error correction level must be one of L, M, Q, H"))
}

fn invalid_exit(msg: &str) -> ! {
    let err = Error::with_description(msg, ErrorKind::InvalidValue);
    err.exit()
}
