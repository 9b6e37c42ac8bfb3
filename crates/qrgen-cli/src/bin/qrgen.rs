use clap::{App, Arg};
use qrgen_cli::{generate, logging, parse_ecl, parse_resolution, parse_version, Job};
use std::process;

const ABOUT: &str = "Encode data into a QR Code image

The payload is encoded as a byte-mode QR Code symbol: the smallest version
in the allowed range is selected, the error correction level is raised as
far as the spare capacity allows, and the symbol is rasterized to the
output file. The file extension determines the image format.";

const ARG_DATA: &str = "DATA";
const ARG_OUTPUT: &str = "OUTPUT";
const ARG_RESOLUTION: &str = "RESOLUTION";
const ARG_MINVERSION: &str = "MINVERSION";
const ARG_MAXVERSION: &str = "MAXVERSION";
const ARG_ECL: &str = "ECL";
const ARG_VERBOSITY: &str = "VERBOSITY";

fn main() {
    let matches = App::new("qrgen")
        .version("0.1.0")
        .about(ABOUT)
        .arg(
            Arg::with_name(ARG_DATA)
                .short("d")
                .long("data")
                .value_name("DATA")
                .help("Link or data to be encoded in the QR Code")
                .takes_value(true)
                .required(true),
        ).arg(
            Arg::with_name(ARG_OUTPUT)
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Output file path")
                .default_value("qrcode.png"),
        ).arg(
            Arg::with_name(ARG_RESOLUTION)
                .short("r")
                .long("resolution")
                .value_name("PIXELS")
                .help("Approximate raster resolution in pixels")
                .default_value("300"),
        ).arg(
            Arg::with_name(ARG_MINVERSION)
                .long("minversion")
                .value_name("1-40")
                .help("Smallest symbol version to consider")
                .default_value("1"),
        ).arg(
            Arg::with_name(ARG_MAXVERSION)
                .long("maxversion")
                .value_name("1-40")
                .help("Largest symbol version to consider; too low a maximum can make long payloads fail")
                .default_value("40"),
        ).arg(
            Arg::with_name(ARG_ECL)
                .short("e")
                .long("ecl")
                .value_name("ECL")
                .help("Minimum error correction level: L (7%), M (15%), Q (25%), H (30%)")
                .possible_values(&["L", "l", "M", "m", "Q", "q", "H", "h"])
                .default_value("M"),
        ).arg(
            Arg::with_name(ARG_VERBOSITY)
                .short("v")
                .long("verbosity")
                .help("Specify -v one or more times to increase verbosity")
                .multiple(true),
        ).get_matches();

    logging::set_verbosity(matches.occurrences_of(ARG_VERBOSITY) as usize);

    let data = matches.value_of(ARG_DATA).unwrap();
    let output = matches.value_of(ARG_OUTPUT).unwrap();
    let job = Job {
        data,
        minversion: parse_version(matches.value_of(ARG_MINVERSION).unwrap()),
        maxversion: parse_version(matches.value_of(ARG_MAXVERSION).unwrap()),
        ecl: parse_ecl(matches.value_of(ARG_ECL).unwrap()),
        resolution: parse_resolution(matches.value_of(ARG_RESOLUTION).unwrap()),
        border: qrgen_png::DEFAULT_BORDER,
    };

    match generate(&job, output) {
        Ok(_) => logging::success(&format!("QR Code successfully saved to {output}"), 0),
        Err(err) => {
            logging::error(&err.to_string());
            process::exit(1);
        }
    }
}
