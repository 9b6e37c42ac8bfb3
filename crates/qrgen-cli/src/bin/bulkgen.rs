use clap::{App, Arg};
use qrgen_cli::{generate, logging, parse_ecl, parse_resolution, parse_version, Job};
use std::fs;
use std::path::PathBuf;
use std::process;

const ABOUT: &str = "Encode every line of a file into its own QR Code image

Each line of the input file becomes one byte-mode QR Code symbol, written
to the output directory as qrcode_<line>.<extension>. Lines that are not
valid UTF-8 or do not fit the version range are reported and skipped; the
run continues with the remaining lines and exits non-zero at the end.";

const ARG_FILE: &str = "FILE";
const ARG_OUTPUT: &str = "OUTPUT";
const ARG_EXTENSION: &str = "EXTENSION";
const ARG_RESOLUTION: &str = "RESOLUTION";
const ARG_MINVERSION: &str = "MINVERSION";
const ARG_MAXVERSION: &str = "MAXVERSION";
const ARG_ECL: &str = "ECL";
const ARG_VERBOSITY: &str = "VERBOSITY";

fn main() {
    let matches = App::new("bulkgen")
        .version("0.1.0")
        .about(ABOUT)
        .arg(
            Arg::with_name(ARG_FILE)
                .short("f")
                .long("file")
                .value_name("FILE")
                .help("File containing one payload per line")
                .takes_value(true)
                .required(true),
        ).arg(
            Arg::with_name(ARG_OUTPUT)
                .short("o")
                .long("output")
                .value_name("DIR")
                .help("Output directory path, created when missing")
                .default_value("qrcodes"),
        ).arg(
            Arg::with_name(ARG_EXTENSION)
                .long("extension")
                .value_name("EXT")
                .help("Output image format, by file extension")
                .default_value("png"),
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

    let file = matches.value_of(ARG_FILE).unwrap();
    let extension = matches.value_of(ARG_EXTENSION).unwrap();
    let minversion = parse_version(matches.value_of(ARG_MINVERSION).unwrap());
    let maxversion = parse_version(matches.value_of(ARG_MAXVERSION).unwrap());
    let ecl = parse_ecl(matches.value_of(ARG_ECL).unwrap());
    let resolution = parse_resolution(matches.value_of(ARG_RESOLUTION).unwrap());

    let outdir = PathBuf::from(matches.value_of(ARG_OUTPUT).unwrap());
    if !outdir.exists() {
        if let Err(err) = fs::create_dir_all(&outdir) {
            logging::error(&format!(
                "cannot create output directory {}: {err}",
                outdir.display()
            ));
            process::exit(1);
        }
        logging::success(&format!("Output directory {} created", outdir.display()), 2);
    }

    let raw = match fs::read(file) {
        Ok(raw) => raw,
        Err(err) => {
            logging::error(&format!("cannot read {file}: {err}"));
            process::exit(1);
        }
    };

    let mut lines: Vec<&[u8]> = raw.split(|&b| b == b'\n').collect();
    if lines.last() == Some(&&b""[..]) {
        // A trailing newline is a terminator, not an empty payload.
        lines.pop();
    }

    let mut written = 0usize;
    let mut failures = 0usize;
    for (i, line) in lines.into_iter().enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let data = match std::str::from_utf8(line) {
            Ok(data) => data,
            Err(_) => {
                logging::error(&format!("line {i} is not valid UTF-8, skipping"));
                failures += 1;
                continue;
            }
        };

        logging::info(&format!("Working on QR Code {i}"), 1);
        let path = outdir.join(format!("qrcode_{i}.{extension}"));
        let job = Job {
            data,
            minversion,
            maxversion,
            ecl,
            resolution,
            border: qrgen_png::DEFAULT_BORDER,
        };
        match generate(&job, &path) {
            Ok(_) => {
                written += 1;
                logging::success(&format!("QR Code saved to {}", path.display()), 1);
            }
            Err(err) => {
                logging::error(&format!("line {i}: {err}"));
                failures += 1;
            }
        }
    }

    logging::success(
        &format!("Generated {written} QR Codes in {}", outdir.display()),
        0,
    );
    if failures > 0 {
        logging::warning(&format!("{failures} lines failed"), 0);
        process::exit(1);
    }
}
