// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use pico_args::Arguments;

const HELP: &str = "\
svgscene converts an SVG document into a simplified scene tree and writes it back as SVG.

USAGE:
  svgscene [OPTIONS] <in-svg> <out-svg>  # from file to file
  svgscene [OPTIONS] <in-svg> -c         # from file to stdout
  svgscene [OPTIONS] - <out-svg>         # from stdin to file
  svgscene [OPTIONS] - -c                # from stdin to stdout

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information
  -c                                Prints the output SVG to the stdout

  --width LENGTH                    Sets the viewport width to use when the root
                                    element has no usable 'width'
  --height LENGTH                   Sets the viewport height to use when the root
                                    element has no usable 'height'
  --ignore-viewbox                  Do not wrap the tree into a viewBox transform group
  --ignore-root-clip                Do not clip the tree to the viewport

  --font-family FAMILY              Sets the default font family that will be
                                    used when no 'font-family' is present
                                    [default: Times New Roman]
  --font-size SIZE                  Sets the default font size that will be
                                    used when no 'font-size' is present
                                    [default: 12] [possible values: 1..192 (inclusive)]
  --use-font-file PATH              Load a specified font file into the fonts database.
                                    Will be used during text measuring.
                                    This option can be set multiple times
  --use-fonts-dir PATH              Loads all fonts from the specified directory
                                    into the fonts database.
                                    Will be used during text measuring.
                                    This option can be set multiple times
  --skip-system-fonts               Disables system fonts loading

  --indent INDENT                   Sets the XML nodes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: 4]
  --coordinates-precision NUM       Set the coordinates numeric precision.
                                    Smaller precision can lead to a malformed output in some cases
                                    [values: 2..8 (inclusive)] [default: 8]
  --quiet                           Disables warnings

ARGS:
  <in-svg>                          Input file
  <out-svg>                         Output file
";

#[derive(Debug)]
struct Args {
    width: Option<f32>,
    height: Option<f32>,
    ignore_view_box: bool,
    ignore_root_clip: bool,

    font_family: Option<String>,
    font_size: u32,
    font_files: Vec<PathBuf>,
    font_dirs: Vec<PathBuf>,
    skip_system_fonts: bool,

    indent: xmlwriter::Indent,
    coordinates_precision: Option<u8>,

    quiet: bool,

    input: String,
    output: String,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    Ok(Args {
        width: input.opt_value_from_fn("--width", parse_length)?,
        height: input.opt_value_from_fn("--height", parse_length)?,
        ignore_view_box: input.contains("--ignore-viewbox"),
        ignore_root_clip: input.contains("--ignore-root-clip"),

        font_family: input.opt_value_from_str("--font-family")?,
        font_size: input
            .opt_value_from_fn("--font-size", parse_font_size)?
            .unwrap_or(12),
        font_files: input.values_from_str("--use-font-file")?,
        font_dirs: input.values_from_str("--use-fonts-dir")?,
        skip_system_fonts: input.contains("--skip-system-fonts"),

        indent: input
            .opt_value_from_fn("--indent", parse_indent)?
            .unwrap_or(xmlwriter::Indent::Spaces(4)),
        coordinates_precision: input
            .opt_value_from_fn("--coordinates-precision", parse_precision)?,

        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_font_size(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if n > 0 && n <= 192 {
        Ok(n)
    } else {
        Err("font size out of bounds".to_string())
    }
}

fn parse_indent(s: &str) -> Result<xmlwriter::Indent, String> {
    let indent = match s {
        "none" => xmlwriter::Indent::None,
        "0" => xmlwriter::Indent::Spaces(0),
        "1" => xmlwriter::Indent::Spaces(1),
        "2" => xmlwriter::Indent::Spaces(2),
        "3" => xmlwriter::Indent::Spaces(3),
        "4" => xmlwriter::Indent::Spaces(4),
        "tabs" => xmlwriter::Indent::Tabs,
        _ => return Err("invalid INDENT value".to_string()),
    };

    Ok(indent)
}

fn parse_length(s: &str) -> Result<f32, String> {
    let n: f32 = s.parse().map_err(|_| "invalid length")?;

    if n.is_finite() && n > 0.0 {
        Ok(n)
    } else {
        Err("LENGTH must be positive".to_string())
    }
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;

    if (2..=8).contains(&n) {
        Ok(n)
    } else {
        Err("precision NUM cannot be smaller than 2 or larger than 8".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom<'a> {
    Stdin,
    File(&'a str),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo<'a> {
    Stdout,
    File(&'a str),
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let in_svg = match args.input.as_str() {
        "-" => InputFrom::Stdin,
        "-c" => return Err("-c should be set after input".to_string()),
        path => InputFrom::File(path),
    };

    let out_svg = match args.output.as_str() {
        "-c" => OutputTo::Stdout,
        path => OutputTo::File(path),
    };

    #[cfg(feature = "text")]
    let text_measure = svgscene::FontdbTextMeasure::new(load_fonts(&args));

    #[cfg(not(feature = "text"))]
    {
        if !args.font_files.is_empty() || !args.font_dirs.is_empty() || args.skip_system_fonts {
            log::warn!("Text measuring support is disabled. Font options are ignored.");
        }
    }

    #[allow(unused_mut)]
    let mut opt = svgscene::Options {
        width: args.width,
        height: args.height,
        ignore_view_box: args.ignore_view_box,
        ignore_root_clip: args.ignore_root_clip,
        font_family: args
            .font_family
            .as_deref()
            .unwrap_or("Times New Roman")
            .to_string(),
        font_size: args.font_size as f32,
        ..svgscene::Options::default()
    };

    #[cfg(feature = "text")]
    {
        opt.text_measure = &text_measure;
    }

    let input_svg = match in_svg {
        InputFrom::Stdin => load_stdin(),
        InputFrom::File(path) => std::fs::read(path).map_err(|e| e.to_string()),
    }?;

    let tree = svgscene::Tree::from_data(&input_svg, &opt).map_err(|e| e.to_string())?;

    let xml_opt = svgscene::WriteOptions {
        coordinates_precision: args.coordinates_precision.unwrap_or(8),
        use_single_quote: false,
        indent: args.indent,
    };

    let s = tree.to_string(&xml_opt);
    match out_svg {
        OutputTo::Stdout => {
            io::stdout()
                .write_all(s.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(path) => {
            let mut f =
                File::create(path).map_err(|_| "failed to create the output file".to_string())?;
            f.write_all(s.as_bytes())
                .map_err(|_| "failed to write to the output file".to_string())?;
        }
    }

    Ok(())
}

#[cfg(feature = "text")]
fn load_fonts(args: &Args) -> svgscene::fontdb::Database {
    let mut fontdb = svgscene::fontdb::Database::new();

    #[cfg(feature = "system-fonts")]
    {
        if !args.skip_system_fonts {
            fontdb.load_system_fonts();
        }
    }

    #[cfg(not(feature = "system-fonts"))]
    {
        if !args.skip_system_fonts {
            log::debug!("System fonts loading is disabled.");
        }
    }

    for path in &args.font_files {
        if let Err(e) = fontdb.load_font_file(path) {
            log::warn!("Failed to load '{}' cause {}.", path.display(), e);
        }
    }

    for path in &args.font_dirs {
        fontdb.load_fonts_dir(path);
    }

    fontdb
}

fn load_stdin() -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_end(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
