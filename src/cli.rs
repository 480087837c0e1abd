//! Shared implementation of the `bmp-negate` and `bmp-compare` binaries.
//!
//! Exit codes: 0 on success or matching images, 1 on any error, 2 when the
//! compared images differ.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, debug, info};

use crate::{BmpImage, Comparison, PaletteEntry, compare, read_file, write_file};

/// Exit code for a comparison that found differences.
pub const EXIT_DIFFERENT: u8 = 2;

#[derive(Parser, Debug)]
#[command(about = "Write the color negative of an 8-bit or 24-bit BMP image.")]
pub struct NegateArgs {
    /// Only report errors.
    #[arg(short, long)]
    pub silent: bool,

    /// Image to read.
    pub input: PathBuf,

    /// Where to write the negated image.
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Compare two 8-bit or 24-bit BMP images pixel by pixel.")]
pub struct CompareArgs {
    /// Only report errors and the final verdict.
    #[arg(short, long)]
    pub silent: bool,

    /// First image.
    pub first: PathBuf,

    /// Second image.
    pub second: PathBuf,
}

/// Install a stderr subscriber; `silent` keeps only errors.
pub fn init_logging(silent: bool) {
    let level = if silent { Level::ERROR } else { Level::DEBUG };
    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .without_time()
        .try_init();
}

pub fn run_negate(args: &NegateArgs) -> Result<()> {
    let mut image = read_file(&args.input)
        .with_context(|| format!("reading BMP file '{}'", args.input.display()))?;

    info!(
        "converting image '{}' to negative: {}x{} ({:?}), {} bpp",
        args.input.display(),
        image.width(),
        image.height(),
        image.orientation(),
        image.bit_depth().bits()
    );
    if let Some(palette) = image.palette() {
        info!("palette size: {}", palette.len());
        dump_palette("before inversion", palette);
    }

    image.negate();

    if let Some(palette) = image.palette() {
        dump_palette("after inversion", palette);
    }

    write_file(&image, &args.output)
        .with_context(|| format!("writing BMP file '{}'", args.output.display()))?;

    info!(
        "converted '{}' to '{}'",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

fn dump_palette(stage: &str, palette: &[PaletteEntry]) {
    debug!("palette {stage}:");
    for (i, e) in palette.iter().enumerate() {
        debug!("[{i}] B={} G={} R={}", e.blue, e.green, e.red);
    }
}

pub fn run_compare(args: &CompareArgs) -> Result<Comparison> {
    let mut first = load(&args.first)?;
    let mut second = load(&args.second)?;
    info!(
        "comparing '{}' ({}x{}) with '{}' ({}x{})",
        args.first.display(),
        first.width(),
        first.height(),
        args.second.display(),
        second.width(),
        second.height()
    );
    let outcome = compare(&mut first, &mut second).with_context(|| {
        format!(
            "comparing '{}' with '{}'",
            args.first.display(),
            args.second.display()
        )
    })?;
    Ok(outcome)
}

fn load(path: &Path) -> Result<BmpImage> {
    read_file(path).with_context(|| format!("reading BMP image '{}'", path.display()))
}

/// Render a comparison verdict the way `bmp-compare` prints it.
pub fn report(outcome: &Comparison) -> String {
    match outcome {
        Comparison::Same => "Images are same\n".to_string(),
        Comparison::Different(d) if d.palette_mismatch => "Palettes differ\n".to_string(),
        Comparison::Different(d) => {
            let mut out = String::from("Next pixels are different:\n");
            for p in &d.pixels {
                out.push_str(&format!("x{:<6} y{:<6}\n", p.x, p.y));
            }
            if d.capped {
                out.push_str(&format!(
                    "(stopped after {} differences)\n",
                    d.pixels.len()
                ));
            }
            out
        }
    }
}

/// `main` body of `bmp-negate`.
pub fn negate_main() -> ExitCode {
    let args = NegateArgs::parse();
    init_logging(args.silent);
    match run_negate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `main` body of `bmp-compare`.
pub fn compare_main() -> ExitCode {
    let args = CompareArgs::parse();
    init_logging(args.silent);
    match run_compare(&args) {
        Ok(outcome @ Comparison::Same) => {
            print!("{}", report(&outcome));
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            eprint!("{}", report(&outcome));
            ExitCode::from(EXIT_DIFFERENT)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
