//! xoj2tikz - Convert Xournal notes to TikZ figures.
//!
//! A command line tool that reads a (usually gzip-compressed) `.xoj`
//! document, runs the shape optimization pipeline and writes TikZ markup
//! to a file or stdout. The conversion itself lives in `inktex-core`; this
//! binary only handles arguments, file I/O and decompression.

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use flate2::read::GzDecoder;
use inktex_core::output::{OutputModule, Tikz, TikzDebug, TikzLineWidth};
use inktex_core::{optimize, parser};
use tracing_subscriber::EnvFilter;

/// Rendering strategy for the generated TikZ code.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// Variable line width strokes (default)
    #[default]
    Linewidth,
    /// Every stroke with its uniform base width
    Fixed,
    /// Variable line width plus a marker at every stroke coordinate
    Debug,
}

/// Convert Xournal .xoj notes to TikZ figures.
#[derive(Parser, Debug)]
#[command(name = "xoj2tikz")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Xournal file
    file: PathBuf,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Skip stroke simplification and shape detection
    #[arg(long = "no-optimize", action = ArgAction::SetTrue)]
    no_optimize: bool,

    /// Type of output to generate
    #[arg(
        short = 't',
        long = "output-type",
        value_enum,
        default_value = "linewidth"
    )]
    output_type: OutputType,

    /// Shorthand for --output-type debug
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Use debug logging level
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Read the input file, transparently decompressing it when it carries the
/// gzip magic bytes. Documents saved uncompressed are accepted as-is.
fn read_input(path: &PathBuf) -> Result<Vec<u8>> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if raw.starts_with(&[0x1f, 0x8b]) {
        let mut decoder = GzDecoder::new(raw.as_slice());
        let mut data = Vec::new();
        decoder
            .read_to_end(&mut data)
            .with_context(|| format!("decompressing {}", path.display()))?;
        Ok(data)
    } else {
        Ok(raw)
    }
}

fn convert(args: &Args, data: &[u8], out: Box<dyn Write>, interactive: bool) -> Result<()> {
    let mut document = parser::parse_document(data)?;

    if !args.no_optimize {
        optimize::run_all(&mut document);
    }

    let output_type = if args.debug {
        OutputType::Debug
    } else {
        args.output_type
    };
    let mut module: Box<dyn OutputModule> = match output_type {
        OutputType::Linewidth => Box::new(TikzLineWidth::with_interactive(out, interactive)),
        OutputType::Fixed => Box::new(Tikz::with_interactive(out, interactive)),
        OutputType::Debug => Box::new(TikzDebug::with_interactive(out, interactive)),
    };
    tracing::debug!("rendering with the '{}' output module", module.name());
    module.write_all(&document)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let data = read_input(&args.file)?;

    let (output, interactive): (Box<dyn Write>, bool) = if args.outfile == "-" {
        let stdout = io::stdout();
        let interactive = stdout.is_terminal();
        (Box::new(BufWriter::new(stdout)), interactive)
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("creating output file {}", args.outfile))?;
        (Box::new(BufWriter::new(file)), false)
    };

    convert(&args, &data, output, interactive)
        .with_context(|| format!("converting {}", args.file.display()))
}
