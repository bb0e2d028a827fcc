//! Generates IDNA2008 and UTS #46 codepoint tables from a local copy of the
//! Unicode Character Database.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use idna_tables::{
    emit::{self, LibData, Uts46Data},
    Classifier, DirectorySource, Error, PropertyStore, UnicodeVersion,
};
use log::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds IDNA codepoint tables", long_about = None)]
struct Args {
    /// Directory holding the Unicode data files [default: ./ucd/<version>]
    #[arg(long, env = "IDNA_UCD_DIR", global = true)]
    ucd_dir: Option<PathBuf>,

    /// Unicode version of the data files, as major.minor.patch
    #[arg(long, default_value = "15.1.0", global = true)]
    unicode_version: UnicodeVersion,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the IDNA2008 derived property table in the IANA layout
    MakeTable {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write script ranges, joining types and codepoint classes
    MakeLibdata {
        #[arg(long, value_enum, default_value_t = Format::Rust)]
        format: Format,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the compacted UTS #46 mapping rows
    MakeUts46data {
        #[arg(long, value_enum, default_value_t = Format::Rust)]
        format: Format,

        #[arg(long, default_value_t = emit::DEFAULT_SEGMENT_SIZE)]
        segment_size: usize,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Explain how a single codepoint is classified
    Codepoint {
        /// Codepoint in hexadecimal, optionally prefixed by `U+` or `0x`
        #[arg(value_parser = parse_codepoint)]
        codepoint: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Rust,
    Json,
}

fn parse_codepoint(arg: &str) -> Result<u32, Error> {
    let invalid = || Error::InvalidCodepoint(arg.to_owned());
    let trimmed = arg.trim();
    let digits = ["U+", "u+", "0x", "0X"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    if digits.is_empty() || digits.starts_with('+') {
        return Err(invalid());
    }
    match u32::from_str_radix(digits, 16) {
        Ok(cp) if cp <= u32::from(char::MAX) => Ok(cp),
        _ => Err(invalid()),
    }
}

fn write_output(output: Option<&Path>, contents: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", contents.len(), path.display());
        }
        None => io::stdout()
            .lock()
            .write_all(contents)
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    let version = args.unicode_version;
    if version.exceeds_normalization_data() {
        warn!(
            "Unicode {} is newer than the normalization data ({}); new codepoints are treated as unassigned by NFKC",
            version,
            UnicodeVersion::normalization_data()
        );
    }

    let ucd_dir = args
        .ucd_dir
        .unwrap_or_else(|| Path::new("ucd").join(version.to_string()));
    info!("reading Unicode {} data from {}", version, ucd_dir.display());
    let store = PropertyStore::load(&DirectorySource::new(&ucd_dir))
        .with_context(|| format!("Failed to load Unicode data from {}", ucd_dir.display()))?;
    debug!("{:?}", store);

    let classifier = Classifier::new();
    let mut buf = Vec::new();
    match args.command {
        Command::MakeTable { output } => {
            let runs = emit::idna2008_runs(&store, &classifier);
            info!("generating IANA table");
            emit::write_iana_table(&mut buf, &store, &runs)?;
            write_output(output.as_deref(), &buf)?;
        }
        Command::MakeLibdata { format, output } => {
            let runs = emit::idna2008_runs(&store, &classifier);
            info!("generating libdata ({:?})", format);
            let data = LibData::build(&store, version, &runs);
            match format {
                Format::Rust => data.write_rust(&mut buf)?,
                Format::Json => data.write_json(&mut buf)?,
            }
            write_output(output.as_deref(), &buf)?;
        }
        Command::MakeUts46data {
            format,
            segment_size,
            output,
        } => {
            info!("generating uts46data ({:?})", format);
            let data = Uts46Data::build(&store, version, segment_size);
            match format {
                Format::Rust => data.write_rust(&mut buf)?,
                Format::Json => data.write_json(&mut buf)?,
            }
            write_output(output.as_deref(), &buf)?;
        }
        Command::Codepoint { codepoint } => {
            let diagnosis = classifier.diagnose(&store.get(codepoint));
            print!("{}", diagnosis);
        }
    }
    Ok(())
}
