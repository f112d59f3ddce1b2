//! Command-line front end: prints the chart of a birth moment as JSON.
//!
//! ```bash
//! saju 1986-05-26 --hour 5 --pretty
//! RUST_LOG=saju=debug saju 2023-10-15 --hour 12 --longitude 129.075
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use saju::{BirthInput, Date, EngineConfig, Gender, Saju};

#[derive(Parser)]
#[command(name = "saju", version, about = "Four Pillars chart of a birth moment")]
struct Cli {
    /// Birth date, YYYY-MM-DD
    date: Date,
    /// Clock hour, 0-23 (configured default when omitted)
    #[arg(long)]
    hour: Option<u32>,
    /// Clock minute, 0-59
    #[arg(long)]
    minute: Option<u32>,
    /// Degrees east of Greenwich (configured default when omitted)
    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,
    /// Degrees north of the equator
    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,
    #[arg(long, value_enum)]
    gender: Option<GenderArg>,
    /// JSON engine configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Indent the output
    #[arg(long)]
    pretty: bool,
}

#[derive(Copy, Clone, clap::ValueEnum)]
enum GenderArg {
    #[value(name = "M", alias = "m")]
    Male,
    #[value(name = "F", alias = "f")]
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let (year, month, day) = cli.date.gregorian();
    let input = BirthInput {
        year,
        month: month as u32,
        day: day as u32,
        hour: cli.hour,
        minute: cli.minute,
        longitude: cli.longitude,
        latitude: cli.latitude,
        gender: cli.gender.map(Gender::from),
    };
    let result = Saju::new(config)
        .compute(&input)
        .with_context(|| format!("computing chart for {}", cli.date))?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("serializing chart")?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
