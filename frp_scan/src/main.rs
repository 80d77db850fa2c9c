//! # FRP Scan Replay
//!
//! Feeds a recorded probe log (`angle,outer,inner` per line) through the
//! measurement core and prints the quality report.
//!
//! Exit status: 0 = OK, 2 = NG, 1 = error.

mod input;

use clap::Parser;
use frp_common::prelude::{FrpConfig, LogLevel, load_config};
use frp_core::{Accumulator, ScanReport};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// FRP Scan: replay a probe sample log through the measurement core
#[derive(Parser, Debug)]
#[command(name = "frp_scan")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Compute pipe quality metrics from a recorded rotating-probe log")]
struct Args {
    /// Sample log, one `angle_deg,outer_mm,inner_mm` triple per line.
    #[arg(value_name = "SAMPLES")]
    samples: PathBuf,

    /// Measurement configuration TOML (sampling + tolerances).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the full report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path),
        None => Ok(FrpConfig::default()),
    };
    let level = match &config {
        Ok(c) => c.shared.log_level,
        Err(_) => LogLevel::Info,
    };
    setup_tracing(&args, level);

    let code = match config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, config))
    {
        Ok(report) if report.result.ok => 0,
        Ok(_) => 2,
        Err(e) => {
            error!("FATAL: {e}");
            1
        }
    };
    process::exit(code);
}

fn run(args: &Args, config: FrpConfig) -> Result<ScanReport, Box<dyn std::error::Error>> {
    let acc = Accumulator::new(config)?;

    let file = File::open(&args.samples)
        .map_err(|e| format!("cannot open {}: {e}", args.samples.display()))?;

    let mut accepted = 0usize;
    let mut skipped = 0usize;
    for item in input::readings(BufReader::new(file)) {
        match item? {
            Ok(r) => match acc.add_sample(r.angle_deg, r.outer_diameter, r.inner_diameter) {
                Ok(_) => accepted += 1,
                Err(e) => {
                    warn!("line {}: {e}", r.line);
                    skipped += 1;
                }
            },
            Err(e) => {
                warn!("{e}");
                skipped += 1;
            }
        }
    }
    info!(
        "replayed {}: {accepted} samples accepted, {skipped} skipped",
        args.samples.display()
    );

    let report = acc.compute();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(report)
}

fn print_report(report: &ScanReport) {
    let r = &report.result;
    println!(
        "FRP scan: {} sections ({} low-confidence)",
        report.sections.len(),
        report.low_confidence_sections()
    );
    println!("  outer diameter avg  {:>12.4} mm", r.outer_diameter_avg);
    println!("  inner diameter avg  {:>12.4} mm", r.inner_diameter_avg);
    println!("  roundness outer     {:>12.4} mm", r.roundness_outer);
    println!("  roundness inner     {:>12.4} mm", r.roundness_inner);
    println!("  straightness        {:>12.4} mm", r.straightness);
    println!("  concentricity       {:>12.4} mm", r.concentricity);
    println!("  length              {:>12.4}", r.length);
    if r.ok {
        println!("  result              {:>12}", "OK");
    } else {
        println!("  result              {:>12}  {:?}", "NG", report.violations);
    }
}

/// Setup tracing subscriber on stderr so stdout carries only the report.
fn setup_tracing(args: &Args, level: LogLevel) {
    let directive = if args.verbose {
        LogLevel::Debug.as_directive()
    } else {
        level.as_directive()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
