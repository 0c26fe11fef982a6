//! CLI entry point for the tagvalue high/low reporter.
//!
//! Reads tagvalue records from standard input (or a file), folds order
//! placements into per-account high/low statistics, and prints the
//! report to standard output. Raw bytes of duplicate-stricken messages
//! go to standard error.
//!
//! # Usage
//!
//! ```bash
//! # Report from standard input
//! highlow_report < orders.txt
//!
//! # Report from a file
//! highlow_report --input orders.txt
//!
//! # Machine-readable output
//! highlow_report --json < orders.txt
//! ```
//!
//! The process exits 0 only when the input stream was fully consumed and
//! ended cleanly at a message boundary; a malformed token, a truncated
//! final message, or a stream error exits 1 without printing a report.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use fix_highlow_reporter::{render_json, Pipeline, PipelineSummary, ReportFormat, Result};

/// Command-line arguments
struct Args {
    /// Input file; standard input when absent
    input: Option<PathBuf>,
    /// Emit JSON instead of the fixed-width table
    json: bool,
}

fn parse_args() -> std::result::Result<Args, String> {
    let argv: Vec<String> = std::env::args().collect();

    let mut input: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                if i >= argv.len() {
                    return Err("--input requires a path".to_string());
                }
                input = Some(PathBuf::from(&argv[i]));
            }
            "--json" => {
                json = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg => {
                return Err(format!("Unknown argument: {}", arg));
            }
        }
        i += 1;
    }

    Ok(Args { input, json })
}

fn print_help() {
    eprintln!(
        r#"
High/Low Order Price Reporter

Reads FIX-style tagvalue records (tag=value fields separated by '|', one
message per line) and reports the highest and lowest order price seen per
account. Only order-placement messages (35=D) with an account (tag 1) and
a price (tag 44) contribute. Messages repeating a tag are dumped raw to
standard error and discarded.

USAGE:
    highlow_report [OPTIONS] < input
    highlow_report --input <PATH>

OPTIONS:
    -i, --input <PATH>    Read from a file instead of standard input
        --json            Emit the report as JSON
    -h, --help            Print this help message

EXIT STATUS:
    0    Input fully consumed, report printed
    1    Malformed input, truncated final message, or stream error
"#
    );
}

/// Run the pipeline over any byte source, with stderr as the diagnostic
/// sink.
fn run_pipeline<R: Read>(input: R) -> Result<PipelineSummary> {
    let stderr = io::stderr();
    Pipeline::new(input, stderr.lock()).run()
}

fn run(args: &Args) -> Result<()> {
    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
            run_pipeline(BufReader::new(file))?
        }
        None => {
            let stdin = io::stdin();
            run_pipeline(stdin.lock())?
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        render_json(&summary.accounts, &mut out)?;
    } else {
        ReportFormat::default().render(&summary.accounts, &mut out)?;
    }

    Ok(())
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    // Parse arguments
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
