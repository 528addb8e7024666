//! textflow CLI - copy a text file with its line endings normalized
//!
//! Composition root: wires the host filesystem into a TextProcessor.

mod logging;
mod runner;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::info;

use textflow_core::{LineEnding, TextProcessor};

use logging::LogFormat;
use runner::{Mode, ProcessReport};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "textflow")]
#[command(about = "Read a text file and write it out with host line endings", long_about = None)]
#[command(version)]
struct Cli {
    /// Source text file
    source: String,

    /// Destination text file (overwritten)
    destination: String,

    /// Use the non-blocking read/write operations
    #[arg(long = "async", env = "TEXTFLOW_ASYNC")]
    use_async: bool,

    /// Line terminator: lf, crlf, cr or native
    #[arg(long, env = "TEXTFLOW_LINE_ENDING", default_value = "native")]
    line_ending: LineEnding,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    logging::init(LogFormat::from_env())?;
    info!("textflow v{} starting", VERSION);

    // 2. Resolve paths
    let source = shellexpand::tilde(&cli.source).into_owned();
    let destination = shellexpand::tilde(&cli.destination).into_owned();
    let mode = if cli.use_async { Mode::Async } else { Mode::Sync };

    info!(
        source = %source,
        destination = %destination,
        line_ending = %cli.line_ending,
        mode = ?mode,
        "Processing text file"
    );

    // 3. Wire the processor over the host filesystem
    let processor = TextProcessor::new(&source, &destination).with_line_ending(cli.line_ending);

    // 4. Run
    let report = runner::run(&processor, mode)
        .await
        .with_context(|| format!("Failed to process {} -> {}", source, destination))?;

    print_report(&report, cli.format)
}

fn print_report(report: &ProcessReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            println!("{}", "✓ File processed successfully".green().bold());
            println!();
            println!("  {} {}", "Source:".bold(), report.source);
            println!("  {} {}", "Destination:".bold(), report.destination);
            println!("  {} {}", "Line ending:".bold(), report.line_ending);
            println!("  {} {}", "Lines:".bold(), report.lines);
            println!("  {} {}", "Bytes written:".bold(), report.bytes_written);
            println!("  {} {} ms", "Duration:".bold(), report.duration_ms);
        }
    }
    Ok(())
}
