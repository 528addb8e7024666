//! One read-then-write pass through a TextProcessor

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use textflow_core::TextProcessor;
use tracing::info;

/// Which TextProcessor operations to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sync,
    Async,
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub source: String,
    pub destination: String,
    pub mode: Mode,
    pub line_ending: String,
    /// Lines in the rebuilt content
    pub lines: usize,
    pub bytes_written: usize,
    pub duration_ms: u128,
}

/// Read the source and write the rebuilt content to the destination
pub async fn run(processor: &TextProcessor, mode: Mode) -> Result<ProcessReport> {
    let started = Instant::now();

    let content = match mode {
        Mode::Sync => {
            // Blocking file I/O stays off the runtime threads
            let processor = processor.clone();
            tokio::task::spawn_blocking(move || -> textflow_core::Result<String> {
                let content = processor.read()?;
                processor.write(&content)?;
                Ok(content)
            })
            .await
            .context("Blocking processing task failed")??
        }
        Mode::Async => {
            let content = processor.read_async().await?;
            processor.write_async(&content).await?;
            content
        }
    };

    let report = ProcessReport {
        source: processor.source_path().display().to_string(),
        destination: processor.destination_path().display().to_string(),
        mode,
        line_ending: processor.line_ending().to_string(),
        lines: count_lines(&content, processor.line_ending().as_str()),
        bytes_written: content.len(),
        duration_ms: started.elapsed().as_millis(),
    };

    info!(
        source = %report.source,
        destination = %report.destination,
        lines = report.lines,
        bytes = report.bytes_written,
        "Processing completed"
    );

    Ok(report)
}

// Rebuilt lines hold no terminators, so every joiner separates two lines.
fn count_lines(content: &str, joiner: &str) -> usize {
    if content.is_empty() {
        0
    } else {
        content.matches(joiner).count() + 1
    }
}
