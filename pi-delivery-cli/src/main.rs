//! Interactive terminal client for streaming Pi digits.
//!
//! Prompts for a starting index and a digit count, then streams the
//! requested run from pi.delivery straight to the terminal.

mod sink;

use std::io::{self, Write};

use pi_delivery::{DigitRequest, DigitSequencer, DigitWriter, RenderError};
use pi_delivery_http::{DIGIT_LIMIT, PiDelivery};

use crate::sink::AnsiSink;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Terminal interaction failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A prompt answer was not a non-negative integer.
    #[error("invalid input: {0}")]
    Input(String),

    /// The delivery pipeline failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("pi-delivery error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let start = prompt_number("Starting index: ")?;
    let count = prompt_number("Digit count: ")?;

    println!("\nThe requested digits are:\n");

    let sequencer = DigitSequencer::new(PiDelivery::new(), DIGIT_LIMIT);
    let mut sink = AnsiSink::new(io::stdout());
    DigitWriter::new(&mut sink, start)
        .render(sequencer.sequence(DigitRequest::new(start, count)))
        .await?;

    Ok(())
}

/// Prompt on stdout and parse one non-negative integer from stdin.
fn prompt_number(prompt: &str) -> Result<u64, CliError> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim();
    answer.parse().map_err(|_| {
        CliError::Input(format!("expected a non-negative integer, got {answer:?}"))
    })
}
