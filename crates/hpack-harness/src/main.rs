//! `hpack-harness` binary entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;

use hpack_harness::{runner, HarnessConfig, StderrLog, Verbosity};

/// Differential conformance and compression benchmark for HPACK codecs.
#[derive(Parser, Debug)]
#[command(name = "hpack-harness")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Corpus root containing implementation subdirectories and raw-data/
    #[arg(long, default_value = "hpack-test-case")]
    corpus: PathBuf,

    /// Subject encoder executable
    #[arg(long)]
    encoder: PathBuf,

    /// Subject decoder executable (required unless --encode-only)
    #[arg(long)]
    decoder: Option<PathBuf>,

    /// Measure compression only; skip the decode verification passes
    #[arg(long)]
    encode_only: bool,

    /// Increase diagnostic verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    if !cli.encode_only && cli.decoder.is_none() {
        bail!("--decoder is required unless --encode-only is set");
    }

    let log = StderrLog::new(Verbosity::from_count(cli.verbose));
    let config = HarnessConfig {
        corpus_root: cli.corpus,
        encoder: cli.encoder,
        decoder: cli.decoder,
        include_decode_pass: !cli.encode_only,
    };

    let mut stdout = std::io::stdout().lock();
    runner::run(&config, &log, &mut stdout)?;
    Ok(())
}
