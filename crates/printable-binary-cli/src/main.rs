//! `printable-binary`: encode arbitrary bytes as printable glyphs and back.
//!
//! **Usage:**
//! ```text
//! printable-binary [-d] [-p] [-f[=NxM]] [-a | --smart-asm] [--arch ARCH] [FILE]
//! ```

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use printable_binary::CODE_TABLE;
use tracing_subscriber::EnvFilter;

mod cli;
mod disasm;
mod run;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.table {
        return write_table(io::stdout().lock());
    }
    if args.file.is_none() && io::stdin().is_terminal() {
        Args::command().print_help()?;
        return Ok(());
    }
    run::run(&args)
}

/// Logs go to stderr. `RUST_LOG` overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Writes the character table as a JSON array, one row per byte value.
fn write_table(mut out: impl Write) -> Result<()> {
    let entries: Vec<_> = CODE_TABLE.entries().collect();
    serde_json::to_writer_pretty(&mut out, &entries).context("failed to write table")?;
    writeln!(out).context("failed to write table")?;
    Ok(())
}
