//! Runs external disassemblers and annotates their listings.

use std::{
    ffi::OsStr,
    io,
    path::Path,
    process::{Command, Output},
};

use anyhow::{Context, Result, bail};
use printable_binary::{annotate_cstool, annotate_objdump};

use crate::cli::Arch;

/// Disassembles `code` with `cstool`.
///
/// Returns `None` when cstool is not installed.
pub fn cstool(code: &[u8], arch: Arch) -> Result<Option<String>> {
    let hex = hex::encode(code);
    let output = match tool("cstool", [OsStr::new(arch.as_str()), OsStr::new(&hex)]) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("cstool not found; install capstone for disassembly");
            return Ok(None);
        }
        result => result.context("failed to run cstool")?,
    };
    check("cstool", &output)?;
    Ok(Some(annotate_cstool(&output.stdout)))
}

/// Disassembles the executable at `path` with `objdump -d`.
pub fn objdump(path: &Path) -> Result<String> {
    let output = match tool("objdump", [OsStr::new("-d"), path.as_os_str()]) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            bail!("objdump not found; --smart-asm requires it")
        }
        result => result.context("failed to run objdump")?,
    };
    check("objdump", &output)?;
    Ok(annotate_objdump(&output.stdout))
}

fn tool<'a>(program: &str, args: impl IntoIterator<Item = &'a OsStr>) -> io::Result<Output> {
    tracing::debug!(program, "spawning disassembler");
    Command::new(program).args(args).output()
}

fn check(program: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    bail!(
        "{program} exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    )
}
