//! Encode and decode pipelines over arbitrary readers and writers.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, bail};
use printable_binary::{Decoder, DecoderOptions, Grouper, Layout, encode_into};

use crate::{
    cli::{Arch, Args},
    disasm,
};

/// Bytes read per step.
pub const CHUNK: usize = 8 * 1024;

/// Byte counts from one encode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub input: usize,
    pub output: usize,
}

/// Byte counts from one decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub input: usize,
    pub decoded: usize,
    pub skipped: usize,
}

/// Executes the mode selected by `args`.
pub fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout().lock();
    let mut stdout = BufWriter::new(stdout);

    if args.decode {
        if args.passthrough {
            tracing::warn!("--passthrough is ignored when decoding");
        }
        let options = DecoderOptions {
            strict: args.strict,
            ..DecoderOptions::default()
        };
        let stats = decode_stream(open_input(args.file.as_deref())?, &mut stdout, options)?;
        tracing::info!(
            input = stats.input,
            decoded = stats.decoded,
            skipped = stats.skipped,
            "decoded"
        );
        return stdout.flush().context("failed to write output");
    }

    if args.smart_asm || args.asm {
        let path = required_file(args.file.as_deref())?;
        let listing = if args.smart_asm {
            Some(disasm::objdump(path)?)
        } else {
            let code = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            disasm::cstool(&code, resolve_arch(args.arch, &code))?
        };
        if let Some(listing) = listing {
            if args.passthrough {
                io::copy(&mut open_input(Some(path))?, &mut stdout)
                    .context("failed to write output")?;
                io::stderr()
                    .write_all(listing.as_bytes())
                    .context("failed to write listing")?;
            } else {
                stdout
                    .write_all(listing.as_bytes())
                    .context("failed to write listing")?;
            }
            return stdout.flush().context("failed to write output");
        }
        tracing::info!("continuing with plain encoding");
    }

    let input = open_input(args.file.as_deref())?;
    let stats = if args.passthrough {
        let mut stderr = io::stderr().lock();
        encode_stream(input, &mut stderr, Some(&mut stdout), args.format)?
    } else {
        encode_stream(input, &mut stdout, None, args.format)?
    };
    tracing::info!(input = stats.input, output = stats.output, "encoded");
    stdout.flush().context("failed to write output")
}

/// Encodes `input` into `glyphs`, chunk by chunk.
///
/// With `raw`, every chunk is also copied there unchanged before its glyphs
/// are written.
pub fn encode_stream(
    mut input: impl Read,
    mut glyphs: impl Write,
    mut raw: Option<&mut dyn Write>,
    layout: Option<Layout>,
) -> Result<EncodeStats> {
    let mut buf = vec![0u8; CHUNK];
    let mut text = String::with_capacity(CHUNK * 2);
    let mut grouped = String::new();
    let mut grouper = layout.map(Grouper::new);
    let mut stats = EncodeStats::default();

    loop {
        let n = read_chunk(&mut input, &mut buf)?;
        if n == 0 {
            break;
        }
        stats.input += n;
        if let Some(raw) = raw.as_mut() {
            raw.write_all(&buf[..n]).context("failed to write passthrough data")?;
        }

        text.clear();
        encode_into(&buf[..n], &mut text);
        let piece = match grouper.as_mut() {
            Some(grouper) => {
                grouped.clear();
                grouper.push_str(&text, &mut grouped);
                &grouped
            }
            None => &text,
        };
        glyphs
            .write_all(piece.as_bytes())
            .context("failed to write encoded output")?;
        stats.output += piece.len();
    }

    glyphs.flush().context("failed to write encoded output")?;
    Ok(stats)
}

/// Decodes glyph text from `input` into `out`, chunk by chunk.
pub fn decode_stream(
    mut input: impl Read,
    mut out: impl Write,
    options: DecoderOptions,
) -> Result<DecodeStats> {
    let mut buf = vec![0u8; CHUNK];
    let mut bytes = Vec::with_capacity(CHUNK);
    let mut decoder = Decoder::new(options);
    let mut input_len = 0;

    loop {
        let n = read_chunk(&mut input, &mut buf)?;
        if n == 0 {
            break;
        }
        input_len += n;
        bytes.clear();
        decoder.feed(&buf[..n], &mut bytes)?;
        out.write_all(&bytes).context("failed to write decoded output")?;
    }

    bytes.clear();
    let summary = decoder.finish(&mut bytes)?;
    out.write_all(&bytes).context("failed to write decoded output")?;
    out.flush().context("failed to write decoded output")?;

    Ok(DecodeStats {
        input: input_len,
        decoded: summary.decoded,
        skipped: summary.skipped,
    })
}

fn read_chunk(input: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    loop {
        match input.read(buf) {
            Ok(n) => return Ok(n),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err).context("failed to read input"),
        }
    }
}

fn open_input(file: Option<&Path>) -> Result<Box<dyn Read>> {
    match file {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
    }
}

fn required_file(file: Option<&Path>) -> Result<&Path> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(path),
        _ => bail!("disassembly needs a file argument"),
    }
}

fn resolve_arch(requested: Option<Arch>, code: &[u8]) -> Arch {
    if let Some(arch) = requested {
        tracing::info!(arch = arch.as_str(), "using requested architecture");
        return arch;
    }
    let arch = Arch::sniff(code).unwrap_or(Arch::X64);
    tracing::info!(arch = arch.as_str(), "detected architecture");
    arch
}
