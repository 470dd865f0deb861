use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use printable_binary::Layout;

/// Encode arbitrary bytes as printable UTF-8 glyphs and decode them back.
#[derive(Debug, Parser)]
#[command(
    name = "printable-binary",
    version,
    about = "Encode binary data as printable UTF-8 and decode it back",
    after_help = "Examples:\n  \
        printable-binary binary_file              Encode binary to UTF-8\n  \
        printable-binary -d encoded_file          Decode UTF-8 to binary\n  \
        printable-binary -f=4x10 binary_file      Encode with grouping\n  \
        printable-binary -a executable            Raw disassembly (any data)\n  \
        printable-binary --smart-asm binary       Format-aware disassembly\n  \
        printable-binary -a --arch arm64 binary   Force ARM64 raw disassembly"
)]
pub struct Args {
    /// Decode glyph text back to bytes (default is encode).
    #[arg(short, long)]
    pub decode: bool,

    /// Copy the raw input to stdout and write the glyphs to stderr.
    #[arg(short, long)]
    pub passthrough: bool,

    /// Group encoded output: N glyphs per group, M groups per line.
    #[arg(
        short,
        long,
        value_name = "NxM",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "8x10"
    )]
    pub format: Option<Layout>,

    /// Disassemble raw bytes with cstool and annotate each instruction.
    #[arg(short, long, requires = "file", conflicts_with = "smart_asm")]
    pub asm: bool,

    /// Disassemble an executable with objdump and annotate each instruction.
    #[arg(long, requires = "file")]
    pub smart_asm: bool,

    /// Architecture for --asm. Sniffed from ELF headers when omitted.
    #[arg(long, value_enum)]
    pub arch: Option<Arch>,

    /// Fail on the first byte that matches no glyph instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Print the character table as JSON and exit.
    #[arg(long, exclusive = true)]
    pub table: bool,

    /// More log output; repeat for more. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Input file. Reads stdin when absent or `-`.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Architectures understood by cstool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Arch {
    /// x86-64.
    X64,
    /// 32-bit x86.
    X32,
    /// AArch64.
    Arm64,
    /// 32-bit ARM.
    Arm,
}

impl Arch {
    /// Name cstool expects on its command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::X32 => "x32",
            Arch::Arm64 => "arm64",
            Arch::Arm => "arm",
        }
    }

    /// Reads `e_machine` from an ELF header.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        let header = data.get(..20)?;
        if header[..4] != *b"\x7fELF" {
            return None;
        }
        let machine = [header[18], header[19]];
        let machine = match header[5] {
            1 => u16::from_le_bytes(machine),
            2 => u16::from_be_bytes(machine),
            _ => return None,
        };
        match machine {
            0x3E => Some(Arch::X64),
            0x03 => Some(Arch::X32),
            0xB7 => Some(Arch::Arm64),
            0x28 => Some(Arch::Arm),
            _ => None,
        }
    }
}
