//! Annotating disassembler listings with glyphs.
//!
//! Disassemblers print each instruction as an address, its machine code in
//! hex, and the decoded mnemonic. These helpers replace the hex with the
//! instruction's glyphs:
//!
//! ```text
//!     1001:	48 89 e5             	mov    %rsp,%rbp
//! HÉĥ 🧾 mov    %rsp,%rbp
//! ```
//!
//! Listing text is handled as bytes because symbol names in disassembler
//! output are not guaranteed to be UTF-8.

use alloc::{string::String, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::encoder::encode_into;

/// Separator between an instruction's glyphs and its mnemonic.
pub const RECEIPT: &str = " \u{1F9FE} ";

/// One disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// Address or offset printed by the disassembler.
    pub address: u64,
    /// Machine code, in the order the disassembler printed it.
    pub bytes: Vec<u8>,
    /// Mnemonic and operands.
    pub text: &'a BStr,
}

/// A meaningful line of `objdump -d` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingLine<'a> {
    /// An instruction line.
    Instruction(Instruction<'a>),
    /// A `file format` or `Disassembly of section` line.
    Header(&'a BStr),
}

/// Parses a line of `cstool` output: ` addr  hex-bytes  instruction`.
///
/// The machine code may be one contiguous hex token (`4889e5`) or a run of
/// two-digit tokens (`48 89 e5`). Lines without machine code or without an
/// instruction are ignored.
#[must_use]
pub fn parse_cstool_line(line: &[u8]) -> Option<Instruction<'_>> {
    let (address, rest) = split_token(line);
    let address = parse_address(address)?;
    let (bytes, text) = take_hex_bytes(rest)?;
    instruction(address, bytes, text)
}

/// Parses a line of `objdump -d` output.
///
/// Instruction lines look like `addr:\thex bytes\tinstruction`. Continuation
/// lines that only carry bytes, symbol labels and blank lines are ignored.
#[must_use]
pub fn parse_objdump_line(line: &[u8]) -> Option<ListingLine<'_>> {
    if line.contains_str("Disassembly of section") || line.contains_str("file format") {
        return Some(ListingLine::Header(line.trim().as_bstr()));
    }

    let (address, rest) = line.split_once_str(":")?;
    let address = parse_address(address.trim())?;
    let rest = rest.trim_start_with(|c| c == ' ');
    let rest = rest.strip_prefix(b"\t").unwrap_or(rest);
    let (hex_field, text) = rest.split_once_str("\t")?;

    let mut bytes = Vec::new();
    for token in hex_field.fields() {
        if !is_hex_token(token) {
            return None;
        }
        bytes.extend(hex::decode(token).ok()?);
    }
    instruction(address, bytes, text).map(ListingLine::Instruction)
}

/// Writes `glyphs 🧾 instruction` and a newline.
pub fn render_instruction(instruction: &Instruction<'_>, out: &mut String) {
    encode_into(&instruction.bytes, out);
    out.push_str(RECEIPT);
    out.push_str(&instruction.text.to_str_lossy());
    out.push('\n');
}

/// Annotates every instruction in a `cstool` listing.
#[must_use]
pub fn annotate_cstool(listing: &[u8]) -> String {
    let mut out = String::with_capacity(listing.len());
    for instruction in listing.lines().filter_map(parse_cstool_line) {
        render_instruction(&instruction, &mut out);
    }
    out
}

/// Annotates an `objdump -d` listing. Headers are kept as `# ` comments.
#[must_use]
pub fn annotate_objdump(listing: &[u8]) -> String {
    let mut out = String::with_capacity(listing.len());
    for line in listing.lines().filter_map(parse_objdump_line) {
        match line {
            ListingLine::Instruction(instruction) => render_instruction(&instruction, &mut out),
            ListingLine::Header(header) => {
                out.push_str("# ");
                out.push_str(&header.to_str_lossy());
                out.push('\n');
            }
        }
    }
    out
}

fn instruction(address: u64, bytes: Vec<u8>, text: &[u8]) -> Option<Instruction<'_>> {
    let text = text.trim();
    if bytes.is_empty() || text.is_empty() {
        return None;
    }
    Some(Instruction {
        address,
        bytes,
        text: text.as_bstr(),
    })
}

fn parse_address(token: &[u8]) -> Option<u64> {
    let token = token.to_str().ok()?;
    let token = token.strip_prefix("0x").unwrap_or(token);
    u64::from_str_radix(token, 16).ok()
}

/// Splits off the first whitespace-delimited token.
fn split_token(s: &[u8]) -> (&[u8], &[u8]) {
    let s = s.trim_start();
    match s.find_byteset(b" \t") {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, &[]),
    }
}

fn is_hex_token(token: &[u8]) -> bool {
    !token.is_empty() && token.len() % 2 == 0 && token.iter().all(u8::is_ascii_hexdigit)
}

/// Takes the machine code that starts `rest`, returning it and the remainder.
fn take_hex_bytes(rest: &[u8]) -> Option<(Vec<u8>, &[u8])> {
    let (first, mut rest) = split_token(rest);
    if !is_hex_token(first) {
        return None;
    }
    let mut bytes = hex::decode(first).ok()?;
    if first.len() == 2 {
        loop {
            let (token, tail) = split_token(rest);
            if token.len() != 2 || !is_hex_token(token) {
                break;
            }
            bytes.extend(hex::decode(token).ok()?);
            rest = tail;
        }
    }
    Some((bytes, rest))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn cstool_spaced_bytes() {
        let line = b" 1  48 89 e5                                         mov\trbp, rsp";
        let instruction = parse_cstool_line(line).unwrap();
        assert_eq!(instruction.address, 1);
        assert_eq!(instruction.bytes, [0x48, 0x89, 0xE5]);
        assert_eq!(instruction.text, "mov\trbp, rsp");
    }

    #[test]
    fn cstool_contiguous_bytes() {
        let instruction = parse_cstool_line(b" 0  4889e5  mov rbp, rsp").unwrap();
        assert_eq!(instruction.address, 0);
        assert_eq!(instruction.bytes, [0x48, 0x89, 0xE5]);
        assert_eq!(instruction.text, "mov rbp, rsp");
    }

    #[test]
    fn cstool_ignores_noise() {
        assert_eq!(parse_cstool_line(b""), None);
        assert_eq!(parse_cstool_line(b"ERROR: invalid assembly code"), None);
        assert_eq!(parse_cstool_line(b" 0  55"), None);
        assert_eq!(parse_cstool_line(b" 0  zz  nop"), None);
    }

    #[test]
    fn objdump_instruction_and_header_lines() {
        let line = b"    1001:\t48 89 e5             \tmov    %rsp,%rbp";
        let Some(ListingLine::Instruction(instruction)) = parse_objdump_line(line) else {
            panic!("expected instruction");
        };
        assert_eq!(instruction.address, 0x1001);
        assert_eq!(instruction.bytes, [0x48, 0x89, 0xE5]);
        assert_eq!(instruction.text, "mov    %rsp,%rbp");

        assert_eq!(
            parse_objdump_line(b"/tmp/a.out:     file format elf64-x86-64"),
            Some(ListingLine::Header("/tmp/a.out:     file format elf64-x86-64".into()))
        );
        assert_eq!(
            parse_objdump_line(b"Disassembly of section .text:"),
            Some(ListingLine::Header("Disassembly of section .text:".into()))
        );
    }

    #[test]
    fn objdump_skips_labels_and_continuations() {
        assert_eq!(parse_objdump_line(b"0000000000001000 <_start>:"), None);
        assert_eq!(parse_objdump_line(b"    100b:\t00 00 00 "), None);
        assert_eq!(parse_objdump_line(b""), None);
    }

    #[test]
    fn objdump_arm_word_and_tabbed_operands() {
        let line = b"   0:\ta9bf7bfd \tstp\tx29, x30, [sp, #-16]!";
        let Some(ListingLine::Instruction(instruction)) = parse_objdump_line(line) else {
            panic!("expected instruction");
        };
        assert_eq!(instruction.bytes, vec![0xA9, 0xBF, 0x7B, 0xFD]);
        assert_eq!(instruction.text, "stp\tx29, x30, [sp, #-16]!");
    }

    #[test]
    fn objdump_keeps_non_utf8_operands() {
        let line = b"  4005d6:\te8 05 00 00 00       \tcall   4005e0 <f\xFFoo>  ";
        let Some(ListingLine::Instruction(instruction)) = parse_objdump_line(line) else {
            panic!("expected instruction");
        };
        assert_eq!(instruction.address, 0x4005D6);
        assert_eq!(instruction.bytes, [0xE8, 0x05, 0x00, 0x00, 0x00]);
        let mut out = String::new();
        render_instruction(&instruction, &mut out);
        assert_eq!(
            out,
            "\u{0128}\u{2205}\u{2205}\u{2205}\u{2205}\u{2205} \u{1F9FE} call   4005e0 <f\u{FFFD}oo>\n"
        );
    }

    #[test]
    fn annotate_cstool_listing() {
        let listing = b" 0  55                                               push\trbp\n \
                        1  48 89 e5                                         mov\trbp, rsp\n";
        assert_eq!(
            annotate_cstool(listing),
            "U \u{1F9FE} push\trbp\nH\u{00C9}\u{0125} \u{1F9FE} mov\trbp, rsp\n"
        );
    }

    #[test]
    fn annotate_objdump_listing() {
        let listing = b"\n/tmp/a.out:     file format elf64-x86-64\n\n\n\
                        Disassembly of section .text:\n\n\
                        0000000000001000 <_start>:\n    \
                        1000:\t55                   \tpush   %rbp\n    \
                        1004:\t48 b8 00 00 00 00 00 \tmovabs $0x0,%rax\n    \
                        100b:\t00 00 00 \n";
        assert_eq!(
            annotate_objdump(listing),
            "# /tmp/a.out:     file format elf64-x86-64\n\
             # Disassembly of section .text:\n\
             U \u{1F9FE} push   %rbp\n\
             H\u{014F}\u{2205}\u{2205}\u{2205}\u{2205}\u{2205} \u{1F9FE} movabs $0x0,%rax\n"
        );
    }
}
