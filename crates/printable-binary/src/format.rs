//! Grouped presentation of encoded text.
//!
//! Grouping only inserts spaces and newlines, which the decoder strips, so
//! formatted output decodes to the same bytes as the bare glyph stream.

use alloc::string::String;
use core::{fmt, num::NonZeroUsize, str::FromStr};

use crate::error::LayoutError;

/// Glyphs per group and groups per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Glyphs in each space-separated group.
    pub group: NonZeroUsize,
    /// Groups on each line.
    pub groups_per_line: NonZeroUsize,
}

impl Layout {
    /// Creates a layout, returning `None` if either dimension is zero.
    #[must_use]
    pub fn new(group: usize, groups_per_line: usize) -> Option<Self> {
        Some(Self {
            group: NonZeroUsize::new(group)?,
            groups_per_line: NonZeroUsize::new(groups_per_line)?,
        })
    }
}

impl Default for Layout {
    /// Eight glyphs per group, ten groups per line.
    fn default() -> Self {
        Self {
            group: const { NonZeroUsize::new(8).unwrap() },
            groups_per_line: const { NonZeroUsize::new(10).unwrap() },
        }
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    /// Parses `NxM`, optionally preceded by `=` as in `-f=8x10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('=').unwrap_or(s);
        let (group, per_line) = s.split_once('x').ok_or(LayoutError::MissingSeparator)?;
        let group: usize = group.trim().parse()?;
        let per_line: usize = per_line.trim().parse()?;
        Self::new(group, per_line).ok_or(LayoutError::Zero)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.group, self.groups_per_line)
    }
}

/// Inserts group and line separators into encoded text fed in pieces.
///
/// A separator is written lazily, right before the glyph that follows a
/// completed group, so the output never ends with a dangling space. A line
/// break follows the group's space: `"ABCD \nEFGH"`.
#[derive(Debug, Clone)]
pub struct Grouper {
    layout: Layout,
    glyphs: usize,
    separator_due: bool,
}

impl Grouper {
    /// Creates a grouper at the start of a stream.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            glyphs: 0,
            separator_due: false,
        }
    }

    /// Appends `encoded` to `out`, inserting separators.
    pub fn push_str(&mut self, encoded: &str, out: &mut String) {
        let group = self.layout.group.get();
        let per_line = self.layout.groups_per_line.get();

        out.reserve(encoded.len() + encoded.len() / group);
        for ch in encoded.chars() {
            if self.separator_due {
                out.push(' ');
                if (self.glyphs / group) % per_line == 0 {
                    out.push('\n');
                }
                self.separator_due = false;
            }
            out.push(ch);
            self.glyphs += 1;
            self.separator_due = self.glyphs % group == 0;
        }
    }

    /// Glyphs written so far.
    #[must_use]
    pub fn glyphs(&self) -> usize {
        self.glyphs
    }
}

/// Groups a complete encoded string.
///
/// ```rust
/// use printable_binary::{Layout, format_grouped};
///
/// let layout = Layout::new(2, 2).unwrap();
/// assert_eq!(format_grouped("ABCDEFG", layout), "AB CD \nEF G");
/// ```
#[must_use]
pub fn format_grouped(encoded: &str, layout: Layout) -> String {
    let mut out = String::with_capacity(encoded.len() + encoded.len() / layout.group.get() + 1);
    Grouper::new(layout).push_str(encoded, &mut out);
    out
}
