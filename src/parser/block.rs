//! QUAKED block extraction.
//!
//! Blocks open with `/*QUAKED` and close at the first following `*/`.
//! Blocks never nest; an opener without a closer ends the scan.

use super::location::{offset_to_location, Location};

const OPEN_MARKER: &str = "/*QUAKED";
const CLOSE_MARKER: &str = "*/";

/// Raw text of one block, between the opening marker and `*/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub text: &'a str,
    /// Where the `/*QUAKED` opener sits in the source.
    pub location: Location,
}

impl RawBlock<'_> {
    /// The trimmed header line, used to identify the block in reports.
    pub fn header(&self) -> &str {
        self.text.lines().next().unwrap_or("").trim()
    }
}

/// Lazy iterator over the blocks of a source file.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    source: &'a str,
    cursor: usize,
}

/// Scan `source` for QUAKED blocks, left to right.
pub fn blocks(source: &str) -> Blocks<'_> {
    Blocks { source, cursor: 0 }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.source[self.cursor..];
            let open = self.cursor + rest.find(OPEN_MARKER)?;
            let body_start = open + OPEN_MARKER.len();

            // `/*QUAKEDfoo` is not an opener.
            if self.source[body_start..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
            {
                self.cursor = body_start;
                continue;
            }

            let Some(close) = self.source[body_start..].find(CLOSE_MARKER) else {
                self.cursor = self.source.len();
                return None;
            };
            let body_end = body_start + close;
            self.cursor = body_end + CLOSE_MARKER.len();

            return Some(RawBlock {
                text: &self.source[body_start..body_end],
                location: offset_to_location(self.source, open),
            });
        }
    }
}
