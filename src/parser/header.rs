//! QUAKED header line parsing.
//!
//! ```text
//! classname (r g b) [(min x y z) (max x y z)] FLAG FLAG ...
//! ```
//!
//! The colour group is required. The size box is optional; without it the
//! entity is a brush entity and the first trailing token may be a brush
//! marker, depending on [`BrushMarker`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FgdError, Result};
use crate::types::{Bounds, Colour, SpawnFlag, Vec3};

use super::ParseOptions;

/// How to treat the first trailing token of a header without a size box.
///
/// Source files disagree here: many write `func_door (0 .5 .8) ? START_OPEN`
/// with `?` marking a brush entity, while others list flags directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BrushMarker {
    /// Always consume the first token as the brush marker.
    #[default]
    Always,
    /// Consume the first token only when it is a literal `?`.
    Question,
    /// Every trailing token is a spawn flag.
    None,
}

impl BrushMarker {
    pub fn name(self) -> &'static str {
        match self {
            BrushMarker::Always => "always",
            BrushMarker::Question => "question",
            BrushMarker::None => "none",
        }
    }
}

impl fmt::Display for BrushMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The decomposed header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub classname: String,
    pub colour: Colour,
    pub bounds: Option<Bounds>,
    pub spawnflags: Vec<SpawnFlag>,
}

/// Parse a header line.
///
/// Fails with `MalformedHeader` when the classname or the colour group is
/// missing or the colour group is not closed.
pub fn parse_header(line: &str, options: &ParseOptions) -> Result<Header> {
    let line = line.trim();
    let malformed = || FgdError::MalformedHeader {
        header: line.to_string(),
    };

    let name_end = line
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(line.len());
    let classname = &line[..name_end];
    if classname.is_empty() {
        return Err(malformed());
    }

    let (colour_text, remainder) = paren_group(&line[name_end..]).ok_or_else(malformed)?;
    let colour = Colour::parse_components(colour_text, options.colour_scale);

    let (bounds, tokens) = match size_box(remainder) {
        Some((min, max, rest)) => {
            let bounds = match (parse_vec3(min), parse_vec3(max)) {
                (Some(min), Some(max)) => Some(Bounds { min, max }),
                _ => None,
            };
            (bounds, rest.split_whitespace().collect::<Vec<_>>())
        }
        None => (None, skip_brush_marker(remainder, options.brush_marker)),
    };

    Ok(Header {
        classname: classname.to_string(),
        colour,
        bounds,
        spawnflags: parse_spawnflags(&tokens),
    })
}

/// Assign bits to flag tokens. Placeholders reserve a bit without a flag.
pub fn parse_spawnflags(tokens: &[&str]) -> Vec<SpawnFlag> {
    tokens
        .iter()
        .filter(|t| !t.is_empty())
        .enumerate()
        .filter(|(_, token)| !is_placeholder(token))
        .filter_map(|(position, token)| {
            let bit = 1u32.checked_shl(u32::try_from(position).ok()?)?;
            Some(SpawnFlag {
                bit,
                name: token.to_string(),
            })
        })
        .collect()
}

/// Whether a flag token only reserves its bit position.
pub fn is_placeholder(token: &str) -> bool {
    matches!(token, "?" | "-" | "x" | "X")
        || token
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("unused"))
}

fn skip_brush_marker(remainder: &str, marker: BrushMarker) -> Vec<&str> {
    let tokens: Vec<&str> = remainder.split_whitespace().collect();
    let skip = match marker {
        BrushMarker::Always => !tokens.is_empty(),
        BrushMarker::Question => tokens.first() == Some(&"?"),
        BrushMarker::None => false,
    };
    if skip {
        tokens[1..].to_vec()
    } else {
        tokens
    }
}

/// Match `\s*( content )` and return the content and what follows it.
fn paren_group(s: &str) -> Option<(&str, &str)> {
    let inner = s.trim_start().strip_prefix('(')?;
    let close = inner.find(')')?;
    let content = &inner[..close];
    if content.trim().is_empty() {
        return None;
    }
    Some((content, &inner[close + 1..]))
}

/// Match two consecutive parenthesised groups.
fn size_box(s: &str) -> Option<(&str, &str, &str)> {
    let (min, rest) = paren_group(s)?;
    let (max, rest) = paren_group(rest)?;
    Some((min, max, rest))
}

/// Parse the first three numbers of a vector group.
fn parse_vec3(s: &str) -> Option<Vec3> {
    let mut parts = s
        .split_whitespace()
        .map(|p| p.parse::<f64>().ok().filter(|v| v.is_finite()));
    let x = parts.next()??;
    let y = parts.next()??;
    let z = parts.next()??;
    Some([x, y, z])
}
