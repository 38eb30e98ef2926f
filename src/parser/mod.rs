//! Parser for QUAKED entity definition files.
//!
//! A definition file is free text containing any number of blocks:
//!
//! ```text
//! /*QUAKED func_door (0 .5 .8) ? START_OPEN x CRUSHER
//! A sliding door.
//! -------- KEYS --------
//! speed : movement speed (100 default)
//! -------- SPAWNFLAGS --------
//! START_OPEN : the door spawns open
//! */
//! ```
//!
//! The parser is permissive. Only a header that cannot be split into a
//! classname and a colour group is rejected, and that only skips its own
//! block.
//!
//! # Usage
//!
//! ```ignore
//! use def2fgd::parser::{parse_source, ParseOptions};
//!
//! let source = std::fs::read_to_string("scripts/entities.def")?;
//! let parsed = parse_source(&source, &ParseOptions::default());
//!
//! for entity in &parsed.entities {
//!     println!("Found: {}", entity.classname);
//! }
//! ```

mod block;
mod body;
mod header;
mod location;
mod model;
mod sanitize;

pub use block::{blocks, Blocks, RawBlock};
pub use body::{parse_body, parse_flag_line, parse_key_line, Body, BodyParser, Section};
pub use header::{is_placeholder, parse_header, parse_spawnflags, BrushMarker, Header};
pub use location::Location;
pub use model::{extract_model, MODEL_EXTENSIONS};
pub use sanitize::{sanitize, SANITIZE_TABLE};

use crate::error::{FgdError, Result};
use crate::types::{ColourScale, EntityRecord};

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub brush_marker: BrushMarker,
    pub colour_scale: ColourScale,
}

/// Parse one raw block into an entity record.
pub fn parse_entity(block: &str, options: &ParseOptions) -> Result<EntityRecord> {
    let mut lines = block.lines();
    let header_line = lines.next().unwrap_or("");
    let header = parse_header(header_line, options)?;
    let body = parse_body(lines);

    Ok(EntityRecord {
        classname: header.classname,
        colour: header.colour,
        bounds: header.bounds,
        spawnflags: header.spawnflags,
        spawnflag_descriptions: body.spawnflag_descriptions,
        keys: body.keys,
        description: body.description,
        notes: body.notes,
        model: extract_model(block),
    })
}

/// A block that could not be parsed.
#[derive(Debug)]
pub struct SkippedBlock {
    pub location: Location,
    pub error: FgdError,
}

/// Result of parsing a whole definition file.
#[derive(Debug, Default)]
pub struct ParsedSource {
    /// Number of QUAKED blocks found, parsed or not.
    pub block_count: usize,
    /// Parsed entities in source order.
    pub entities: Vec<EntityRecord>,
    /// Blocks skipped because their header was malformed.
    pub skipped: Vec<SkippedBlock>,
}

impl ParsedSource {
    pub fn is_empty(&self) -> bool {
        self.block_count == 0
    }
}

/// Parse every block of a definition file.
///
/// Malformed blocks are collected in `skipped` and never stop the scan.
pub fn parse_source(source: &str, options: &ParseOptions) -> ParsedSource {
    let mut parsed = ParsedSource::default();

    for block in blocks(source) {
        parsed.block_count += 1;
        match parse_entity(block.text, options) {
            Ok(entity) => parsed.entities.push(entity),
            Err(error) => parsed.skipped.push(SkippedBlock {
                location: block.location,
                error,
            }),
        }
    }

    parsed
}
