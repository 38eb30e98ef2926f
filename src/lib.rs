//! def2fgd - QUAKED entity definitions to FGD converter
//!
//! A library for turning the `/*QUAKED ... */` comment blocks of Quake-family
//! entity definition files into FGD class definitions for level editors.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod game;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{discover, discover_paths, read_definition, DiscoveryResult, Manifest};
pub use error::{FgdError, Result};
pub use game::{switch_to_fgd, update_game_file};
pub use parser::{parse_entity, parse_source, BrushMarker, ParseOptions, ParsedSource};
pub use render::{write_fgd, FgdWriter, KeyType, RenderOptions};
pub use types::{Bounds, Colour, ColourScale, EntityKey, EntityKind, EntityRecord, SpawnFlag};
pub use validation::{validate_source, Diagnostic, Severity, ValidationResult};
