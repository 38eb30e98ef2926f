//! Dump command implementation.
//!
//! Prints the parsed entity records of one file as JSON on stdout, which is
//! handy when a generated FGD looks wrong and the parse needs inspecting.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::read_definition;
use crate::error::{FgdError, Result};
use crate::output::{display_path, Printer};
use crate::parser::{parse_source, BrushMarker, ParseOptions};
use crate::types::{ColourScale, EntityRecord};

/// Print the parsed entity records of a definition file as JSON
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Definition file to dump
    pub file: PathBuf,

    /// How headers without a size box treat their first token
    #[arg(long, value_enum, default_value_t = BrushMarker::Always)]
    pub brush_marker: BrushMarker,

    /// Read header colours as unit floats or legacy 0-255 values
    #[arg(long, value_enum, default_value_t = ColourScale::Unit)]
    pub colour_scale: ColourScale,
}

pub fn run(args: DumpArgs, printer: &Printer) -> Result<()> {
    let source = read_definition(&args.file)?;
    let parsed = parse_source(
        &source,
        &ParseOptions {
            brush_marker: args.brush_marker,
            colour_scale: args.colour_scale,
        },
    );

    let shown = display_path(&args.file);
    for skipped in &parsed.skipped {
        printer.warning("Skipping", &format!("{}:{}: {}", shown, skipped.location, skipped.error));
    }

    println!("{}", to_json(&parsed.entities)?);
    Ok(())
}

/// Serialize entity records as pretty-printed JSON.
pub fn to_json(entities: &[EntityRecord]) -> Result<String> {
    serde_json::to_string_pretty(entities).map_err(|e| FgdError::Output {
        message: format!("Failed to serialize entities: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_entity;
    use serde_json::json;

    #[test]
    fn test_to_json_shape() {
        let entity = parse_entity(
            " info_null (0 .5 .8) (-4 -4 -4) (4 4 4) SILENT\nUsed as a positional target.\n",
            &ParseOptions::default(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&to_json(&[entity]).unwrap()).unwrap();

        assert_eq!(value[0]["classname"], json!("info_null"));
        assert_eq!(value[0]["colour"], json!({ "r": 0, "g": 128, "b": 204 }));
        assert_eq!(value[0]["bounds"]["min"], json!([-4.0, -4.0, -4.0]));
        assert_eq!(value[0]["spawnflags"], json!([{ "bit": 1, "name": "SILENT" }]));
        assert_eq!(value[0]["description"], json!("Used as a positional target."));
        assert_eq!(value[0]["model"], json!(null));
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
