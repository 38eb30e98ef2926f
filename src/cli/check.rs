//! Check command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover_paths, read_definition, Manifest};
use crate::error::{FgdError, Result};
use crate::output::{plural, Printer};
use crate::parser::{parse_source, BrushMarker, ParseOptions};
use crate::types::ColourScale;
use crate::validation::{print_diagnostics, validate_source, ValidationResult};

/// Validate definition files without writing anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// How headers without a size box treat their first token
    #[arg(long, value_enum, default_value_t = BrushMarker::Always)]
    pub brush_marker: BrushMarker,

    /// Read header colours as unit floats or legacy 0-255 values
    #[arg(long, value_enum, default_value_t = ColourScale::Unit)]
    pub colour_scale: ColourScale,

    /// File name pattern used when scanning directories
    #[arg(long, default_value = "entities.def")]
    pub pattern: String,

    /// Print diagnostics as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<ValidationResult> {
    let manifest = Manifest {
        pattern: args.pattern.clone(),
        brush_marker: args.brush_marker,
        colour_scale: args.colour_scale,
        ..Default::default()
    };
    let options = ParseOptions {
        brush_marker: args.brush_marker,
        colour_scale: args.colour_scale,
    };

    let files = discover_paths(&args.paths, &manifest);
    if !args.json {
        printer.info("Checking", &plural(files.len(), "file", "files"));
    }

    let mut result = ValidationResult::new();
    for file in &files {
        let source = read_definition(file)?;
        let parsed = parse_source(&source, &options);
        result.merge(validate_source(&parsed).for_file(file));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| FgdError::Output {
            message: format!("Failed to serialize diagnostics: {}", e),
        })?;
        println!("{}", json);
    } else {
        print_diagnostics(&result, printer);
    }

    if result.has_errors() {
        return Err(FgdError::Validation {
            message: plural(result.error_count(), "error", "errors"),
            help: Some("Fix the reported blocks or run `def2fgd dump` to inspect them".to_string()),
        });
    }

    Ok(result)
}
