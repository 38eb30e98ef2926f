//! Convert command implementation.
//!
//! Finds definition files under a root, writes an `.fgd` next to each one
//! and switches the matching game descriptors over to FGD.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{
    discover_with, load_manifest, read_definition, Manifest, MANIFEST_FILENAME,
};
use crate::error::{FgdError, Result};
use crate::game::{find_game_file, game_name, update_game_file};
use crate::output::{display_path, plural, Printer};
use crate::parser::{parse_source, BrushMarker, ParseOptions};
use crate::render::{write_fgd, RenderOptions};
use crate::types::{ColourScale, EntityRecord};

/// Convert QUAKED definition files to FGD
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Root directory to scan recursively
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// File name to convert, or a `*suffix` pattern like `*.def`
    #[arg(long)]
    pub pattern: Option<String>,

    /// How headers without a size box treat their first token
    #[arg(long, value_enum)]
    pub brush_marker: Option<BrushMarker>,

    /// Read header colours as unit floats or legacy 0-255 values
    #[arg(long, value_enum)]
    pub colour_scale: Option<ColourScale>,

    /// Guess key types (target_source, integer, ...) from key names
    #[arg(long)]
    pub infer_types: bool,

    /// Directory holding game descriptors to switch from def to fgd
    #[arg(long)]
    pub games_dir: Option<PathBuf>,

    /// Parse and report without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

/// What a conversion run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// FGD files written (or that would be written on a dry run).
    pub written: Vec<PathBuf>,
    /// Definition files skipped because nothing in them converted.
    pub skipped: Vec<PathBuf>,
    /// Game descriptors that were patched.
    pub games_updated: Vec<PathBuf>,
}

/// A rendered file waiting to be written.
struct PendingOutput {
    source: PathBuf,
    output: PathBuf,
    entities: Vec<EntityRecord>,
    render: RenderOptions,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<ConvertSummary> {
    let (manifest, has_manifest) = load_manifest(&args.root)?;
    let manifest = apply_overrides(manifest, &args);

    if has_manifest {
        printer.info("Using", &display_path(&args.root.join(MANIFEST_FILENAME)));
    }

    let discovery = discover_with(args.root.clone(), manifest, has_manifest);
    if discovery.files.is_empty() {
        return Err(FgdError::NoInputFiles {
            root: discovery.root,
            pattern: discovery.manifest.pattern,
        });
    }

    let manifest = &discovery.manifest;
    let options = ParseOptions {
        brush_marker: manifest.brush_marker,
        colour_scale: manifest.colour_scale,
    };

    let mut summary = ConvertSummary::default();

    // Parse everything before writing anything.
    let mut pending = Vec::new();
    for file in &discovery.files {
        match parse_file(file, &options, manifest, printer)? {
            Some(output) => pending.push(output),
            None => summary.skipped.push(file.clone()),
        }
    }

    let mut games = BTreeSet::new();
    for output in pending {
        if !args.dry_run {
            write_fgd(&output.output, &output.entities, &output.render)?;
        }
        printer.status(
            if args.dry_run { "Would write" } else { "Wrote" },
            &format!(
                "{} ({})",
                display_path(&output.output),
                plural(output.entities.len(), "entity", "entities")
            ),
        );
        if let Some(game) = game_name(&output.source) {
            games.insert(game);
        }
        summary.written.push(output.output);
    }

    if let Some(games_dir) = games_dir(&args, &discovery.root, manifest) {
        for game in &games {
            let Some(path) = find_game_file(&games_dir, game) else {
                printer.warning(
                    "Missing",
                    &format!("game file for '{}' in {}", game, display_path(&games_dir)),
                );
                continue;
            };
            if args.dry_run {
                continue;
            }
            if update_game_file(&path)? {
                printer.status("Updated", &display_path(&path));
                summary.games_updated.push(path);
            }
        }
    }

    Ok(summary)
}

/// CLI flags win over manifest values.
fn apply_overrides(mut manifest: Manifest, args: &ConvertArgs) -> Manifest {
    if let Some(pattern) = &args.pattern {
        manifest.pattern = pattern.clone();
    }
    if let Some(marker) = args.brush_marker {
        manifest.brush_marker = marker;
    }
    if let Some(scale) = args.colour_scale {
        manifest.colour_scale = scale;
    }
    if args.infer_types {
        manifest.infer_key_types = true;
    }
    manifest
}

/// Games directory from the CLI, or from the manifest relative to the root.
fn games_dir(args: &ConvertArgs, root: &Path, manifest: &Manifest) -> Option<PathBuf> {
    if let Some(dir) = &args.games_dir {
        return Some(dir.clone());
    }
    manifest.games_dir.as_ref().map(|dir| root.join(dir))
}

fn parse_file(
    file: &Path,
    options: &ParseOptions,
    manifest: &Manifest,
    printer: &Printer,
) -> Result<Option<PendingOutput>> {
    let source = read_definition(file)?;
    let parsed = parse_source(&source, options);
    let shown = display_path(file);

    for skipped in &parsed.skipped {
        printer.warning(
            "Skipping",
            &format!("{}:{}: {}", shown, skipped.location, skipped.error),
        );
    }

    if parsed.is_empty() {
        let reason = FgdError::NoBlocksFound {
            path: file.to_path_buf(),
        };
        printer.warning("Skipping", &reason.to_string());
        return Ok(None);
    }
    if parsed.entities.is_empty() {
        printer.warning("Skipping", &format!("{}: no block could be converted", shown));
        return Ok(None);
    }

    printer.status(
        "Converted",
        &format!("{} ({})", shown, plural(parsed.entities.len(), "entity", "entities")),
    );

    let render = RenderOptions {
        infer_key_types: manifest.infer_key_types,
        source_name: file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string),
    };

    Ok(Some(PendingOutput {
        source: file.to_path_buf(),
        output: file.with_extension("fgd"),
        entities: parsed.entities,
        render,
    }))
}
