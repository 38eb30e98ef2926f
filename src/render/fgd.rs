//! FGD writer.
//!
//! Renders parsed entities as FGD class definitions in input order:
//!
//! ```text
//! @PointClass color(255 0 0) size(-16 -16 -24, 16 16 24) = info_player_start : "Player spawn"
//! [
//!     angle(string) : "facing direction"
//! ]
//! ```

use std::fs;
use std::path::Path;

use crate::error::{FgdError, Result};
use crate::parser::sanitize;
use crate::types::{EntityKind, EntityRecord, Vec3};

use super::key_type::{infer_key_type, KeyType};

const INDENT: &str = "    ";
const FLAG_INDENT: &str = "        ";

/// Options for FGD rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Guess key types from key names instead of writing `string`.
    pub infer_key_types: bool,
    /// File name of the definition source, written into the preamble.
    pub source_name: Option<String>,
}

/// Renders entity records as FGD text.
pub struct FgdWriter<'a> {
    options: &'a RenderOptions,
}

impl<'a> FgdWriter<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Render all entities. Every entity is written, duplicates included.
    pub fn render(&self, entities: &[EntityRecord]) -> String {
        let mut lines = Vec::new();

        if let Some(source) = &self.options.source_name {
            lines.push(format!("// Auto-generated from {}.", source));
            lines.push(format!("// Edit {} or regenerate with def2fgd.", source));
            lines.push(String::new());
        }

        for entity in entities {
            self.push_entity(entity, &mut lines);
        }

        lines.join("\n")
    }

    /// The `@PointClass ... = classname : "description"` line.
    pub fn class_header(&self, entity: &EntityRecord) -> String {
        let class_type = match entity.kind() {
            EntityKind::Point => "@PointClass",
            EntityKind::Solid => "@SolidClass",
        };

        let mut parts = vec![class_type.to_string(), format!("color({})", entity.colour)];

        if let Some(bounds) = &entity.bounds {
            parts.push(format!(
                "size({}, {})",
                format_vec(&bounds.min),
                format_vec(&bounds.max)
            ));
        }

        if let Some(model) = &entity.model {
            parts.push(format!("studio(\"{}\")", sanitize(model)));
        }

        format!(
            "{} = {} : \"{}\"",
            parts.join(" "),
            entity.classname,
            sanitize(&entity.description)
        )
    }

    /// FGD type written for a key.
    pub fn key_type(&self, name: &str) -> KeyType {
        if self.options.infer_key_types {
            infer_key_type(name)
        } else {
            KeyType::String
        }
    }

    fn push_entity(&self, entity: &EntityRecord, lines: &mut Vec<String>) {
        lines.push(self.class_header(entity));
        lines.push("[".to_string());

        for note in &entity.notes {
            let note = sanitize(note);
            if note.is_empty() {
                lines.push(format!("{INDENT}//"));
            } else {
                lines.push(format!("{INDENT}// {note}"));
            }
        }

        if !entity.spawnflags.is_empty() {
            lines.push(format!("{INDENT}spawnflags(Flags) ="));
            lines.push(format!("{INDENT}["));
            for flag in &entity.spawnflags {
                let name = sanitize(&flag.name);
                let description = sanitize(entity.flag_description(&flag.name).unwrap_or(""));
                if !description.is_empty() {
                    lines.push(format!("{FLAG_INDENT}// {name}: {description}"));
                }
                lines.push(format!("{FLAG_INDENT}{} : \"{name}\" : 0", flag.bit));
            }
            lines.push(format!("{INDENT}]"));
        }

        for key in &entity.keys {
            lines.push(format!(
                "{INDENT}{}({}) : \"{}\"",
                key.name,
                self.key_type(&key.name),
                sanitize(&key.description)
            ));
        }

        lines.push("]".to_string());
        lines.push(String::new());
    }
}

/// Render and write an FGD file in one write.
pub fn write_fgd(path: &Path, entities: &[EntityRecord], options: &RenderOptions) -> Result<()> {
    let text = FgdWriter::new(options).render(entities);
    fs::write(path, text).map_err(|e| FgdError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write FGD: {}", e),
    })
}

/// Format a coordinate: integers without a fraction, otherwise up to
/// three decimals with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        return format!("{}", value.round() as i64);
    }
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn format_vec(v: &Vec3) -> String {
    v.iter()
        .map(|c| format_number(*c))
        .collect::<Vec<_>>()
        .join(" ")
}
