//! Lint checks for parsed definition files.
//!
//! Each check takes a `&ParsedSource` and returns a `ValidationResult`.

use std::collections::HashSet;

use crate::parser::ParsedSource;

use super::warning::{Diagnostic, ValidationResult};

/// Files without any QUAKED block.
pub fn check_no_blocks(parsed: &ParsedSource) -> ValidationResult {
    let mut result = ValidationResult::new();

    if parsed.is_empty() {
        result.push(
            Diagnostic::warning("def2fgd::empty", "No QUAKED blocks found")
                .with_help("Entity blocks start with /*QUAKED and end with */"),
        );
    }

    result
}

/// Blocks skipped because the header did not parse.
pub fn check_malformed_headers(parsed: &ParsedSource) -> ValidationResult {
    let mut result = ValidationResult::new();

    for skipped in &parsed.skipped {
        result.push(
            Diagnostic::error(
                "def2fgd::header",
                format!("{}: {}", skipped.location, skipped.error),
            )
            .with_help("Expected `classname (r g b) [(min x y z) (max x y z)] FLAGS...`"),
        );
    }

    result
}

/// Classnames defined more than once in the same file.
pub fn check_duplicate_classnames(parsed: &ParsedSource) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for entity in &parsed.entities {
        let name = entity.classname.as_str();
        if !seen.insert(name) && reported.insert(name) {
            result.warning(
                "def2fgd::duplicate-classname",
                format!("Entity '{}' is defined more than once", name),
            );
        }
    }

    result
}

/// Entities with no prose description.
pub fn check_missing_descriptions(parsed: &ParsedSource) -> ValidationResult {
    let mut result = ValidationResult::new();

    for entity in &parsed.entities {
        if entity.description.is_empty() {
            result.warning(
                "def2fgd::no-description",
                format!("Entity '{}' has no description", entity.classname),
            );
        }
    }

    result
}

/// SPAWNFLAGS entries naming a flag the header does not declare.
pub fn check_unknown_flag_descriptions(parsed: &ParsedSource) -> ValidationResult {
    let mut result = ValidationResult::new();

    for entity in &parsed.entities {
        for name in entity.spawnflag_descriptions.keys() {
            if entity.flag(name).is_none() {
                result.push(
                    Diagnostic::warning(
                        "def2fgd::unknown-flag",
                        format!(
                            "Entity '{}' describes spawnflag '{}' which is not in its header",
                            entity.classname, name
                        ),
                    )
                    .with_help("Add the flag to the header line or fix the spelling"),
                );
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_source, ParseOptions};

    fn parse(source: &str) -> ParsedSource {
        parse_source(source, &ParseOptions::default())
    }

    #[test]
    fn test_no_blocks() {
        assert_eq!(check_no_blocks(&parse("nothing")).warning_count(), 1);
        assert!(check_no_blocks(&parse("/*QUAKED a (1 1 1)\nA.\n*/")).is_ok());
    }

    #[test]
    fn test_malformed_headers() {
        let result = check_malformed_headers(&parse("\n/*QUAKED broken (1 1\n*/"));

        assert_eq!(result.error_count(), 1);
        let message = &result.iter().next().unwrap().message;
        assert!(message.starts_with("2:1: "), "unexpected message: {message}");
        assert!(message.contains("broken (1 1"));
    }

    #[test]
    fn test_duplicate_classnames_reported_once() {
        let source = "/*QUAKED a (1 1 1)\nA.\n*/ /*QUAKED a (1 1 1)\nA.\n*/ /*QUAKED a (1 1 1)\nA.\n*/";

        assert_eq!(check_duplicate_classnames(&parse(source)).warning_count(), 1);
    }

    #[test]
    fn test_missing_descriptions() {
        let source = "/*QUAKED a (1 1 1)\n*/ /*QUAKED b (1 1 1)\nDescribed.\n*/";

        assert_eq!(check_missing_descriptions(&parse(source)).warning_count(), 1);
    }

    #[test]
    fn test_unknown_flag_descriptions() {
        let source = "/*QUAKED func_door (0 .5 .8) ? START_OPEN\nA door.\n-------- SPAWNFLAGS --------\nSTART_OPEN : opens\nSTRAT_OPEN : typo\n*/";
        let result = check_unknown_flag_descriptions(&parse(source));

        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().next().unwrap().message.contains("STRAT_OPEN"));
    }
}
