//! Block body parsing.
//!
//! Everything after the header line is read line by line through a small
//! section state machine. Dashed banners such as `-------- KEYS --------`
//! switch sections; prose outside the structured sections becomes the
//! description and notes.

use std::collections::{BTreeMap, HashSet};

use crate::types::EntityKey;

/// Section of a block body the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Before any banner. Key-shaped lines are still picked up as keys.
    #[default]
    FreeText,
    Keys,
    SpawnFlags,
    Notes,
    /// An unrecognised banner. Lines are discarded until the next banner.
    Other,
}

/// Banner labels and the sections they open.
const BANNERS: &[(&str, Section)] = &[
    ("KEYS", Section::Keys),
    ("SPAWNFLAGS", Section::SpawnFlags),
    ("NOTES", Section::Notes),
];

impl Section {
    /// The section a banner line opens, or `None` if the line is not a banner.
    ///
    /// A line made only of dashes is a rule, not a banner, and also
    /// returns `None`.
    pub fn from_banner(line: &str) -> Option<Section> {
        let label = banner_label(line)?;
        let section = BANNERS
            .iter()
            .find(|(name, _)| label.eq_ignore_ascii_case(name))
            .map(|(_, section)| *section)
            .unwrap_or(Section::Other);
        Some(section)
    }

    /// Whether key-shaped lines are recorded as keys in this section.
    fn accepts_keys(self) -> bool {
        matches!(self, Section::FreeText | Section::Keys)
    }
}

/// Minimum run of dashes on each side of a banner label.
const BANNER_DASHES: usize = 3;

/// Inner label of a `--- LABEL ---` banner.
fn banner_label(line: &str) -> Option<&str> {
    let line = line.trim();
    let label = line.trim_start_matches('-');
    let leading = line.len() - label.len();
    let inner = label.trim_end_matches('-');
    let trailing = label.len() - inner.len();
    if leading < BANNER_DASHES || trailing < BANNER_DASHES {
        return None;
    }
    let inner = inner.trim();
    (!inner.is_empty()).then_some(inner)
}

/// Whether a line is a dashes-only rule.
fn is_rule(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-')
}

/// Structured content of a block body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    pub description: String,
    pub notes: Vec<String>,
    pub keys: Vec<EntityKey>,
    pub spawnflag_descriptions: BTreeMap<String, String>,
}

/// Line-at-a-time body parser.
#[derive(Debug, Default)]
pub struct BodyParser {
    section: Section,
    seen_keys: HashSet<String>,
    body: Body,
}

impl BodyParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one body line.
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();

        if line.is_empty() {
            if self.section == Section::Notes {
                self.body.notes.push(String::new());
            }
            return;
        }

        if let Some(section) = Section::from_banner(line) {
            self.section = section;
            return;
        }
        if is_rule(line) {
            return;
        }

        match self.section {
            Section::SpawnFlags => self.flag_description(line),
            Section::Other => {}
            section => {
                if section.accepts_keys() && self.key(line, section) {
                    return;
                }
                self.prose(line);
            }
        }
    }

    pub fn finish(self) -> Body {
        self.body
    }

    /// Record a key line. Returns false when the line is not consumed.
    ///
    /// Repeats are dropped inside a KEYS section; before any banner they
    /// stay prose.
    fn key(&mut self, line: &str, section: Section) -> bool {
        let Some((name, description)) = parse_key_line(line) else {
            return false;
        };
        if !self.seen_keys.insert(name.to_string()) {
            return section == Section::Keys;
        }
        self.body.keys.push(EntityKey {
            name: name.to_string(),
            description: description.to_string(),
        });
        true
    }

    fn flag_description(&mut self, line: &str) {
        if line.to_ascii_lowercase().starts_with("(none") {
            return;
        }
        if let Some((name, description)) = parse_flag_line(line) {
            self.body
                .spawnflag_descriptions
                .entry(name.to_string())
                .or_insert_with(|| description.to_string());
        }
    }

    fn prose(&mut self, line: &str) {
        if self.body.description.is_empty() {
            self.body.description = line.to_string();
        } else {
            self.body.notes.push(line.to_string());
        }
    }
}

/// Parse every line of a block body.
pub fn parse_body<'a>(lines: impl IntoIterator<Item = &'a str>) -> Body {
    let mut parser = BodyParser::new();
    for line in lines {
        parser.feed(line);
    }
    parser.finish()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split a leading identifier off `s`.
fn split_ident(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    (end > 0).then(|| s.split_at(end))
}

/// Parse a key line: `name: desc`, `"name": desc` or `"name" desc`.
pub fn parse_key_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let opening = line.strip_prefix('"');
    let (name, after) = split_ident(opening.unwrap_or(line))?;
    let closing = after.strip_prefix('"');
    let after = closing.unwrap_or(after);

    if let Some(description) = after.trim_start().strip_prefix(':') {
        return Some((name, description.trim()));
    }

    if opening.is_some() && closing.is_some() && after.starts_with(char::is_whitespace) {
        let description = after.trim();
        if !description.is_empty() {
            return Some((name, description));
        }
    }

    None
}

/// Parse a spawnflag description line: `NAME : desc` or `NAME - desc`.
///
/// A leading `&<bit>` marker in the description is dropped.
pub fn parse_flag_line(line: &str) -> Option<(&str, &str)> {
    let (name, after) = split_ident(line.trim())?;
    let after = after.trim_start();
    let description = after
        .strip_prefix(':')
        .or_else(|| after.strip_prefix('-'))?
        .trim();
    Some((name, strip_bit_marker(description)))
}

fn strip_bit_marker(description: &str) -> &str {
    let Some(rest) = description.strip_prefix('&') else {
        return description;
    };
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let after = &rest[digits..];
    if digits > 0 && after.starts_with(char::is_whitespace) {
        after.trim_start()
    } else {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(body: &Body) -> Vec<(&str, &str)> {
        body.keys
            .iter()
            .map(|k| (k.name.as_str(), k.description.as_str()))
            .collect()
    }

    #[test]
    fn test_banner_transitions() {
        assert_eq!(Section::from_banner("-------- KEYS --------"), Some(Section::Keys));
        assert_eq!(Section::from_banner("--- keys ---"), Some(Section::Keys));
        assert_eq!(
            Section::from_banner("-------- SPAWNFLAGS --------"),
            Some(Section::SpawnFlags)
        );
        assert_eq!(Section::from_banner("-----NOTES-----"), Some(Section::Notes));
        assert_eq!(
            Section::from_banner("-------- MODEL FOR RADIANT ONLY --------"),
            Some(Section::Other)
        );
        assert_eq!(Section::from_banner("----------------"), None);
        assert_eq!(Section::from_banner("- leading dash only"), None);
        assert_eq!(Section::from_banner("- see also func_door -"), None);
        assert_eq!(Section::from_banner("-- KEYS --"), None);
        assert_eq!(Section::from_banner("KEYS"), None);
    }

    #[test]
    fn test_description_and_notes() {
        let body = parse_body([
            "Player spawn point.",
            "Only one per map.",
            "",
            "Faces the angle key.",
        ]);

        assert_eq!(body.description, "Player spawn point.");
        assert_eq!(body.notes, vec!["Only one per map.", "Faces the angle key."]);
    }

    #[test]
    fn test_keys_section() {
        let body = parse_body([
            "A door.",
            "-------- KEYS --------",
            "angle : determines the opening direction",
            "\"speed\": movement speed (100 default)",
            "\"wait\" wait before returning (3 default, -1 = never return)",
            "not a key line",
        ]);

        assert_eq!(
            keys(&body),
            vec![
                ("angle", "determines the opening direction"),
                ("speed", "movement speed (100 default)"),
                ("wait", "wait before returning (3 default, -1 = never return)"),
            ]
        );
        assert_eq!(body.description, "A door.");
        assert_eq!(body.notes, vec!["not a key line"]);
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let body = parse_body(["-------- KEYS --------", "foo: a", "bar: b", "foo: c"]);

        assert_eq!(keys(&body), vec![("foo", "a"), ("bar", "b")]);
        assert!(body.notes.is_empty());
    }

    #[test]
    fn test_duplicate_free_text_key_stays_prose() {
        let body = parse_body(["Intro.", "note: first", "note: second"]);

        assert_eq!(keys(&body), vec![("note", "first")]);
        assert_eq!(body.notes, vec!["note: second"]);
    }

    #[test]
    fn test_dash_wrapped_prose_is_not_a_banner() {
        let body = parse_body(["A thing.", "- see also func_door -", "This line is kept."]);

        assert_eq!(body.description, "A thing.");
        assert_eq!(body.notes, vec!["- see also func_door -", "This line is kept."]);
    }

    #[test]
    fn test_keys_before_banner() {
        let body = parse_body(["Teleporter destination.", "targetname: name to teleport to"]);

        assert_eq!(keys(&body), vec![("targetname", "name to teleport to")]);
        assert_eq!(body.description, "Teleporter destination.");
    }

    #[test]
    fn test_spawnflag_descriptions() {
        let body = parse_body([
            "-------- SPAWNFLAGS --------",
            "START_OPEN : the door spawns open",
            "CRUSHER - &4 keeps pushing",
            "START_OPEN : second description",
            "(none)",
            "garbage without separator",
        ]);

        assert_eq!(
            body.spawnflag_descriptions.get("START_OPEN").map(String::as_str),
            Some("the door spawns open")
        );
        assert_eq!(
            body.spawnflag_descriptions.get("CRUSHER").map(String::as_str),
            Some("keeps pushing")
        );
        assert_eq!(body.spawnflag_descriptions.len(), 2);
        assert!(body.description.is_empty());
        assert!(body.notes.is_empty());
    }

    #[test]
    fn test_notes_keep_paragraph_breaks() {
        let body = parse_body([
            "Spawns a light.",
            "-------- NOTES --------",
            "First paragraph.",
            "",
            "Second paragraph.",
        ]);

        assert_eq!(body.description, "Spawns a light.");
        assert_eq!(body.notes, vec!["First paragraph.", "", "Second paragraph."]);
    }

    #[test]
    fn test_other_section_is_discarded() {
        let body = parse_body([
            "Armor pickup.",
            "-------- MODEL FOR RADIANT ONLY - DO NOT SET THIS AS A KEY --------",
            "model=\"models/powerups/armor/armor_red.md3\"",
            "ignored: not a key here",
        ]);

        assert_eq!(body.description, "Armor pickup.");
        assert!(body.notes.is_empty());
        assert!(body.keys.is_empty());
    }

    #[test]
    fn test_notes_section_does_not_take_keys() {
        let body = parse_body(["Intro.", "-------- NOTES --------", "Note: keys off"]);

        assert!(body.keys.is_empty());
        assert_eq!(body.notes, vec!["Note: keys off"]);
    }

    #[test]
    fn test_parse_key_line_variants() {
        assert_eq!(parse_key_line("name: desc"), Some(("name", "desc")));
        assert_eq!(parse_key_line("  name :desc  "), Some(("name", "desc")));
        assert_eq!(parse_key_line("\"name\": desc"), Some(("name", "desc")));
        assert_eq!(parse_key_line("\"name\" desc"), Some(("name", "desc")));
        assert_eq!(parse_key_line("name:"), Some(("name", "")));
        assert_eq!(parse_key_line("name desc"), None);
        assert_eq!(parse_key_line("\"name\""), None);
        assert_eq!(parse_key_line("two words: desc"), None);
        assert_eq!(parse_key_line(": desc"), None);
    }

    #[test]
    fn test_parse_flag_line_variants() {
        assert_eq!(parse_flag_line("FLAG : desc"), Some(("FLAG", "desc")));
        assert_eq!(parse_flag_line("FLAG-desc"), Some(("FLAG", "desc")));
        assert_eq!(parse_flag_line("FLAG : &1 desc"), Some(("FLAG", "desc")));
        assert_eq!(parse_flag_line("FLAG : &x desc"), Some(("FLAG", "&x desc")));
        assert_eq!(parse_flag_line("FLAG desc"), None);
    }
}
