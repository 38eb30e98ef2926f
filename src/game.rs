//! Game descriptor patching.
//!
//! Radiant-style `.game` descriptors list the entity definition formats an
//! editor loads in a field such as `entityclasstype="xml def"`. Once a
//! game's definitions have been converted, `def` is switched to `fgd`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FgdError, Result};

/// Name of the descriptor field holding the format selectors.
pub const CLASS_TYPE_FIELD: &str = "entityclasstype";

/// Replace the `def` selector with `fgd`.
///
/// Returns `None` when the field is missing, has no `def` token, or the
/// text would not change. `fgd` is never listed twice.
pub fn switch_to_fgd(text: &str) -> Option<String> {
    let (start, end) = find_field_value(text)?;
    let value = &text[start..end];

    let tokens: Vec<&str> = value.split_whitespace().collect();
    if !tokens.contains(&"def") {
        return None;
    }

    let mut switched: Vec<&str> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = if token == "def" { "fgd" } else { token };
        if token == "fgd" && switched.contains(&"fgd") {
            continue;
        }
        switched.push(token);
    }

    let updated = format!("{}{}{}", &text[..start], switched.join(" "), &text[end..]);
    (updated != text).then_some(updated)
}

/// Byte range of the quoted value of the first `entityclasstype = "..."`.
fn find_field_value(text: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;

    while let Some(found) = text[search_from..].find(CLASS_TYPE_FIELD) {
        let field_end = search_from + found + CLASS_TYPE_FIELD.len();
        search_from = field_end;

        let rest = &text[field_end..];
        let Some(after_eq) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let Some(value) = after_eq.trim_start().strip_prefix('"') else {
            continue;
        };
        let Some(close) = value.find('"') else {
            continue;
        };

        let start = text.len() - value.len();
        return Some((start, start + close));
    }

    None
}

/// Game name for a definition file: its grandparent directory.
///
/// `games/base/scripts/entities.def` belongs to the game `base`.
pub fn game_name(def_path: &Path) -> Option<String> {
    def_path
        .parent()?
        .parent()?
        .file_name()?
        .to_str()
        .map(str::to_string)
}

/// Locate the descriptor for a game: `<dir>/<game>` or `<dir>/<game>.game`.
pub fn find_game_file(games_dir: &Path, game: &str) -> Option<PathBuf> {
    [
        games_dir.join(game),
        games_dir.join(format!("{}.game", game)),
    ]
    .into_iter()
    .find(|p| p.is_file())
}

/// Patch a descriptor file in place. Returns whether it changed.
pub fn update_game_file(path: &Path) -> Result<bool> {
    let text = fs::read_to_string(path).map_err(|e| FgdError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read game file: {}", e),
    })?;

    let Some(updated) = switch_to_fgd(&text) else {
        return Ok(false);
    };

    fs::write(path, updated).map_err(|e| FgdError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write game file: {}", e),
    })?;

    Ok(true)
}
