//! Model reference extraction.
//!
//! QUAKED blocks for point entities often carry an editor hint such as
//! `model="models/items/armor/body.md3"`. The first such value naming a
//! recognised 3-D asset becomes the entity's `studio(...)` model.

use std::path::Path;

/// File extensions accepted as model assets (lowercase, no dot).
pub const MODEL_EXTENSIONS: &[&str] = &[
    "md2", "md3", "mdx", "fm", "mdl", "md5mesh", "md5", "lwo", "obj", "ase", "gltf", "glb",
];

/// Find the first model path in a raw block.
pub fn extract_model(block: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `block`.
    let lowered = block.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(found) = lowered[search_from..].find("model") {
        let keyword_end = search_from + found + "model".len();
        search_from = keyword_end;

        let Some(value) = assignment_value(&block[keyword_end..]) else {
            continue;
        };

        let candidate = value.trim().replace('\\', "/");
        let model = candidate
            .split(|c: char| c == ';' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .find(|part| has_model_extension(part));

        if let Some(model) = model {
            return Some(model.to_string());
        }
    }

    None
}

/// Parse `\s*=\s*"value"` and return the non-empty value.
fn assignment_value(rest: &str) -> Option<&str> {
    let rest = rest.trim_start().strip_prefix('=')?;
    let rest = rest.trim_start().strip_prefix('"')?;
    let end = rest.find('"')?;
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

fn has_model_extension(part: &str) -> bool {
    Path::new(part)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            MODEL_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
