//! Text cleanup for strings written into FGD output.
//!
//! FGD uses `"` as its string delimiter and editors choke on anything
//! outside ASCII, so typographic punctuation is folded to ASCII first and
//! whatever remains non-ASCII is dropped.

/// Typographic characters and their ASCII replacements.
pub const SANITIZE_TABLE: &[(char, &str)] = &[
    ('\u{2013}', "-"),  // en dash
    ('\u{2014}', "-"),  // em dash
    ('\u{2018}', "'"),  // left single quote
    ('\u{2019}', "'"),  // right single quote
    ('\u{201C}', "\""), // left double quote
    ('\u{201D}', "\""), // right double quote
    ('\u{00A0}', " "),  // no-break space
];

/// Fold `value` to a trimmed ASCII string with no double quotes.
pub fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for c in value.chars() {
        match SANITIZE_TABLE.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }

    let out: String = out
        .chars()
        .map(|c| if c == '"' { '\'' } else { c })
        .filter(char::is_ascii)
        .collect();

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_typographic_punctuation() {
        assert_eq!(
            sanitize("\u{201C}Quoted\u{201D} \u{2013} it\u{2019}s\u{00A0}fine\u{2014}ok"),
            "'Quoted' - it's fine-ok"
        );
    }

    #[test]
    fn test_double_quotes_become_single() {
        assert_eq!(sanitize(r#"set "wait" to -1"#), "set 'wait' to -1");
    }

    #[test]
    fn test_drops_non_ascii_and_trims() {
        assert_eq!(sanitize("  caf\u{e9} \u{1F600} "), "caf");
        assert_eq!(sanitize("\u{e9} leading"), "leading");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "plain text",
            "\u{e9} \u{201C}x\u{201D} \u{00A0}",
            "\"quoted\" \u{2018}single\u{2019}",
            "\u{2014}\u{2014} dashes \u{2013}",
        ];

        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
            assert!(!once.contains('"'));
            assert!(once.is_ascii());
        }
    }
}
