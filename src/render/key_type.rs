//! Key type inference for FGD properties.
//!
//! QUAKED blocks never declare key types, so the type is guessed from the
//! key name. Rules are checked top to bottom and the first match wins;
//! unmatched keys are plain strings.

use std::fmt;

/// FGD property type of an entity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    String,
    Integer,
    TargetSource,
    TargetDestination,
    Angle,
    Studio,
    Sound,
    Color255,
    Origin,
}

impl KeyType {
    /// Name used in FGD output, e.g. `target_source`.
    pub fn name(self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::Integer => "integer",
            KeyType::TargetSource => "target_source",
            KeyType::TargetDestination => "target_destination",
            KeyType::Angle => "angle",
            KeyType::Studio => "studio",
            KeyType::Sound => "sound",
            KeyType::Color255 => "color255",
            KeyType::Origin => "origin",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a rule matches a lowercased key name.
#[derive(Debug, Clone, Copy)]
pub enum KeyMatch {
    /// Any of the listed names.
    Exact(&'static [&'static str]),
    /// Names starting with the prefix.
    Prefix(&'static str),
}

impl KeyMatch {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            KeyMatch::Exact(names) => names.iter().any(|n| *n == name),
            KeyMatch::Prefix(prefix) => name.starts_with(prefix),
        }
    }
}

/// Ordered inference rules.
pub const KEY_TYPE_RULES: &[(KeyMatch, KeyType)] = &[
    (
        KeyMatch::Exact(&["target", "killtarget", "target2", "target3", "target4"]),
        KeyType::TargetDestination,
    ),
    (KeyMatch::Exact(&["targetname"]), KeyType::TargetSource),
    (KeyMatch::Exact(&["angle", "angles"]), KeyType::Angle),
    (KeyMatch::Exact(&["model", "model2"]), KeyType::Studio),
    (
        KeyMatch::Exact(&["noise", "noise_start", "noise_stop", "music", "sound"]),
        KeyType::Sound,
    ),
    (KeyMatch::Exact(&["color", "_color"]), KeyType::Color255),
    (KeyMatch::Exact(&["origin"]), KeyType::Origin),
    (
        KeyMatch::Exact(&[
            "health", "speed", "wait", "dmg", "lip", "height", "light", "count", "mass", "damage",
            "spawnflags",
        ]),
        KeyType::Integer,
    ),
    (KeyMatch::Prefix("not"), KeyType::Integer),
];

/// Infer the FGD type of a key from its name.
pub fn infer_key_type(name: &str) -> KeyType {
    let name = name.to_ascii_lowercase();
    KEY_TYPE_RULES
        .iter()
        .find(|(rule, _)| rule.matches(&name))
        .map(|(_, key_type)| *key_type)
        .unwrap_or(KeyType::String)
}
