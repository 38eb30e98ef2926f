//! Entity definition records.
//!
//! An `EntityRecord` is built once by the parser from a single QUAKED block
//! and consumed by the FGD writer. Nothing mutates it afterwards.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Colour;

/// A 3-component vector as written in a QUAKED header.
pub type Vec3 = [f64; 3];

/// Size box of a point entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

/// A named spawn flag with its bit value (`1 << position`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnFlag {
    pub bit: u32,
    pub name: String,
}

/// A documented entity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityKey {
    pub name: String,
    pub description: String,
}

/// Whether an entity is placed at a point or occupies brush geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Point,
    Solid,
}

/// One parsed entity definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    /// Entity classname (non-empty, no whitespace).
    pub classname: String,

    /// Editor colour.
    pub colour: Colour,

    /// Size box. `None` means a brush entity.
    pub bounds: Option<Bounds>,

    /// Spawn flags in header order, bits strictly increasing.
    pub spawnflags: Vec<SpawnFlag>,

    /// Flag descriptions keyed by flag name.
    pub spawnflag_descriptions: BTreeMap<String, String>,

    /// Documented keys, first occurrence wins.
    pub keys: Vec<EntityKey>,

    /// First prose line of the block.
    pub description: String,

    /// Remaining prose lines. Empty entries mark paragraph breaks.
    pub notes: Vec<String>,

    /// Model path referenced by a `model="..."` assignment.
    pub model: Option<String>,
}

impl EntityRecord {
    /// Create a record with only the header fields set.
    pub fn new(classname: impl Into<String>, colour: Colour) -> Self {
        Self {
            classname: classname.into(),
            colour,
            bounds: None,
            spawnflags: Vec::new(),
            spawnflag_descriptions: BTreeMap::new(),
            keys: Vec::new(),
            description: String::new(),
            notes: Vec::new(),
            model: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        if self.bounds.is_some() {
            EntityKind::Point
        } else {
            EntityKind::Solid
        }
    }

    /// Look up a spawn flag by name.
    pub fn flag(&self, name: &str) -> Option<&SpawnFlag> {
        self.spawnflags.iter().find(|f| f.name == name)
    }

    /// Description for a spawn flag, if the block documents one.
    pub fn flag_description(&self, name: &str) -> Option<&str> {
        self.spawnflag_descriptions.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_bounds() {
        let mut entity = EntityRecord::new("func_door", Colour::rgb(0, 128, 204));
        assert_eq!(entity.kind(), EntityKind::Solid);

        entity.bounds = Some(Bounds {
            min: [-16.0, -16.0, -24.0],
            max: [16.0, 16.0, 32.0],
        });
        assert_eq!(entity.kind(), EntityKind::Point);
    }

    #[test]
    fn test_lookups() {
        let mut entity = EntityRecord::new("trigger_once", Colour::WHITE);
        entity.spawnflags.push(SpawnFlag {
            bit: 4,
            name: "NOTOUCH".to_string(),
        });
        entity
            .spawnflag_descriptions
            .insert("NOTOUCH".to_string(), "only fires when targeted".to_string());

        assert_eq!(entity.flag("NOTOUCH").map(|f| f.bit), Some(4));
        assert_eq!(entity.flag_description("NOTOUCH"), Some("only fires when targeted"));
    }
}
