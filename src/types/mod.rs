//! Core domain types for def2fgd.
//!
//! - `Colour` - editor colour triple
//! - `EntityRecord` - one parsed QUAKED definition with its flags and keys

mod colour;
mod entity;

pub use colour::{Colour, ColourScale};
pub use entity::{Bounds, EntityKey, EntityKind, EntityRecord, SpawnFlag, Vec3};
