//! Trait inheritance rules for Hatchery pets
//!
//! This crate implements:
//! - An injectable random source shared by every derivation
//! - Color genomes (RGB hex triplets) with blending and weighted inheritance
//! - Bounded stat derivation for founders and offspring
//! - Species resolution for breeding pairs
//! - Display name generation

pub mod color;
pub mod names;
pub mod rng;
pub mod species;
pub mod stats;

// Re-export main types for convenience
pub use color::{ColorFormatError, ColorGenome, Rgb};
pub use names::NameGenerator;
pub use rng::{PetRng, ScriptedRng};
pub use species::{Gender, Species, SpeciesResolver};
pub use stats::{StatDeriver, INHERITANCE_FACTOR};
