//! Pet lifecycle engine for Hatchery
//!
//! This crate implements:
//! - The pet data model with bounds validation
//! - Store seam with in-memory and RON file backends
//! - Ownership-checked registry
//! - Breeding and care engines
//! - Founder creation and family tree queries
//! - The [`Hatchery`] facade used by front ends

pub mod breeding;
pub mod care;
pub mod clock;
pub mod error;
pub mod founders;
pub mod hatchery;
pub mod lineage;
pub mod persistence;
pub mod pet;
pub mod registry;
pub mod store;

// Re-export main types for convenience
pub use breeding::BreedingEngine;
pub use care::{CareEngine, TrainingActivity};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{PetError, Result};
pub use founders::FounderFactory;
pub use hatchery::{Hatchery, OwnerSummary};
pub use lineage::FamilyTree;
pub use persistence::RonFileStore;
pub use pet::{OwnerId, Pet, PetId, PetPatch, PetTraits};
pub use registry::PetRegistry;
pub use store::{MemoryStore, PetStore};

pub use hatchery_genetics;
