//! Pet entity, creation traits and update patches

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use hatchery_genetics::{ColorGenome, Gender, Species};
use serde::{Deserialize, Serialize};

use crate::error::{PetError, Result};

/// Bounds for health
pub const HEALTH_BOUNDS: RangeInclusive<u8> = 0..=100;
/// Bounds for strength, defense and speed
pub const COMBAT_STAT_BOUNDS: RangeInclusive<u8> = 1..=100;
/// Bounds for hunger, happiness and cleanliness
pub const CARE_STAT_BOUNDS: RangeInclusive<u8> = 0..=100;
/// Care stat value for freshly created founders
pub const DEFAULT_CARE_STAT: u8 = 50;

/// Unique identifier for pets, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(u64);

impl PetId {
    pub const fn from_raw(id: u64) -> Self {
        PetId(id)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::str::FromStr for PetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(PetId)
    }
}

/// Identifier of the user owning a pet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        OwnerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        OwnerId::new(id)
    }
}

/// A pet as stored in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub owner_id: OwnerId,
    pub name: String,
    pub species: Species,
    pub gender: Gender,
    pub level: u32,
    /// Age in days
    pub age: u32,

    pub primary_color: String,
    pub secondary_color: String,
    pub tertiary_color: String,

    pub health: u8,
    pub strength: u8,
    pub defense: u8,
    pub speed: u8,

    pub hunger: u8,
    pub happiness: u8,
    pub cleanliness: u8,

    #[serde(default)]
    pub ailments: BTreeSet<String>,

    /// Both parents for offspring, `None` for founders
    #[serde(default)]
    pub parent_ids: Option<[PetId; 2]>,
    /// Append-only, each child listed once
    #[serde(default)]
    pub offspring_ids: Vec<PetId>,

    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Pet {
    /// Build a pet from creation traits
    pub fn from_traits(
        id: PetId,
        owner_id: OwnerId,
        traits: PetTraits,
        created_at: DateTime<Utc>,
    ) -> Self {
        Pet {
            id,
            owner_id,
            name: traits.name,
            species: traits.species,
            gender: traits.gender,
            level: traits.level,
            age: traits.age,
            primary_color: traits.primary_color,
            secondary_color: traits.secondary_color,
            tertiary_color: traits.tertiary_color,
            health: traits.health,
            strength: traits.strength,
            defense: traits.defense,
            speed: traits.speed,
            hunger: traits.hunger,
            happiness: traits.happiness,
            cleanliness: traits.cleanliness,
            ailments: traits.ailments,
            parent_ids: traits.parent_ids,
            offspring_ids: Vec::new(),
            description: traits.description,
            created_at,
        }
    }

    pub fn is_founder(&self) -> bool {
        self.parent_ids.is_none()
    }

    /// Sum of the three trainable stats
    pub fn combat_total(&self) -> u32 {
        u32::from(self.strength) + u32::from(self.defense) + u32::from(self.speed)
    }

    /// Check every bounded field and the family links
    pub fn validate(&self) -> Result<()> {
        validate_numbers(&NumericFields {
            level: self.level,
            health: self.health,
            strength: self.strength,
            defense: self.defense,
            speed: self.speed,
            hunger: self.hunger,
            happiness: self.happiness,
            cleanliness: self.cleanliness,
        })?;

        for color in [&self.primary_color, &self.secondary_color, &self.tertiary_color] {
            ColorGenome::parse(color)?;
        }

        if let Some(parents) = self.parent_ids {
            if parents.contains(&self.id) {
                return Err(PetError::IncompatibleBreeding(format!(
                    "pet {} cannot be its own parent",
                    self.id
                )));
            }
        }
        if self.offspring_ids.contains(&self.id) {
            return Err(PetError::IncompatibleBreeding(format!(
                "pet {} cannot be its own offspring",
                self.id
            )));
        }

        Ok(())
    }
}

/// Everything a caller decides when creating a pet
#[derive(Debug, Clone, PartialEq)]
pub struct PetTraits {
    pub name: String,
    pub species: Species,
    pub gender: Gender,
    pub level: u32,
    pub age: u32,
    pub primary_color: String,
    pub secondary_color: String,
    pub tertiary_color: String,
    pub health: u8,
    pub strength: u8,
    pub defense: u8,
    pub speed: u8,
    pub hunger: u8,
    pub happiness: u8,
    pub cleanliness: u8,
    pub ailments: BTreeSet<String>,
    pub parent_ids: Option<[PetId; 2]>,
    pub description: String,
}

impl PetTraits {
    /// Reject out-of-bounds numbers and malformed colors, normalizing colors to lower-case
    pub fn validate(&mut self) -> Result<()> {
        validate_numbers(&NumericFields {
            level: self.level,
            health: self.health,
            strength: self.strength,
            defense: self.defense,
            speed: self.speed,
            hunger: self.hunger,
            happiness: self.happiness,
            cleanliness: self.cleanliness,
        })?;

        for color in [
            &mut self.primary_color,
            &mut self.secondary_color,
            &mut self.tertiary_color,
        ] {
            *color = ColorGenome::parse(color)?.to_hex();
        }

        Ok(())
    }
}

/// Partial update of the mutable fields of a pet
///
/// Identity, ownership, species, gender, colors, family links, description and
/// creation time have no entry here and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetPatch {
    pub level: Option<u32>,
    pub age: Option<u32>,
    pub health: Option<u8>,
    pub strength: Option<u8>,
    pub defense: Option<u8>,
    pub speed: Option<u8>,
    pub hunger: Option<u8>,
    pub happiness: Option<u8>,
    pub cleanliness: Option<u8>,
    pub ailments: Option<BTreeSet<String>>,
}

impl PetPatch {
    pub fn is_empty(&self) -> bool {
        *self == PetPatch::default()
    }

    /// Merge into `pet`; bounds are checked by the caller afterwards
    pub fn apply_to(&self, pet: &mut Pet) {
        if let Some(level) = self.level {
            pet.level = level;
        }
        if let Some(age) = self.age {
            pet.age = age;
        }
        if let Some(health) = self.health {
            pet.health = health;
        }
        if let Some(strength) = self.strength {
            pet.strength = strength;
        }
        if let Some(defense) = self.defense {
            pet.defense = defense;
        }
        if let Some(speed) = self.speed {
            pet.speed = speed;
        }
        if let Some(hunger) = self.hunger {
            pet.hunger = hunger;
        }
        if let Some(happiness) = self.happiness {
            pet.happiness = happiness;
        }
        if let Some(cleanliness) = self.cleanliness {
            pet.cleanliness = cleanliness;
        }
        if let Some(ailments) = &self.ailments {
            pet.ailments = ailments.clone();
        }
    }
}

struct NumericFields {
    level: u32,
    health: u8,
    strength: u8,
    defense: u8,
    speed: u8,
    hunger: u8,
    happiness: u8,
    cleanliness: u8,
}

fn check(field: &'static str, value: u8, bounds: &RangeInclusive<u8>) -> Result<()> {
    if bounds.contains(&value) {
        Ok(())
    } else {
        Err(PetError::out_of_bounds(
            field,
            value,
            i64::from(*bounds.start()),
            i64::from(*bounds.end()),
        ))
    }
}

fn validate_numbers(fields: &NumericFields) -> Result<()> {
    if fields.level < 1 {
        return Err(PetError::out_of_bounds("level", fields.level, 1, i64::from(u32::MAX)));
    }
    check("health", fields.health, &HEALTH_BOUNDS)?;
    check("strength", fields.strength, &COMBAT_STAT_BOUNDS)?;
    check("defense", fields.defense, &COMBAT_STAT_BOUNDS)?;
    check("speed", fields.speed, &COMBAT_STAT_BOUNDS)?;
    check("hunger", fields.hunger, &CARE_STAT_BOUNDS)?;
    check("happiness", fields.happiness, &CARE_STAT_BOUNDS)?;
    check("cleanliness", fields.cleanliness, &CARE_STAT_BOUNDS)?;
    Ok(())
}
