//! Breeding: validation, trait derivation and family bookkeeping

use std::collections::BTreeSet;

use hatchery_genetics::{
    ColorGenome, Gender, NameGenerator, PetRng, SpeciesResolver, StatDeriver, INHERITANCE_FACTOR,
};

use crate::clock::Clock;
use crate::error::{PetError, Result};
use crate::pet::{OwnerId, Pet, PetId, PetTraits};
use crate::registry::PetRegistry;
use crate::store::PetStore;

/// Care stats every newborn starts with
pub const OFFSPRING_HUNGER: u8 = 50;
pub const OFFSPRING_HAPPINESS: u8 = 80;
pub const OFFSPRING_CLEANLINESS: u8 = 100;

pub struct BreedingEngine;

impl BreedingEngine {
    /// Breed two pets owned by `caller` and link the offspring to both parents
    ///
    /// On `PartialBreeding` the offspring exists; [`BreedingEngine::resume_linking`]
    /// finishes the job.
    pub fn breed<S, C, R>(
        registry: &PetRegistry<S, C>,
        parent1: PetId,
        parent2: PetId,
        caller: &OwnerId,
        rng: &mut R,
    ) -> Result<Pet>
    where
        S: PetStore,
        C: Clock,
        R: PetRng + ?Sized,
    {
        let first = registry.require_owned(parent1, caller)?;
        let second = registry.require_owned(parent2, caller)?;

        if first.id == second.id {
            return Err(PetError::IncompatibleBreeding(format!(
                "pet {} cannot breed with itself",
                first.id
            )));
        }
        if first.gender == second.gender {
            return Err(PetError::IncompatibleBreeding(format!(
                "{} and {} are both {}",
                first.name, second.name, first.gender
            )));
        }

        let traits = Self::derive_offspring(&first, &second, rng)?;
        let child = registry.create_offspring(caller, traits)?;

        log::info!(
            "Bred {} '{}' from {} '{}' and {} '{}'",
            child.id,
            child.name,
            first.id,
            first.name,
            second.id,
            second.name
        );

        Self::link(registry, child.id, [first.id, second.id])?;
        Ok(child)
    }

    /// Offspring traits for a pair, drawing in a fixed order:
    /// name, species, gender, the three colors, then health, strength, defense, speed
    pub fn derive_offspring<R: PetRng + ?Sized>(
        first: &Pet,
        second: &Pet,
        rng: &mut R,
    ) -> Result<PetTraits> {
        let name = NameGenerator::offspring_name(rng);
        let species = SpeciesResolver::resolve(first.species, second.species, rng);
        let gender = Gender::random(rng);

        let primary_color = ColorGenome::inherit(&first.primary_color, &second.primary_color, rng)?;
        let secondary_color =
            ColorGenome::inherit(&first.secondary_color, &second.secondary_color, rng)?;
        let tertiary_color =
            ColorGenome::inherit(&first.tertiary_color, &second.tertiary_color, rng)?;

        let health =
            StatDeriver::inherited_stat(first.health, second.health, INHERITANCE_FACTOR, rng);
        let strength =
            StatDeriver::inherited_stat(first.strength, second.strength, INHERITANCE_FACTOR, rng);
        let defense =
            StatDeriver::inherited_stat(first.defense, second.defense, INHERITANCE_FACTOR, rng);
        let speed = StatDeriver::inherited_stat(first.speed, second.speed, INHERITANCE_FACTOR, rng);

        Ok(PetTraits {
            name,
            species,
            gender,
            level: 1,
            age: 0,
            primary_color,
            secondary_color,
            tertiary_color,
            health,
            strength,
            defense,
            speed,
            hunger: OFFSPRING_HUNGER,
            happiness: OFFSPRING_HAPPINESS,
            cleanliness: OFFSPRING_CLEANLINESS,
            ailments: BTreeSet::new(),
            parent_ids: Some([first.id, second.id]),
            description: format!("Offspring of {} and {}.", first.name, second.name),
        })
    }

    /// Re-run the parent links of an existing offspring
    ///
    /// Safe to call any number of times: each parent lists the child once.
    pub fn resume_linking<S: PetStore, C: Clock>(
        registry: &PetRegistry<S, C>,
        child: PetId,
        caller: &OwnerId,
    ) -> Result<Pet> {
        let pet = registry.require_owned(child, caller)?;
        let parents = pet.parent_ids.ok_or_else(|| {
            PetError::IncompatibleBreeding(format!("pet {child} is a founder and has no parents"))
        })?;
        Self::link(registry, child, parents)?;
        Ok(pet)
    }

    fn link<S: PetStore, C: Clock>(
        registry: &PetRegistry<S, C>,
        child: PetId,
        parents: [PetId; 2],
    ) -> Result<()> {
        for parent in parents {
            if let Err(e) = registry.append_offspring(parent, child) {
                log::error!(
                    "Offspring {} stored but linking to parent {} failed: {}",
                    child,
                    parent,
                    e
                );
                return Err(PetError::PartialBreeding {
                    offspring: child,
                    parent,
                    reason: e.to_string(),
                });
            }
        }
        Ok(())
    }
}
