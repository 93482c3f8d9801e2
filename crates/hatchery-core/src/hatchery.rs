//! Facade tying the registry, engines and one random source together

use std::sync::{Mutex, MutexGuard, PoisonError};

use hatchery_genetics::{PetRng, Species};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::breeding::BreedingEngine;
use crate::care::{CareEngine, TrainingActivity};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::founders::FounderFactory;
use crate::lineage::FamilyTree;
use crate::pet::{OwnerId, Pet, PetId};
use crate::registry::PetRegistry;
use crate::store::{MemoryStore, PetStore};

/// Collection statistics for one owner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerSummary {
    pub pet_count: usize,
    /// `None` when the owner has no pets
    pub highest_level: Option<u32>,
}

/// Entry point for callers: every operation takes the authenticated owner
pub struct Hatchery<S, C, R> {
    registry: PetRegistry<S, C>,
    rng: Mutex<R>,
}

impl Hatchery<MemoryStore, SystemClock, Xoshiro256StarStar> {
    /// In-memory hatchery with a seeded random source
    pub fn in_memory(seed: u64) -> Self {
        Self::new(
            PetRegistry::new(MemoryStore::new(), SystemClock),
            Xoshiro256StarStar::seed_from_u64(seed),
        )
    }
}

impl<S: PetStore, C: Clock, R: PetRng> Hatchery<S, C, R> {
    pub fn new(registry: PetRegistry<S, C>, rng: R) -> Self {
        Self {
            registry,
            rng: Mutex::new(rng),
        }
    }

    pub fn registry(&self) -> &PetRegistry<S, C> {
        &self.registry
    }

    // A panic mid-draw leaves the source usable
    fn rng(&self) -> MutexGuard<'_, R> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_founder_pet(
        &self,
        owner: &OwnerId,
        species_hint: Option<Species>,
    ) -> Result<Pet> {
        let traits = FounderFactory::random_founder(species_hint, &mut *self.rng());
        self.registry.create(owner, traits)
    }

    /// Unconditionally creates a starter; callers decide whether the owner may have one
    pub fn create_starter_pet(&self, owner: &OwnerId) -> Result<Pet> {
        let traits = FounderFactory::starter(&mut *self.rng());
        self.registry.create(owner, traits)
    }

    /// Add the showcase pets, backdated to their age
    pub fn seed_sample_pets(&self, owner: &OwnerId) -> Result<Vec<Pet>> {
        let now = self.registry.clock().now();
        let pets = FounderFactory::sample_pets()
            .into_iter()
            .map(|traits| {
                let created_at = FounderFactory::backdated(now, traits.age);
                self.registry.create_with_timestamp(owner, traits, created_at)
            })
            .collect::<Result<Vec<_>>>()?;
        log::info!("Seeded {} sample pets for {}", pets.len(), owner);
        Ok(pets)
    }

    pub fn breed(&self, parent1: PetId, parent2: PetId, caller: &OwnerId) -> Result<Pet> {
        BreedingEngine::breed(&self.registry, parent1, parent2, caller, &mut *self.rng())
    }

    /// Finish linking an offspring whose breeding ended in `PartialBreeding`
    pub fn resume_linking(&self, child: PetId, caller: &OwnerId) -> Result<Pet> {
        BreedingEngine::resume_linking(&self.registry, child, caller)
    }

    pub fn feed(&self, pet: PetId, caller: &OwnerId) -> Result<Pet> {
        CareEngine::feed(&self.registry, pet, caller)
    }

    pub fn groom(&self, pet: PetId, caller: &OwnerId) -> Result<Pet> {
        CareEngine::groom(&self.registry, pet, caller)
    }

    pub fn heal(&self, pet: PetId, caller: &OwnerId) -> Result<Pet> {
        CareEngine::heal(&self.registry, pet, caller)
    }

    pub fn play(&self, pet: PetId, caller: &OwnerId) -> Result<Pet> {
        CareEngine::play(&self.registry, pet, caller)
    }

    pub fn train(&self, pet: PetId, caller: &OwnerId, activity: TrainingActivity) -> Result<Pet> {
        CareEngine::train(&self.registry, pet, caller, activity)
    }

    pub fn get_pet(&self, id: PetId) -> Result<Option<Pet>> {
        self.registry.get(id)
    }

    pub fn list_pets_by_owner(&self, owner: &OwnerId) -> Result<Vec<Pet>> {
        self.registry.list_by_owner(owner)
    }

    pub fn remove_pet(&self, id: PetId, caller: &OwnerId) -> Result<Pet> {
        self.registry.remove(id, caller)
    }

    pub fn has_pets(&self, owner: &OwnerId) -> Result<bool> {
        Ok(!self.registry.list_by_owner(owner)?.is_empty())
    }

    pub fn owner_summary(&self, owner: &OwnerId) -> Result<OwnerSummary> {
        let pets = self.registry.list_by_owner(owner)?;
        Ok(OwnerSummary {
            pet_count: pets.len(),
            highest_level: pets.iter().map(|pet| pet.level).max(),
        })
    }

    /// Family tree over the owner's pets
    pub fn family_tree(&self, owner: &OwnerId) -> Result<FamilyTree> {
        Ok(FamilyTree::new(&self.registry.list_by_owner(owner)?))
    }
}
