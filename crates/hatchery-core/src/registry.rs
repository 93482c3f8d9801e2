//! Pet registry: creation, lookup, ownership-checked mutation and removal

use crate::clock::Clock;
use crate::error::{PetError, Result};
use crate::pet::{OwnerId, Pet, PetId, PetPatch, PetTraits};
use crate::store::PetStore;

/// Owns the pet collection through a [`PetStore`]
pub struct PetRegistry<S, C> {
    store: S,
    clock: C,
}

impl<S: PetStore, C: Clock> PetRegistry<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Create a founder stamped with the clock's current time
    pub fn create(&self, owner: &OwnerId, traits: PetTraits) -> Result<Pet> {
        let created_at = self.clock.now();
        self.create_with_timestamp(owner, traits, created_at)
    }

    /// Create a founder with an explicit creation time
    ///
    /// Parents are only assigned by breeding, so traits naming any are rejected.
    pub fn create_with_timestamp(
        &self,
        owner: &OwnerId,
        traits: PetTraits,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Pet> {
        if let Some([a, b]) = traits.parent_ids {
            log::warn!("{} tried to create a pet claiming parents {} and {}", owner, a, b);
            return Err(PetError::IncompatibleBreeding(
                "parents can only be assigned by breeding".to_string(),
            ));
        }
        self.insert_new(owner, traits, created_at)
    }

    /// Create an offspring whose two distinct parents both belong to `owner`
    pub(crate) fn create_offspring(&self, owner: &OwnerId, traits: PetTraits) -> Result<Pet> {
        let [a, b] = traits.parent_ids.ok_or_else(|| {
            PetError::IncompatibleBreeding("an offspring needs two parents".to_string())
        })?;
        if a == b {
            return Err(PetError::IncompatibleBreeding(format!(
                "pet {a} cannot be both parents"
            )));
        }
        for parent in [a, b] {
            self.require_owned(parent, owner)?;
        }

        let created_at = self.clock.now();
        self.insert_new(owner, traits, created_at)
    }

    fn insert_new(
        &self,
        owner: &OwnerId,
        mut traits: PetTraits,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Pet> {
        traits.validate()?;

        let id = self.store.allocate_id()?;
        let pet = Pet::from_traits(id, owner.clone(), traits, created_at);
        pet.validate()?;
        self.store.insert(pet.clone())?;

        log::info!(
            "Created pet {} '{}' ({} {}) for {}",
            pet.id,
            pet.name,
            pet.gender,
            pet.species,
            owner
        );
        Ok(pet)
    }

    pub fn get(&self, id: PetId) -> Result<Option<Pet>> {
        self.store.get(id)
    }

    /// Fetch a pet the caller owns
    pub fn require_owned(&self, id: PetId, caller: &OwnerId) -> Result<Pet> {
        let pet = self.store.get(id)?.ok_or(PetError::NotFound(id))?;
        check_owner(&pet, caller)?;
        Ok(pet)
    }

    /// Merge a patch into an owned pet; nothing is stored if the result is out of bounds
    pub fn apply_update(&self, id: PetId, patch: &PetPatch, caller: &OwnerId) -> Result<Pet> {
        self.update_with(id, caller, |_| patch.clone())
    }

    /// Compute a patch from the latest stored value and merge it atomically
    pub fn update_with<F>(&self, id: PetId, caller: &OwnerId, mut make_patch: F) -> Result<Pet>
    where
        F: FnMut(&Pet) -> PetPatch,
    {
        self.store.update(id, &mut |pet| {
            check_owner(pet, caller)?;
            let patch = make_patch(pet);
            patch.apply_to(pet);
            pet.validate()
        })
    }

    /// Record `child` under `parent`; appending the same child twice is a no-op
    pub(crate) fn append_offspring(&self, parent: PetId, child: PetId) -> Result<Pet> {
        if parent == child {
            return Err(PetError::IncompatibleBreeding(format!(
                "pet {parent} cannot be its own offspring"
            )));
        }

        self.store.update(parent, &mut |pet| {
            if !pet.offspring_ids.contains(&child) {
                pet.offspring_ids.push(child);
            }
            Ok(())
        })
    }

    /// Delete an owned pet; links held by relatives are left as they are
    pub fn remove(&self, id: PetId, caller: &OwnerId) -> Result<Pet> {
        let pet = self.require_owned(id, caller)?;
        let removed = self.store.remove(id)?.unwrap_or(pet);
        log::info!("Removed pet {} '{}' for {}", removed.id, removed.name, caller);
        Ok(removed)
    }

    /// Pets of one owner, ordered by id
    pub fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Pet>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .filter(|pet| &pet.owner_id == owner)
            .collect())
    }

    pub fn len(&self) -> Result<usize> {
        self.store.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.store.is_empty()
    }
}

fn check_owner(pet: &Pet, caller: &OwnerId) -> Result<()> {
    if &pet.owner_id != caller {
        log::warn!("{} tried to access pet {} owned by {}", caller, pet.id, pet.owner_id);
        return Err(PetError::NotAuthorized {
            pet: pet.id,
            caller: caller.clone(),
        });
    }
    Ok(())
}
