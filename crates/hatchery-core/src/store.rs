//! Key-value storage seam for pets

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use ahash::AHashMap;

use crate::error::{PetError, Result};
use crate::pet::{Pet, PetId};

/// Pet storage backend
///
/// `update` is the only way to change a stored pet: the closure runs while the
/// store holds its lock, on a copy that is committed only when the closure
/// returns `Ok`.
pub trait PetStore: Send + Sync {
    /// Reserve a fresh id, never handed out twice by the same store
    fn allocate_id(&self) -> Result<PetId>;

    /// Store a new pet; fails if the id is already taken
    fn insert(&self, pet: Pet) -> Result<()>;

    fn get(&self, id: PetId) -> Result<Option<Pet>>;

    /// Atomic read-modify-write of one pet, returning the committed value
    fn update(&self, id: PetId, f: &mut dyn FnMut(&mut Pet) -> Result<()>) -> Result<Pet>;

    /// Delete a pet, returning it if it existed
    fn remove(&self, id: PetId) -> Result<Option<Pet>>;

    /// Every stored pet, ordered by id
    fn list(&self) -> Result<Vec<Pet>>;

    fn len(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-process store guarded by a single mutex
#[derive(Debug)]
pub struct MemoryStore {
    pets: Mutex<AHashMap<PetId, Pet>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            pets: Mutex::new(AHashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Start from existing pets; new ids continue after the highest one
    pub fn from_pets(pets: impl IntoIterator<Item = Pet>) -> Self {
        let pets: AHashMap<PetId, Pet> = pets.into_iter().map(|pet| (pet.id, pet)).collect();
        let next = pets.keys().map(|id| id.raw()).max().unwrap_or(0) + 1;
        Self {
            pets: Mutex::new(pets),
            next_id: AtomicU64::new(next),
        }
    }

    /// Next id that `allocate_id` would hand out
    pub fn peek_next_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    pub(crate) fn set_next_id(&self, next: u64) {
        self.next_id.fetch_max(next, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, AHashMap<PetId, Pet>>> {
        self.pets
            .lock()
            .map_err(|_| PetError::Store("pet map lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PetStore for MemoryStore {
    fn allocate_id(&self) -> Result<PetId> {
        Ok(PetId::from_raw(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn insert(&self, pet: Pet) -> Result<()> {
        let mut pets = self.lock()?;
        if pets.contains_key(&pet.id) {
            return Err(PetError::Store(format!("pet {} already exists", pet.id)));
        }
        self.next_id.fetch_max(pet.id.raw() + 1, Ordering::SeqCst);
        pets.insert(pet.id, pet);
        Ok(())
    }

    fn get(&self, id: PetId) -> Result<Option<Pet>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn update(&self, id: PetId, f: &mut dyn FnMut(&mut Pet) -> Result<()>) -> Result<Pet> {
        let mut pets = self.lock()?;
        let current = pets.get(&id).ok_or(PetError::NotFound(id))?;

        let mut draft = current.clone();
        f(&mut draft)?;
        draft.id = id;

        pets.insert(id, draft.clone());
        Ok(draft)
    }

    fn remove(&self, id: PetId) -> Result<Option<Pet>> {
        Ok(self.lock()?.remove(&id))
    }

    fn list(&self) -> Result<Vec<Pet>> {
        let mut pets: Vec<Pet> = self.lock()?.values().cloned().collect();
        pets.sort_by_key(|pet| pet.id);
        Ok(pets)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }
}
