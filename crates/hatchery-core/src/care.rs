//! Care actions: bounded stat deltas applied atomically to owned pets

use std::collections::BTreeSet;

use crate::clock::Clock;
use crate::error::Result;
use crate::pet::{OwnerId, Pet, PetId, PetPatch};
use crate::registry::PetRegistry;
use crate::store::PetStore;

const STAT_MAX: u8 = 100;

pub const FEED_HUNGER_RELIEF: u8 = 20;
pub const FEED_HAPPINESS: u8 = 5;
pub const FEED_HEALTH: u8 = 2;
pub const GROOM_CLEANLINESS: u8 = 30;
pub const GROOM_HAPPINESS: u8 = 5;
pub const HEAL_HEALTH: u8 = 20;
pub const PLAY_HAPPINESS: u8 = 15;
pub const PLAY_HUNGER: u8 = 10;
pub const TRAINING_GAIN: u8 = 3;
/// Combat total needed per level before the next level is granted
pub const LEVEL_UP_FACTOR: u32 = 30;

fn raise(value: u8, delta: u8) -> u8 {
    value.saturating_add(delta).min(STAT_MAX)
}

/// Which stat a training session works on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TrainingActivity {
    #[default]
    Strength,
    Defense,
    Agility,
}

impl TrainingActivity {
    pub const ALL: [TrainingActivity; 3] = [Self::Strength, Self::Defense, Self::Agility];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Strength => "strength-training",
            Self::Defense => "defense-training",
            Self::Agility => "agility-training",
        }
    }
}

impl std::fmt::Display for TrainingActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for TrainingActivity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|activity| activity.id() == s.trim())
            .ok_or_else(|| format!("unknown training activity '{}'", s))
    }
}

pub struct CareEngine;

impl CareEngine {
    /// Hunger down 20, happiness up 5, health up 2
    pub fn feed_patch(pet: &Pet) -> PetPatch {
        PetPatch {
            hunger: Some(pet.hunger.saturating_sub(FEED_HUNGER_RELIEF)),
            happiness: Some(raise(pet.happiness, FEED_HAPPINESS)),
            health: Some(raise(pet.health, FEED_HEALTH)),
            ..Default::default()
        }
    }

    pub fn groom_patch(pet: &Pet) -> PetPatch {
        PetPatch {
            cleanliness: Some(raise(pet.cleanliness, GROOM_CLEANLINESS)),
            happiness: Some(raise(pet.happiness, GROOM_HAPPINESS)),
            ..Default::default()
        }
    }

    /// Health up 20 and every ailment cured
    pub fn heal_patch(pet: &Pet) -> PetPatch {
        PetPatch {
            health: Some(raise(pet.health, HEAL_HEALTH)),
            ailments: Some(BTreeSet::new()),
            ..Default::default()
        }
    }

    pub fn play_patch(pet: &Pet) -> PetPatch {
        PetPatch {
            happiness: Some(raise(pet.happiness, PLAY_HAPPINESS)),
            hunger: Some(raise(pet.hunger, PLAY_HUNGER)),
            ..Default::default()
        }
    }

    /// Raise the trained stat by 3, then grant at most one level when the
    /// combat total exceeds `level * 30`
    pub fn train_patch(pet: &Pet, activity: TrainingActivity) -> PetPatch {
        let (mut strength, mut defense, mut speed) = (pet.strength, pet.defense, pet.speed);
        match activity {
            TrainingActivity::Strength => strength = raise(strength, TRAINING_GAIN),
            TrainingActivity::Defense => defense = raise(defense, TRAINING_GAIN),
            TrainingActivity::Agility => speed = raise(speed, TRAINING_GAIN),
        }

        let total = u32::from(strength) + u32::from(defense) + u32::from(speed);
        let level = if total > pet.level.saturating_mul(LEVEL_UP_FACTOR) {
            pet.level.saturating_add(1)
        } else {
            pet.level
        };

        PetPatch {
            strength: Some(strength),
            defense: Some(defense),
            speed: Some(speed),
            level: Some(level),
            ..Default::default()
        }
    }

    pub fn feed<S: PetStore, C: Clock>(
        registry: &PetRegistry<S, C>,
        pet: PetId,
        caller: &OwnerId,
    ) -> Result<Pet> {
        let fed = registry.update_with(pet, caller, Self::feed_patch)?;
        log::debug!("Fed {} (hunger {}, health {})", fed.id, fed.hunger, fed.health);
        Ok(fed)
    }

    pub fn groom<S: PetStore, C: Clock>(
        registry: &PetRegistry<S, C>,
        pet: PetId,
        caller: &OwnerId,
    ) -> Result<Pet> {
        let groomed = registry.update_with(pet, caller, Self::groom_patch)?;
        log::debug!("Groomed {} (cleanliness {})", groomed.id, groomed.cleanliness);
        Ok(groomed)
    }

    pub fn heal<S: PetStore, C: Clock>(
        registry: &PetRegistry<S, C>,
        pet: PetId,
        caller: &OwnerId,
    ) -> Result<Pet> {
        let healed = registry.update_with(pet, caller, Self::heal_patch)?;
        log::debug!("Healed {} (health {})", healed.id, healed.health);
        Ok(healed)
    }

    pub fn play<S: PetStore, C: Clock>(
        registry: &PetRegistry<S, C>,
        pet: PetId,
        caller: &OwnerId,
    ) -> Result<Pet> {
        let played = registry.update_with(pet, caller, Self::play_patch)?;
        log::debug!("Played with {} (happiness {})", played.id, played.happiness);
        Ok(played)
    }

    pub fn train<S: PetStore, C: Clock>(
        registry: &PetRegistry<S, C>,
        pet: PetId,
        caller: &OwnerId,
        activity: TrainingActivity,
    ) -> Result<Pet> {
        let mut before = 0;
        let trained = registry.update_with(pet, caller, |current| {
            before = current.level;
            Self::train_patch(current, activity)
        })?;
        if trained.level > before {
            log::info!("{} '{}' reached level {}", trained.id, trained.name, trained.level);
        }
        log::debug!("Trained {} with {}", trained.id, activity);
        Ok(trained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::error::PetError;
    use crate::pet::tests::sample_traits;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pet_with(f: impl FnOnce(&mut Pet)) -> Pet {
        let mut pet = Pet::from_traits(
            PetId::from_raw(1),
            OwnerId::new("alice"),
            sample_traits(),
            Utc::now(),
        );
        f(&mut pet);
        pet
    }

    #[test]
    fn test_feed_patch_clamps() {
        let pet = pet_with(|p| {
            p.hunger = 0;
            p.happiness = 98;
            p.health = 99;
        });
        let patch = CareEngine::feed_patch(&pet);
        assert_eq!(patch.hunger, Some(0));
        assert_eq!(patch.happiness, Some(100));
        assert_eq!(patch.health, Some(100));

        let pet = pet_with(|p| p.hunger = 45);
        assert_eq!(CareEngine::feed_patch(&pet).hunger, Some(25));
    }

    #[test]
    fn test_groom_and_play_patches() {
        let pet = pet_with(|p| {
            p.cleanliness = 80;
            p.happiness = 50;
            p.hunger = 95;
        });
        let groom = CareEngine::groom_patch(&pet);
        assert_eq!(groom.cleanliness, Some(100));
        assert_eq!(groom.happiness, Some(55));
        assert_eq!(groom.hunger, None);

        let play = CareEngine::play_patch(&pet);
        assert_eq!(play.happiness, Some(65));
        assert_eq!(play.hunger, Some(100));
    }

    #[test]
    fn test_heal_patch_clears_ailments() {
        let pet = pet_with(|p| {
            p.health = 90;
            p.ailments.insert("sniffles".to_string());
        });
        let patch = CareEngine::heal_patch(&pet);
        assert_eq!(patch.health, Some(100));
        assert_eq!(patch.ailments, Some(BTreeSet::new()));
    }

    #[test]
    fn test_train_patch_levels_up_once() {
        // 25 + 20 + 30 = 75 > 30, but only one level per session
        let pet = pet_with(|p| p.level = 1);
        let patch = CareEngine::train_patch(&pet, TrainingActivity::Strength);
        assert_eq!(patch.strength, Some(28));
        assert_eq!(patch.level, Some(2));

        // 75 + 3 = 78, not above 3 * 30
        let pet = pet_with(|p| p.level = 3);
        let patch = CareEngine::train_patch(&pet, TrainingActivity::Defense);
        assert_eq!(patch.defense, Some(23));
        assert_eq!(patch.level, Some(3));
    }

    #[test]
    fn test_train_patch_caps_stat() {
        let pet = pet_with(|p| p.speed = 99);
        let patch = CareEngine::train_patch(&pet, TrainingActivity::Agility);
        assert_eq!(patch.speed, Some(100));
        assert_eq!(patch.strength, Some(pet.strength));
    }

    #[test]
    fn test_training_activity_ids() {
        assert_eq!(TrainingActivity::default(), TrainingActivity::Strength);
        for activity in TrainingActivity::ALL {
            assert_eq!(activity.id().parse::<TrainingActivity>().unwrap(), activity);
        }
        assert!("swimming".parse::<TrainingActivity>().is_err());
    }

    /// Memory store that counts reads made outside `update`
    struct CountingStore {
        inner: MemoryStore,
        reads: AtomicUsize,
    }

    impl PetStore for CountingStore {
        fn allocate_id(&self) -> Result<PetId> {
            self.inner.allocate_id()
        }

        fn insert(&self, pet: Pet) -> Result<()> {
            self.inner.insert(pet)
        }

        fn get(&self, id: PetId) -> Result<Option<Pet>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get(id)
        }

        fn update(&self, id: PetId, f: &mut dyn FnMut(&mut Pet) -> Result<()>) -> Result<Pet> {
            self.inner.update(id, f)
        }

        fn remove(&self, id: PetId) -> Result<Option<Pet>> {
            self.inner.remove(id)
        }

        fn list(&self) -> Result<Vec<Pet>> {
            self.inner.list()
        }
    }

    #[test]
    fn test_train_reads_level_inside_update() {
        let store = CountingStore {
            inner: MemoryStore::new(),
            reads: AtomicUsize::new(0),
        };
        let registry = PetRegistry::new(store, SystemClock);
        let owner = OwnerId::new("alice");
        let pet = registry.create(&owner, sample_traits()).unwrap();

        let trained =
            CareEngine::train(&registry, pet.id, &owner, TrainingActivity::Strength).unwrap();
        assert_eq!(trained.level, pet.level + 1);
        assert_eq!(registry.store().reads.load(Ordering::SeqCst), 0);

        let eve = OwnerId::new("eve");
        assert!(matches!(
            CareEngine::train(&registry, pet.id, &eve, TrainingActivity::Defense),
            Err(PetError::NotAuthorized { .. })
        ));
        assert_eq!(registry.get(pet.id).unwrap().unwrap().defense, pet.defense);
    }

    #[test]
    fn test_care_requires_owner() {
        let registry = PetRegistry::new(MemoryStore::new(), SystemClock);
        let owner = OwnerId::new("alice");
        let pet = registry.create(&owner, sample_traits()).unwrap();

        assert!(matches!(
            CareEngine::feed(&registry, pet.id, &OwnerId::new("eve")),
            Err(PetError::NotAuthorized { .. })
        ));
        let fed = CareEngine::feed(&registry, pet.id, &owner).unwrap();
        assert_eq!(fed.hunger, 0);
        assert_eq!(registry.get(pet.id).unwrap().unwrap().hunger, 0);
    }
}
