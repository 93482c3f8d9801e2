//! RON snapshot store, rewritten on every mutation

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::{PetError, Result};
use crate::pet::{Pet, PetId};
use crate::store::{MemoryStore, PetStore};

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout of a pet file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub next_id: u64,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

/// Pets kept in memory and mirrored to a RON file
///
/// Every mutation holds the lock until the snapshot is on disk, and a failed
/// write rolls the in-memory change back. Reads take the same lock, so they
/// only ever see changes that reached the file.
pub struct RonFileStore {
    path: PathBuf,
    inner: MemoryStore,
    write_lock: Mutex<()>,
}

impl RonFileStore {
    /// Open the file at `path`, starting empty if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| PetError::Store(format!("failed to read {}: {e}", path.display())))?;
            let snapshot: StoreSnapshot = ron::from_str(&content)
                .map_err(|e| PetError::Store(format!("failed to parse {}: {e}", path.display())))?;

            if snapshot.version != SNAPSHOT_VERSION {
                log::warn!(
                    "Pet file {} has version {}, expected {}",
                    path.display(),
                    snapshot.version,
                    SNAPSHOT_VERSION
                );
            }

            let store = MemoryStore::from_pets(snapshot.pets);
            store.set_next_id(snapshot.next_id);
            log::info!("Loaded {} pets from {}", store.len()?, path.display());
            store
        } else {
            log::info!("No pet file at {}, starting empty", path.display());
            MemoryStore::new()
        };

        Ok(Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| PetError::Store("pet file lock poisoned".to_string()))
    }

    fn persist(&self) -> Result<()> {
        let snapshot = StoreSnapshot {
            version: SNAPSHOT_VERSION,
            next_id: self.inner.peek_next_id(),
            pets: self.inner.list()?,
        };

        let text = ron::ser::to_string_pretty(&snapshot, ron::ser::PrettyConfig::default())
            .map_err(|e| PetError::Store(format!("failed to serialize pets: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PetError::Store(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
        }

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, text)
            .and_then(|_| std::fs::rename(&temp_path, &self.path))
            .map_err(|e| {
                log::error!("Failed to write pet file {}: {}", self.path.display(), e);
                PetError::Store(format!("failed to write {}: {e}", self.path.display()))
            })?;

        log::debug!("Saved {} pets to {}", snapshot.pets.len(), self.path.display());
        Ok(())
    }
}

impl PetStore for RonFileStore {
    fn allocate_id(&self) -> Result<PetId> {
        // Counter is persisted together with the next mutation
        self.inner.allocate_id()
    }

    fn insert(&self, pet: Pet) -> Result<()> {
        let _guard = self.lock()?;
        let id = pet.id;
        self.inner.insert(pet)?;
        if let Err(e) = self.persist() {
            self.inner.remove(id)?;
            return Err(e);
        }
        Ok(())
    }

    fn get(&self, id: PetId) -> Result<Option<Pet>> {
        let _guard = self.lock()?;
        self.inner.get(id)
    }

    fn update(&self, id: PetId, f: &mut dyn FnMut(&mut Pet) -> Result<()>) -> Result<Pet> {
        let _guard = self.lock()?;
        let previous = self.inner.get(id)?.ok_or(PetError::NotFound(id))?;
        let updated = self.inner.update(id, f)?;
        if let Err(e) = self.persist() {
            self.inner.update(id, &mut |pet| {
                *pet = previous.clone();
                Ok(())
            })?;
            return Err(e);
        }
        Ok(updated)
    }

    fn remove(&self, id: PetId) -> Result<Option<Pet>> {
        let _guard = self.lock()?;
        let removed = self.inner.remove(id)?;
        if let Some(pet) = &removed {
            if let Err(e) = self.persist() {
                self.inner.insert(pet.clone())?;
                return Err(e);
            }
        }
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<Pet>> {
        let _guard = self.lock()?;
        self.inner.list()
    }

    fn len(&self) -> Result<usize> {
        let _guard = self.lock()?;
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::tests::sample_traits;
    use crate::pet::OwnerId;
    use chrono::Utc;

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RonFileStore::open(dir.path().join("pets.ron")).unwrap();
        assert!(store.is_empty().unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_insert_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pets.ron");
        let store = RonFileStore::open(&path).unwrap();

        let id = store.allocate_id().unwrap();
        let pet = Pet::from_traits(id, OwnerId::new("alice"), sample_traits(), Utc::now());
        store.insert(pet).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let snapshot: StoreSnapshot =
            ron::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.pets.len(), 1);
        assert_eq!(snapshot.next_id, 2);
    }

    #[test]
    fn test_corrupt_file_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.ron");
        std::fs::write(&path, "not ron at all (").unwrap();
        assert!(matches!(RonFileStore::open(&path), Err(PetError::Store(_))));
    }

    #[test]
    fn test_failed_write_is_never_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.ron");
        let store = RonFileStore::open(&path).unwrap();

        let kept = Pet::from_traits(
            store.allocate_id().unwrap(),
            OwnerId::new("alice"),
            sample_traits(),
            Utc::now(),
        );
        store.insert(kept.clone()).unwrap();

        // A non-empty directory where the file should be makes every rename fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), "").unwrap();

        let lost = Pet::from_traits(
            store.allocate_id().unwrap(),
            OwnerId::new("alice"),
            sample_traits(),
            Utc::now(),
        );
        let lost_id = lost.id;
        assert!(matches!(store.insert(lost), Err(PetError::Store(_))));
        assert_eq!(store.get(lost_id).unwrap(), None);
        assert_eq!(store.len().unwrap(), 1);

        let update = store.update(kept.id, &mut |pet| {
            pet.hunger = 0;
            Ok(())
        });
        assert!(matches!(update, Err(PetError::Store(_))));
        assert!(matches!(store.remove(kept.id), Err(PetError::Store(_))));
        assert_eq!(store.list().unwrap(), vec![kept]);
    }
}
