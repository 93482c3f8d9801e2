//! Command-line front end for Hatchery
//!
//! Loads layered configuration, opens the RON pet file and dispatches
//! subcommands to the [`hatchery_core::Hatchery`] facade.

pub mod commands;
pub mod config;

use anyhow::{Context, Result};
use hatchery_core::{Hatchery, PetRegistry, RonFileStore, SystemClock};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

pub use commands::{describe, execute, Command};
pub use config::HatcheryConfig;

pub type FileHatchery = Hatchery<RonFileStore, SystemClock, Xoshiro256StarStar>;

/// Open the pet file named by the configuration
pub fn open_hatchery(config: &HatcheryConfig) -> Result<FileHatchery> {
    let store = RonFileStore::open(&config.store.path)
        .with_context(|| format!("Failed to open pet file {}", config.store.path.display()))?;

    let seed = match config.rng.seed {
        Some(seed) => {
            log::info!("Using fixed seed {}", seed);
            seed
        }
        None => rand::random(),
    };

    Ok(Hatchery::new(
        PetRegistry::new(store, SystemClock),
        Xoshiro256StarStar::seed_from_u64(seed),
    ))
}
