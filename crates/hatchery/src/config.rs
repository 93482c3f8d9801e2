//! Hatchery configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `hatchery.ron` file (if exists)
//! 3. Environment variables prefixed with `HATCHERY_`
//!
//! Example environment variable: `HATCHERY_RNG__SEED=42`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "hatchery";
pub const DEFAULT_STORE_PATH: &str = "hatchery_pets.ron";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HatcheryConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub rng: RngConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Pet file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// RON snapshot holding every pet
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// Random source settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RngConfig {
    /// Fixed seed for reproducible runs; fresh entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DebugConfig {
    /// Enable verbose logging
    #[serde(default)]
    pub verbose_logging: bool,
}

impl HatcheryConfig {
    /// Load from `hatchery.ron` in the working directory and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(
            File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Ron)
                .required(false),
            env_source(),
        )
    }

    /// Load with an explicit config file, which must exist
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::load_from(
            File::from(path).format(FileFormat::Ron).required(true),
            env_source(),
        )
    }

    fn load_from(
        file: File<config::FileSourceFile, FileFormat>,
        env: Environment,
    ) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("store.path", DEFAULT_STORE_PATH)?
            .set_default("debug.verbose_logging", false)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (HATCHERY_STORE__PATH, etc.)
            .add_source(env);

        let config = builder.build().context("Failed to build configuration")?;

        config.try_deserialize().context("Failed to deserialize configuration")
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HATCHERY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env_source().source(Some(map))
    }

    fn missing_file() -> File<config::FileSourceFile, FileFormat> {
        File::with_name("does-not-exist-hatchery")
            .format(FileFormat::Ron)
            .required(false)
    }

    #[test]
    fn test_default_config() {
        let config = HatcheryConfig::default();
        assert_eq!(config.store.path, PathBuf::from("hatchery_pets.ron"));
        assert_eq!(config.rng.seed, None);
        assert!(!config.debug.verbose_logging);
    }

    #[test]
    fn test_load_config_with_defaults() {
        let config = HatcheryConfig::load_from(missing_file(), fake_env(&[])).unwrap();
        assert_eq!(config, HatcheryConfig::default());
    }

    #[test]
    fn test_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.ron");
        std::fs::write(
            &path,
            r#"(
                store: (path: "saves/pets.ron"),
                rng: (seed: 7),
            )"#,
        )
        .unwrap();

        let config = HatcheryConfig::load_from(
            File::from(path.as_path()).format(FileFormat::Ron),
            fake_env(&[]),
        )
        .unwrap();
        assert_eq!(config.store.path, PathBuf::from("saves/pets.ron"));
        assert_eq!(config.rng.seed, Some(7));
        assert!(!config.debug.verbose_logging);
    }

    #[test]
    fn test_environment_overrides() {
        let config = HatcheryConfig::load_from(
            missing_file(),
            fake_env(&[
                ("HATCHERY_RNG__SEED", "42"),
                ("HATCHERY_DEBUG__VERBOSE_LOGGING", "true"),
                ("HATCHERY_STORE__PATH", "elsewhere.ron"),
            ]),
        )
        .unwrap();
        assert_eq!(config.rng.seed, Some(42));
        assert!(config.debug.verbose_logging);
        assert_eq!(config.store.path, PathBuf::from("elsewhere.ron"));
    }

    #[test]
    fn test_required_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(HatcheryConfig::load_file(&dir.path().join("absent.ron")).is_err());
    }
}
