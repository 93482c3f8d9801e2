use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hatchery::{execute, open_hatchery, Command, HatcheryConfig};
use hatchery_core::OwnerId;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Owner the commands act for
    #[arg(long, default_value = "player")]
    owner: String,

    /// Config file (default: hatchery.ron if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pet file, overrides store.path
    #[arg(long)]
    store: Option<PathBuf>,

    /// Random seed, overrides rng.seed
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HatcheryConfig::load_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => HatcheryConfig::load()?,
    };
    if let Some(store) = args.store {
        config.store.path = store;
    }
    if let Some(seed) = args.seed {
        config.rng.seed = Some(seed);
    }

    // RUST_LOG still wins over the configured default
    let default_filter = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::debug!("Configuration: {:?}", config);

    let hatchery = open_hatchery(&config)?;
    let owner = OwnerId::new(args.owner);
    let output = execute(&hatchery, &owner, &args.command)?;
    println!("{}", output);

    Ok(())
}
