//! Subcommand dispatch and terminal output

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use hatchery_core::{Clock, Hatchery, OwnerId, Pet, PetError, PetId, PetStore, TrainingActivity};
use hatchery_genetics::{PetRng, Species};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Claim the starter dragon (only when you have no pets yet)
    Starter,

    /// Adopt a random founder pet
    Adopt {
        /// dragon, fae, guardian, mirror or tundra
        #[arg(long)]
        species: Option<Species>,
    },

    /// Add the three showcase pets
    Samples,

    /// List your pets
    List,

    /// Show one pet in detail
    Show { id: PetId },

    /// Breed two of your pets
    Breed { parent1: PetId, parent2: PetId },

    Feed { id: PetId },

    Groom { id: PetId },

    Heal { id: PetId },

    Play { id: PetId },

    /// Train a pet's strength, defense or speed
    Train {
        id: PetId,
        /// strength-training, defense-training or agility-training
        #[arg(long, default_value_t = TrainingActivity::Strength)]
        activity: TrainingActivity,
    },

    /// Release a pet
    Release { id: PetId },

    /// Parents, ancestors and descendants of a pet
    Lineage { id: PetId },

    /// Collection statistics
    Summary,
}

/// Run one command, returning what should be printed
pub fn execute<S, C, R>(
    hatchery: &Hatchery<S, C, R>,
    owner: &OwnerId,
    command: &Command,
) -> Result<String>
where
    S: PetStore,
    C: Clock,
    R: PetRng,
{
    let output = match command {
        Command::Starter => {
            if hatchery.has_pets(owner)? {
                bail!("{} already has pets; the starter is only for new owners", owner);
            }
            let pet = hatchery.create_starter_pet(owner)?;
            format!("Welcome! Meet your first pet:\n{}", describe(&pet))
        }
        Command::Adopt { species } => {
            let pet = hatchery.create_founder_pet(owner, *species)?;
            format!("Adopted:\n{}", describe(&pet))
        }
        Command::Samples => {
            let pets = hatchery.seed_sample_pets(owner)?;
            render_list(&pets)
        }
        Command::List => {
            let pets = hatchery.list_pets_by_owner(owner)?;
            if pets.is_empty() {
                "No pets yet. Try `hatchery starter`.".to_string()
            } else {
                render_list(&pets)
            }
        }
        Command::Show { id } => {
            let pet = hatchery.get_pet(*id)?.ok_or(PetError::NotFound(*id))?;
            describe(&pet)
        }
        Command::Breed { parent1, parent2 } => {
            let child = hatchery
                .breed(*parent1, *parent2, owner)
                .with_context(|| format!("Failed to breed {} with {}", parent1, parent2))?;
            format!("A new pet hatched!\n{}", describe(&child))
        }
        Command::Feed { id } => describe(&hatchery.feed(*id, owner)?),
        Command::Groom { id } => describe(&hatchery.groom(*id, owner)?),
        Command::Heal { id } => describe(&hatchery.heal(*id, owner)?),
        Command::Play { id } => describe(&hatchery.play(*id, owner)?),
        Command::Train { id, activity } => describe(&hatchery.train(*id, owner, *activity)?),
        Command::Release { id } => {
            let pet = hatchery.remove_pet(*id, owner)?;
            format!("Released {} {}", pet.id, pet.name)
        }
        Command::Lineage { id } => {
            hatchery.registry().require_owned(*id, owner)?;
            let tree = hatchery.family_tree(owner)?;
            let mut out = String::new();
            let _ = writeln!(out, "Generation: {}", tree.generation(*id).unwrap_or(0));
            let _ = writeln!(out, "Parents:     {}", join_ids(&tree.parents(*id)));
            let _ = writeln!(out, "Ancestors:   {}", join_ids(&tree.ancestors(*id)));
            let _ = write!(out, "Descendants: {}", join_ids(&tree.descendants(*id)));
            out
        }
        Command::Summary => {
            let summary = hatchery.owner_summary(owner)?;
            match summary.highest_level {
                Some(level) => format!("{} pets, highest level {}", summary.pet_count, level),
                None => "0 pets".to_string(),
            }
        }
    };
    Ok(output)
}

/// Multi-line description of a pet
pub fn describe(pet: &Pet) -> String {
    let mut out = format!(
        concat!(
            "{} {} ({} {}, level {}, {} days)\n",
            "  health {} | strength {} | defense {} | speed {}\n",
            "  hunger {} | happiness {} | cleanliness {}\n",
            "  colors {} {} {}",
        ),
        pet.id,
        pet.name,
        pet.gender,
        pet.species,
        pet.level,
        pet.age,
        pet.health,
        pet.strength,
        pet.defense,
        pet.speed,
        pet.hunger,
        pet.happiness,
        pet.cleanliness,
        pet.primary_color,
        pet.secondary_color,
        pet.tertiary_color,
    );
    if !pet.ailments.is_empty() {
        let ailments: Vec<&str> = pet.ailments.iter().map(String::as_str).collect();
        let _ = write!(out, "\n  ailments {}", ailments.join(", "));
    }
    if let Some([a, b]) = pet.parent_ids {
        let _ = write!(out, "\n  parents {} {}", a, b);
    }
    if !pet.description.is_empty() {
        let _ = write!(out, "\n  {}", pet.description);
    }
    out
}

fn render_list(pets: &[Pet]) -> String {
    pets.iter()
        .map(|pet| {
            format!(
                "{:>5} {:<16} {:<8} {:<6} lvl {}",
                pet.id.to_string(),
                pet.name,
                pet.species.as_str(),
                pet.gender.to_string(),
                pet.level
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_ids(ids: &[PetId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter().map(PetId::to_string).collect::<Vec<_>>().join(" ")
}
