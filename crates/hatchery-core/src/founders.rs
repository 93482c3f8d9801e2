//! Founder pets: random adoptions, the starter pet and the showcase samples

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use hatchery_genetics::stats::{FOUNDER_COMBAT_STAT, FOUNDER_HEALTH};
use hatchery_genetics::{ColorGenome, Gender, NameGenerator, PetRng, Species, StatDeriver};

use crate::pet::{PetTraits, DEFAULT_CARE_STAT};

pub const STARTER_NAME: &str = "Newbie";
pub const STARTER_DESCRIPTION: &str = "Your first pet! Take good care of it.";

pub struct FounderFactory;

impl FounderFactory {
    /// Random founder, drawing name, species (unless hinted), gender, three
    /// colors, then health, strength, defense, speed
    pub fn random_founder<R: PetRng + ?Sized>(
        species_hint: Option<Species>,
        rng: &mut R,
    ) -> PetTraits {
        let name = NameGenerator::founder_name(rng);
        let species = match species_hint {
            Some(species) => species,
            None => Species::random(rng),
        };
        let gender = Gender::random(rng);

        let primary_color = ColorGenome::random(rng);
        let secondary_color = ColorGenome::random(rng);
        let tertiary_color = ColorGenome::random(rng);

        let health = StatDeriver::founder_stat_in(&FOUNDER_HEALTH, rng);
        let strength = StatDeriver::founder_stat_in(&FOUNDER_COMBAT_STAT, rng);
        let defense = StatDeriver::founder_stat_in(&FOUNDER_COMBAT_STAT, rng);
        let speed = StatDeriver::founder_stat_in(&FOUNDER_COMBAT_STAT, rng);

        PetTraits {
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
            hunger: DEFAULT_CARE_STAT,
            happiness: DEFAULT_CARE_STAT,
            cleanliness: DEFAULT_CARE_STAT,
            ailments: BTreeSet::new(),
            parent_ids: None,
            description: String::new(),
        }
    }

    /// The dragon every new owner starts with; only gender and colors are random
    pub fn starter<R: PetRng + ?Sized>(rng: &mut R) -> PetTraits {
        let gender = Gender::random(rng);
        let primary_color = ColorGenome::random(rng);
        let secondary_color = ColorGenome::random(rng);
        let tertiary_color = ColorGenome::random(rng);

        PetTraits {
            name: STARTER_NAME.to_string(),
            species: Species::Dragon,
            gender,
            level: 1,
            age: 0,
            primary_color,
            secondary_color,
            tertiary_color,
            health: 50,
            strength: 10,
            defense: 10,
            speed: 10,
            hunger: DEFAULT_CARE_STAT,
            happiness: DEFAULT_CARE_STAT,
            cleanliness: DEFAULT_CARE_STAT,
            ailments: BTreeSet::new(),
            parent_ids: None,
            description: STARTER_DESCRIPTION.to_string(),
        }
    }

    /// The three showcase pets
    pub fn sample_pets() -> Vec<PetTraits> {
        vec![
            sample(
                "Ember",
                Species::Dragon,
                Gender::Female,
                (5, 120),
                ["#ff5733", "#ffc300", "#daf7a6"],
                [80, 25, 20, 30],
                [20, 90, 70],
                "A fiery dragon with a playful personality.",
            ),
            sample(
                "Frost",
                Species::Tundra,
                Gender::Male,
                (3, 45),
                ["#aed6f1", "#85c1e9", "#ffffff"],
                [65, 15, 30, 15],
                [40, 60, 90],
                "A calm and collected tundra dragon who loves the cold.",
            ),
            sample(
                "Whisper",
                Species::Fae,
                Gender::Female,
                (2, 30),
                ["#d7bde2", "#a569bd", "#f5eef8"],
                [50, 10, 10, 40],
                [60, 80, 85],
                "A tiny fae dragon who moves with incredible speed.",
            ),
        ]
    }

    /// Creation time for a pet that is already `age` days old
    pub fn backdated(now: DateTime<Utc>, age: u32) -> DateTime<Utc> {
        now - Duration::days(i64::from(age))
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    name: &str,
    species: Species,
    gender: Gender,
    (level, age): (u32, u32),
    [primary, secondary, tertiary]: [&str; 3],
    [health, strength, defense, speed]: [u8; 4],
    [hunger, happiness, cleanliness]: [u8; 3],
    description: &str,
) -> PetTraits {
    PetTraits {
        name: name.to_string(),
        species,
        gender,
        level,
        age,
        primary_color: primary.to_string(),
        secondary_color: secondary.to_string(),
        tertiary_color: tertiary.to_string(),
        health,
        strength,
        defense,
        speed,
        hunger,
        happiness,
        cleanliness,
        ailments: BTreeSet::new(),
        parent_ids: None,
        description: description.to_string(),
    }
}
