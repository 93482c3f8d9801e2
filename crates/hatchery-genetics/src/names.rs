//! Display names for founders and offspring

use crate::rng::PetRng;

/// Founder name stems, also used as the second word of offspring names
pub const NAME_PREFIXES: [&str; 10] = [
    "Ember", "Frost", "Shadow", "Storm", "Blaze", "Crystal", "Twilight", "Dawn", "Dusk", "Mystic",
];

pub const NAME_SUFFIXES: [&str; 10] = [
    "scale", "wing", "claw", "fang", "heart", "soul", "spirit", "flame", "frost", "shadow",
];

/// "Small/young" adjectives that lead every offspring name
pub const OFFSPRING_PREFIXES: [&str; 8] = [
    "Tiny", "Little", "Baby", "Young", "Small", "Cute", "Sweet", "Precious",
];

pub struct NameGenerator;

impl NameGenerator {
    /// Either a single stem or stem + suffix, at 50/50
    pub fn founder_name(rng: &mut (impl PetRng + ?Sized)) -> String {
        if rng.coin_flip() {
            NAME_PREFIXES[rng.pick_index(NAME_PREFIXES.len())].to_string()
        } else {
            let prefix = NAME_PREFIXES[rng.pick_index(NAME_PREFIXES.len())];
            let suffix = NAME_SUFFIXES[rng.pick_index(NAME_SUFFIXES.len())];
            format!("{prefix}{suffix}")
        }
    }

    /// "<adjective> <stem>", independent of the parents' names
    pub fn offspring_name(rng: &mut (impl PetRng + ?Sized)) -> String {
        let prefix = OFFSPRING_PREFIXES[rng.pick_index(OFFSPRING_PREFIXES.len())];
        let name = NAME_PREFIXES[rng.pick_index(NAME_PREFIXES.len())];
        format!("{prefix} {name}")
    }
}
