//! Bounded stat derivation for founders and offspring

use std::ops::RangeInclusive;

use crate::rng::PetRng;

/// Multiplier applied to the parental average before variation
pub const INHERITANCE_FACTOR: f64 = 0.8;

/// Half-width of the random variation added to inherited stats
pub const VARIATION_SPREAD: f64 = 5.0;

/// Bounds every inherited stat is clamped to
pub const INHERITED_STAT_BOUNDS: RangeInclusive<u8> = 1..=100;

/// Starting band for founder health
pub const FOUNDER_HEALTH: RangeInclusive<u8> = 50..=69;
/// Starting band for founder strength, defense and speed
pub const FOUNDER_COMBAT_STAT: RangeInclusive<u8> = 10..=19;

pub struct StatDeriver;

impl StatDeriver {
    /// Uniform integer in `[min, max]`
    pub fn random_founder_stat(min: u8, max: u8, rng: &mut (impl PetRng + ?Sized)) -> u8 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = u32::from(hi - lo) + 1;
        let offset = ((rng.next_f64() * f64::from(span)).floor() as u32).min(span - 1);
        lo + offset as u8
    }

    /// Draw a founder stat from one of the documented bands
    pub fn founder_stat_in(band: &RangeInclusive<u8>, rng: &mut (impl PetRng + ?Sized)) -> u8 {
        Self::random_founder_stat(*band.start(), *band.end(), rng)
    }

    /// Discounted parental average plus variation in [-5, +5), clamped to [1, 100]
    pub fn inherited_stat(
        stat_a: u8,
        stat_b: u8,
        inheritance_factor: f64,
        rng: &mut (impl PetRng + ?Sized),
    ) -> u8 {
        let base = (f64::from(stat_a) + f64::from(stat_b)) / 2.0 * inheritance_factor;
        let variation = rng.next_f64() * (VARIATION_SPREAD * 2.0) - VARIATION_SPREAD;
        let value = (base + variation).floor();

        let lo = f64::from(*INHERITED_STAT_BOUNDS.start());
        let hi = f64::from(*INHERITED_STAT_BOUNDS.end());
        if value.is_nan() {
            return *INHERITED_STAT_BOUNDS.start();
        }
        value.clamp(lo, hi) as u8
    }
}
