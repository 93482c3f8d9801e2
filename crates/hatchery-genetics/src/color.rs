//! Color genome: RGB hex triplets with blending and inheritance
//!
//! Colors travel through the system as `#rrggbb` strings. Parsing accepts
//! either hex digit case; formatting always produces lower-case.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::PetRng;

/// Probability of inheriting the first parent's color unchanged
pub const FIRST_PARENT_THRESHOLD: f64 = 0.4;
/// Upper bound of the second-parent band; draws above this blend both colors
pub const SECOND_PARENT_THRESHOLD: f64 = 0.8;

/// Malformed color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {input:?}: expected '#' followed by 6 hex digits")]
pub struct ColorFormatError {
    pub input: String,
}

/// A color as three 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex representation (`#rrggbb`)
    pub fn to_hex(self) -> String {
        ColorGenome::format(self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorGenome::parse(s)
    }
}

/// Color parsing, formatting, blending and inheritance
pub struct ColorGenome;

impl ColorGenome {
    /// Parse `#RRGGBB` into channels
    pub fn parse(hex: &str) -> Result<Rgb, ColorFormatError> {
        let err = || ColorFormatError {
            input: hex.to_string(),
        };

        let digits = hex.strip_prefix('#').ok_or_else(err)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format channels as `#rrggbb`
    pub fn format(r: u8, g: u8, b: u8) -> String {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Per-channel linear interpolation, `weight` of 1.0 yields `color_a`
    pub fn blend(color_a: &str, color_b: &str, weight: f64) -> Result<String, ColorFormatError> {
        let a = Self::parse(color_a)?;
        let b = Self::parse(color_b)?;
        Ok(Self::blend_rgb(a, b, weight).to_hex())
    }

    /// Channel-level blend used by [`ColorGenome::blend`]
    pub fn blend_rgb(a: Rgb, b: Rgb, weight: f64) -> Rgb {
        let w = if weight.is_nan() {
            0.0
        } else {
            weight.clamp(0.0, 1.0)
        };
        let mix = |ca: u8, cb: u8| -> u8 {
            let value = (f64::from(ca) * w + f64::from(cb) * (1.0 - w)).floor();
            value.clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }

    /// Weighted random choice: 40% first parent, 40% second, 20% blend
    ///
    /// Consumes one draw, plus a second one for the blend weight.
    pub fn inherit(
        color_a: &str,
        color_b: &str,
        rng: &mut (impl PetRng + ?Sized),
    ) -> Result<String, ColorFormatError> {
        let a = Self::parse(color_a)?;
        let b = Self::parse(color_b)?;

        let u = rng.next_f64();
        let inherited = if u < FIRST_PARENT_THRESHOLD {
            a
        } else if u < SECOND_PARENT_THRESHOLD {
            b
        } else {
            Self::blend_rgb(a, b, rng.next_f64())
        };

        Ok(inherited.to_hex())
    }

    /// Uniform random 24-bit color
    pub fn random(rng: &mut (impl PetRng + ?Sized)) -> String {
        let value = ((rng.next_f64() * 16_777_216.0).floor() as u32).min(0x00ff_ffff);
        Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8).to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_parse_valid_colors() {
        assert_eq!(ColorGenome::parse("#FF5733").unwrap(), Rgb::new(255, 87, 51));
        assert_eq!(ColorGenome::parse("#daf7a6").unwrap(), Rgb::new(218, 247, 166));
        assert_eq!(ColorGenome::parse("#000000").unwrap(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["FF5733", "#FF573", "#FF57333", "#GG5733", "", "#", "# F5733", "#+f5733"] {
            let err = ColorGenome::parse(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    #[test]
    fn test_format_zero_pads_lowercase() {
        assert_eq!(ColorGenome::format(0, 10, 255), "#000aff");
        assert_eq!(Rgb::new(171, 205, 239).to_string(), "#abcdef");
    }

    #[test]
    fn test_blend_extremes() {
        let a = "#ff5733";
        let b = "#aed6f1";
        assert_eq!(ColorGenome::blend(a, b, 1.0).unwrap(), a);
        assert_eq!(ColorGenome::blend(a, b, 0.0).unwrap(), b);
    }

    #[test]
    fn test_blend_midpoint_floors() {
        // (255 * 0.5 + 0 * 0.5) = 127.5 -> 127
        assert_eq!(ColorGenome::blend("#ff0000", "#000000", 0.5).unwrap(), "#7f0000");
        assert_eq!(ColorGenome::blend("#101010", "#202020", 0.5).unwrap(), "#181818");
    }

    #[test]
    fn test_blend_clamps_weight() {
        assert_eq!(ColorGenome::blend("#ffffff", "#000000", 2.0).unwrap(), "#ffffff");
        assert_eq!(ColorGenome::blend("#ffffff", "#000000", -1.0).unwrap(), "#000000");
    }

    #[test]
    fn test_blend_channels_in_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for _ in 0..200 {
            let a = ColorGenome::random(&mut rng);
            let b = ColorGenome::random(&mut rng);
            let w = rng.next_f64();
            let blended = ColorGenome::blend(&a, &b, w).unwrap();
            let rgb = ColorGenome::parse(&blended).unwrap();
            let pa = ColorGenome::parse(&a).unwrap();
            let pb = ColorGenome::parse(&b).unwrap();
            assert!(rgb.r >= pa.r.min(pb.r) && rgb.r <= pa.r.max(pb.r));
            assert!(rgb.g >= pa.g.min(pb.g) && rgb.g <= pa.g.max(pb.g));
            assert!(rgb.b >= pa.b.min(pb.b) && rgb.b <= pa.b.max(pb.b));
        }
    }

    #[test]
    fn test_inherit_bands() {
        let a = "#FF0000";
        let b = "#0000ff";

        let mut rng = ScriptedRng::new([0.0]);
        assert_eq!(ColorGenome::inherit(a, b, &mut rng).unwrap(), "#ff0000");

        let mut rng = ScriptedRng::new([0.39]);
        assert_eq!(ColorGenome::inherit(a, b, &mut rng).unwrap(), "#ff0000");

        let mut rng = ScriptedRng::new([0.4]);
        assert_eq!(ColorGenome::inherit(a, b, &mut rng).unwrap(), "#0000ff");

        let mut rng = ScriptedRng::new([0.79]);
        assert_eq!(ColorGenome::inherit(a, b, &mut rng).unwrap(), "#0000ff");
        assert_eq!(rng.consumed(), 1);

        // Blend band consumes a second draw as the weight
        let mut rng = ScriptedRng::new([0.8, 0.5]);
        assert_eq!(ColorGenome::inherit(a, b, &mut rng).unwrap(), "#7f007f");
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn test_inherit_rejects_malformed_parent() {
        let mut rng = ScriptedRng::new([0.1]);
        assert!(ColorGenome::inherit("#zzzzzz", "#000000", &mut rng).is_err());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_random_color_is_valid() {
        let mut rng = ScriptedRng::new([0.0, 0.999_999_999]);
        assert_eq!(ColorGenome::random(&mut rng), "#000000");
        assert_eq!(ColorGenome::random(&mut rng), "#ffffff");

        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        for _ in 0..100 {
            assert!(ColorGenome::parse(&ColorGenome::random(&mut rng)).is_ok());
        }
    }
}
