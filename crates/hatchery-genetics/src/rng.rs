//! Random source abstraction for trait derivation
//!
//! Every derivation takes its randomness as a parameter so that outcomes are
//! reproducible:
//! - any `rand::Rng` (seeded `Xoshiro256StarStar` in tests, `ThreadRng` otherwise)
//! - [`ScriptedRng`], which replays a fixed list of draws

/// Random number generator trait for trait derivation
pub trait PetRng {
    /// Generate random f64 in [0.0, 1.0)
    fn next_f64(&mut self) -> f64;

    /// Pick a uniform index into a collection of `len` elements
    ///
    /// `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index called with empty collection");
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Strictly-greater-than-half coin flip
    fn coin_flip(&mut self) -> bool {
        self.next_f64() > 0.5
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> PetRng for T {
    fn next_f64(&mut self) -> f64 {
        rand::Rng::r#gen(self)
    }
}

/// Replays a fixed, cyclic sequence of draws
///
/// Values are clamped into [0.0, 1.0). An empty script always yields 0.0.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|u| {
                if u.is_nan() {
                    0.0
                } else {
                    u.clamp(0.0, MAX_DRAW)
                }
            })
            .collect();
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

const MAX_DRAW: f64 = 1.0 - f64::EPSILON;

impl PetRng for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
