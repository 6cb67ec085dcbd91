//! RNG module - seedable random source for candy generation
//!
//! Every board owns one [`SimpleRng`]. Constructing two boards with the same
//! seed and driving them with the same calls yields identical candy sequences,
//! which keeps deals reproducible for tests and replays.

use crate::types::Color;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Maps through the high bits; the low bits of an LCG have short periods
    /// (bit 0 alternates every draw).
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniformly chosen index into a collection of `len` items
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_range(len as u32) as usize)
    }

    /// Draw a candy color from the full palette
    pub fn next_color(&mut self) -> Color {
        Color::from_index(self.next_range(Color::ALL.len() as u32) as usize)
    }

    /// Current generator state (seeding a new RNG with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
        assert_eq!(SimpleRng::default(), SimpleRng::new(0));
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_colors_cover_palette() {
        let mut rng = SimpleRng::new(42);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[rng.next_color().index()] = true;
        }
        assert!(seen.iter().all(|s| *s), "palette not covered: {:?}", seen);
    }

    #[test]
    fn test_consecutive_colors_are_not_parity_locked() {
        // Three equal consecutive draws must be possible, otherwise column
        // fills could never deal a vertical run.
        let mut rng = SimpleRng::new(1);
        let draws: Vec<Color> = (0..2000).map(|_| rng.next_color()).collect();
        assert!(draws.windows(3).any(|w| w[0] == w[1] && w[1] == w[2]));
    }

    #[test]
    fn test_choose_index() {
        let mut rng = SimpleRng::new(3);
        assert_eq!(rng.choose_index(0), None);
        assert_eq!(rng.choose_index(1), Some(0));
        for _ in 0..100 {
            assert!(rng.choose_index(5).unwrap() < 5);
        }
    }

    #[test]
    fn test_state_continues_sequence() {
        let mut rng = SimpleRng::new(99);
        rng.next_u32();
        let mut resumed = SimpleRng::new(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }
}
