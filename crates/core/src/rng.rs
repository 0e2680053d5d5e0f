//! RNG module - small seeded generator for bounce pools and emitters
//!
//! A simple LCG is all the randomness this simulation needs: bounce jitter
//! is consumed from a precomputed pool, and emitters only spread ray angles.
//! Keeping the generator in-crate keeps seeded runs reproducible across
//! platforms.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Generate a uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits keep the value exactly representable in f32.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Generate a uniform float in [-amplitude, amplitude)
    pub fn next_jitter(&mut self, amplitude: f32) -> f32 {
        self.next_f32() * 2.0 * amplitude - amplitude
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
    fn test_next_f32_in_unit_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn test_next_jitter_bounded() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            let v = rng.next_jitter(0.2);
            assert!((-0.2..0.2).contains(&v), "out of range: {}", v);
        }
    }
}
