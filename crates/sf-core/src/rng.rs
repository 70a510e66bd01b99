//! Randomness seam.
//!
//! Every random choice in the scene (kind, colour, entrance x) is drawn from
//! a `RandomSource`. The browser build plugs in `Math.random()`; native code
//! and tests use the seeded `SplitMix64`.

/// A source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }

    /// Uniform float in `[0, upper)`.
    fn uniform(&mut self, upper: f64) -> f64 {
        self.next_f64() * upper
    }
}

/// Small seeded generator (SplitMix64). Deterministic per seed.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix64 {
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits → [0, 1)
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
