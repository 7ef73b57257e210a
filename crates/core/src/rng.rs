//! RNG module - weighted random piece generation
//!
//! Each draw takes `r` uniformly in [0, 1), walks the piece table in
//! declaration order accumulating probabilities, and returns the first piece
//! whose running total exceeds `r`. If rounding leaves the total just under
//! `r`, the first piece is returned.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use crate::pieces::{PieceShape, PIECES};

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

    /// Generate a uniform value in [0, 1)
    ///
    /// Built from the top 24 bits; the low bits of an LCG are poorly mixed.
    pub fn next_unit(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }
}

/// Pick an index from `weights` for a uniform draw `r` in [0, 1)
///
/// Returns the first index whose cumulative weight exceeds `r`, or 0 when
/// none does.
pub fn pick_weighted(r: f64, weights: impl IntoIterator<Item = f64>) -> usize {
    let mut cumulative = 0.0;
    for (i, w) in weights.into_iter().enumerate() {
        cumulative += w;
        if r < cumulative {
            return i;
        }
    }
    0
}

/// Weighted piece generator over the fixed piece set
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece template
    pub fn generate(&mut self) -> &'static PieceShape {
        let r = self.rng.next_unit();
        &PIECES[pick_weighted(r, PIECES.iter().map(|p| p.probability))]
    }
}
