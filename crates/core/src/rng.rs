//! RNG module - seedable randomness for board dealing
//!
//! Board generation needs two uniform permutations (tile kinds and grid
//! positions). Everything random flows through the [`RandomSource`] trait so
//! callers can inject their own generator; [`SimpleRng`] is the default.
//!
//! Range reduction uses multiply-shift with rejection, so `next_below` and
//! `shuffle` are unbiased for every bound.

use tracing::warn;

/// A source of uniformly distributed 32-bit values
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a uniform value in `[0, bound)`
    ///
    /// Returns 0 when `bound` is 0.
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Lemire's nearly-divisionless method: take the high word of the
        // 64-bit product, rejecting the low words that would skew it.
        let mut m = self.next_u32() as u64 * bound as u64;
        let mut low = m as u32;
        if low < bound {
            let threshold = bound.wrapping_neg() % bound;
            while low < threshold {
                m = self.next_u32() as u64 * bound as u64;
                low = m as u32;
            }
        }
        (m >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple 64-bit LCG RNG
/// Uses Knuth's MMIX constants and returns the high 32 bits of the state
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
    seed: u64,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: seed, seed };
        // Low seeds produce correlated first outputs; burn a few.
        for _ in 0..4 {
            rng.step();
        }
        rng
    }

    /// Create an RNG seeded from the operating system
    ///
    /// Falls back to the wall clock if the OS source is unavailable.
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::new(u64::from_le_bytes(buf)),
            Err(err) => {
                warn!(error = %err, "os entropy unavailable, seeding from clock");
                Self::new(clock_seed())
            }
        }
    }

    /// The seed this generator was created with (for replaying a round)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline(always)]
    fn step(&mut self) -> u64 {
        // LCG formula: (a * state + c) mod 2^64
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9e37_79b9_7f4a_7c15)
}
