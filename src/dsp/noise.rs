//! Deterministic white noise source
//!
//! A linear congruential generator over a power-of-two modulus. The
//! modulus doubles as the sequence period and as the warm-up length of a
//! generation run.

use crate::engine::SampleRate;

/// LCG multiplier shared by every tier
pub const LCG_MULTIPLIER: u64 = 1_664_525;

/// Period and step constants for one sample-rate tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrngTier {
    /// Sequence period in samples (a power of two)
    pub period: u32,
    /// Additive step; odd, so the sequence covers the whole modulus
    pub step: u32,
}

impl PrngTier {
    /// 512K-sample period used at 48 kHz
    pub const STANDARD: PrngTier = PrngTier {
        period: 524_288,
        step: 52_737,
    };

    /// 1024K-sample period used above 48 kHz
    pub const HIGH_RATE: PrngTier = PrngTier {
        period: 1_048_576,
        step: 163_841,
    };

    /// Select the tier for a sample rate
    pub fn for_rate(rate: SampleRate) -> Self {
        if rate.hz() > 48_000 {
            Self::HIGH_RATE
        } else {
            Self::STANDARD
        }
    }

    /// Largest register value, also the bitmask applied after each step
    #[inline]
    pub fn mask(&self) -> u64 {
        u64::from(self.period) - 1
    }
}

/// Seeded white noise generator
#[derive(Debug, Clone)]
pub struct NoiseSource {
    tier: PrngTier,
    seed: u64,
    scale: f64,
}

impl NoiseSource {
    /// Create a source starting from seed 0
    pub fn new(tier: PrngTier) -> Self {
        Self {
            tier,
            seed: 0,
            scale: 2.0 / tier.mask() as f64,
        }
    }

    pub fn tier(&self) -> PrngTier {
        self.tier
    }

    /// Current register value
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance the register one step and return it
    #[inline]
    pub fn next_raw(&mut self) -> u64 {
        self.seed = (LCG_MULTIPLIER * self.seed + u64::from(self.tier.step)) & self.tier.mask();
        self.seed
    }

    /// Advance one step and map the register linearly onto [-1.0, 1.0]
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        self.next_raw() as f64 * self.scale - 1.0
    }
}
