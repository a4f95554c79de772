//! Signal chain
//!
//! The per-sample stages of the generator, leaf first:
//! noise source -> pink network -> band limiter -> peak limiter.

mod biquad;
mod limiter;
mod noise;
mod pink;

pub use biquad::{
    lowpass_corner, BandLimiter, BiquadCoeffs, BiquadState, HIGHPASS_CORNER_HZ, LOWPASS_CORNER_HZ,
};
pub use limiter::{db_to_linear, linear_to_db, PeakLimiter, MAX_PEAK_DB};
pub use noise::{NoiseSource, PrngTier, LCG_MULTIPLIER};
pub use pink::PinkNetwork;

/// Complete per-sample chain for one generation run
#[derive(Debug, Clone)]
pub struct SignalChain {
    source: NoiseSource,
    pink: PinkNetwork,
    band: BandLimiter,
    limiter: PeakLimiter,
}

impl SignalChain {
    /// Fresh chain with zeroed state for `sample_rate`
    pub fn new(tier: PrngTier, sample_rate: f64) -> Self {
        Self {
            source: NoiseSource::new(tier),
            pink: PinkNetwork::new(),
            band: BandLimiter::new(sample_rate),
            limiter: PeakLimiter::default(),
        }
    }

    /// Produce the next band-limited, peak-limited sample
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        let white = self.source.next_sample();
        let pink = self.pink.process(white);
        let band_limited = self.band.process(pink);
        self.limiter.process(band_limited)
    }
}

impl Iterator for SignalChain {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}
