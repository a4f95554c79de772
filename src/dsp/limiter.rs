//! Peak limiter
//!
//! Symmetric hard clip at the calibrated ceiling. There is no envelope or
//! release: samples inside the ceiling pass untouched.

/// Clipping threshold in dBFS (+/-1.0 = 0 dBFS)
pub const MAX_PEAK_DB: f64 = -9.5;

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert linear amplitude to decibels
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Hard clipper with a fixed ceiling
#[derive(Debug, Clone, Copy)]
pub struct PeakLimiter {
    ceiling: f64,
}

impl Default for PeakLimiter {
    fn default() -> Self {
        Self::new(MAX_PEAK_DB)
    }
}

impl PeakLimiter {
    /// Create a limiter with the ceiling given in dBFS
    pub fn new(ceiling_db: f64) -> Self {
        Self {
            ceiling: db_to_linear(ceiling_db),
        }
    }

    /// Linear ceiling
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Clip one sample to [-ceiling, ceiling]
    #[inline]
    pub fn process(&self, sample: f64) -> f64 {
        if sample > self.ceiling {
            self.ceiling
        } else if sample < -self.ceiling {
            -self.ceiling
        } else {
            sample
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_ceiling() {
        let limiter = PeakLimiter::default();
        assert_relative_eq!(limiter.ceiling(), 0.334965439, epsilon = 1e-9);
        assert_relative_eq!(linear_to_db(limiter.ceiling()), MAX_PEAK_DB, epsilon = 1e-12);
    }

    #[test]
    fn test_clips_symmetrically() {
        let limiter = PeakLimiter::default();
        let c = limiter.ceiling();
        assert_eq!(limiter.process(0.9), c);
        assert_eq!(limiter.process(-0.9), -c);
        assert_eq!(limiter.process(f64::INFINITY), c);
    }

    #[test]
    fn test_boundary_passes_unchanged() {
        let limiter = PeakLimiter::default();
        let c = limiter.ceiling();
        assert_eq!(limiter.process(c), c);
        assert_eq!(limiter.process(-c), -c);
        assert_eq!(limiter.process(0.1), 0.1);
        assert_eq!(limiter.process(0.0), 0.0);
    }

    #[test]
    fn test_linear_to_db_silence() {
        assert_eq!(linear_to_db(0.0), f64::NEG_INFINITY);
    }
}
