//! Level and preview accumulation
//!
//! Sees only post-warm-up samples. Accumulates energy for the RMS figure
//! and keeps an evenly strided subset of samples for waveform display.

/// Number of samples kept for the preview waveform
pub const PREVIEW_LENGTH: usize = 1000;

/// Offset from a mean-square level to the AES17 reference convention
pub const AES17_CORRECTION_DB: f64 = 3.01;

/// Running energy and preview capture for one run
#[derive(Debug, Clone)]
pub struct LevelMeter {
    energy: f64,
    peak: f64,
    count: u64,
    stride: u64,
    preview: Vec<f64>,
}

impl LevelMeter {
    /// Meter for a run producing `output_samples` samples
    pub fn new(output_samples: u64) -> Self {
        let stride = (output_samples / PREVIEW_LENGTH as u64).max(1);
        Self {
            energy: 0.0,
            peak: 0.0,
            count: 0,
            stride,
            preview: Vec::with_capacity(PREVIEW_LENGTH),
        }
    }

    /// Distance between preview captures
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Record one output sample
    #[inline]
    pub fn push(&mut self, sample: f64) {
        self.energy += sample * sample;
        self.peak = self.peak.max(sample.abs());
        self.count += 1;

        // `count` is now the 1-based output index
        if self.count % self.stride == 0 && self.preview.len() < PREVIEW_LENGTH {
            self.preview.push(sample);
        }
    }

    /// Samples recorded so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of squared samples
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Largest absolute sample seen
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Mean-square level in dB plus the AES17 correction
    pub fn rms_db(&self) -> f64 {
        if self.count == 0 || self.energy <= 0.0 {
            return f64::NEG_INFINITY;
        }
        10.0 * (self.energy / self.count as f64).log10() + AES17_CORRECTION_DB
    }

    pub fn preview(&self) -> &[f64] {
        &self.preview
    }

    /// Consume the meter, returning the preview samples
    pub fn into_preview(self) -> Vec<f64> {
        self.preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rms_of_constant() {
        let mut meter = LevelMeter::new(10);
        for _ in 0..10 {
            meter.push(0.5);
        }
        // 10*log10(0.25) = -6.0206
        assert_relative_eq!(meter.rms_db(), -6.020599913279624 + 3.01, epsilon = 1e-12);
        assert_eq!(meter.peak(), 0.5);
    }

    #[test]
    fn test_rms_of_silence() {
        let mut meter = LevelMeter::new(10);
        meter.push(0.0);
        assert_eq!(meter.rms_db(), f64::NEG_INFINITY);
        assert_eq!(LevelMeter::new(10).rms_db(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_preview_stride_and_length() {
        let total = 5_500u64;
        let mut meter = LevelMeter::new(total);
        assert_eq!(meter.stride(), 5);

        for i in 0..total {
            meter.push(i as f64);
        }

        let preview = meter.preview();
        assert_eq!(preview.len(), PREVIEW_LENGTH);
        // Captured at 1-based indices 5, 10, 15, ...
        assert_eq!(preview[0], 4.0);
        assert_eq!(preview[1], 9.0);
        assert_eq!(preview[PREVIEW_LENGTH - 1], 4_999.0);
    }

    #[test]
    fn test_short_run_preview() {
        let mut meter = LevelMeter::new(10);
        assert_eq!(meter.stride(), 1);
        for i in 0..10 {
            meter.push(i as f64);
        }
        assert_eq!(meter.into_preview().len(), 10);
    }
}
