//! Band-limiting cascade
//!
//! Fourth-order Butterworth high-pass at 10 Hz followed by a fourth-order
//! Butterworth low-pass at 22.4 kHz (or Nyquist, whichever is lower).
//! Each fourth-order filter is realized as two biquad sections, one per
//! pole pair, run in direct form II.

use std::f64::consts::PI;

/// High-pass corner frequency in Hz
pub const HIGHPASS_CORNER_HZ: f64 = 10.0;

/// Nominal low-pass corner frequency in Hz
pub const LOWPASS_CORNER_HZ: f64 = 22_400.0;

/// Fourth-order Butterworth pole pairs as (cos, sin) of the pole angle
const HP_POLE_PAIRS: [(f64, f64); 2] = [(0.3826835, 0.9238795), (0.9238795, 0.3826835)];

/// Fourth-order Butterworth section Q values
const LP_SECTION_Q: [f64; 2] = [1.306563, 0.541196];

/// Low-pass corner actually used at `sample_rate`
pub fn lowpass_corner(sample_rate: f64) -> f64 {
    LOWPASS_CORNER_HZ.min(sample_rate / 2.0)
}

/// Normalized biquad coefficients (a0 = 1)
///
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// High-pass section from a matched-z mapping of one analog pole pair.
    ///
    /// `w0t` is the corner in radians per sample. The numerator is the
    /// double zero at DC, scaled for unity gain at Nyquist.
    pub fn highpass(w0t: f64, pole_re: f64, pole_im: f64) -> Self {
        let a1 = -2.0 * (-pole_re * w0t).exp() * (pole_im * w0t).cos();
        let a2 = (2.0 * -pole_re * w0t).exp();
        let b0 = (1.0 - a1 + a2) / 4.0;
        BiquadCoeffs {
            b0,
            b1: -2.0 * b0,
            b2: b0,
            a1,
            a2,
        }
    }

    /// Low-pass section from the bilinear transform.
    ///
    /// `k` is the pre-warped corner `tan(pi * fc / fs)`.
    pub fn lowpass(k: f64, q: f64) -> Self {
        let k2 = k * k;
        let denom = k2 + (k / q) + 1.0;
        let b0 = k2 / denom;
        BiquadCoeffs {
            b0,
            b1: 2.0 * b0,
            b2: b0,
            a1: (2.0 * (k2 - 1.0)) / denom,
            a2: (k2 - (k / q) + 1.0) / denom,
        }
    }

    /// Magnitude response in dB at `frequency`
    pub fn response_db(&self, frequency: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * frequency / sample_rate;
        let (cos1, sin1) = (w.cos(), w.sin());
        let (cos2, sin2) = ((2.0 * w).cos(), (2.0 * w).sin());

        let num_re = self.b0 + self.b1 * cos1 + self.b2 * cos2;
        let num_im = -(self.b1 * sin1 + self.b2 * sin2);
        let den_re = 1.0 + self.a1 * cos1 + self.a2 * cos2;
        let den_im = -(self.a1 * sin1 + self.a2 * sin2);

        let num = num_re * num_re + num_im * num_im;
        let den = den_re * den_re + den_im * den_im;
        10.0 * (num / den).log10()
    }
}

/// Direct form II delay line for one section
#[derive(Debug, Clone, Copy, Default)]
pub struct BiquadState {
    w1: f64,
    w2: f64,
}

impl BiquadState {
    /// Process a single sample through the section
    #[inline]
    pub fn process(&mut self, input: f64, coeffs: &BiquadCoeffs) -> f64 {
        let w = input - coeffs.a1 * self.w1 - coeffs.a2 * self.w2;
        let output = coeffs.b0 * w + coeffs.b1 * self.w1 + coeffs.b2 * self.w2;

        // Shift delay line
        self.w2 = self.w1;
        self.w1 = w;

        output
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.w1 = 0.0;
        self.w2 = 0.0;
    }
}

/// The fixed HP1 -> HP2 -> LP1 -> LP2 cascade
#[derive(Debug, Clone)]
pub struct BandLimiter {
    coeffs: [BiquadCoeffs; 4],
    states: [BiquadState; 4],
}

impl BandLimiter {
    /// Derive all four sections for `sample_rate`
    pub fn new(sample_rate: f64) -> Self {
        let w0t = 2.0 * PI * HIGHPASS_CORNER_HZ / sample_rate;
        let k = ((2.0 * PI * lowpass_corner(sample_rate) / sample_rate) / 2.0).tan();

        let coeffs = [
            BiquadCoeffs::highpass(w0t, HP_POLE_PAIRS[0].0, HP_POLE_PAIRS[0].1),
            BiquadCoeffs::highpass(w0t, HP_POLE_PAIRS[1].0, HP_POLE_PAIRS[1].1),
            BiquadCoeffs::lowpass(k, LP_SECTION_Q[0]),
            BiquadCoeffs::lowpass(k, LP_SECTION_Q[1]),
        ];
        log::debug!("Band limiter coefficients @ {} Hz: {:?}", sample_rate, coeffs);

        Self {
            coeffs,
            states: [BiquadState::default(); 4],
        }
    }

    /// Section coefficients in processing order
    pub fn coefficients(&self) -> &[BiquadCoeffs; 4] {
        &self.coeffs
    }

    /// Run one sample through all four sections in series
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.states
            .iter_mut()
            .zip(self.coeffs.iter())
            .fold(input, |x, (state, coeffs)| state.process(x, coeffs))
    }

    /// Combined magnitude response of the cascade in dB
    pub fn response_db(&self, frequency: f64, sample_rate: f64) -> f64 {
        self.coeffs
            .iter()
            .map(|c| c.response_db(frequency, sample_rate))
            .sum()
    }

    pub fn reset(&mut self) {
        for state in &mut self.states {
            state.reset();
        }
    }
}
