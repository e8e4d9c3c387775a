//! Frequency-scale conversions between Hz, mel and FFT bin indices.
//!
//! The mel scale here is the natural-log HTK form `1127 · ln(1 + f/700)`,
//! numerically equivalent to `2595 · log10(1 + f/700)`.

/// Mel scale multiplier (natural-log form).
pub const MEL_SCALE: f64 = 1127.0;

/// Break frequency of the mel warp in Hz.
pub const MEL_BREAK_HZ: f64 = 700.0;

/// Hz to mel conversion.
///
/// # Example
/// ```
/// use mb_core::scale::hz_to_mel;
/// assert_eq!(hz_to_mel(0.0), 0.0);
/// assert!((hz_to_mel(1000.0) - 999.99).abs() < 0.5);
/// ```
#[inline]
#[must_use]
pub fn hz_to_mel(hz: f64) -> f64 {
    MEL_SCALE * (1.0 + hz / MEL_BREAK_HZ).ln()
}

/// Mel to Hz conversion.
#[inline]
#[must_use]
pub fn mel_to_hz(mel: f64) -> f64 {
    MEL_BREAK_HZ * ((mel / MEL_SCALE).exp() - 1.0)
}

/// Position of `hz` on the half-spectrum bin axis, before quantisation.
///
/// Nyquist maps to `win_s / 2`.
#[inline]
#[must_use]
pub fn hz_to_bin(hz: f64, samplerate: u32, win_s: usize) -> f64 {
    let nyquist = f64::from(samplerate) / 2.0;
    hz / nyquist * (win_s / 2) as f64
}

/// Centre frequency of `bin` in Hz, over the full window (`samplerate · bin / win_s`).
#[inline]
#[must_use]
pub fn bin_to_hz(bin: usize, samplerate: u32, win_s: usize) -> f64 {
    f64::from(samplerate) * bin as f64 / win_s as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mel_roundtrip_is_stable() {
        for hz in [0.0, 50.0, 440.0, 1000.0, 4000.0, 8000.0, 22050.0] {
            let back = mel_to_hz(hz_to_mel(hz));
            assert!((back - hz).abs() < 1e-6, "{hz} -> {back}");
        }
    }

    #[test]
    fn mel_matches_log10_form() {
        for hz in [100.0, 1000.0, 6000.0] {
            let log10_form = 2595.0 * (1.0 + hz / 700.0_f64).log10();
            assert!((hz_to_mel(hz) - log10_form).abs() < 0.1);
        }
    }

    #[test]
    fn nyquist_lands_on_half_window() {
        assert!((hz_to_bin(8000.0, 16000, 512) - 256.0).abs() < 1e-12);
        assert!((hz_to_bin(0.0, 16000, 512)).abs() < 1e-12);
    }

    #[test]
    fn bin_hz_covers_full_window() {
        assert!((bin_to_hz(256, 16000, 512) - 8000.0).abs() < 1e-12);
        assert!((bin_to_hz(511, 16000, 512) - 15968.75).abs() < 1e-9);
    }
}
