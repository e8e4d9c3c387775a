//! HTK mel filterbank: peaks equally spaced in mel, quantised to FFT bins.

use mb_core::config::{FilterbankConfig, GainPolicy};
use mb_core::scale::{hz_to_bin, hz_to_mel, mel_to_hz};

use crate::builder::TriangleSpec;
use crate::error::FilterbankError;

/// Peak bins `bin[0..=n_filters]`, equally spaced in mel between `freq_min` and `freq_max`.
fn peak_bins(config: &FilterbankConfig) -> Vec<usize> {
    let mel_min = hz_to_mel(f64::from(config.freq_min));
    let mel_max = hz_to_mel(f64::from(config.freq_max));
    let step = (mel_max - mel_min) / config.n_filters as f64;

    (0..=config.n_filters)
        .map(|k| {
            let hz = mel_to_hz(mel_min + k as f64 * step);
            hz_to_bin(hz, config.samplerate, config.win_s).round().max(0.0) as usize
        })
        .collect()
}

/// Triangle records in bins. Filter `n` spans `bin[n-1] .. bin[n] .. bin[n+1]`,
/// with bin 0 standing in for `bin[-1]`.
pub(crate) fn triangles(
    config: &FilterbankConfig,
    gain: GainPolicy,
) -> Result<Vec<TriangleSpec>, FilterbankError> {
    let nyquist = config.nyquist();
    let (lo, hi) = (config.freq_min, config.freq_max);
    if !(lo.is_finite() && hi.is_finite() && lo >= 0.0 && lo < hi && hi <= nyquist) {
        return Err(FilterbankError::InvalidRange {
            freq_min: lo,
            freq_max: hi,
            nyquist,
        });
    }

    let bins = peak_bins(config);
    if let Some(k) = (1..bins.len()).find(|&k| bins[k] <= bins[k - 1]) {
        return Err(FilterbankError::UnresolvableFilters {
            n_filters: config.n_filters,
            win_s: config.win_s,
            freq_min: lo,
            freq_max: hi,
            peak: k - 1,
            bin: bins[k],
        });
    }

    let mut edges = Vec::with_capacity(bins.len() + 1);
    edges.push(0);
    edges.extend_from_slice(&bins);

    let first_span = (edges[2] - edges[0]) as f64;
    Ok(edges
        .windows(3)
        .map(|w| {
            let (lower, center, upper) = (w[0] as f64, w[1] as f64, w[2] as f64);
            let height = match gain {
                GainPolicy::EqualGain => 1.0,
                GainPolicy::EqualArea => first_span / (upper - lower),
            };
            TriangleSpec {
                lower,
                center,
                upper,
                height,
            }
        })
        .collect())
}

/// Write the triangles left to right. Filter `n` rises from the previous
/// filter's peak bin and falls to the next one's, so neighbours share exactly
/// their boundary bins. Peak bins never pass `win_s / 2`, so every `upper`
/// indexes inside the row.
pub(crate) fn fill(filters: &mut [Vec<f32>], triangles: &[TriangleSpec]) {
    for (row, t) in filters.iter_mut().zip(triangles) {
        let lower = t.lower as usize;
        let center = t.center as usize;
        let upper = t.upper as usize;

        row.fill(0.0);

        let rise = t.center - t.lower;
        for (k, w) in row.iter_mut().enumerate().take(center + 1).skip(lower) {
            *w = if rise > 0.0 {
                (t.height * (k as f64 - t.lower) / rise) as f32
            } else {
                t.height as f32
            };
        }

        let fall = t.upper - t.center;
        for (k, w) in row.iter_mut().enumerate().take(upper + 1).skip(center + 1) {
            *w = (t.height * (t.upper - k as f64) / fall) as f32;
        }
    }
}
