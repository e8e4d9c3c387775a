//! Slaney auditory-toolbox filterbank: linear peaks up to ~1 kHz, then log-spaced
//! peaks, unit-area triangles.

use mb_core::config::{FallSlope, FilterbankConfig, SlaneyLayout};
use mb_core::scale::bin_to_hz;

use crate::builder::TriangleSpec;
use crate::error::FilterbankError;

fn check_layout(layout: &SlaneyLayout) -> Result<(), FilterbankError> {
    if layout.linear_filters == 0 {
        return Err(FilterbankError::InvalidLayout(
            "at least one linear filter is required".into(),
        ));
    }
    if !(layout.lowest_frequency.is_finite() && layout.lowest_frequency >= 0.0) {
        return Err(FilterbankError::InvalidLayout(format!(
            "lowest frequency must be >= 0 Hz, got {}",
            layout.lowest_frequency
        )));
    }
    if !(layout.linear_spacing.is_finite() && layout.linear_spacing > 0.0) {
        return Err(FilterbankError::InvalidLayout(format!(
            "linear spacing must be > 0 Hz, got {}",
            layout.linear_spacing
        )));
    }
    if !(layout.log_spacing.is_finite() && layout.log_spacing > 1.0) {
        return Err(FilterbankError::InvalidLayout(format!(
            "log spacing must be > 1, got {}",
            layout.log_spacing
        )));
    }
    Ok(())
}

/// Peak frequencies: `linear_filters` linear peaks then `log_filters + 2` log peaks.
fn peak_frequencies(layout: &SlaneyLayout) -> Vec<f64> {
    let mut freqs = Vec::with_capacity(layout.total_filters() + 2);
    for i in 0..layout.linear_filters {
        freqs.push(layout.lowest_frequency + i as f64 * layout.linear_spacing);
    }
    let last_linear = freqs.last().copied().unwrap_or(layout.lowest_frequency);
    let mut ratio = 1.0;
    for _ in 0..layout.log_filters + 2 {
        ratio *= layout.log_spacing;
        freqs.push(last_linear * ratio);
    }
    freqs
}

/// Centre frequency of every bin over the whole window (not only up to Nyquist).
fn bin_frequencies(samplerate: u32, win_s: usize) -> Vec<f64> {
    (0..win_s).map(|k| bin_to_hz(k, samplerate, win_s)).collect()
}

/// Frequency past which the falling edge is zero.
fn fall_end(t: &TriangleSpec, fall: FallSlope) -> f64 {
    match fall {
        FallSlope::Matched => t.upper,
        FallSlope::Rising => t.upper.min(2.0 * t.center - t.lower),
    }
}

/// Triangle records in Hz, one per 3-wide window over the peak sequence.
///
/// Every triangle must catch at least one bin with a positive weight.
pub(crate) fn triangles(
    config: &FilterbankConfig,
    layout: &SlaneyLayout,
) -> Result<Vec<TriangleSpec>, FilterbankError> {
    check_layout(layout)?;
    if config.n_filters != layout.total_filters() {
        return Err(FilterbankError::FilterCountMismatch {
            requested: config.n_filters,
            layout: layout.total_filters(),
        });
    }

    let peaks = peak_frequencies(layout);
    if let Some(k) = (1..peaks.len()).find(|&k| peaks[k] <= peaks[k - 1]) {
        return Err(FilterbankError::InvalidLayout(format!(
            "peaks must be strictly increasing, peak {k} at {} Hz follows {} Hz",
            peaks[k],
            peaks[k - 1]
        )));
    }

    let tris: Vec<TriangleSpec> = peaks
        .windows(3)
        .map(|w| TriangleSpec {
            lower: w[0],
            center: w[1],
            upper: w[2],
            height: 2.0 / (w[2] - w[0]),
        })
        .collect();

    let bin_hz = bin_frequencies(config.samplerate, config.win_s);
    for (index, t) in tris.iter().enumerate() {
        let end = fall_end(t, layout.fall);
        if !bin_hz.iter().any(|&f| f > t.lower && f < end) {
            return Err(FilterbankError::EmptyFilter {
                index,
                lower: t.lower,
                upper: t.upper,
                bin_spacing: bin_to_hz(1, config.samplerate, config.win_s),
            });
        }
    }
    Ok(tris)
}

/// Scan each filter's bins forward against the full-window Hz table.
pub(crate) fn fill(
    filters: &mut [Vec<f32>],
    triangles: &[TriangleSpec],
    samplerate: u32,
    fall: FallSlope,
) {
    let Some(win_s) = filters.first().map(Vec::len) else {
        return;
    };
    let bin_hz = bin_frequencies(samplerate, win_s);

    for (row, t) in filters.iter_mut().zip(triangles) {
        let rise_inc = t.height / (t.center - t.lower);
        let fall_inc = match fall {
            FallSlope::Matched => t.height / (t.upper - t.center),
            FallSlope::Rising => rise_inc,
        };

        for (w, &f) in row.iter_mut().zip(&bin_hz) {
            let v = if f <= t.lower || f >= t.upper {
                0.0
            } else if f <= t.center {
                (f - t.lower) * rise_inc
            } else {
                (t.height - (f - t.center) * fall_inc).max(0.0)
            };
            *w = v as f32;
        }
    }
}
