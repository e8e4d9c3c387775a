use thiserror::Error;

/// Filterbank construction failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterbankError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(
        "invalid frequency range {freq_min} Hz .. {freq_max} Hz (expected 0 <= min < max <= {nyquist} Hz)"
    )]
    InvalidRange {
        freq_min: f32,
        freq_max: f32,
        nyquist: f32,
    },

    #[error(
        "requested filter count exceeds resolvable bins for the given frequency range: \
         {n_filters} filters over {freq_min}..{freq_max} Hz with win_s {win_s} \
         (peaks {peak} and {next} both land on bin {bin})",
        next = .peak + 1
    )]
    UnresolvableFilters {
        n_filters: usize,
        win_s: usize,
        freq_min: f32,
        freq_max: f32,
        peak: usize,
        bin: usize,
    },

    #[error("layout builds {layout} filters but {requested} were requested")]
    FilterCountMismatch { requested: usize, layout: usize },

    #[error(
        "filter {index} ({lower:.1}..{upper:.1} Hz) catches no bin at {bin_spacing:.2} Hz bin spacing"
    )]
    EmptyFilter {
        index: usize,
        lower: f64,
        upper: f64,
        bin_spacing: f64,
    },

    #[error("invalid slaney layout: {0}")]
    InvalidLayout(String),
}
