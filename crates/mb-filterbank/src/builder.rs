//! Single construction entry point for both filter layouts.

use mb_core::config::{FilterbankConfig, Scale};

use crate::bank::FilterBank;
use crate::error::FilterbankError;
use crate::observer::{BuildObserver, NoopObserver};
use crate::{htk, slaney};

/// One triangle: its edges, peak position and peak height.
///
/// Edges are bin indices for HTK layouts and Hz for Slaney layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleSpec {
    /// Where the rising edge starts (weight 0).
    pub lower: f64,
    /// Peak position.
    pub center: f64,
    /// Where the falling edge ends (weight 0).
    pub upper: f64,
    /// Peak weight.
    pub height: f64,
}

impl FilterBank {
    /// Build a populated bank from `config`.
    ///
    /// # Errors
    /// Returns [`FilterbankError`] when the parameters are out of range, when
    /// adjacent HTK peaks collapse onto the same bin, when a Slaney layout
    /// does not produce `config.n_filters` filters, or when a Slaney triangle
    /// is too narrow to catch any bin.
    ///
    /// # Example
    /// ```
    /// use mb_core::config::FilterbankConfig;
    /// use mb_filterbank::FilterBank;
    /// let bank = FilterBank::build(&FilterbankConfig::htk(40, 512, 16000, 0.0, 8000.0)).unwrap();
    /// assert_eq!(bank.n_filters(), 40);
    /// assert_eq!(bank.win_s(), 512);
    /// ```
    pub fn build(config: &FilterbankConfig) -> Result<Self, FilterbankError> {
        Self::build_with_observer(config, &mut NoopObserver)
    }

    /// Same as [`build`](Self::build), reporting each triangle to `observer`.
    ///
    /// # Errors
    /// See [`build`](Self::build).
    pub fn build_with_observer(
        config: &FilterbankConfig,
        observer: &mut dyn BuildObserver,
    ) -> Result<Self, FilterbankError> {
        validate_common(config)?;

        let triangles = match &config.scale {
            Scale::Htk { gain } => htk::triangles(config, *gain)?,
            Scale::Slaney(layout) => slaney::triangles(config, layout)?,
        };
        for (index, triangle) in triangles.iter().enumerate() {
            observer.on_triangle(index, triangle);
        }

        let mut bank = Self::new(triangles.len(), config.win_s);
        match &config.scale {
            Scale::Htk { .. } => htk::fill(&mut bank.filters, &triangles),
            Scale::Slaney(layout) => slaney::fill(
                &mut bank.filters,
                &triangles,
                config.samplerate,
                layout.fall,
            ),
        }

        observer.on_complete(&bank);
        Ok(bank)
    }
}

fn validate_common(config: &FilterbankConfig) -> Result<(), FilterbankError> {
    if config.n_filters == 0 {
        return Err(FilterbankError::InvalidParameter {
            name: "n_filters",
            reason: "must be at least 1".into(),
        });
    }
    if config.win_s < 2 {
        return Err(FilterbankError::InvalidParameter {
            name: "win_s",
            reason: format!("must be at least 2, got {}", config.win_s),
        });
    }
    if config.samplerate == 0 {
        return Err(FilterbankError::InvalidParameter {
            name: "samplerate",
            reason: "must be positive".into(),
        });
    }
    Ok(())
}
