use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Peak height policy for HTK mel triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GainPolicy {
    /// Every triangle peaks at 1.0.
    #[default]
    EqualGain,
    /// Height inversely proportional to the triangle's bin span, first filter = 1.0.
    EqualArea,
}

/// Falling edge slope of Slaney triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallSlope {
    /// `height / (upper - center)`: the triangle reaches zero exactly at `upper`.
    #[default]
    Matched,
    /// Reuse the rising increment on the falling edge, clamped at zero: the
    /// legacy fall slope. Weights still come from each bin's Hz position, so
    /// no bin exceeds the peak and every bin up to `win_s - 1` is written.
    Rising,
}

/// Auditory-toolbox filter layout: linear segment below ~1 kHz, log segment above.
///
/// # Example
/// ```
/// use mb_core::config::SlaneyLayout;
/// let layout = SlaneyLayout::default();
/// assert_eq!(layout.total_filters(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaneyLayout {
    /// Lower edge of the first filter (Hz).
    pub lowest_frequency: f64,
    /// Spacing between linear peaks (Hz).
    pub linear_spacing: f64,
    /// Ratio between consecutive log peaks.
    pub log_spacing: f64,
    /// Number of linearly spaced filters.
    pub linear_filters: usize,
    /// Number of log spaced filters.
    pub log_filters: usize,
    /// Falling edge slope.
    pub fall: FallSlope,
}

impl Default for SlaneyLayout {
    fn default() -> Self {
        Self {
            lowest_frequency: 133.3333,
            linear_spacing: 66.666_666_66,
            log_spacing: 1.071_170_3,
            linear_filters: 13,
            log_filters: 27,
            fall: FallSlope::Matched,
        }
    }
}

impl SlaneyLayout {
    /// Number of filters this layout produces.
    #[must_use]
    pub fn total_filters(&self) -> usize {
        self.linear_filters + self.log_filters
    }
}

/// Frequency scale and triangle policy, tagged by `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Scale {
    /// HTK mel scale, peaks equally spaced in mel between `freq_min` and `freq_max`.
    Htk {
        #[serde(default)]
        gain: GainPolicy,
    },
    /// Slaney linear+log layout, unit-area triangles. Ignores `freq_min`/`freq_max`.
    Slaney(SlaneyLayout),
}

impl Default for Scale {
    fn default() -> Self {
        Self::Htk {
            gain: GainPolicy::EqualGain,
        }
    }
}

/// Filterbank construction parameters.
///
/// # Example
/// ```
/// use mb_core::config::{FilterbankConfig, Scale};
/// let config = FilterbankConfig::from_toml_str(
///     "n_filters = 20\nwin_s = 1024\n[scale]\nkind = \"htk\"\ngain = \"equal-area\"\n",
/// ).unwrap();
/// assert_eq!(config.n_filters, 20);
/// assert_eq!(config.samplerate, 16000);
/// assert!(matches!(config.scale, Scale::Htk { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterbankConfig {
    /// Number of triangular filters.
    pub n_filters: usize,
    /// Spectral frame length in bins.
    pub win_s: usize,
    /// Sample rate (Hz).
    pub samplerate: u32,
    /// Lowest frequency covered (Hz).
    pub freq_min: f32,
    /// Highest frequency covered (Hz).
    pub freq_max: f32,
    /// Scale and triangle policy.
    pub scale: Scale,
}

impl Default for FilterbankConfig {
    fn default() -> Self {
        Self {
            n_filters: 40,
            win_s: 512,
            samplerate: 16000,
            freq_min: 0.0,
            freq_max: 8000.0,
            scale: Scale::default(),
        }
    }
}

impl FilterbankConfig {
    /// HTK mel bank with equal-gain triangles.
    #[must_use]
    pub fn htk(
        n_filters: usize,
        win_s: usize,
        samplerate: u32,
        freq_min: f32,
        freq_max: f32,
    ) -> Self {
        Self {
            n_filters,
            win_s,
            samplerate,
            freq_min,
            freq_max,
            scale: Scale::default(),
        }
    }

    /// Slaney bank with the given layout. `n_filters` follows the layout.
    #[must_use]
    pub fn slaney(win_s: usize, samplerate: u32, layout: SlaneyLayout) -> Self {
        Self {
            n_filters: layout.total_filters(),
            win_s,
            samplerate,
            freq_min: 0.0,
            freq_max: samplerate as f32 / 2.0,
            scale: Scale::Slaney(layout),
        }
    }

    /// Replace the HTK gain policy. No effect on Slaney configs.
    #[must_use]
    pub fn with_gain(mut self, policy: GainPolicy) -> Self {
        if let Scale::Htk { gain } = &mut self.scale {
            *gain = policy;
        }
        self
    }

    /// Half the sample rate.
    #[must_use]
    pub fn nyquist(&self) -> f32 {
        self.samplerate as f32 / 2.0
    }

    /// Parse a TOML document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the document is not valid TOML or has mistyped fields.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Configuration filterbank invalide")
    }

    /// Load a TOML configuration from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Erreur dans {}", path.display()))?;
        log::info!(
            "Loaded filterbank config from {}: {} filters, win_s {}",
            path.display(),
            config.n_filters,
            config.win_s
        );
        Ok(config)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Sérialisation TOML impossible")
    }
}
