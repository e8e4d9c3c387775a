/// Spectrum frame as produced by the upstream FFT stage.
///
/// Paired magnitude (`norm`) and phase (`phas`) vectors of equal length.
/// Filterbanks only ever read `norm`.
///
/// # Example
/// ```
/// use mb_core::frame::SpectrumFrame;
/// let frame = SpectrumFrame::from_norm(vec![0.0, 1.0, 0.5]);
/// assert_eq!(frame.len(), 3);
/// assert_eq!(frame.phas, vec![0.0; 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumFrame {
    /// Magnitudes par bin.
    pub norm: Vec<f32>,
    /// Phases par bin (radians).
    pub phas: Vec<f32>,
}

impl SpectrumFrame {
    /// Zeroed frame of `len` bins.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            norm: vec![0.0; len],
            phas: vec![0.0; len],
        }
    }

    /// Wrap magnitudes with a zero phase vector.
    #[must_use]
    pub fn from_norm(norm: Vec<f32>) -> Self {
        let phas = vec![0.0; norm.len()];
        Self { norm, phas }
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.norm.len()
    }

    /// `true` when the frame holds no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.norm.is_empty()
    }
}
