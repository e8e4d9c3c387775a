//! Filter weight storage, application to spectrum frames and table dumps.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use mb_core::frame::SpectrumFrame;

/// Floor applied before the log so silent bands stay finite.
pub const LOG_FLOOR: f32 = 2e-42;

/// Default file name for [`FilterBank::dump`].
pub const DUMP_FILE_NAME: &str = "filterbank.txt";

/// A bank of `n_filters` weighting vectors, each `win_s` bins long.
///
/// Weights are written once by the builder and never mutated afterwards.
///
/// # Example
/// ```
/// use mb_filterbank::FilterBank;
/// let bank = FilterBank::new(0, 0);
/// assert_eq!(bank.n_filters(), 0);
/// let mut out = [1.0f32; 4];
/// bank.apply_norm(&[1.0, 2.0], &mut out);
/// assert_eq!(out, [1.0; 4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank {
    win_s: usize,
    pub(crate) filters: Vec<Vec<f32>>,
}

impl FilterBank {
    /// Zeroed bank of `n_filters` rows of `win_s` bins. No validation.
    #[must_use]
    pub fn new(n_filters: usize, win_s: usize) -> Self {
        Self {
            win_s,
            filters: vec![vec![0.0; win_s]; n_filters],
        }
    }

    /// Number of filters.
    #[must_use]
    pub fn n_filters(&self) -> usize {
        self.filters.len()
    }

    /// Bins per filter.
    #[must_use]
    pub fn win_s(&self) -> usize {
        self.win_s
    }

    /// Weights of filter `index`.
    #[must_use]
    pub fn filter(&self, index: usize) -> Option<&[f32]> {
        self.filters.get(index).map(Vec::as_slice)
    }

    /// All filters in order.
    pub fn filters(&self) -> impl Iterator<Item = &[f32]> {
        self.filters.iter().map(Vec::as_slice)
    }

    /// Pre-log band energies: dot product of each filter with `norm`.
    ///
    /// Writes `min(n_filters, out.len())` entries over the first
    /// `min(norm.len(), win_s)` bins; other entries of `out` are untouched.
    pub fn energies(&self, norm: &[f32], out: &mut [f32]) {
        for (slot, filter) in out.iter_mut().zip(&self.filters) {
            *slot = filter.iter().zip(norm).map(|(w, x)| w * x).sum();
        }
    }

    /// Log band energies of a magnitude vector.
    ///
    /// Same bounds as [`energies`](Self::energies), then `ln(max(e, LOG_FLOOR))`.
    pub fn apply_norm(&self, norm: &[f32], out: &mut [f32]) {
        self.energies(norm, out);
        for slot in out.iter_mut().take(self.filters.len()) {
            *slot = slot.max(LOG_FLOOR).ln();
        }
    }

    /// Log band energies of a spectrum frame. Only the magnitudes are read.
    pub fn apply(&self, frame: &SpectrumFrame, out: &mut [f32]) {
        self.apply_norm(&frame.norm, out);
    }

    /// Convenience: allocate and return `n_filters` log energies.
    #[must_use]
    pub fn apply_to_vec(&self, norm: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; self.filters.len()];
        self.apply_norm(norm, &mut out);
        out
    }

    /// Write the weight table: one line per filter, `{:.6}` values each followed by a space.
    ///
    /// # Errors
    /// Propagates write errors from `w`.
    pub fn write_table<W: Write>(&self, mut w: W) -> io::Result<()> {
        for filter in &self.filters {
            for v in filter {
                write!(w, "{v:.6} ")?;
            }
            writeln!(w)?;
        }
        w.flush()
    }

    /// Best-effort dump of the weight table to `path`.
    ///
    /// Diagnostic only: failures are logged and otherwise ignored.
    pub fn dump(&self, path: &Path) {
        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("Dump filterbank ignoré ({}): {e}", path.display());
                return;
            }
        };
        if let Err(e) = self.write_table(BufWriter::new(file)) {
            log::warn!("Dump filterbank incomplet ({}): {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_bank() -> FilterBank {
        let mut bank = FilterBank::new(2, 4);
        bank.filters[0] = vec![0.0, 1.0, 0.5, 0.0];
        bank.filters[1] = vec![0.0, 0.0, 0.5, 1.0];
        bank
    }

    #[test]
    fn new_bank_is_zeroed() {
        let bank = FilterBank::new(3, 8);
        assert_eq!(bank.n_filters(), 3);
        assert_eq!(bank.win_s(), 8);
        assert!(bank.filters().all(|f| f.len() == 8 && f.iter().all(|&w| w == 0.0)));
    }

    #[test]
    fn empty_bank_is_inert() {
        let bank = FilterBank::new(0, 0);
        assert!(bank.filter(0).is_none());
        assert!(bank.apply_to_vec(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn energies_are_dot_products() {
        let bank = toy_bank();
        let mut out = [0.0f32; 2];
        bank.energies(&[1.0, 2.0, 4.0, 8.0], &mut out);
        assert!((out[0] - 4.0).abs() < 1e-6);
        assert!((out[1] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn short_spectrum_uses_available_bins() {
        let bank = toy_bank();
        let mut out = [0.0f32; 2];
        bank.energies(&[1.0, 2.0], &mut out);
        assert!((out[0] - 2.0).abs() < 1e-6);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn zero_spectrum_hits_the_floor() {
        let bank = toy_bank();
        let out = bank.apply_to_vec(&[0.0; 4]);
        assert!(out.iter().all(|&v| v == LOG_FLOOR.ln()));
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn output_bounded_by_shorter_side() {
        let bank = toy_bank();
        let mut short = [7.0f32; 1];
        bank.apply_norm(&[1.0; 4], &mut short);
        assert!((short[0] - 1.5f32.ln()).abs() < 1e-6);

        let mut long = [7.0f32; 4];
        bank.apply_norm(&[1.0; 4], &mut long);
        assert_eq!(&long[2..], &[7.0, 7.0]);
    }

    #[test]
    fn apply_reads_only_magnitudes() {
        let bank = toy_bank();
        let mut frame = SpectrumFrame::from_norm(vec![0.0, 1.0, 0.0, 0.0]);
        frame.phas = vec![3.0; 4];
        let mut out = [0.0f32; 2];
        bank.apply(&frame, &mut out);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], LOG_FLOOR.ln());
    }

    #[test]
    fn table_format_one_row_per_filter() {
        let mut buf = Vec::new();
        toy_bank().write_table(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "0.000000 1.000000 0.500000 0.000000 \n0.000000 0.000000 0.500000 1.000000 \n"
        );
    }

    #[test]
    fn dump_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DUMP_FILE_NAME);
        toy_bank().dump(&path);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.lines().next().unwrap().split_whitespace().count(), 4);
    }

    #[test]
    fn dump_to_unwritable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DUMP_FILE_NAME);
        toy_bank().dump(&path);
        assert!(!path.exists());
    }

    #[test]
    fn bank_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<FilterBank>();
    }
}
