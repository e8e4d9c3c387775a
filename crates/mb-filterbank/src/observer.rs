use crate::bank::FilterBank;
use crate::builder::TriangleSpec;

/// Receives construction diagnostics from [`FilterBank::build_with_observer`].
///
/// Both hooks default to no-ops.
pub trait BuildObserver {
    /// Called once per filter, in order, before the weights are written.
    fn on_triangle(&mut self, _index: usize, _triangle: &TriangleSpec) {}

    /// Called once the bank is fully populated.
    fn on_complete(&mut self, _bank: &FilterBank) {}
}

/// Ignores everything. Used by [`FilterBank::build`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}

/// Forwards construction diagnostics to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BuildObserver for LogObserver {
    fn on_triangle(&mut self, index: usize, t: &TriangleSpec) {
        log::debug!(
            "filter n. {index} lower {:.3} center {:.3} upper {:.3} height {:.6}",
            t.lower,
            t.center,
            t.upper,
            t.height
        );
    }

    fn on_complete(&mut self, bank: &FilterBank) {
        log::debug!(
            "filterbank ready: {} filters x {} bins",
            bank.n_filters(),
            bank.win_s()
        );
    }
}
