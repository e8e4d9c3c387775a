//! Triangular mel (HTK) and Slaney auditory filterbanks over magnitude spectra.
//!
//! Build once with [`FilterBank::build`], then call [`FilterBank::apply`] per
//! analysis frame to get one log energy per filter.
//!
//! # Example
//! ```
//! use mb_core::config::FilterbankConfig;
//! use mb_core::frame::SpectrumFrame;
//! use mb_filterbank::{FilterBank, LOG_FLOOR};
//!
//! let bank = FilterBank::build(&FilterbankConfig::default()).unwrap();
//! let frame = SpectrumFrame::new(257);
//! let mut energies = vec![0.0f32; bank.n_filters()];
//! bank.apply(&frame, &mut energies);
//! assert!(energies.iter().all(|&e| e == LOG_FLOOR.ln()));
//! ```

pub mod bank;
pub mod builder;
pub mod error;
mod htk;
pub mod observer;
mod slaney;

pub use bank::{DUMP_FILE_NAME, FilterBank, LOG_FLOOR};
pub use builder::TriangleSpec;
pub use error::FilterbankError;
pub use observer::{BuildObserver, LogObserver, NoopObserver};
