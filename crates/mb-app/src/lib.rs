//! melbank command-line front-end: config resolution and spectrum processing.

pub mod cli;
pub mod pipeline;
