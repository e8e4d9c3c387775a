//! Shared types for melbank: construction config, spectrum frames, frequency scales.

pub mod config;
pub mod frame;
pub mod scale;
