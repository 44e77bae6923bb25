//! Command pipelines behind the `geocode-stops` and `build-matrix` binaries.
//!
//! Each command is a linear batch transform: load configuration, read the
//! input CSV, resolve everything, then write the output file in one go so a
//! failed run never leaves a partial result behind.

pub mod commands;
pub mod logging;
