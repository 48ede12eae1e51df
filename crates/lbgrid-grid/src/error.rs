//! Error types for hierarchy construction.

use lbgrid_core::ConfigError;
use thiserror::Error;

/// Failure to load or use an inlet velocity profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile file could not be opened or read.
    #[error("cannot read inlet profile: {0}")]
    Io(#[from] std::io::Error),

    /// A data line is malformed. `line` is 1-based.
    #[error("inlet profile line {line}: {reason}")]
    Parse {
        /// Line number in the source.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Interpolation needs two samples to extrapolate from.
    #[error("inlet profile needs at least 2 samples, got {got}")]
    TooFewSamples {
        /// Number of samples found.
        got: usize,
    },

    /// Sample `index` does not lie strictly above the previous one in y.
    #[error("inlet profile samples must be strictly increasing in y (sample {index})")]
    Unsorted {
        /// Zero-based sample index.
        index: usize,
    },
}

/// Top-level error returned by [`Hierarchy::build`](crate::Hierarchy::build).
#[derive(Debug, Error)]
pub enum InitError {
    /// The configuration or decomposition was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The inlet profile could not be loaded.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
