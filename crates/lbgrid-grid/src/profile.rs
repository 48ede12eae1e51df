//! Inlet velocity profiles sampled along y.
//!
//! # File format
//!
//! One record per line, four whitespace-separated numbers `y ux uy uz`,
//! sorted by strictly increasing `y`. Blank lines and lines starting with
//! `#` are skipped.
//!
//! ```text
//! # y      ux     uy   uz
//! 0.0      0.00   0.0  0.0
//! 0.5      0.04   0.0  0.0
//! 1.0      0.00   0.0  0.0
//! ```

use crate::error::ProfileError;
use lbgrid_core::ProfileSource;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A sampled `(y, ux, uy, uz)` profile with linear interpolation between
/// samples and constant-step extrapolation outside them.
///
/// # Examples
///
/// ```
/// use lbgrid_grid::InletProfile;
///
/// let profile = InletProfile::from_samples(vec![
///     [0.0, 0.0, 0.0, 0.0],
///     [1.0, 2.0, 0.0, 0.0],
///     [2.0, 4.0, 0.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(profile.sample(1.5)[0], 3.0);
/// assert_eq!(profile.sample(-0.5)[0], -2.0);
/// assert_eq!(profile.sample(2.5)[0], 6.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InletProfile {
    samples: Vec<[f64; 4]>,
}

impl InletProfile {
    /// Build from in-memory `[y, ux, uy, uz]` records.
    pub fn from_samples(samples: Vec<[f64; 4]>) -> Result<Self, ProfileError> {
        if samples.len() < 2 {
            return Err(ProfileError::TooFewSamples { got: samples.len() });
        }
        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1][0] <= pair[0][0])
        {
            return Err(ProfileError::Unsorted { index: index + 1 });
        }
        Ok(Self { samples })
    }

    /// Parse records from a reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ProfileError> {
        let mut samples = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            samples.push(parse_record(line, line_num + 1)?);
        }
        Self::from_samples(samples)
    }

    /// Read records from a file.
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let profile = Self::from_reader(BufReader::new(File::open(path)?))?;
        debug!(path = %path.display(), samples = profile.len(), "loaded inlet profile");
        Ok(profile)
    }

    /// Load from a configured source.
    pub fn load(source: &ProfileSource) -> Result<Self, ProfileError> {
        match source {
            ProfileSource::File(path) => Self::from_file(path),
            ProfileSource::Samples(samples) => Self::from_samples(samples.clone()),
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: a profile holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The records in increasing `y`.
    pub fn samples(&self) -> &[[f64; 4]] {
        &self.samples
    }

    /// Velocity `[ux, uy, uz]` at height `y`.
    ///
    /// Below the first sample the value is `s0 - (s1 - s0)`, above the last
    /// `sL + (sL - sL-1)`, regardless of how far outside `y` lies.
    pub fn sample(&self, y: f64) -> [f64; 3] {
        let s = &self.samples;
        let n = s.len();
        if y < s[0][0] {
            return velocity(|c| s[0][c] - (s[1][c] - s[0][c]));
        }
        if y > s[n - 1][0] {
            return velocity(|c| s[n - 1][c] + (s[n - 1][c] - s[n - 2][c]));
        }
        // First sample at or above y; exists because y <= last.
        let hi = s.partition_point(|r| r[0] < y);
        if s[hi][0] == y {
            return velocity(|c| s[hi][c]);
        }
        // Only a NaN `y` reaches here with `hi == 0`; it propagates.
        let lo = hi.saturating_sub(1);
        let t = (y - s[lo][0]) / (s[hi][0] - s[lo][0]);
        velocity(|c| s[lo][c] + t * (s[hi][c] - s[lo][c]))
    }

    /// Sample at every y position of a grid.
    pub fn sample_all(&self, ys: &[f64]) -> InletVelocity {
        let mut out = InletVelocity::with_capacity(ys.len());
        for &y in ys {
            let [ux, uy, uz] = self.sample(y);
            out.ux.push(ux);
            out.uy.push(uy);
            out.uz.push(uz);
        }
        out
    }
}

/// Inlet velocity at each y node of a grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InletVelocity {
    /// x component per y node.
    pub ux: Vec<f64>,
    /// y component per y node.
    pub uy: Vec<f64>,
    /// z component per y node.
    pub uz: Vec<f64>,
}

impl InletVelocity {
    fn with_capacity(n: usize) -> Self {
        Self {
            ux: Vec::with_capacity(n),
            uy: Vec::with_capacity(n),
            uz: Vec::with_capacity(n),
        }
    }

    /// Number of y nodes.
    pub fn len(&self) -> usize {
        self.ux.len()
    }

    /// Whether no nodes were sampled.
    pub fn is_empty(&self) -> bool {
        self.ux.is_empty()
    }

    /// `[ux, uy, uz]` at local y node `j`.
    pub fn get(&self, j: usize) -> Option<[f64; 3]> {
        Some([*self.ux.get(j)?, *self.uy.get(j)?, *self.uz.get(j)?])
    }
}

fn velocity(component: impl Fn(usize) -> f64) -> [f64; 3] {
    [component(1), component(2), component(3)]
}

fn parse_record(line: &str, line_num: usize) -> Result<[f64; 4], ProfileError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(ProfileError::Parse {
            line: line_num,
            reason: format!("expected 4 values, found {}", parts.len()),
        });
    }
    let mut record = [0.0; 4];
    for (slot, part) in record.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|e| ProfileError::Parse {
            line: line_num,
            reason: format!("{part:?}: {e}"),
        })?;
    }
    Ok(record)
}
