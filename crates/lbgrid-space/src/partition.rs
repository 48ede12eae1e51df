//! Domain decomposition metadata consumed by level-0 construction.
//!
//! The decomposition itself is computed elsewhere. A rank receives the
//! full [`PartitionDescriptor`] and builds only the slab it owns, plus one
//! periodic halo node at each end of every resolved axis.

use lbgrid_core::{Axis, ConfigError, Dimensionality, DomainConfig};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The block of the level-0 grid owned by one rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankBounds {
    /// Global `[start, end)` index range per axis, ordered `[x, y, z]`.
    pub index: [[usize; 2]; 3],
    /// Physical `[lo, hi]` range covered by the owned cells per axis.
    pub position: [[f64; 2]; 3],
}

impl RankBounds {
    /// Owned global indices along `axis`.
    pub fn owned(&self, axis: Axis) -> Range<usize> {
        let [start, end] = self.index[axis.index()];
        start..end
    }

    /// Physical range covered along `axis`.
    pub fn span(&self, axis: Axis) -> [f64; 2] {
        self.position[axis.index()]
    }

    /// Whether the two index boxes share a cell on the resolved axes.
    pub fn overlaps(&self, other: &RankBounds, dims: Dimensionality) -> bool {
        dims.axes().iter().all(|&axis| {
            let (a, b) = (self.owned(axis), other.owned(axis));
            a.start < b.end && b.start < a.end
        })
    }
}

/// Per-rank ownership of the level-0 grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionDescriptor {
    /// One entry per rank, indexed by rank number.
    pub ranks: Vec<RankBounds>,
}

impl PartitionDescriptor {
    /// A descriptor from explicit per-rank bounds.
    pub fn new(ranks: Vec<RankBounds>) -> Self {
        Self { ranks }
    }

    /// Split the domain into `parts` blocks per axis as evenly as the cell
    /// counts allow. Ranks are numbered with z varying fastest, then y,
    /// then x. In 2-D the z entry of `parts` is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use lbgrid_core::{Axis, DomainConfig};
    /// use lbgrid_space::PartitionDescriptor;
    ///
    /// let domain = DomainConfig::new_2d(2.0, 1.0, 20, 10);
    /// let parts = PartitionDescriptor::uniform(&domain, [2, 1, 1]);
    /// assert_eq!(parts.rank_count(), 2);
    /// assert_eq!(parts.local(1).unwrap().owned(Axis::X), 10..20);
    /// assert_eq!(parts.local(1).unwrap().span(Axis::X), [1.0, 2.0]);
    /// ```
    pub fn uniform(domain: &DomainConfig, parts: [usize; 3]) -> Self {
        let cells = domain.resolved_cells();
        let parts = match domain.dims {
            Dimensionality::Two => [parts[0].max(1), parts[1].max(1), 1],
            Dimensionality::Three => parts.map(|p| p.max(1)),
        };

        let splits: Vec<Vec<([usize; 2], [f64; 2])>> = Axis::ALL
            .iter()
            .map(|&axis| {
                let a = axis.index();
                let (n, p) = (cells[a], parts[a]);
                let [lo, hi] = domain.bounds[a];
                let dx = (hi - lo) / n as f64;
                (0..p)
                    .map(|r| {
                        let start = r * n / p;
                        let end = (r + 1) * n / p;
                        let plo = lo + start as f64 * dx;
                        let phi = lo + end as f64 * dx;
                        ([start, end], [plo, phi])
                    })
                    .collect()
            })
            .collect();

        let mut ranks = Vec::with_capacity(parts.iter().product());
        for &(ix, px) in &splits[0] {
            for &(iy, py) in &splits[1] {
                for &(iz, pz) in &splits[2] {
                    ranks.push(RankBounds {
                        index: [ix, iy, iz],
                        position: [px, py, pz],
                    });
                }
            }
        }
        Self { ranks }
    }

    /// Number of ranks described.
    pub fn rank_count(&self) -> usize {
        self.ranks.len()
    }

    /// Bounds owned by `rank`.
    pub fn local(&self, rank: usize) -> Option<&RankBounds> {
        self.ranks.get(rank)
    }

    /// Check the descriptor against the domain for `rank`.
    ///
    /// Every rank must own a non-empty range inside the level-0 grid on
    /// every resolved axis, no two ranks may own the same cell, and the
    /// owned cell counts must add up to the domain's.
    pub fn validate(&self, domain: &DomainConfig, rank: usize) -> Result<(), ConfigError> {
        if rank >= self.ranks.len() {
            return Err(ConfigError::InvalidPartition {
                reason: format!("rank {rank} not in descriptor of {} ranks", self.ranks.len()),
            });
        }

        let cells = domain.resolved_cells();
        let mut owned_total = 0usize;
        for (r, bounds) in self.ranks.iter().enumerate() {
            let mut volume = 1usize;
            for &axis in domain.dims.axes() {
                let a = axis.index();
                let [start, end] = bounds.index[a];
                if start >= end {
                    return Err(ConfigError::InvalidPartition {
                        reason: format!("rank {r} owns an empty {axis} range {start}..{end}"),
                    });
                }
                if end > cells[a] {
                    return Err(ConfigError::InvalidPartition {
                        reason: format!(
                            "rank {r} {axis} range {start}..{end} exceeds {} cells",
                            cells[a]
                        ),
                    });
                }
                volume *= end - start;
            }
            owned_total += volume;
        }

        for (r, a) in self.ranks.iter().enumerate() {
            for (s, b) in self.ranks.iter().enumerate().skip(r + 1) {
                if a.overlaps(b, domain.dims) {
                    return Err(ConfigError::InvalidPartition {
                        reason: format!("ranks {r} and {s} own overlapping cells"),
                    });
                }
            }
        }

        let expected: usize = domain.dims.axes().iter().map(|&a| cells[a.index()]).product();
        if owned_total != expected {
            return Err(ConfigError::InvalidPartition {
                reason: format!("ranks own {owned_total} cells, domain has {expected}"),
            });
        }
        Ok(())
    }
}

/// A partition descriptor together with the rank doing the building.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Ownership of every rank.
    pub descriptor: PartitionDescriptor,
    /// The local rank.
    pub rank: usize,
}

impl Decomposition {
    /// Pair a descriptor with the local rank.
    pub fn new(descriptor: PartitionDescriptor, rank: usize) -> Self {
        Self { descriptor, rank }
    }

    /// Bounds owned by the local rank.
    pub fn local(&self) -> Option<&RankBounds> {
        self.descriptor.local(self.rank)
    }
}
