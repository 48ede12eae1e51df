//! Refinement region descriptors and the region tree.
//!
//! The tree is a pure description of the hierarchy: it holds no grids and
//! no references between grids. Grid construction walks it in level order
//! after validation.

use crate::axis::{Axis, Dimensionality};
use crate::error::ConfigError;
use crate::id::{GridKey, RegionId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Smallest refinement span, in parent cells, along any axis.
pub const MIN_REGION_SPAN: usize = 3;

/// One embedded refinement patch.
///
/// `start` and `end` are inclusive global node indices in the *parent*
/// grid's index space, ordered `[x, y, z]`. `children` are expressed in the
/// index space of the grid this region creates, which spans
/// `2 * span(axis)` nodes per axis starting from 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    /// First covered parent index per axis.
    pub start: [usize; 3],
    /// Last covered parent index per axis (inclusive).
    pub end: [usize; 3],
    /// Regions refined further inside this one.
    #[serde(default)]
    pub children: Vec<RegionSpec>,
}

impl RegionSpec {
    /// A region with no nested refinement.
    pub fn new(start: [usize; 3], end: [usize; 3]) -> Self {
        Self {
            start,
            end,
            children: Vec::new(),
        }
    }

    /// Add a nested region, builder style.
    pub fn with_child(mut self, child: RegionSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Number of parent cells covered along `axis`. Zero if `end < start`.
    pub fn span(&self, axis: Axis) -> usize {
        let a = axis.index();
        (self.end[a] + 1).saturating_sub(self.start[a])
    }

    /// Number of nodes of the child grid along `axis` (its global extent).
    ///
    /// In 2-D the z axis always has a single node.
    pub fn child_extent(&self, axis: Axis, dims: Dimensionality) -> usize {
        if dims.resolves(axis) {
            2 * self.span(axis)
        } else {
            1
        }
    }

    /// Whether a parent global coordinate lies inside the region.
    pub fn contains(&self, global: [usize; 3], dims: Dimensionality) -> bool {
        dims.axes().iter().all(|&axis| {
            let a = axis.index();
            global[a] >= self.start[a] && global[a] <= self.end[a]
        })
    }

    /// Whether a parent global coordinate lies on the outer shell of the
    /// region (on its start or end plane along any resolved axis).
    pub fn on_shell(&self, global: [usize; 3], dims: Dimensionality) -> bool {
        dims.axes().iter().any(|&axis| {
            let a = axis.index();
            global[a] == self.start[a] || global[a] == self.end[a]
        })
    }
}

/// A region placed in the hierarchy: its spec plus the keys of the grid it
/// creates and of the grid it refines.
#[derive(Clone, Copy, Debug)]
pub struct RegionNode<'a> {
    /// Grid created by this region.
    pub key: GridKey,
    /// Grid this region refines.
    pub parent: GridKey,
    /// The region descriptor.
    pub spec: &'a RegionSpec,
}

/// All refinement regions declared for a run, rooted at level 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionTree {
    /// Regions refining the level-0 grid.
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
}

impl RegionTree {
    /// A tree with the given level-0 regions.
    pub fn new(regions: Vec<RegionSpec>) -> Self {
        Self { regions }
    }

    /// Returns `true` if no refinement is declared.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Breadth-first listing of every region with its assigned key.
    ///
    /// Region numbers are assigned per level in breadth-first order, so all
    /// parents precede their children.
    pub fn nodes(&self) -> Vec<RegionNode<'_>> {
        let mut out = Vec::new();
        let mut next_region: Vec<u32> = Vec::new();
        let mut queue: VecDeque<(GridKey, &RegionSpec)> = self
            .regions
            .iter()
            .map(|spec| (GridKey::ROOT, spec))
            .collect();

        while let Some((parent, spec)) = queue.pop_front() {
            let level = parent.level.finer();
            let depth = level.0 as usize;
            if next_region.len() < depth {
                next_region.resize(depth, 0);
            }
            let key = GridKey {
                level,
                region: RegionId(next_region[depth - 1]),
            };
            next_region[depth - 1] += 1;
            out.push(RegionNode { key, parent, spec });
            for child in &spec.children {
                queue.push_back((key, child));
            }
        }
        out
    }

    /// Number of refinement levels below level 0.
    pub fn depth(&self) -> u32 {
        self.nodes()
            .iter()
            .map(|n| n.key.level.0)
            .max()
            .unwrap_or(0)
    }

    /// Whether `key` names the level-0 grid or a declared region.
    pub fn contains_key(&self, key: GridKey) -> bool {
        key == GridKey::ROOT || self.nodes().iter().any(|n| n.key == key)
    }

    /// Global extent (node count per axis) of grid `key` in its own index
    /// space, given the level-0 cell counts.
    pub fn global_extent(
        &self,
        key: GridKey,
        root_cells: [usize; 3],
        dims: Dimensionality,
    ) -> Option<[usize; 3]> {
        if key == GridKey::ROOT {
            return Some(root_cells);
        }
        self.nodes().iter().find(|n| n.key == key).map(|n| {
            [
                n.spec.child_extent(Axis::X, dims),
                n.spec.child_extent(Axis::Y, dims),
                n.spec.child_extent(Axis::Z, dims),
            ]
        })
    }

    /// Check every region against the factor-2 size floor and its parent's
    /// extent.
    ///
    /// A region must span at least [`MIN_REGION_SPAN`] parent cells along
    /// every resolved axis, and strictly more when it is refined further,
    /// leaving room for a ghost cell either side of the nested interface.
    pub fn validate(&self, root_cells: [usize; 3], dims: Dimensionality) -> Result<(), ConfigError> {
        let mut extents: HashMap<GridKey, [usize; 3]> = HashMap::new();
        extents.insert(GridKey::ROOT, root_cells);
        for node in self.nodes() {
            // Breadth-first order guarantees the parent extent is known.
            let parent_extent = extents.get(&node.parent).copied().unwrap_or(root_cells);
            extents.insert(
                node.key,
                [
                    node.spec.child_extent(Axis::X, dims),
                    node.spec.child_extent(Axis::Y, dims),
                    node.spec.child_extent(Axis::Z, dims),
                ],
            );

            for &axis in dims.axes() {
                let a = axis.index();
                let (start, end) = (node.spec.start[a], node.spec.end[a]);
                if start > end || end >= parent_extent[a] {
                    return Err(ConfigError::RegionOutOfBounds {
                        key: node.key,
                        axis,
                        start,
                        end,
                        extent: parent_extent[a],
                    });
                }
                let span = node.spec.span(axis);
                let nested = !node.spec.children.is_empty();
                if span < MIN_REGION_SPAN || (span == MIN_REGION_SPAN && nested) {
                    return Err(ConfigError::RegionTooSmall {
                        key: node.key,
                        axis,
                        span,
                        min: if nested {
                            MIN_REGION_SPAN + 1
                        } else {
                            MIN_REGION_SPAN
                        },
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn region(x: (usize, usize), y: (usize, usize)) -> RegionSpec {
        RegionSpec::new([x.0, y.0, 0], [x.1, y.1, 0])
    }

    #[test]
    fn nodes_are_breadth_first_with_per_level_numbering() {
        let tree = RegionTree::new(vec![
            region((2, 9), (2, 9)).with_child(region((2, 6), (2, 6))),
            region((12, 18), (2, 9)).with_child(region((3, 8), (3, 8))),
        ]);
        let keys: Vec<_> = tree.nodes().iter().map(|n| (n.key, n.parent)).collect();
        assert_eq!(
            keys,
            vec![
                (GridKey::new(1, 0), GridKey::ROOT),
                (GridKey::new(1, 1), GridKey::ROOT),
                (GridKey::new(2, 0), GridKey::new(1, 0)),
                (GridKey::new(2, 1), GridKey::new(1, 1)),
            ]
        );
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn span_of_three_is_accepted_without_nesting() {
        let tree = RegionTree::new(vec![region((4, 6), (4, 6))]);
        assert!(tree.validate([20, 20, 1], Dimensionality::Two).is_ok());
    }

    #[test]
    fn span_below_three_is_rejected() {
        let tree = RegionTree::new(vec![region((4, 5), (4, 8))]);
        let err = tree.validate([20, 20, 1], Dimensionality::Two).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RegionTooSmall {
                key: GridKey::new(1, 0),
                axis: Axis::X,
                span: 2,
                min: 3,
            }
        );
    }

    #[test]
    fn span_of_three_is_rejected_when_refined_further() {
        let tree = RegionTree::new(vec![
            region((4, 8), (4, 6)).with_child(region((2, 5), (2, 4)))
        ]);
        let err = tree.validate([20, 20, 1], Dimensionality::Two).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RegionTooSmall {
                axis: Axis::Y,
                span: 3,
                min: 4,
                ..
            }
        ));
    }

    #[test]
    fn nested_region_checked_against_child_extent() {
        // Parent region spans 5 cells, so the child grid has 10 nodes.
        let tree = RegionTree::new(vec![
            region((4, 8), (4, 8)).with_child(region((2, 10), (2, 6)))
        ]);
        let err = tree.validate([20, 20, 1], Dimensionality::Two).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RegionOutOfBounds {
                extent: 10,
                end: 10,
                ..
            }
        ));
    }

    #[test]
    fn z_axis_ignored_in_two_dimensions() {
        let tree = RegionTree::new(vec![region((4, 8), (4, 8))]);
        assert!(tree.validate([20, 20, 1], Dimensionality::Two).is_ok());
        let err = tree.validate([20, 20, 20], Dimensionality::Three).unwrap_err();
        assert!(matches!(err, ConfigError::RegionTooSmall { axis: Axis::Z, .. }));
    }

    #[test]
    fn shell_and_interior_classification() {
        let r = region((2, 5), (3, 6));
        let d = Dimensionality::Two;
        assert!(r.on_shell([2, 4, 0], d));
        assert!(r.on_shell([4, 6, 0], d));
        assert!(!r.on_shell([3, 4, 0], d));
        assert!(r.contains([3, 4, 0], d));
        assert!(!r.contains([6, 4, 0], d));
    }

    #[test]
    fn global_extent_of_children() {
        let tree = RegionTree::new(vec![region((2, 6), (3, 9))]);
        assert_eq!(
            tree.global_extent(GridKey::new(1, 0), [20, 20, 1], Dimensionality::Two),
            Some([10, 14, 1])
        );
        assert_eq!(
            tree.global_extent(GridKey::ROOT, [20, 20, 1], Dimensionality::Two),
            Some([20, 20, 1])
        );
        assert!(tree.contains_key(GridKey::new(1, 0)));
        assert!(!tree.contains_key(GridKey::new(1, 1)));
    }

    proptest! {
        #[test]
        fn breadth_first_numbering_is_dense_per_level(
            shape in prop::collection::vec(prop::collection::vec(0usize..3, 0..4), 0..5),
        ) {
            let leaf = || region((4, 8), (4, 8));
            let regions = shape
                .iter()
                .map(|children| {
                    children.iter().fold(region((2, 9), (2, 9)), |spec, &grand| {
                        let child = (0..grand).fold(region((4, 12), (4, 12)), |c, _| c.with_child(leaf()));
                        spec.with_child(child)
                    })
                })
                .collect();
            let tree = RegionTree::new(regions);
            let nodes = tree.nodes();

            let mut seen: Vec<GridKey> = vec![GridKey::ROOT];
            let mut per_level = [0u32; 4];
            for node in &nodes {
                prop_assert!(seen.contains(&node.parent));
                prop_assert_eq!(node.key.level.0, node.parent.level.0 + 1);
                let level = node.key.level.0 as usize;
                prop_assert_eq!(node.key.region.0, per_level[level]);
                per_level[level] += 1;
                seen.push(node.key);
            }
            prop_assert_eq!(per_level[1] as usize, shape.len());
        }
    }
}
