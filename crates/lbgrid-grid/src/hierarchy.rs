//! Two-phase construction of the whole grid hierarchy.
//!
//! Phase one validates the immutable [`SolverConfig`]: geometry, region
//! tree, boundaries and decomposition. Phase two builds level 0 and then
//! walks the region tree breadth-first, building each child from its
//! already-built parent. Grids never reference each other; the hierarchy
//! links them by [`GridKey`].

use crate::equilibrium::{default_model, Equilibrium};
use crate::error::InitError;
use crate::fields;
use crate::grid::Grid;
use crate::profile::InletProfile;
use crate::root;
use crate::subgrid;
use indexmap::IndexMap;
use lbgrid_core::{GridKey, Level, SolverConfig, VelocityInit};
use lbgrid_space::{check_geometry, Decomposition, HaloLayers};
use tracing::{debug, error, info};

/// Every grid built on this rank, keyed by level and region.
///
/// Iteration order is build order: level 0 first, then breadth-first
/// through the region tree, so a parent always precedes its children.
///
/// # Examples
///
/// ```
/// use lbgrid_core::{GridKey, LatticeType, RegionSpec, RegionTree, SolverConfig};
/// use lbgrid_grid::Hierarchy;
///
/// let mut config = SolverConfig::default();
/// config.regions = RegionTree::new(vec![RegionSpec::new([8, 8, 0], [15, 15, 0])]);
///
/// let hierarchy = Hierarchy::build(&config).unwrap();
/// assert_eq!(hierarchy.len(), 2);
/// assert_eq!(hierarchy.levels(), 2);
///
/// let child = hierarchy.get(GridKey::new(1, 0)).unwrap();
/// assert_eq!(child.extent().nx, 16);
/// assert!((child.omega() - lbgrid_grid::refine_omega(hierarchy.root().omega())).abs() < 1e-15);
/// assert_eq!(hierarchy.root().count_label(LatticeType::Refined), 36);
/// ```
#[derive(Clone, Debug)]
pub struct Hierarchy {
    grids: IndexMap<GridKey, Grid>,
}

impl Hierarchy {
    /// Build every grid of an unpartitioned run with the built-in
    /// equilibrium model for the configured dimensionality.
    pub fn build(config: &SolverConfig) -> Result<Self, InitError> {
        Self::build_with(config, default_model(config.domain.dims), None)
    }

    /// Build the grids held by one rank, using `model` for the initial
    /// populations.
    ///
    /// Regions that do not reach this rank's part of their parent are
    /// skipped together with everything nested inside them. On error no
    /// grid is returned; the error is also logged once here.
    pub fn build_with(
        config: &SolverConfig,
        model: &dyn Equilibrium,
        decomposition: Option<&Decomposition>,
    ) -> Result<Self, InitError> {
        let result = Self::try_build(config, model, decomposition);
        if let Err(e) = &result {
            error!(error = %e, "grid hierarchy construction failed");
        }
        result
    }

    fn try_build(
        config: &SolverConfig,
        model: &dyn Equilibrium,
        decomposition: Option<&Decomposition>,
    ) -> Result<Self, InitError> {
        // Phase one: everything that can be rejected up front.
        let dx = check_geometry(config)?;
        let directions = model.directions();
        config.relaxation.check_directions(directions)?;
        let profile = match &config.flow.velocity {
            VelocityInit::Profile(source) => Some(InletProfile::load(source)?),
            _ => None,
        };

        // Phase two: level 0, then regions in breadth-first order.
        let mut grids = IndexMap::new();
        let mut root = root::build_root(config, dx, decomposition, directions)?;
        fields::initialise(&mut root, config, model, profile.as_ref());
        grids.insert(GridKey::ROOT, root);

        for node in config.regions.nodes() {
            let Some(parent) = grids.get_mut(&node.parent) else {
                debug!(key = %node.key, parent = %node.parent, "parent not on this rank, skipped");
                continue;
            };
            if let Some(mut child) = subgrid::build_child(parent, &node, config, directions)? {
                fields::initialise(&mut child, config, model, profile.as_ref());
                grids.insert(node.key, child);
            }
        }

        let hierarchy = Self { grids };
        info!(
            grids = hierarchy.len(),
            levels = hierarchy.levels(),
            "built grid hierarchy"
        );
        Ok(hierarchy)
    }

    /// The level-0 grid.
    pub fn root(&self) -> &Grid {
        &self.grids[0]
    }

    /// Grid `key`, if built on this rank.
    pub fn get(&self, key: GridKey) -> Option<&Grid> {
        self.grids.get(&key)
    }

    /// Mutable access to grid `key`, for handing fields to the solver.
    pub fn get_mut(&mut self, key: GridKey) -> Option<&mut Grid> {
        self.grids.get_mut(&key)
    }

    /// All grids in build order.
    pub fn grids(&self) -> impl Iterator<Item = &Grid> {
        self.grids.values()
    }

    /// All grids on one level, in region order.
    pub fn level(&self, level: Level) -> impl Iterator<Item = &Grid> {
        self.grids.values().filter(move |g| g.level() == level)
    }

    /// Grids directly refining `key`.
    pub fn children_of(&self, key: GridKey) -> impl Iterator<Item = &Grid> {
        self.grids
            .values()
            .filter(move |g| g.parent() == Some(key))
    }

    /// The grid `key` refines.
    pub fn parent_of(&self, key: GridKey) -> Option<&Grid> {
        self.get(key)?.parent().and_then(|p| self.get(p))
    }

    /// Halo exchange layers of the partitioned level-0 grid.
    pub fn halo_layers(&self) -> Option<&HaloLayers> {
        self.root().halo()
    }

    /// Number of levels present, level 0 included.
    pub fn levels(&self) -> u32 {
        self.grids.keys().map(|k| k.level.0 + 1).max().unwrap_or(0)
    }

    /// Number of grids built.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Always `false`: a built hierarchy holds at least level 0.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
