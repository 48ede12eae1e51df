//! Construction on one rank of a decomposed level-0 grid.

use lbgrid_core::{Axis, ConfigError, GridKey, LatticeType, RegionSpec, SolverConfig};
use lbgrid_grid::{Hierarchy, InitError, D2Q9};
use lbgrid_space::{Cell, Decomposition, PartitionDescriptor};
use lbgrid_test_utils::TestConfigBuilder;

fn channel(region: RegionSpec) -> SolverConfig {
    TestConfigBuilder::new_2d(64, 32)
        .inlet_outlet()
        .region(region)
        .build()
}

fn on_rank(config: &SolverConfig, rank: usize) -> Result<Hierarchy, InitError> {
    let descriptor = PartitionDescriptor::uniform(&config.domain, [2, 1, 1]);
    let decomposition = Decomposition::new(descriptor, rank);
    Hierarchy::build_with(config, &D2Q9, Some(&decomposition))
}

#[test]
fn level_zero_carries_periodic_halo() {
    let config = channel(RegionSpec::new([40, 8, 0], [49, 15, 0]));
    let h = on_rank(&config, 0).unwrap();
    let root = h.root();

    let x = root.axis(Axis::X).indices();
    assert_eq!(x.len(), 34);
    assert_eq!((x[0], x[1], x[32], x[33]), (63, 0, 31, 32));
    let y = root.axis(Axis::Y).indices();
    assert_eq!((y[0], y[1], y[32], y[33]), (31, 0, 31, 0));

    let halo = h.halo_layers().unwrap();
    assert!(halo.axis(Axis::X).is_some());
    assert!(halo.axis(Axis::Y).is_some());
    assert!(halo.axis(Axis::Z).is_none());

    // The inlet plane is the first owned column, not the halo.
    assert_eq!(root.label(Cell::new(1, 10, 0)), Some(LatticeType::Inlet));
    assert_eq!(root.label(Cell::new(2, 10, 0)), Some(LatticeType::Fluid));
}

#[test]
fn walls_label_owned_and_wrapped_copies_of_a_face() {
    let config = TestConfigBuilder::new_2d(64, 32).walls(&[Axis::Y]).build();
    let h = on_rank(&config, 0).unwrap();
    let root = h.root();
    // y is not split: local rows hold 31, 0, 1, .., 31, 0.
    for j in [0, 1, 32, 33] {
        for i in [0, 5, 33] {
            assert_eq!(
                root.label(Cell::new(i, j, 0)),
                Some(LatticeType::Boundary),
                "i={i} j={j}"
            );
        }
    }
    assert_eq!(root.label(Cell::new(5, 2, 0)), Some(LatticeType::Fluid));
    assert_eq!(root.label(Cell::new(5, 31, 0)), Some(LatticeType::Fluid));
    assert_eq!(root.count_label(LatticeType::Boundary), 4 * 34);
}

#[test]
fn region_off_rank_is_skipped() {
    let config = channel(RegionSpec::new([40, 8, 0], [49, 15, 0]));

    let h0 = on_rank(&config, 0).unwrap();
    assert_eq!(h0.len(), 1);
    assert!(h0.get(GridKey::new(1, 0)).is_none());
    assert_eq!(h0.root().count_label(LatticeType::Refined), 0);

    let h1 = on_rank(&config, 1).unwrap();
    assert_eq!(h1.len(), 2);
    let child = h1.get(GridKey::new(1, 0)).unwrap();
    assert_eq!((child.extent().nx, child.extent().ny), (20, 16));
    let limits = child.coarse_limits().unwrap();
    assert_eq!((limits.lo[0], limits.hi[0]), (9, 18));
    assert_eq!(h1.root().count_label(LatticeType::Refined), 8 * 6);
}

#[test]
fn region_straddling_ranks_is_split() {
    let config = channel(RegionSpec::new([28, 8, 0], [35, 15, 0]));

    // Rank 0 holds globals 28..=31 plus halo node 32.
    let h0 = on_rank(&config, 0).unwrap();
    let left = h0.get(GridKey::new(1, 0)).unwrap();
    let limits = left.coarse_limits().unwrap();
    assert_eq!((limits.lo[0], limits.hi[0]), (29, 33));
    assert_eq!(left.axis(Axis::X).indices()[0], 0);
    assert_eq!(left.extent().nx, 10);

    // Rank 1 starts at halo node 31, the fourth covered cell.
    let h1 = on_rank(&config, 1).unwrap();
    let right = h1.get(GridKey::new(1, 0)).unwrap();
    let limits = right.coarse_limits().unwrap();
    assert_eq!((limits.lo[0], limits.hi[0]), (0, 4));
    assert_eq!(right.axis(Axis::X).indices()[0], 6);
    assert_eq!(right.extent().nx, 10);

    // Both sides see the same child positions for shared global indices.
    let shared = right.axis(Axis::X).indices()[0];
    let pos_left = left.axis(Axis::X).positions()[shared];
    let pos_right = right.axis(Axis::X).positions()[0];
    assert!((pos_left - pos_right).abs() < 1e-12);
}

#[test]
fn unknown_rank_rejected() {
    let config = channel(RegionSpec::new([40, 8, 0], [49, 15, 0]));
    assert!(matches!(
        on_rank(&config, 2),
        Err(InitError::Config(ConfigError::InvalidPartition { .. }))
    ));
}

#[test]
fn descriptor_must_cover_domain() {
    let config = channel(RegionSpec::new([40, 8, 0], [49, 15, 0]));
    let mut descriptor = PartitionDescriptor::uniform(&config.domain, [2, 1, 1]);
    descriptor.ranks.pop();
    let decomposition = Decomposition::new(descriptor, 0);
    assert!(matches!(
        Hierarchy::build_with(&config, &D2Q9, Some(&decomposition)),
        Err(InitError::Config(ConfigError::InvalidPartition { .. }))
    ));
}
