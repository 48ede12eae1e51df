//! Dense per-cell storage indexed by `(i, j, k)`.
//!
//! Every per-cell array of a grid (labels, velocity, populations) is a
//! [`Field`] over the grid's [`Extent`]. Offsets are row-major with `k`
//! fastest, then `j`, then `i`, and `components` values stored
//! contiguously per cell.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Local cell coordinate within a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Local x index.
    pub i: usize,
    /// Local y index.
    pub j: usize,
    /// Local z index.
    pub k: usize,
}

impl Cell {
    /// Construct a cell coordinate.
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }
}

/// Local node counts of a grid along each axis (halo nodes included).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    /// Nodes along x.
    pub nx: usize,
    /// Nodes along y.
    pub ny: usize,
    /// Nodes along z.
    pub nz: usize,
}

impl Extent {
    /// Construct an extent.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Whether `cell` lies inside the extent.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.i < self.nx && cell.j < self.ny && cell.k < self.nz
    }

    /// Flat offset of `cell`, or `None` outside the extent.
    pub fn offset(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.i * self.ny + cell.j) * self.nz + cell.k)
    }

    /// All cells in storage order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (ny, nz) = (self.ny, self.nz);
        (0..self.nx).flat_map(move |i| {
            (0..ny).flat_map(move |j| (0..nz).map(move |k| Cell::new(i, j, k)))
        })
    }
}

/// A dense array holding `components` values of `T` per cell.
///
/// # Examples
///
/// ```
/// use lbgrid_space::{Cell, Extent, Field};
///
/// let mut u = Field::filled(Extent::new(3, 2, 1), 2, 0.0f64);
/// u[Cell::new(2, 1, 0)][1] = 0.5;
/// assert_eq!(u.get(Cell::new(2, 1, 0), 1), Some(&0.5));
/// assert_eq!(u.get(Cell::new(3, 0, 0), 0), None);
/// assert_eq!(u.as_slice().len(), 12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Field<T> {
    extent: Extent,
    components: usize,
    data: Vec<T>,
}

impl<T: Clone> Field<T> {
    /// A field with every value set to `value`.
    pub fn filled(extent: Extent, components: usize, value: T) -> Self {
        Self {
            extent,
            components,
            data: vec![value; extent.cell_count() * components],
        }
    }

    /// Overwrite every value with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Field<T> {
    /// The cell extent.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Values stored per cell.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Total number of stored values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field stores no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// One component of one cell.
    pub fn get(&self, cell: Cell, component: usize) -> Option<&T> {
        let base = self.base(cell, component)?;
        self.data.get(base)
    }

    /// Mutable access to one component of one cell.
    pub fn get_mut(&mut self, cell: Cell, component: usize) -> Option<&mut T> {
        let base = self.base(cell, component)?;
        self.data.get_mut(base)
    }

    /// All components of `cell`, or `None` outside the extent.
    pub fn cell(&self, cell: Cell) -> Option<&[T]> {
        let base = self.base(cell, 0)?;
        Some(&self.data[base..base + self.components])
    }

    /// Flat view in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat view in storage order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn base(&self, cell: Cell, component: usize) -> Option<usize> {
        if component >= self.components {
            return None;
        }
        self.extent
            .offset(cell)
            .map(|o| o * self.components + component)
    }
}

impl<T> Index<Cell> for Field<T> {
    type Output = [T];

    /// All components of `cell`. Panics outside the extent.
    fn index(&self, cell: Cell) -> &[T] {
        match self.extent.offset(cell) {
            Some(o) => &self.data[o * self.components..(o + 1) * self.components],
            None => panic!("cell {cell:?} outside extent {:?}", self.extent),
        }
    }
}

impl<T> IndexMut<Cell> for Field<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut [T] {
        match self.extent.offset(cell) {
            Some(o) => &mut self.data[o * self.components..(o + 1) * self.components],
            None => panic!("cell {cell:?} outside extent {:?}", self.extent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn offset_is_row_major_k_fastest() {
        let e = Extent::new(4, 3, 2);
        assert_eq!(e.offset(Cell::new(0, 0, 1)), Some(1));
        assert_eq!(e.offset(Cell::new(0, 1, 0)), Some(2));
        assert_eq!(e.offset(Cell::new(1, 0, 0)), Some(6));
        assert_eq!(e.offset(Cell::new(3, 2, 1)), Some(23));
        assert_eq!(e.offset(Cell::new(4, 0, 0)), None);
    }

    #[test]
    fn cells_iterate_in_storage_order() {
        let e = Extent::new(2, 2, 2);
        let offsets: Vec<_> = e.cells().map(|c| e.offset(c).unwrap()).collect();
        assert_eq!(offsets, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn component_out_of_range_is_none() {
        let f = Field::filled(Extent::new(2, 2, 1), 3, 1u8);
        assert_eq!(f.get(Cell::new(1, 1, 0), 2), Some(&1));
        assert_eq!(f.get(Cell::new(1, 1, 0), 3), None);
    }

    #[test]
    #[should_panic(expected = "outside extent")]
    fn index_outside_extent_panics() {
        let f = Field::filled(Extent::new(2, 2, 1), 1, 0.0f64);
        let _ = &f[Cell::new(0, 2, 0)];
    }

    proptest! {
        #[test]
        fn offsets_are_a_bijection(nx in 1usize..6, ny in 1usize..6, nz in 1usize..6) {
            let e = Extent::new(nx, ny, nz);
            let mut seen = vec![false; e.cell_count()];
            for c in e.cells() {
                let o = e.offset(c).unwrap();
                prop_assert!(!seen[o]);
                seen[o] = true;
            }
            prop_assert!(seen.iter().all(|&s| s));
        }
    }
}
