//! Public data models for generated floors: the wall set and the finished floor plan.

use std::collections::BTreeSet;
use std::collections::btree_set;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::Cell;

/// Static impassable terrain. Ordered so iteration, hashing and serialization are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallSet {
    cells: BTreeSet<Cell>,
}

impl WallSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn is_subset(&self, other: &WallSet) -> bool {
        self.cells.is_subset(&other.cells)
    }
}

impl FromIterator<Cell> for WallSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl Extend<Cell> for WallSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a WallSet {
    type Item = &'a Cell;
    type IntoIter = btree_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Result of one generation run: the cleaned walls plus any water pools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub width: usize,
    pub height: usize,
    pub walls: WallSet,
    pub water: BTreeSet<Cell>,
}

impl FloorPlan {
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.column >= 0
            && cell.row >= 0
            && (cell.column as usize) < self.width
            && (cell.row as usize) < self.height
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(cell)
    }

    pub fn is_water(&self, cell: Cell) -> bool {
        self.water.contains(&cell)
    }

    /// In bounds and free of static terrain.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_wall(cell) && !self.is_water(cell)
    }

    /// Open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height as i32).flat_map(move |row| {
            (0..self.width as i32)
                .map(move |column| Cell::new(column, row))
                .filter(|&cell| self.is_open(cell))
        })
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend((self.walls.len() as u32).to_le_bytes());
        for cell in &self.walls {
            bytes.extend(cell.column.to_le_bytes());
            bytes.extend(cell.row.to_le_bytes());
        }
        bytes.extend((self.water.len() as u32).to_le_bytes());
        for cell in &self.water {
            bytes.extend(cell.column.to_le_bytes());
            bytes.extend(cell.row.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
