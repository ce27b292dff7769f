//! Coordinate set keyed by column, then row.

use std::collections::{HashMap, HashSet};

use wise_mole_core::CellCoord;

/// Set of cell coordinates with constant-time membership checks.
///
/// Rows are grouped per column so no combined hash key is required. Empty
/// column buckets are dropped eagerly, keeping [`PointSet::is_empty`] exact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointSet {
    columns: HashMap<u32, HashSet<u32>>,
}

impl PointSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the coordinate. Returns `false` when it was already present.
    pub fn add(&mut self, cell: CellCoord) -> bool {
        self.columns
            .entry(cell.column())
            .or_default()
            .insert(cell.row())
    }

    /// Removes the coordinate. Returns `false` when it was absent.
    pub fn remove(&mut self, cell: CellCoord) -> bool {
        let Some(rows) = self.columns.get_mut(&cell.column()) else {
            return false;
        };
        let removed = rows.remove(&cell.row());
        if rows.is_empty() {
            let _ = self.columns.remove(&cell.column());
        }
        removed
    }

    /// Reports whether the coordinate is a member.
    #[must_use]
    pub fn has(&self, cell: CellCoord) -> bool {
        self.columns
            .get(&cell.column())
            .is_some_and(|rows| rows.contains(&cell.row()))
    }

    /// Number of coordinates stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(HashSet::len).sum()
    }

    /// Reports whether the set holds no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<CellCoord> for PointSet {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        let mut set = Self::new();
        for cell in iter {
            let _ = set.add(cell);
        }
        set
    }
}
