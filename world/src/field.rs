//! Static terrain grid.

use wise_mole_core::{Cell, CellCoord, FieldSize};

use crate::PointSet;

/// Dense rectangular grid of terrain cells stored row by row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    size: FieldSize,
    cells: Vec<Cell>,
}

impl Field {
    /// Creates a field of the provided size filled with [`Cell::Null`].
    #[must_use]
    pub fn new(size: FieldSize) -> Self {
        let mut field = Self::default();
        field.set_size(size);
        field
    }

    /// Reallocates the grid, preserving terrain where old and new extents overlap.
    ///
    /// Newly exposed cells start as [`Cell::Null`]. A size with a zero
    /// dimension leaves the field unchanged.
    pub fn set_size(&mut self, size: FieldSize) {
        if size.is_empty() {
            return;
        }

        let mut cells = vec![Cell::default(); size.area()];
        let keep_width = self.size.width().min(size.width());
        let keep_height = self.size.height().min(size.height());
        for row in 0..keep_height {
            for column in 0..keep_width {
                let cell = CellCoord::new(column, row);
                if let (Some(from), Some(to)) = (self.index(cell), index_in(size, cell)) {
                    cells[to] = self.cells[from];
                }
            }
        }

        self.size = size;
        self.cells = cells;
    }

    /// Current dimensions, `(0, 0)` for a field that was never sized.
    #[must_use]
    pub const fn size(&self) -> FieldSize {
        self.size
    }

    /// Terrain at the coordinate, `None` outside the grid.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Overwrites the terrain at the coordinate. Returns `false` outside the grid.
    pub fn set(&mut self, cell: CellCoord, terrain: Cell) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.cells[index] = terrain;
                true
            }
            None => false,
        }
    }

    /// Collects every coordinate whose terrain matches `terrain`.
    #[must_use]
    pub fn cell_coordinates_by_type(&self, terrain: Cell) -> PointSet {
        self.iter()
            .filter(|(_, cell)| *cell == terrain)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Iterates over every coordinate in row-major order with its terrain.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let width = self.size.width().max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (CellCoord::new(index % width, index / width), *cell)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        index_in(self.size, cell)
    }
}

fn index_in(size: FieldSize, cell: CellCoord) -> Option<usize> {
    if !cell.is_within(size) {
        return None;
    }
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    let width = usize::try_from(size.width()).ok()?;
    Some(row * width + column)
}
