#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wise Mole engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems and
//! listeners react to synchronously.

use serde::{Deserialize, Serialize};

/// Widest field the editor allows.
pub const MAX_FIELD_WIDTH: u32 = 40;

/// Tallest field the editor allows.
pub const MAX_FIELD_HEIGHT: u32 = 40;

/// Size given to a freshly opened editor field.
pub const DEFAULT_EDITOR_FIELD_SIZE: FieldSize = FieldSize::new(25, 15);

/// Extension appended to saved level files.
pub const LEVEL_FILE_EXTENSION: &str = "wmgame";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the mole advance a single step, pushing a box if needed.
    MoveMole {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Steps back to the previous recorded state.
    Undo,
    /// Re-applies the state undone most recently.
    Redo,
    /// Resizes the field, dropping actors that fall outside the new bounds.
    ResizeField {
        /// Requested field dimensions.
        size: FieldSize,
    },
    /// Paints terrain onto a single cell.
    SetCell {
        /// Cell receiving the terrain.
        cell: CellCoord,
        /// Terrain to assign.
        terrain: Cell,
    },
    /// Places or removes the mole without recording history.
    SetMolePosition {
        /// New mole location, `None` removes the mole.
        cell: Option<CellCoord>,
    },
    /// Adds or removes a box without recording history.
    SetBox {
        /// Cell holding the box.
        cell: CellCoord,
        /// Whether a box should be present afterwards.
        enabled: bool,
    },
    /// Adds or removes a target point.
    SetTarget {
        /// Cell holding the target point.
        cell: CellCoord,
        /// Whether a target should be present afterwards.
        enabled: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the effective field dimensions changed.
    FieldResized {
        /// Dimensions before the change.
        from: FieldSize,
        /// Dimensions after the change.
        to: FieldSize,
    },
    /// Confirms that the mole changed position through play, undo or redo.
    MoleMoved {
        /// Cell the mole occupied before the transition.
        from: Option<CellCoord>,
        /// Cell the mole occupies after the transition.
        to: Option<CellCoord>,
        /// Box relocated by a push, if the transition was a push.
        pushed_box: Option<BoxPush>,
    },
    /// Announces that every target point is now covered by a box.
    UserWon {
        /// Number of steps taken when the level was solved.
        steps: u32,
    },
    /// Confirms that a level replaced the world contents.
    LevelLoaded {
        /// Dimensions of the loaded field.
        size: FieldSize,
    },
}

/// Relocation of a single box caused by a push.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxPush {
    /// Cell the box occupied before the push.
    pub from: CellCoord,
    /// Cell the box occupies after the push.
    pub to: CellCoord,
}

/// Static terrain classification of a single field cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Outside the playable area.
    #[default]
    Null,
    /// Impassable wall.
    Wall,
    /// Walkable floor.
    Floor,
}

/// Cardinal movement directions available to the mole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset as `(column, row)` deltas.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell one step in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant,
    /// which callers treat the same as leaving the field.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let column = u32::try_from(i64::from(self.column) + dx).ok()?;
        let row = u32::try_from(i64::from(self.row) + dy).ok()?;
        Some(Self::new(column, row))
    }

    /// Reports whether the cell lies inside a field of the provided size.
    #[must_use]
    pub const fn is_within(&self, size: FieldSize) -> bool {
        self.column < size.width() && self.row < size.height()
    }
}

/// Dimensions of the field measured in whole cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSize {
    width: u32,
    height: u32,
}

impl FieldSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells covered by the size.
    #[must_use]
    pub fn area(&self) -> usize {
        let area = u64::from(self.width) * u64::from(self.height);
        usize::try_from(area).unwrap_or(usize::MAX)
    }

    /// Reports whether either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Restricts both dimensions to the range the editor supports.
    #[must_use]
    pub fn clamped_for_editor(self) -> Self {
        Self {
            width: self.width.clamp(1, MAX_FIELD_WIDTH),
            height: self.height.clamp(1, MAX_FIELD_HEIGHT),
        }
    }
}

/// Tools offered by the level editor palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorTool {
    /// Places the mole on a floor cell.
    Mole,
    /// Places a box standing on a target point.
    ActiveBox,
    /// Places a box without a target point.
    InactiveBox,
    /// Places a bare target point.
    TargetPoint,
    /// Paints a wall.
    Wall,
    /// Paints plain floor, keeping the mole.
    Floor,
    /// Erases the cell to the outside area.
    Empty,
}
