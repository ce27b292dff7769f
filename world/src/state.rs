//! Dynamic actor snapshot and its undo/redo log.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wise_mole_core::{BoxPush, CellCoord};

/// Positions of the mole and boxes at one instant.
///
/// Snapshots are plain values: cloning yields a fully independent copy, so a
/// state stored in [`StepHistory`] is never perturbed by later play.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) mole: Option<CellCoord>,
    pub(crate) boxes: Vec<CellCoord>,
}

impl GameState {
    /// Creates a snapshot from explicit positions.
    #[must_use]
    pub fn new(mole: Option<CellCoord>, boxes: Vec<CellCoord>) -> Self {
        Self { mole, boxes }
    }

    /// Location of the mole, if one is placed.
    #[must_use]
    pub const fn mole(&self) -> Option<CellCoord> {
        self.mole
    }

    /// Box positions in insertion order.
    #[must_use]
    pub fn boxes(&self) -> &[CellCoord] {
        &self.boxes
    }

    /// Reports whether a box stands on the cell.
    #[must_use]
    pub fn has_box(&self, cell: CellCoord) -> bool {
        self.boxes.contains(&cell)
    }

    /// Compares box positions as unordered sets.
    #[must_use]
    pub fn same_boxes(&self, other: &GameState) -> bool {
        box_set(self) == box_set(other)
    }

    /// Single box relocation that turns `self` into `next`, if exactly one box moved.
    #[must_use]
    pub fn box_change(&self, next: &GameState) -> Option<BoxPush> {
        let before = box_set(self);
        let after = box_set(next);
        let mut vacated = before.difference(&after);
        let mut entered = after.difference(&before);
        match (vacated.next(), entered.next(), vacated.next(), entered.next()) {
            (Some(from), Some(to), None, None) => Some(BoxPush {
                from: *from,
                to: *to,
            }),
            _ => None,
        }
    }
}

fn box_set(state: &GameState) -> HashSet<CellCoord> {
    state.boxes.iter().copied().collect()
}

/// Linear, truncating undo/redo log of [`GameState`] snapshots.
#[derive(Clone, Debug, Default)]
pub struct StepHistory {
    states: Vec<GameState>,
    cursor: Option<usize>,
}

impl StepHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every entry after the cursor, then appends a copy of `state`.
    pub fn add(&mut self, state: &GameState) {
        if let Some(cursor) = self.cursor {
            self.states.truncate(cursor + 1);
        }
        self.states.push(state.clone());
        self.cursor = Some(self.states.len() - 1);
    }

    /// Reports whether an earlier entry exists.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    /// Moves the cursor back and returns a copy of the entry there.
    pub fn undo(&mut self) -> Option<GameState> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor?.checked_sub(1)?;
        self.cursor = Some(cursor);
        self.states.get(cursor).cloned()
    }

    /// Reports whether a later entry exists.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.states.len())
    }

    /// Moves the cursor forward and returns a copy of the entry there.
    pub fn redo(&mut self) -> Option<GameState> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor? + 1;
        self.cursor = Some(cursor);
        self.states.get(cursor).cloned()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Reports whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Forgets every entry.
    pub fn clear(&mut self) {
        self.states.clear();
        self.cursor = None;
    }
}
