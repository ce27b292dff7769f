#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Wise Mole.
//!
//! The [`World`] owns the terrain [`Field`], the live [`GameState`], the
//! [`StepHistory`] mirroring it, and the static target points. It is the only
//! place where a coordinate is correlated against both terrain and actors.

mod field;
mod level;
mod point_set;
mod state;

use tracing::{debug, info};
use wise_mole_core::{BoxPush, Cell, CellCoord, Command, Direction, Event, FieldSize};

pub use field::Field;
pub use level::LevelError;
pub use point_set::PointSet;
pub use state::{GameState, StepHistory};

/// Represents the authoritative Wise Mole world state.
#[derive(Debug, Default)]
pub struct World {
    name: String,
    field: Field,
    floor: PointSet,
    state: GameState,
    history: StepHistory,
    targets: Vec<CellCoord>,
    step_count: u32,
    step_with_load_count: u32,
    won: bool,
}

/// Legal move resolved against the current terrain and actors.
#[derive(Clone, Copy, Debug)]
struct MovePlan {
    from: CellCoord,
    to: CellCoord,
    push: Option<BoxPush>,
}

impl World {
    /// Creates an empty world with an unsized field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a world from level text rows.
    pub fn from_level_text<S: AsRef<str>>(lines: &[S]) -> Result<Self, LevelError> {
        let mut world = Self::new();
        let mut events = Vec::new();
        world.load_level(lines, &mut events)?;
        Ok(world)
    }

    /// Builds a world from a level byte buffer.
    pub fn from_level_bytes(bytes: &[u8]) -> Result<Self, LevelError> {
        let lines = level::split_lines(bytes)?;
        Self::from_level_text(lines.as_slice())
    }

    /// Replaces the world contents with a decoded level.
    ///
    /// Counters and history restart, with the loaded state recorded as the
    /// first history entry. On error the world is left untouched.
    pub fn load_level<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        out_events: &mut Vec<Event>,
    ) -> Result<(), LevelError> {
        let decoded = level::decode(lines)?;
        let previous_size = self.field.size();

        self.field = decoded.field;
        self.state = decoded.state;
        self.targets = decoded.targets;
        self.rebuild_floor();
        self.history.clear();
        self.history.add(&self.state);
        self.step_count = 0;
        self.step_with_load_count = 0;
        self.won = self.check_if_user_won();

        let size = self.field.size();
        info!(
            name = %self.name,
            width = size.width(),
            height = size.height(),
            boxes = self.state.boxes.len(),
            targets = self.targets.len(),
            "level loaded"
        );
        if previous_size != size {
            out_events.push(Event::FieldResized {
                from: previous_size,
                to: size,
            });
        }
        out_events.push(Event::LevelLoaded { size });
        Ok(())
    }

    /// Replaces the world contents with a level read from a byte buffer.
    pub fn load_level_bytes(
        &mut self,
        bytes: &[u8],
        out_events: &mut Vec<Event>,
    ) -> Result<(), LevelError> {
        let lines = level::split_lines(bytes)?;
        self.load_level(lines.as_slice(), out_events)
    }

    /// Encodes the field, actors and targets in the level text format.
    #[must_use]
    pub fn to_level_bytes(&self) -> Vec<u8> {
        level::encode(&self.field, &self.state, &self.targets)
    }

    /// Assigns the display name of the level.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Moves the mole one step, pushing a box when one is in the way.
    ///
    /// Returns `false` without touching any state when the move is illegal.
    pub fn try_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) -> bool {
        let Some(plan) = self.plan_move(direction) else {
            debug!(?direction, mole = ?self.state.mole, "move rejected");
            return false;
        };
        self.commit_move(plan, out_events);
        true
    }

    /// Reports whether [`World::try_move`] would succeed.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.plan_move(direction).is_some()
    }

    /// Reports whether an earlier step can be restored.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Restores the previous recorded state.
    pub fn undo(&mut self, out_events: &mut Vec<Event>) -> bool {
        let Some(state) = self.history.undo() else {
            debug!("nothing to undo");
            return false;
        };
        let previous = std::mem::replace(&mut self.state, state);
        self.step_count = self.step_count.saturating_sub(1);
        if !previous.same_boxes(&self.state) {
            self.step_with_load_count = self.step_with_load_count.saturating_sub(1);
        }
        self.finish_transition(&previous, out_events);
        true
    }

    /// Reports whether an undone step can be re-applied.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Re-applies the most recently undone state.
    pub fn redo(&mut self, out_events: &mut Vec<Event>) -> bool {
        let Some(state) = self.history.redo() else {
            debug!("nothing to redo");
            return false;
        };
        let previous = std::mem::replace(&mut self.state, state);
        self.step_count = self.step_count.saturating_add(1);
        if !previous.same_boxes(&self.state) {
            self.step_with_load_count = self.step_with_load_count.saturating_add(1);
        }
        self.finish_transition(&previous, out_events);
        true
    }

    /// Reports whether every target point holds a box.
    ///
    /// A level without targets is trivially solved. Such a level starts out
    /// won, so no `UserWon` event is emitted for it.
    #[must_use]
    pub fn check_if_user_won(&self) -> bool {
        let boxes: PointSet = self.state.boxes.iter().copied().collect();
        self.targets.iter().all(|target| boxes.has(*target))
    }

    /// Resizes the field and drops the mole, boxes and targets left outside.
    ///
    /// An effective resize restarts the history from the pruned state, so
    /// undo never restores actors outside the new bounds.
    pub fn set_field_size(&mut self, size: FieldSize, out_events: &mut Vec<Event>) {
        let previous = self.field.size();
        self.field.set_size(size);
        let current = self.field.size();

        if self.state.mole.is_some_and(|mole| !mole.is_within(current)) {
            self.state.mole = None;
        }
        self.state.boxes.retain(|cell| cell.is_within(current));
        self.targets.retain(|cell| cell.is_within(current));
        self.rebuild_floor();
        self.won = self.check_if_user_won();

        if previous != current {
            self.restart_history();
            info!(
                width = current.width(),
                height = current.height(),
                "field resized"
            );
            out_events.push(Event::FieldResized {
                from: previous,
                to: current,
            });
        }
    }

    /// Paints terrain onto a cell; cells outside the field are ignored.
    ///
    /// A change of terrain restarts the history from the current state.
    pub fn set_cell(&mut self, cell: CellCoord, terrain: Cell) {
        if self.field.at(cell).map_or(true, |current| current == terrain) {
            return;
        }
        let _ = self.field.set(cell, terrain);
        let _ = if terrain == Cell::Floor {
            self.floor.add(cell)
        } else {
            self.floor.remove(cell)
        };
        self.restart_history();
    }

    /// Places or removes the mole, restarting the history from the edited state.
    pub fn set_mole_position(&mut self, cell: Option<CellCoord>) {
        if self.state.mole == cell {
            return;
        }
        self.state.mole = cell;
        self.restart_history();
    }

    /// Adds or removes a box, restarting the history from the edited state.
    pub fn set_box_point(&mut self, cell: CellCoord, enabled: bool) {
        if set_item(&mut self.state.boxes, cell, enabled) {
            self.restart_history();
        }
        self.won = self.check_if_user_won();
    }

    /// Adds or removes a target point.
    pub fn set_target_point(&mut self, cell: CellCoord, enabled: bool) {
        let _ = set_item(&mut self.targets, cell, enabled);
        self.won = self.check_if_user_won();
    }

    /// Forgets every recorded step and records the current state as entry 0.
    fn restart_history(&mut self) {
        debug!(discarded = self.history.len(), "history restarted after edit");
        self.history.clear();
        self.history.add(&self.state);
    }

    fn rebuild_floor(&mut self) {
        self.floor = self.field.cell_coordinates_by_type(Cell::Floor);
    }

    fn plan_move(&self, direction: Direction) -> Option<MovePlan> {
        let from = self.state.mole?;
        let to = from.step(direction)?;
        if !self.floor.has(to) {
            return None;
        }

        let boxes: PointSet = self.state.boxes.iter().copied().collect();
        if !boxes.has(to) {
            return Some(MovePlan {
                from,
                to,
                push: None,
            });
        }

        let box_to = to.step(direction)?;
        if !self.floor.has(box_to) || boxes.has(box_to) {
            return None;
        }

        Some(MovePlan {
            from,
            to,
            push: Some(BoxPush {
                from: to,
                to: box_to,
            }),
        })
    }

    fn commit_move(&mut self, plan: MovePlan, out_events: &mut Vec<Event>) {
        if self.history.is_empty() {
            self.history.add(&self.state);
        }

        self.step_count = self.step_count.saturating_add(1);
        if let Some(push) = plan.push {
            if let Some(slot) = self.state.boxes.iter_mut().find(|cell| **cell == push.from) {
                *slot = push.to;
            }
            self.step_with_load_count = self.step_with_load_count.saturating_add(1);
        }
        self.state.mole = Some(plan.to);
        self.history.add(&self.state);

        out_events.push(Event::MoleMoved {
            from: Some(plan.from),
            to: Some(plan.to),
            pushed_box: plan.push,
        });
        self.evaluate_win(out_events);
    }

    fn finish_transition(&mut self, previous: &GameState, out_events: &mut Vec<Event>) {
        out_events.push(Event::MoleMoved {
            from: previous.mole,
            to: self.state.mole,
            pushed_box: previous.box_change(&self.state),
        });
        self.evaluate_win(out_events);
    }

    fn evaluate_win(&mut self, out_events: &mut Vec<Event>) {
        let won = self.check_if_user_won();
        if won && !self.won {
            info!(steps = self.step_count, "level solved");
            out_events.push(Event::UserWon {
                steps: self.step_count,
            });
        }
        self.won = won;
    }
}

/// Adds or removes `cell`, reporting whether the list changed.
fn set_item(points: &mut Vec<CellCoord>, cell: CellCoord, enabled: bool) -> bool {
    let contained = points.contains(&cell);
    if contained == enabled {
        return false;
    }
    if enabled {
        points.push(cell);
    } else {
        points.retain(|point| *point != cell);
    }
    true
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveMole { direction } => {
            let _ = world.try_move(direction, out_events);
        }
        Command::Undo => {
            let _ = world.undo(out_events);
        }
        Command::Redo => {
            let _ = world.redo(out_events);
        }
        Command::ResizeField { size } => world.set_field_size(size, out_events),
        Command::SetCell { cell, terrain } => world.set_cell(cell, terrain),
        Command::SetMolePosition { cell } => world.set_mole_position(cell),
        Command::SetBox { cell, enabled } => world.set_box_point(cell, enabled),
        Command::SetTarget { cell, enabled } => world.set_target_point(cell, enabled),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Field, GameState, World};
    use wise_mole_core::{Cell, CellCoord, FieldSize};

    /// Display name assigned to the level.
    #[must_use]
    pub fn name(world: &World) -> &str {
        &world.name
    }

    /// Current field dimensions.
    #[must_use]
    pub fn field_size(world: &World) -> FieldSize {
        world.field.size()
    }

    /// Terrain at the cell, `None` outside the field.
    #[must_use]
    pub fn cell(world: &World, cell: CellCoord) -> Option<Cell> {
        world.field.at(cell)
    }

    /// Provides read-only access to the terrain grid.
    #[must_use]
    pub fn field(world: &World) -> &Field {
        &world.field
    }

    /// Location of the mole, if one is placed.
    #[must_use]
    pub fn mole_position(world: &World) -> Option<CellCoord> {
        world.state.mole()
    }

    /// Current box positions.
    #[must_use]
    pub fn boxes(world: &World) -> &[CellCoord] {
        world.state.boxes()
    }

    /// Static target points of the level.
    #[must_use]
    pub fn target_points(world: &World) -> &[CellCoord] {
        &world.targets
    }

    /// Snapshot of the live actor state.
    #[must_use]
    pub fn game_state(world: &World) -> &GameState {
        &world.state
    }

    /// Number of committed steps, adjusted by undo and redo.
    #[must_use]
    pub fn step_count(world: &World) -> u32 {
        world.step_count
    }

    /// Number of steps that moved a box, adjusted by undo and redo.
    #[must_use]
    pub fn step_with_load_count(world: &World) -> u32 {
        world.step_with_load_count
    }

    /// Reports whether the level is currently solved.
    #[must_use]
    pub fn is_won(world: &World) -> bool {
        world.won
    }
}
