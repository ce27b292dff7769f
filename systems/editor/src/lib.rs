#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure level-editor system responsible for emitting terrain and actor edit commands.

use wise_mole_core::{Cell, CellCoord, Command, EditorTool, FieldSize};

/// Input snapshot describing a single editor click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorInput {
    /// Cell under the cursor, if the click landed on the field.
    pub cursor_cell: Option<CellCoord>,
    /// Indicates an erase click, which applies [`EditorTool::Empty`] regardless of selection.
    pub erase: bool,
}

impl EditorInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(cursor_cell: Option<CellCoord>, erase: bool) -> Self {
        Self { cursor_cell, erase }
    }
}

/// Editor system that translates the selected tool and clicks into world commands.
#[derive(Debug, Clone)]
pub struct Editor {
    tool: EditorTool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates a new editor with the eraser selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tool: EditorTool::Empty,
        }
    }

    /// Selects the tool applied by subsequent clicks.
    pub fn select_tool(&mut self, tool: EditorTool) {
        self.tool = tool;
    }

    /// Currently selected tool.
    #[must_use]
    pub const fn tool(&self) -> EditorTool {
        self.tool
    }

    /// Emits the commands that paint the selected tool onto the clicked cell.
    ///
    /// Every tool sets the terrain and explicitly sets or clears the box and
    /// target at the cell. The mole is moved by the mole tool, kept by the
    /// floor tool, and removed by every other tool that lands on it.
    pub fn handle(
        &self,
        input: EditorInput,
        field_size: FieldSize,
        mole: Option<CellCoord>,
        out: &mut Vec<Command>,
    ) {
        let Some(cell) = input.cursor_cell else {
            return;
        };
        if !cell.is_within(field_size) {
            return;
        }

        let tool = if input.erase {
            EditorTool::Empty
        } else {
            self.tool
        };

        out.push(Command::SetCell {
            cell,
            terrain: terrain_for(tool),
        });
        out.push(Command::SetTarget {
            cell,
            enabled: matches!(tool, EditorTool::ActiveBox | EditorTool::TargetPoint),
        });
        out.push(Command::SetBox {
            cell,
            enabled: matches!(tool, EditorTool::ActiveBox | EditorTool::InactiveBox),
        });

        match tool {
            EditorTool::Mole => out.push(Command::SetMolePosition { cell: Some(cell) }),
            EditorTool::Floor => {}
            _ if mole == Some(cell) => out.push(Command::SetMolePosition { cell: None }),
            _ => {}
        }
    }

    /// Emits a resize command clamped to the dimensions the editor supports.
    pub fn resize(&self, requested: FieldSize, out: &mut Vec<Command>) {
        out.push(Command::ResizeField {
            size: requested.clamped_for_editor(),
        });
    }
}

const fn terrain_for(tool: EditorTool) -> Cell {
    match tool {
        EditorTool::Wall => Cell::Wall,
        EditorTool::Empty => Cell::Null,
        EditorTool::Mole
        | EditorTool::ActiveBox
        | EditorTool::InactiveBox
        | EditorTool::TargetPoint
        | EditorTool::Floor => Cell::Floor,
    }
}
