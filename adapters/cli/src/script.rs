//! Parsers for the compact move, size and paint notations accepted on the command line.

use thiserror::Error;
use wise_mole_core::{CellCoord, Command, Direction, EditorTool, FieldSize};

/// Errors raised while parsing command-line notations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// A move script contained a character outside `UDLRzy`.
    #[error("unknown move '{symbol}' at position {position} (expected one of U, D, L, R, z, y)")]
    UnknownMove {
        /// Offending character.
        symbol: char,
        /// Zero-based character index within the script.
        position: usize,
    },
    /// A size was not of the form `WIDTHxHEIGHT`.
    #[error("could not parse field size '{0}' (expected WIDTHxHEIGHT)")]
    InvalidSize(String),
    /// A paint instruction was not of the form `TOOL:COLUMN,ROW`.
    #[error("could not parse paint instruction '{0}' (expected TOOL:COLUMN,ROW)")]
    InvalidPaint(String),
    /// A paint instruction named an unknown tool.
    #[error("unknown editor tool '{0}'")]
    UnknownTool(String),
}

/// Translates a move script into world commands.
///
/// `U`, `D`, `L`, `R` move the mole (case-insensitive), `z` undoes and `y`
/// redoes. Whitespace and commas are ignored.
pub(crate) fn parse_moves(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace() && *symbol != ',')
        .map(|(position, symbol)| {
            let command = match symbol {
                'U' | 'u' => Command::MoveMole {
                    direction: Direction::Up,
                },
                'D' | 'd' => Command::MoveMole {
                    direction: Direction::Down,
                },
                'L' | 'l' => Command::MoveMole {
                    direction: Direction::Left,
                },
                'R' | 'r' => Command::MoveMole {
                    direction: Direction::Right,
                },
                'z' | 'Z' => Command::Undo,
                'y' | 'Y' => Command::Redo,
                _ => return Err(ScriptError::UnknownMove { symbol, position }),
            };
            Ok(command)
        })
        .collect()
}

/// Parses `WIDTHxHEIGHT`.
pub(crate) fn parse_size(value: &str) -> Result<FieldSize, ScriptError> {
    let invalid = || ScriptError::InvalidSize(value.to_owned());
    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(FieldSize::new(width, height))
}

/// Parses `TOOL:COLUMN,ROW`, for example `box:3,4`.
pub(crate) fn parse_paint(value: &str) -> Result<(EditorTool, CellCoord), ScriptError> {
    let invalid = || ScriptError::InvalidPaint(value.to_owned());
    let (tool, cell) = value.split_once(':').ok_or_else(invalid)?;
    let (column, row) = cell.split_once(',').ok_or_else(invalid)?;
    let column = column.trim().parse::<u32>().map_err(|_| invalid())?;
    let row = row.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((parse_tool(tool.trim())?, CellCoord::new(column, row)))
}

fn parse_tool(name: &str) -> Result<EditorTool, ScriptError> {
    let tool = match name.to_ascii_lowercase().as_str() {
        "mole" => EditorTool::Mole,
        "active-box" | "placed-box" => EditorTool::ActiveBox,
        "box" | "inactive-box" => EditorTool::InactiveBox,
        "target" => EditorTool::TargetPoint,
        "wall" => EditorTool::Wall,
        "floor" => EditorTool::Floor,
        "empty" | "erase" => EditorTool::Empty,
        _ => return Err(ScriptError::UnknownTool(name.to_owned())),
    };
    Ok(tool)
}
