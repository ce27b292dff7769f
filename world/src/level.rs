//! Text level format: one character per cell, one line per row.

use thiserror::Error;
use wise_mole_core::{Cell, CellCoord, FieldSize};

use crate::{Field, GameState};

/// Errors raised while decoding level data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The input held no rows, or only empty rows.
    #[error("level data is empty")]
    Empty,
    /// The byte stream is not valid UTF-8.
    #[error("level data is not valid text (invalid byte at offset {offset})")]
    InvalidEncoding {
        /// Offset of the first byte that failed to decode.
        offset: usize,
    },
}

/// Per-cell glyphs of the level format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Empty,
    Wall,
    Floor,
    Mole,
    InactiveBox,
    ActiveBox,
    TargetPoint,
}

impl Glyph {
    fn from_char(ch: char) -> Self {
        match ch {
            'W' => Self::Wall,
            'F' => Self::Floor,
            'M' => Self::Mole,
            'B' => Self::InactiveBox,
            'A' => Self::ActiveBox,
            'T' => Self::TargetPoint,
            _ => Self::Empty,
        }
    }

    const fn byte(self) -> u8 {
        match self {
            Self::Empty => b'E',
            Self::Wall => b'W',
            Self::Floor => b'F',
            Self::Mole => b'M',
            Self::InactiveBox => b'B',
            Self::ActiveBox => b'A',
            Self::TargetPoint => b'T',
        }
    }

    const fn terrain(self) -> Cell {
        match self {
            Self::Empty => Cell::Null,
            Self::Wall => Cell::Wall,
            _ => Cell::Floor,
        }
    }
}

/// Glyph used to pad short rows.
const PAD: char = 'E';

/// Field, actors and targets recovered from level text.
#[derive(Debug)]
pub(crate) struct DecodedLevel {
    pub(crate) field: Field,
    pub(crate) state: GameState,
    pub(crate) targets: Vec<CellCoord>,
}

/// Decodes level rows, right-padding short rows with the outside glyph.
pub(crate) fn decode<S: AsRef<str>>(lines: &[S]) -> Result<DecodedLevel, LevelError> {
    let width = lines
        .iter()
        .map(|line| line.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    if width == 0 {
        return Err(LevelError::Empty);
    }

    let width = u32::try_from(width).map_err(|_| LevelError::Empty)?;
    let height = u32::try_from(lines.len()).map_err(|_| LevelError::Empty)?;
    let mut field = Field::new(FieldSize::new(width, height));
    let mut state = GameState::default();
    let mut targets = Vec::new();

    for (row, line) in (0..height).zip(lines) {
        let padded = line.as_ref().chars().chain(std::iter::repeat(PAD));
        for (column, ch) in (0..width).zip(padded) {
            let cell = CellCoord::new(column, row);
            let glyph = Glyph::from_char(ch);
            let _ = field.set(cell, glyph.terrain());
            match glyph {
                Glyph::Mole => state.mole = Some(cell),
                Glyph::InactiveBox => state.boxes.push(cell),
                Glyph::ActiveBox => {
                    state.boxes.push(cell);
                    targets.push(cell);
                }
                Glyph::TargetPoint => targets.push(cell),
                Glyph::Empty | Glyph::Wall | Glyph::Floor => {}
            }
        }
    }

    Ok(DecodedLevel {
        field,
        state,
        targets,
    })
}

/// Splits a byte buffer into rows, accepting `\n` or `\r\n` terminators.
pub(crate) fn split_lines(bytes: &[u8]) -> Result<Vec<&str>, LevelError> {
    let text = std::str::from_utf8(bytes).map_err(|error| LevelError::InvalidEncoding {
        offset: error.valid_up_to(),
    })?;
    Ok(text.lines().collect())
}

/// Encodes the level as `(width + 1) * height` bytes, each row ending in `\n`.
pub(crate) fn encode(field: &Field, state: &GameState, targets: &[CellCoord]) -> Vec<u8> {
    let size = field.size();
    let width = usize::try_from(size.width()).unwrap_or(0);
    let height = usize::try_from(size.height()).unwrap_or(0);
    let mut bytes = Vec::with_capacity((width + 1) * height);

    for row in 0..size.height() {
        for column in 0..size.width() {
            let cell = CellCoord::new(column, row);
            bytes.push(glyph_at(field, state, targets, cell).byte());
        }
        bytes.push(b'\n');
    }

    bytes
}

fn glyph_at(field: &Field, state: &GameState, targets: &[CellCoord], cell: CellCoord) -> Glyph {
    match field.at(cell) {
        None | Some(Cell::Null) => return Glyph::Empty,
        Some(Cell::Wall) => return Glyph::Wall,
        Some(Cell::Floor) => {}
    }
    if state.mole == Some(cell) {
        return Glyph::Mole;
    }
    match (state.has_box(cell), targets.contains(&cell)) {
        (true, true) => Glyph::ActiveBox,
        (true, false) => Glyph::InactiveBox,
        (false, true) => Glyph::TargetPoint,
        (false, false) => Glyph::Floor,
    }
}
