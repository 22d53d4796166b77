use crate::fumen::error::{FumenError, FumenResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FIELD_WIDTH: usize = 10;
/// Visible playfield rows, not counting the garbage row.
pub const FIELD_TOP: usize = 23;
pub const GARBAGE_LINES: usize = 1;
pub const FIELD_BLOCKS: usize = (FIELD_TOP + GARBAGE_LINES) * FIELD_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    I,
    L,
    O,
    Z,
    T,
    J,
    S,
    Gray,
}

impl Piece {
    pub fn from_number(value: u32) -> FumenResult<Self> {
        Ok(match value {
            0 => Piece::Empty,
            1 => Piece::I,
            2 => Piece::L,
            3 => Piece::O,
            4 => Piece::Z,
            5 => Piece::T,
            6 => Piece::J,
            7 => Piece::S,
            8 => Piece::Gray,
            other => return Err(FumenError::InvalidPiece(other)),
        })
    }

    pub fn number(self) -> u32 {
        match self {
            Piece::Empty => 0,
            Piece::I => 1,
            Piece::L => 2,
            Piece::O => 3,
            Piece::Z => 4,
            Piece::T => 5,
            Piece::J => 6,
            Piece::S => 7,
            Piece::Gray => 8,
        }
    }

    /// True for the seven tetrominoes, which are the only placeable pieces.
    pub fn is_mino(self) -> bool {
        !matches!(self, Piece::Empty | Piece::Gray)
    }

    pub fn as_char(self) -> char {
        match self {
            Piece::Empty => '_',
            Piece::I => 'I',
            Piece::L => 'L',
            Piece::O => 'O',
            Piece::Z => 'Z',
            Piece::T => 'T',
            Piece::J => 'J',
            Piece::S => 'S',
            Piece::Gray => 'X',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch.to_ascii_uppercase() {
            '_' | '.' | ' ' => Piece::Empty,
            'I' => Piece::I,
            'L' => Piece::L,
            'O' => Piece::O,
            'Z' => Piece::Z,
            'T' => Piece::T,
            'J' => Piece::J,
            'S' => Piece::S,
            'X' | 'G' => Piece::Gray,
            _ => return None,
        })
    }

    /// Block offsets relative to the rotation centre in spawn orientation.
    fn spawn_offsets(self) -> [(i32, i32); 4] {
        match self {
            Piece::I => [(0, 0), (-1, 0), (1, 0), (2, 0)],
            Piece::T => [(0, 0), (-1, 0), (1, 0), (0, 1)],
            Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Piece::L => [(0, 0), (-1, 0), (1, 0), (1, 1)],
            Piece::J => [(0, 0), (-1, 0), (1, 0), (-1, 1)],
            Piece::S => [(0, 0), (-1, 0), (0, 1), (1, 1)],
            Piece::Z => [(0, 0), (1, 0), (0, 1), (-1, 1)],
            Piece::Empty | Piece::Gray => [(0, 0); 4],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Spawn,
    Right,
    Reverse,
    Left,
}

impl Rotation {
    fn apply(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Rotation::Spawn => (x, y),
            Rotation::Right => (y, -x),
            Rotation::Reverse => (-x, -y),
            Rotation::Left => (-y, x),
        }
    }
}

/// A piece placed on a page. `y` counts upwards from the bottom playfield row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl Operation {
    pub fn blocks(&self) -> [(i32, i32); 4] {
        let mut blocks = self.piece.spawn_offsets();
        for block in blocks.iter_mut() {
            let (dx, dy) = self.rotation.apply(*block);
            *block = (self.x + dx, self.y + dy);
        }
        blocks
    }
}

/// Board state of one page: 23 playfield rows plus one garbage row.
///
/// Cells are stored top row first, which is also the order the codec walks
/// them in. Row `y = -1` is the garbage row below the playfield.
#[derive(Clone, PartialEq, Eq)]
pub struct Field {
    cells: Vec<Piece>,
}

impl Default for Field {
    fn default() -> Self {
        Self::empty()
    }
}

impl Field {
    pub fn empty() -> Self {
        Self {
            cells: vec![Piece::Empty; FIELD_BLOCKS],
        }
    }

    /// Builds a field from text rows, top row first. The last row lands on
    /// the bottom playfield row; use [`Field::with_garbage`] for the row below.
    pub fn from_rows(rows: &[&str]) -> FumenResult<Self> {
        if rows.len() > FIELD_TOP {
            return Err(FumenError::FieldOverflow);
        }
        let mut field = Self::empty();
        for (row_index, row) in rows.iter().enumerate() {
            let y = (rows.len() - 1 - row_index) as i32;
            for (x, ch) in row.chars().enumerate() {
                if x >= FIELD_WIDTH {
                    return Err(FumenError::FieldOverflow);
                }
                let piece = Piece::from_char(ch).ok_or(FumenError::InvalidCharacter {
                    ch,
                    position: x,
                })?;
                field.set(x, y, piece);
            }
        }
        Ok(field)
    }

    pub fn with_garbage(mut self, row: &str) -> FumenResult<Self> {
        for (x, ch) in row.chars().take(FIELD_WIDTH).enumerate() {
            let piece =
                Piece::from_char(ch).ok_or(FumenError::InvalidCharacter { ch, position: x })?;
            self.set(x, -1, piece);
        }
        Ok(self)
    }

    fn index(x: usize, y: i32) -> Option<usize> {
        if x >= FIELD_WIDTH || y < -(GARBAGE_LINES as i32) || y >= FIELD_TOP as i32 {
            return None;
        }
        let row = (FIELD_TOP as i32 - 1 - y) as usize;
        Some(row * FIELD_WIDTH + x)
    }

    pub fn get(&self, x: usize, y: i32) -> Piece {
        Self::index(x, y)
            .map(|index| self.cells[index])
            .unwrap_or(Piece::Empty)
    }

    pub fn set(&mut self, x: usize, y: i32, piece: Piece) {
        if let Some(index) = Self::index(x, y) {
            self.cells[index] = piece;
        }
    }

    /// Cells in codec order: top playfield row first, garbage row last.
    pub(crate) fn cells(&self) -> &[Piece] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Piece] {
        &mut self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| *cell == Piece::Empty)
    }

    pub fn fill(&mut self, operation: &Operation) -> FumenResult<()> {
        for (x, y) in operation.blocks() {
            if x < 0 || x as usize >= FIELD_WIDTH || y < 0 || y as usize >= FIELD_TOP {
                return Err(FumenError::PieceOutOfBounds {
                    piece: operation.piece,
                    x: operation.x,
                    y: operation.y,
                });
            }
            self.set(x as usize, y, operation.piece);
        }
        Ok(())
    }

    /// Removes full playfield rows and drops everything above them.
    pub fn clear_lines(&mut self) -> usize {
        let mut kept: Vec<[Piece; FIELD_WIDTH]> = Vec::with_capacity(FIELD_TOP);
        let mut cleared = 0;
        for y in 0..FIELD_TOP as i32 {
            let mut row = [Piece::Empty; FIELD_WIDTH];
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.get(x, y);
            }
            if row.iter().all(|cell| *cell != Piece::Empty) {
                cleared += 1;
            } else {
                kept.push(row);
            }
        }
        if cleared == 0 {
            return 0;
        }
        for y in 0..FIELD_TOP {
            let row = kept.get(y).copied().unwrap_or([Piece::Empty; FIELD_WIDTH]);
            for (x, cell) in row.iter().enumerate() {
                self.set(x, y as i32, *cell);
            }
        }
        cleared
    }

    /// Pushes the garbage row into the bottom of the playfield.
    pub fn rise_garbage(&mut self) {
        for y in (1..FIELD_TOP as i32).rev() {
            for x in 0..FIELD_WIDTH {
                let below = self.get(x, y - 1);
                self.set(x, y, below);
            }
        }
        for x in 0..FIELD_WIDTH {
            let garbage = self.get(x, -1);
            self.set(x, 0, garbage);
            self.set(x, -1, Piece::Empty);
        }
    }

    pub fn mirror(&mut self) {
        for y in 0..FIELD_TOP as i32 {
            for x in 0..FIELD_WIDTH / 2 {
                let left = self.get(x, y);
                let right = self.get(FIELD_WIDTH - 1 - x, y);
                self.set(x, y, right);
                self.set(FIELD_WIDTH - 1 - x, y, left);
            }
        }
    }

    /// Text rows top to bottom, skipping empty rows above the stack. The
    /// garbage row is always the last entry.
    pub fn rows(&self) -> Vec<String> {
        let row_text = |y: i32| -> String {
            (0..FIELD_WIDTH).map(|x| self.get(x, y).as_char()).collect()
        };
        let highest = (0..FIELD_TOP as i32)
            .rev()
            .find(|&y| (0..FIELD_WIDTH).any(|x| self.get(x, y) != Piece::Empty));
        let mut rows: Vec<String> = match highest {
            Some(top) => (0..=top).rev().map(row_text).collect(),
            None => Vec::new(),
        };
        rows.push(row_text(-1));
        rows
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        if let Some((garbage, playfield)) = rows.split_last() {
            for row in playfield {
                writeln!(f, "{}", row)?;
            }
            writeln!(f, "{}", "-".repeat(FIELD_WIDTH))?;
            write!(f, "{}", garbage)?;
        }
        Ok(())
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}
