use crate::fumen::error::FumenResult;
use crate::fumen::field::{Operation, Piece, Rotation, FIELD_BLOCKS, FIELD_TOP, FIELD_WIDTH};

/// Per-page action word: piece, rotation, position and page flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub operation: Option<Operation>,
    pub rise: bool,
    pub mirror: bool,
    pub colorize: bool,
    pub comment: bool,
    pub lock: bool,
}

fn rotation_number(rotation: Rotation) -> u32 {
    match rotation {
        Rotation::Reverse => 0,
        Rotation::Right => 1,
        Rotation::Spawn => 2,
        Rotation::Left => 3,
    }
}

fn rotation_from_number(value: u32) -> Rotation {
    match value % 4 {
        0 => Rotation::Reverse,
        1 => Rotation::Right,
        2 => Rotation::Spawn,
        _ => Rotation::Left,
    }
}

/// Offset from the stored cell to the rotation centre. The stored cell sits
/// on the same spot of the piece in every rotation, so O, I, S and Z need it.
fn anchor_shift(piece: Piece, rotation: Rotation) -> (i32, i32) {
    match (piece, rotation) {
        (Piece::O, Rotation::Left) => (1, -1),
        (Piece::O, Rotation::Reverse) => (1, 0),
        (Piece::O, Rotation::Spawn) => (0, -1),
        (Piece::I, Rotation::Reverse) => (1, 0),
        (Piece::I, Rotation::Left) => (0, -1),
        (Piece::S, Rotation::Spawn) => (0, -1),
        (Piece::S, Rotation::Right) => (-1, 0),
        (Piece::Z, Rotation::Spawn) => (0, -1),
        (Piece::Z, Rotation::Left) => (1, 0),
        _ => (0, 0),
    }
}

fn encode_position(operation: Option<&Operation>) -> u32 {
    let (x, y) = match operation {
        Some(op) if op.piece.is_mino() => {
            let (dx, dy) = anchor_shift(op.piece, op.rotation);
            (op.x - dx, op.y - dy)
        }
        _ => (0, FIELD_TOP as i32 - 1),
    };
    let position = (FIELD_TOP as i32 - y - 1) * FIELD_WIDTH as i32 + x;
    position.clamp(0, FIELD_BLOCKS as i32 - 1) as u32
}

fn decode_position(value: u32, piece: Piece, rotation: Rotation) -> (i32, i32) {
    let x = (value as usize % FIELD_WIDTH) as i32;
    let y = FIELD_TOP as i32 - (value as usize / FIELD_WIDTH) as i32 - 1;
    let (dx, dy) = anchor_shift(piece, rotation);
    (x + dx, y + dy)
}

impl Action {
    pub fn encode(&self) -> u32 {
        let flag = |set: bool| u32::from(set);
        let (piece, rotation) = match self.operation {
            Some(op) if op.piece.is_mino() => (op.piece, op.rotation),
            _ => (Piece::Empty, Rotation::Reverse),
        };

        let mut value = flag(!self.lock);
        value = value * 2 + flag(self.comment);
        value = value * 2 + flag(self.colorize);
        value = value * 2 + flag(self.mirror);
        value = value * 2 + flag(self.rise);
        value = value * FIELD_BLOCKS as u32 + encode_position(self.operation.as_ref());
        value = value * 4 + rotation_number(rotation);
        value * 8 + piece.number()
    }

    pub fn decode(word: u32) -> FumenResult<Self> {
        let mut value = word;
        let piece = Piece::from_number(value % 8)?;
        value /= 8;
        let rotation = rotation_from_number(value % 4);
        value /= 4;
        let position = value % FIELD_BLOCKS as u32;
        value /= FIELD_BLOCKS as u32;

        let mut next_flag = || {
            let set = value % 2 == 1;
            value /= 2;
            set
        };
        let rise = next_flag();
        let mirror = next_flag();
        let colorize = next_flag();
        let comment = next_flag();
        let lock = !next_flag();

        let operation = piece.is_mino().then(|| {
            let (x, y) = decode_position(position, piece, rotation);
            Operation {
                piece,
                rotation,
                x,
                y,
            }
        });

        Ok(Self {
            operation,
            rise,
            mirror,
            colorize,
            comment,
            lock,
        })
    }
}
