//! The 18 face turns of the 3x3 cube as facelet permutations.

use crate::cube::{Cube, FACELETS_PER_FACE, Face};
use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid move: {0:?}")]
    InvalidMove(String),
}

/// How far a face is turned, looking at the face from outside the cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    /// Net clockwise quarter turns modulo 4.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::CounterClockwise => 3,
        }
    }

    #[must_use]
    pub const fn from_quarter_turns(quarter_turns: u8) -> Option<Self> {
        match quarter_turns % 4 {
            1 => Some(Turn::Clockwise),
            2 => Some(Turn::Half),
            3 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// Every move in canonical order. Searches try candidate moves in this
    /// order, which makes the returned solutions reproducible.
    pub const ALL: [Self; 18] = {
        const FACES: [Face; 6] = [
            Face::Up,
            Face::Down,
            Face::Left,
            Face::Right,
            Face::Front,
            Face::Back,
        ];
        const TURNS: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];

        let mut moves = [Move::new(Face::Up, Turn::Clockwise); 18];
        let mut i = 0;
        while i < moves.len() {
            moves[i] = Move::new(FACES[i / 3], TURNS[i % 3]);
            i += 1;
        }
        moves
    };

    #[must_use]
    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        Self::new(self.face, self.turn.inverse())
    }

    /// Whether applying `self` right after `previous` undoes it.
    #[must_use]
    pub fn is_inverse_of(self, previous: Self) -> bool {
        self == previous.inverse()
    }

    #[must_use]
    pub fn is_valid(symbol: &str) -> bool {
        symbol.parse::<Self>().is_ok()
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveError::InvalidMove(s.to_owned());
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" => Turn::Half,
            _ => return Err(invalid()),
        };
        Ok(Move::new(face, turn))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.turn.suffix())
    }
}

/// Parse whitespace separated moves, e.g. `"R U' F2"`.
///
/// # Errors
///
/// `MoveError::InvalidMove` for the first unrecognized symbol.
pub fn parse_sequence(notation: &str) -> Result<Vec<Move>, MoveError> {
    notation.split_whitespace().map(str::parse).collect()
}

#[must_use]
pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// The four 3-facelet strips bordering a face, listed so that a clockwise
/// turn carries the labels of each strip onto the next one, the last wrapping
/// around to the first.
const fn strips(face: Face) -> &'static [[usize; 3]; 4] {
    match face {
        Face::Front => &[[9, 12, 15], [47, 46, 45], [35, 32, 29], [42, 43, 44]],
        Face::Right => &[[2, 5, 8], [38, 41, 44], [24, 21, 18], [47, 50, 53]],
        Face::Back => &[[11, 14, 17], [36, 37, 38], [33, 30, 27], [53, 52, 51]],
        Face::Left => &[[0, 3, 6], [45, 48, 51], [26, 23, 20], [36, 39, 42]],
        Face::Up => &[[0, 1, 2], [27, 28, 29], [18, 19, 20], [9, 10, 11]],
        Face::Down => &[[6, 7, 8], [15, 16, 17], [24, 25, 26], [33, 34, 35]],
    }
}

// new[i] = old[ROTATE_*[i]] within the turned face's 3x3 grid
const ROTATE_CLOCKWISE: [usize; FACELETS_PER_FACE] = [6, 3, 0, 7, 4, 1, 8, 5, 2];
const ROTATE_COUNTER_CLOCKWISE: [usize; FACELETS_PER_FACE] = [2, 5, 8, 1, 4, 7, 0, 3, 6];

fn quarter_turn(cube: &Cube, face: Face, clockwise: bool) -> Cube {
    let old = &cube.facelets;
    let mut new = *cube;

    let base = face.index() * FACELETS_PER_FACE;
    let rotation = if clockwise {
        &ROTATE_CLOCKWISE
    } else {
        &ROTATE_COUNTER_CLOCKWISE
    };
    for (i, &source) in rotation.iter().enumerate() {
        new.facelets[base + i] = old[base + source];
    }

    let strips = strips(face);
    for k in 0..strips.len() {
        let next = &strips[(k + 1) % strips.len()];
        let (from, to) = if clockwise {
            (&strips[k], next)
        } else {
            (next, &strips[k])
        };
        for (&source, &target) in from.iter().zip(to) {
            new.facelets[target] = old[source];
        }
    }
    new
}

/// Apply a move to a copy of `cube`. A half turn is two clockwise quarter
/// turns of the same face.
#[must_use]
pub fn apply(cube: &Cube, move_: Move) -> Cube {
    match move_.turn {
        Turn::Clockwise => quarter_turn(cube, move_.face, true),
        Turn::CounterClockwise => quarter_turn(cube, move_.face, false),
        Turn::Half => {
            let once = quarter_turn(cube, move_.face, true);
            quarter_turn(&once, move_.face, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::FACELET_COUNT;

    #[test]
    fn test_all_moves_are_distinct_and_canonical() {
        let names = Move::ALL.iter().map(ToString::to_string).collect_vec();
        assert_eq!(
            names,
            [
                "U", "U'", "U2", "D", "D'", "D2", "L", "L'", "L2", "R", "R'", "R2", "F", "F'",
                "F2", "B", "B'", "B2"
            ]
        );
    }

    #[test]
    fn test_parse() {
        for move_ in Move::ALL {
            assert_eq!(move_.to_string().parse::<Move>().unwrap(), move_);
            assert!(Move::is_valid(&move_.to_string()));
        }
        for bad in ["", "X", "u", "U3", "U''", "R2'", "F'2", " U"] {
            assert_eq!(
                bad.parse::<Move>(),
                Err(MoveError::InvalidMove(bad.to_owned()))
            );
            assert!(!Move::is_valid(bad));
        }
    }

    #[test]
    fn test_parse_sequence() {
        let moves = parse_sequence("  R U'\nF2  ").unwrap();
        assert_eq!(format_sequence(&moves), "R U' F2");
        assert!(parse_sequence("").unwrap().is_empty());
        assert_eq!(
            parse_sequence("R Q U"),
            Err(MoveError::InvalidMove("Q".to_owned()))
        );
    }

    #[test]
    fn test_inverse() {
        for move_ in Move::ALL {
            assert_eq!(move_.inverse().inverse(), move_);
            assert!(move_.inverse().is_inverse_of(move_));
        }
        assert_eq!("U2".parse::<Move>().unwrap().inverse().to_string(), "U2");
        assert_eq!("R'".parse::<Move>().unwrap().inverse().to_string(), "R");
    }

    #[test]
    fn test_moves_are_bijections() {
        // Mark one facelet at a time; the mark must land on exactly one
        // position, and no two marks may land on the same position.
        for move_ in Move::ALL {
            let unmarked = apply(&Cube::new(), move_);
            let mut seen = [false; FACELET_COUNT];
            for source in 0..FACELET_COUNT {
                let mut marked = Cube::new();
                marked.facelets[source] = marked.facelets[source].opposite();
                let moved = apply(&marked, move_);
                let differing = (0..FACELET_COUNT)
                    .filter(|&i| moved.facelets[i] != unmarked.facelets[i])
                    .collect_vec();
                assert_eq!(differing.len(), 1);
                assert!(!seen[differing[0]]);
                seen[differing[0]] = true;
            }
        }
    }

    #[test]
    fn test_centers_stay_put() {
        let mut cube = Cube::new();
        cube.scramble_seeded(40, 99);
        for face in Face::ALL {
            assert_eq!(cube.face(face.index()).unwrap()[1][1], face);
        }
    }

    #[test]
    fn test_strips_border_their_face() {
        for face in Face::ALL {
            let strip_count = strips(face).iter().flatten().count();
            assert_eq!(strip_count, 12);
            let mut positions = strips(face).iter().flatten().copied().collect_vec();
            positions.sort_unstable();
            positions.dedup();
            assert_eq!(positions.len(), 12);
            assert!(
                positions
                    .iter()
                    .all(|&i| i / FACELETS_PER_FACE != face.index())
            );
        }
    }

    #[test]
    fn test_u_turn_cycles_side_top_rows() {
        let mut cube = Cube::new();
        cube.apply_move("U".parse().unwrap());
        // Looking down on Up, a clockwise turn carries Front's top row to Left
        assert_eq!(cube.face(Face::Left.index()).unwrap()[0], [Face::Front; 3]);
        assert_eq!(cube.face(Face::Back.index()).unwrap()[0], [Face::Left; 3]);
        assert_eq!(cube.face(Face::Right.index()).unwrap()[0], [Face::Back; 3]);
        assert_eq!(cube.face(Face::Front.index()).unwrap()[0], [Face::Right; 3]);
        assert_eq!(cube.face(Face::Front.index()).unwrap()[1], [Face::Front; 3]);
    }
}
