use crate::moves::{self, Move, MoveError};
use std::fmt::{self, Debug};
use thiserror::Error;

pub const FACE_COUNT: usize = 6;
pub const FACELETS_PER_FACE: usize = 9;
pub const FACELET_COUNT: usize = FACE_COUNT * FACELETS_PER_FACE;
/// Position of the center facelet within a face.
pub const CENTER: usize = 4;

/// A canonical, order-preserving encoding of a cube used to deduplicate
/// states during search.
pub type StateKey = [u8; FACELET_COUNT];

/// One side of the cube. The discriminant is the face's slot in the facelet
/// array, and the label every facelet of that face carries when solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    Front = 0,
    Right = 1,
    Back = 2,
    Left = 3,
    Up = 4,
    Down = 5,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CubeError {
    #[error("A cube state must have exactly 54 facelets but got {actual}")]
    InvalidStateSize { actual: usize },
    #[error("Face index must be between 0 and 5 but got {0}")]
    InvalidFaceIndex(usize),
    #[error("Face data must be a 3x3 grid but got {rows} rows with {columns:?} columns")]
    InvalidFaceShape { rows: usize, columns: Vec<usize> },
    #[error("Invalid facelet label {label:?} at position {position}")]
    InvalidLabel { position: usize, label: char },
}

impl Face {
    pub const ALL: [Self; FACE_COUNT] = {
        use Face::*;
        let v = [Front, Right, Back, Left, Up, Down];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The face letter used in move notation.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Up => 'U',
            Face::Down => 'D',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|face| face.letter() == letter)
    }

    #[must_use]
    pub const fn color_name(self) -> &'static str {
        match self {
            Face::Front => "White",
            Face::Right => "Red",
            Face::Back => "Blue",
            Face::Left => "Orange",
            Face::Up => "Green",
            Face::Down => "Yellow",
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        }
    }
}

/// The 54 facelet labels of a 3x3 cube, stored face by face in [`Face`]
/// order. Each face is a row-major 3x3 grid as seen from outside the cube.
/// The side faces have their top row against Up, Up has its top row against
/// Back, and Down has its top row against Front.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    pub(crate) facelets: [Face; FACELET_COUNT],
}

impl Cube {
    pub const SOLVED: Self = {
        let mut facelets = [Face::Front; FACELET_COUNT];
        let mut i = 0;
        while i < FACELET_COUNT {
            facelets[i] = Face::ALL[i / FACELETS_PER_FACE];
            i += 1;
        }
        Self { facelets }
    };

    #[must_use]
    pub fn new() -> Self {
        Self::SOLVED
    }

    /// Create a cube from an explicit label sequence.
    ///
    /// # Errors
    ///
    /// `CubeError::InvalidStateSize` if `labels` does not hold exactly 54
    /// labels.
    pub fn from_labels(labels: &[Face]) -> Result<Self, CubeError> {
        let facelets = labels
            .try_into()
            .map_err(|_| CubeError::InvalidStateSize {
                actual: labels.len(),
            })?;
        Ok(Self { facelets })
    }

    /// Parse the digit string produced by [`Cube::state_string`].
    ///
    /// # Errors
    ///
    /// If the string is not 54 characters long or contains a character other
    /// than the digits `0` to `5`.
    pub fn from_state_string(s: &str) -> Result<Self, CubeError> {
        let labels = s
            .chars()
            .enumerate()
            .map(|(position, label)| {
                label
                    .to_digit(10)
                    .and_then(|digit| Face::from_index(digit as usize))
                    .ok_or(CubeError::InvalidLabel { position, label })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_labels(&labels)
    }

    #[must_use]
    pub fn labels(&self) -> &[Face; FACELET_COUNT] {
        &self.facelets
    }

    fn face_range(index: usize) -> Result<std::ops::Range<usize>, CubeError> {
        if index >= FACE_COUNT {
            return Err(CubeError::InvalidFaceIndex(index));
        }
        let start = index * FACELETS_PER_FACE;
        Ok(start..start + FACELETS_PER_FACE)
    }

    /// Read one face as a 3x3 grid.
    ///
    /// # Errors
    ///
    /// `CubeError::InvalidFaceIndex` if `index` is not between 0 and 5.
    pub fn face(&self, index: usize) -> Result<[[Face; 3]; 3], CubeError> {
        Face::from_index(index)
            .map(|face| self.grid(face))
            .ok_or(CubeError::InvalidFaceIndex(index))
    }

    /// The labels of `face` as a 3x3 grid.
    #[must_use]
    pub fn grid(&self, face: Face) -> [[Face; 3]; 3] {
        let start = face.index() * FACELETS_PER_FACE;
        let facelets = &self.facelets[start..start + FACELETS_PER_FACE];
        let mut grid = [[Face::Front; 3]; 3];
        for (row, chunk) in grid.iter_mut().zip(facelets.chunks_exact(3)) {
            row.copy_from_slice(chunk);
        }
        grid
    }

    /// Overwrite one face from a 3x3 grid.
    ///
    /// # Errors
    ///
    /// `CubeError::InvalidFaceIndex` if `index` is not between 0 and 5, or
    /// `CubeError::InvalidFaceShape` if `rows` is not 3 rows of 3 labels. The
    /// cube is left untouched on error.
    pub fn set_face<R: AsRef<[Face]>>(
        &mut self,
        index: usize,
        rows: &[R],
    ) -> Result<(), CubeError> {
        let range = Self::face_range(index)?;
        if rows.len() != 3 || rows.iter().any(|row| row.as_ref().len() != 3) {
            return Err(CubeError::InvalidFaceShape {
                rows: rows.len(),
                columns: rows.iter().map(|row| row.as_ref().len()).collect(),
            });
        }
        for (target, &label) in self.facelets[range]
            .iter_mut()
            .zip(rows.iter().flat_map(|row| row.as_ref().iter()))
        {
            *target = label;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    pub fn reset(&mut self) {
        *self = Self::SOLVED;
    }

    /// The number of facelets carrying the same label as in the solved cube.
    #[must_use]
    pub fn matching_facelets(&self) -> usize {
        self.facelets
            .iter()
            .zip(Self::SOLVED.facelets.iter())
            .filter(|(a, b)| a == b)
            .count()
    }

    #[must_use]
    pub fn key(&self) -> StateKey {
        self.facelets.map(|face| face as u8)
    }

    /// The labels as a string of 54 digits.
    #[must_use]
    pub fn state_string(&self) -> String {
        self.facelets
            .iter()
            .map(|&face| char::from(b'0' + face as u8))
            .collect()
    }

    pub fn apply_move(&mut self, move_: Move) {
        *self = moves::apply(self, move_);
    }

    pub fn apply_moves<'a>(&mut self, moves: impl IntoIterator<Item = &'a Move>) {
        for &move_ in moves {
            self.apply_move(move_);
        }
    }

    /// Apply whitespace separated moves in standard notation, e.g. `"R U' F2"`.
    /// The whole sequence is parsed before any move is applied.
    ///
    /// # Errors
    ///
    /// `MoveError::InvalidMove` for the first symbol that is not one of the 18
    /// recognized moves.
    pub fn apply_notation(&mut self, notation: &str) -> Result<Vec<Move>, MoveError> {
        let sequence = moves::parse_sequence(notation)?;
        self.apply_moves(&sequence);
        Ok(sequence)
    }

    /// Apply `length` random moves drawn from `rng`, never following a move
    /// with its own inverse, and return the moves applied.
    pub fn scramble(&mut self, length: usize, rng: &mut fastrand::Rng) -> Vec<Move> {
        let mut scramble: Vec<Move> = Vec::with_capacity(length);
        for _ in 0..length {
            let candidates: Vec<Move> = match scramble.last() {
                Some(&last) => Move::ALL
                    .into_iter()
                    .filter(|move_| !move_.is_inverse_of(last))
                    .collect(),
                None => Move::ALL.to_vec(),
            };
            let move_ = candidates[rng.usize(..candidates.len())];
            self.apply_move(move_);
            scramble.push(move_);
        }
        scramble
    }

    /// [`Cube::scramble`] with a freshly seeded generator.
    pub fn scramble_seeded(&mut self, length: usize, seed: u64) -> Vec<Move> {
        self.scramble(length, &mut fastrand::Rng::with_seed(seed))
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cube").field(&self.state_string()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_solved_layout() {
        let cube = Cube::new();
        assert!(cube.is_solved());
        for face in Face::ALL {
            let grid = cube.face(face.index()).unwrap();
            assert!(grid.iter().flatten().all(|&label| label == face));
        }
        assert_eq!(
            cube.state_string(),
            "000000000111111111222222222333333333444444444555555555"
        );
    }

    #[test]
    fn test_from_labels_size() {
        let labels = Cube::new().labels().to_vec();
        assert_eq!(Cube::from_labels(&labels).unwrap(), Cube::new());
        assert_eq!(
            Cube::from_labels(&labels[..53]),
            Err(CubeError::InvalidStateSize { actual: 53 })
        );
        let mut too_long = labels.clone();
        too_long.push(Face::Up);
        assert_eq!(
            Cube::from_labels(&too_long),
            Err(CubeError::InvalidStateSize { actual: 55 })
        );
    }

    #[test]
    fn test_state_string_round_trip_and_bad_label() {
        let mut cube = Cube::new();
        cube.apply_notation("R U F'").unwrap();
        assert_eq!(Cube::from_state_string(&cube.state_string()).unwrap(), cube);

        let mut bad = cube.state_string();
        bad.replace_range(7..8, "9");
        assert_eq!(
            Cube::from_state_string(&bad),
            Err(CubeError::InvalidLabel {
                position: 7,
                label: '9'
            })
        );
    }

    #[test]
    fn test_face_index_bounds() {
        let mut cube = Cube::new();
        assert_eq!(cube.face(6), Err(CubeError::InvalidFaceIndex(6)));
        assert_eq!(
            cube.set_face(17, &[[Face::Up; 3]; 3]),
            Err(CubeError::InvalidFaceIndex(17))
        );
    }

    #[test]
    fn test_set_face() {
        let mut cube = Cube::new();
        let rows = [
            [Face::Up, Face::Down, Face::Left],
            [Face::Right, Face::Front, Face::Back],
            [Face::Up, Face::Up, Face::Up],
        ];
        cube.set_face(2, &rows).unwrap();
        assert_eq!(cube.face(2).unwrap(), rows);
        assert!(!cube.is_solved());
        // other faces are untouched
        assert_eq!(cube.face(1).unwrap(), [[Face::Right; 3]; 3]);
    }

    #[test]
    fn test_set_face_shape() {
        let mut cube = Cube::new();
        let short = vec![vec![Face::Up; 3], vec![Face::Up; 2], vec![Face::Up; 3]];
        assert_eq!(
            cube.set_face(0, &short),
            Err(CubeError::InvalidFaceShape {
                rows: 3,
                columns: vec![3, 2, 3]
            })
        );
        let two_rows = vec![vec![Face::Up; 3]; 2];
        assert!(matches!(
            cube.set_face(0, &two_rows),
            Err(CubeError::InvalidFaceShape { rows: 2, .. })
        ));
        assert!(cube.is_solved());
    }

    #[test]
    fn test_copies_are_independent() {
        let original = Cube::new();
        let mut copy = original;
        copy.apply_notation("F").unwrap();
        assert!(original.is_solved());
        assert!(!copy.is_solved());
    }

    #[test]
    fn test_equality_and_hash_agree() {
        let mut a = Cube::new();
        let mut b = Cube::new();
        a.apply_notation("R U").unwrap();
        b.apply_notation("R U").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
        let set: HashSet<Cube> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut cube = Cube::new();
        cube.scramble_seeded(12, 7);
        cube.reset();
        assert!(cube.is_solved());
    }

    #[test]
    fn test_scramble_is_deterministic() {
        let mut a = Cube::new();
        let mut b = Cube::new();
        let moves_a = a.scramble_seeded(10, 42);
        let moves_b = b.scramble_seeded(10, 42);
        assert_eq!(moves_a.len(), 10);
        assert_eq!(moves_a, moves_b);
        assert_eq!(a.key(), b.key());
        assert!(!a.is_solved());
    }

    #[test]
    fn test_scramble_never_undoes_previous_move() {
        let mut rng = fastrand::Rng::with_seed(1234);
        for _ in 0..50 {
            let scramble = Cube::new().scramble(30, &mut rng);
            assert!(
                scramble
                    .windows(2)
                    .all(|pair| !pair[1].is_inverse_of(pair[0]))
            );
        }
    }

    #[test]
    fn test_face_metadata() {
        for face in Face::ALL {
            assert_eq!(Face::from_index(face.index()), Some(face));
            assert_eq!(Face::from_letter(face.letter()), Some(face));
            assert_eq!(face.opposite().opposite(), face);
            assert_ne!(face.opposite(), face);
        }
        assert_eq!(Face::from_index(6), None);
        assert_eq!(Face::from_letter('X'), None);

        let colors = Face::ALL.map(Face::color_name);
        assert_eq!(colors, ["White", "Red", "Blue", "Orange", "Green", "Yellow"]);
    }
}
