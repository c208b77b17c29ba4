//! Cost estimates of how far a cube is from solved. None of these are
//! admissible in general; they are only used to score and report progress.

use crate::cube::{CENTER, Cube, FACELETS_PER_FACE, Face};
use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown heuristic {0:?}, expected one of \"misplaced\", \"corner-edge\" or \"combined\"")]
pub struct UnknownHeuristicError(pub String);

/// The estimators that can be selected by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Heuristic {
    Misplaced,
    CornerEdge,
    Combined,
}

/// The facelets of each corner piece.
const CORNERS: [[usize; 3]; 8] = [
    [0, 29, 42],
    [2, 9, 44],
    [6, 35, 45],
    [8, 15, 47],
    [11, 18, 38],
    [17, 24, 53],
    [20, 27, 36],
    [26, 33, 51],
];

/// The facelets of each edge piece.
const EDGES: [[usize; 2]; 12] = [
    [1, 43],
    [3, 32],
    [5, 12],
    [7, 46],
    [10, 41],
    [14, 21],
    [16, 50],
    [19, 37],
    [23, 30],
    [25, 52],
    [28, 39],
    [34, 48],
];

const SIDE_FACES: [Face; 4] = [Face::Front, Face::Right, Face::Back, Face::Left];

const MISPLACED_CAP: usize = 20;
const MISPLACED_DIVISOR: usize = 4;
const CORNER_MISPLACED_PENALTY: usize = 2;
const EDGE_MISPLACED_PENALTY: usize = 1;
const TWISTED_PENALTY: usize = 1;
const CORNER_EDGE_DIVISOR: usize = 4;
const INCOMPLETE_BOTTOM_PENALTY: usize = 20;
const MIDDLE_FACELET_PENALTY: usize = 2;

impl Heuristic {
    pub const ALL: [Self; 3] = [Heuristic::Misplaced, Heuristic::CornerEdge, Heuristic::Combined];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::Misplaced => "misplaced",
            Heuristic::CornerEdge => "corner-edge",
            Heuristic::Combined => "combined",
        }
    }

    #[must_use]
    pub fn estimate(self, cube: &Cube) -> usize {
        match self {
            Heuristic::Misplaced => misplaced_facelets(cube),
            Heuristic::CornerEdge => corner_edge(cube),
            Heuristic::Combined => combined(cube),
        }
    }
}

impl FromStr for Heuristic {
    type Err = UnknownHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|heuristic| heuristic.name() == s)
            .ok_or_else(|| UnknownHeuristicError(s.to_owned()))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn mismatched(cube: &Cube, positions: impl IntoIterator<Item = usize>) -> usize {
    positions
        .into_iter()
        .filter(|&i| cube.facelets[i] != Cube::SOLVED.facelets[i])
        .count()
}

/// Non-center facelets that differ from the solved cube, capped and scaled
/// down.
#[must_use]
pub fn misplaced_facelets(cube: &Cube) -> usize {
    let misplaced = mismatched(
        cube,
        (0..cube.facelets.len()).filter(|i| i % FACELETS_PER_FACE != CENTER),
    );
    misplaced.min(MISPLACED_CAP) / MISPLACED_DIVISOR
}

fn piece_penalty(cube: &Cube, piece: &[usize], misplaced_penalty: usize) -> usize {
    let current = piece.iter().map(|&i| cube.facelets[i]).collect_vec();
    let solved = piece.iter().map(|&i| Cube::SOLVED.facelets[i]).collect_vec();
    if current == solved {
        0
    } else if current.iter().sorted().eq(solved.iter().sorted()) {
        TWISTED_PENALTY
    } else {
        misplaced_penalty
    }
}

/// Penalizes misplaced corners and edges, and pieces that are in place but
/// twisted or flipped. Never drops below one unless the cube is solved.
#[must_use]
pub fn corner_edge(cube: &Cube) -> usize {
    let penalty = CORNERS
        .iter()
        .map(|corner| piece_penalty(cube, corner, CORNER_MISPLACED_PENALTY))
        .chain(
            EDGES
                .iter()
                .map(|edge| piece_penalty(cube, edge, EDGE_MISPLACED_PENALTY)),
        )
        .sum::<usize>();
    if penalty == 0 {
        0
    } else {
        (penalty / CORNER_EDGE_DIVISOR).max(1)
    }
}

fn row(face: Face, row: usize) -> impl Iterator<Item = usize> {
    let start = face.index() * FACELETS_PER_FACE + row * 3;
    start..start + 3
}

/// Rewards solving the cube layer by layer from the bottom. An incomplete
/// bottom layer dominates the estimate. The middle layer is only counted once
/// the bottom is done, and the top layer once both are done.
#[must_use]
pub fn layer_completion(cube: &Cube) -> usize {
    let down = Face::Down.index() * FACELETS_PER_FACE;
    let bottom = mismatched(
        cube,
        (down..down + FACELETS_PER_FACE)
            .chain(SIDE_FACES.into_iter().flat_map(|face| row(face, 2))),
    );
    if bottom > 0 {
        return bottom + INCOMPLETE_BOTTOM_PENALTY;
    }

    let middle = mismatched(
        cube,
        SIDE_FACES
            .into_iter()
            .flat_map(|face| row(face, 1).filter(|i| i % FACELETS_PER_FACE != CENTER)),
    );
    if middle > 0 {
        return middle * MIDDLE_FACELET_PENALTY;
    }

    let up = Face::Up.index() * FACELETS_PER_FACE;
    mismatched(
        cube,
        (up..up + FACELETS_PER_FACE)
            .chain(SIDE_FACES.into_iter().flat_map(|face| row(face, 0))),
    )
}

/// Weighted blend of the other three estimates, truncated.
#[must_use]
pub fn combined(cube: &Cube) -> usize {
    // weights are in tenths: 0.3, 0.5, 0.2
    (3 * misplaced_facelets(cube) + 5 * corner_edge(cube) + 2 * layer_completion(cube)) / 10
}
