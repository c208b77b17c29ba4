//! Simplification and summaries of move sequences.

use crate::{
    cube::{FACE_COUNT, Face},
    moves::{Move, Turn},
};
use itertools::Itertools;

/// Merge every run of consecutive moves on the same face into at most one
/// move with the same net rotation. Runs that cancel out are dropped. The
/// result never changes the permutation the sequence performs.
#[must_use]
pub fn optimize(moves: &[Move]) -> Vec<Move> {
    moves
        .iter()
        .chunk_by(|move_| move_.face)
        .into_iter()
        .filter_map(|(face, run)| {
            let quarter_turns = run.fold(0, |total, move_| {
                (total + move_.turn.quarter_turns()) % 4
            });
            Turn::from_quarter_turns(quarter_turns).map(|turn| Move::new(face, turn))
        })
        .collect()
}

/// Summary counts of a move sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceAnalysis {
    pub total_moves: usize,
    pub unique_moves: usize,
    /// Moves per face, indexed by [`Face::index`].
    pub face_distribution: [usize; FACE_COUNT],
    pub clockwise: usize,
    pub counter_clockwise: usize,
    pub half: usize,
}

impl SequenceAnalysis {
    #[must_use]
    pub fn face_count(&self, face: Face) -> usize {
        self.face_distribution[face.index()]
    }
}

#[must_use]
pub fn analyze(moves: &[Move]) -> SequenceAnalysis {
    let mut analysis = SequenceAnalysis {
        total_moves: moves.len(),
        unique_moves: moves.iter().unique().count(),
        ..Default::default()
    };
    for move_ in moves {
        analysis.face_distribution[move_.face.index()] += 1;
        match move_.turn {
            Turn::Clockwise => analysis.clockwise += 1,
            Turn::CounterClockwise => analysis.counter_clockwise += 1,
            Turn::Half => analysis.half += 1,
        }
    }
    analysis
}

/// Lay out moves separated by spaces, breaking lines so that none is longer
/// than `line_length` characters unless a single move is.
#[must_use]
pub fn wrap_sequence(moves: &[Move], line_length: usize) -> String {
    let mut lines: Vec<String> = vec![];
    let mut line = String::new();
    for move_ in moves {
        let symbol = move_.to_string();
        if !line.is_empty() && line.len() + 1 + symbol.len() > line_length {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&symbol);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cube::Cube, moves::parse_sequence};

    fn optimized(notation: &str) -> String {
        crate::moves::format_sequence(&optimize(&parse_sequence(notation).unwrap()))
    }

    #[test]
    fn test_merges_runs() {
        assert_eq!(optimized(""), "");
        assert_eq!(optimized("R U F"), "R U F");
        assert_eq!(optimized("R R"), "R2");
        assert_eq!(optimized("R R R"), "R'");
        assert_eq!(optimized("R2 R"), "R'");
        assert_eq!(optimized("R' R'"), "R2");
        assert_eq!(optimized("U U' R"), "R");
        assert_eq!(optimized("U2 U2"), "");
        assert_eq!(optimized("F R R' F'"), "F F'");
    }

    #[test]
    fn test_single_pass() {
        // a run that cancels can leave a new run behind; only one pass is made
        assert_eq!(optimized("L D D' D2 D2 L2"), "L L2");
    }

    #[test]
    fn test_preserves_permutation() {
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..100 {
            let length = rng.usize(0..30);
            let moves = (0..length)
                .map(|_| Move::ALL[rng.usize(..Move::ALL.len())])
                .collect_vec();
            let shorter = optimize(&moves);
            assert!(shorter.len() <= moves.len());

            let mut original = Cube::new();
            original.apply_moves(&moves);
            let mut simplified = Cube::new();
            simplified.apply_moves(&shorter);
            assert_eq!(original, simplified);
        }
    }

    #[test]
    fn test_analyze() {
        let analysis = analyze(&parse_sequence("R U R' U' R2 F").unwrap());
        assert_eq!(analysis.total_moves, 6);
        assert_eq!(analysis.unique_moves, 6);
        assert_eq!(analysis.face_count(Face::Right), 3);
        assert_eq!(analysis.face_count(Face::Up), 2);
        assert_eq!(analysis.face_count(Face::Front), 1);
        assert_eq!(analysis.face_count(Face::Back), 0);
        assert_eq!(analysis.clockwise, 3);
        assert_eq!(analysis.counter_clockwise, 2);
        assert_eq!(analysis.half, 1);
        assert_eq!(analyze(&[]), SequenceAnalysis::default());
    }

    #[test]
    fn test_wrap_sequence() {
        let moves = parse_sequence("R U R' U' F2 B D'").unwrap();
        assert_eq!(wrap_sequence(&moves, 80), "R U R' U' F2 B D'");
        assert_eq!(wrap_sequence(&moves, 8), "R U R'\nU' F2 B\nD'");
        assert_eq!(wrap_sequence(&moves, 1), "R\nU\nR'\nU'\nF2\nB\nD'");
        assert_eq!(wrap_sequence(&[], 10), "");
    }
}
