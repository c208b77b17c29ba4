use super::SearchContext;
use crate::{
    cube::{Cube, Face, StateKey},
    moves::{self, Move, Turn},
    working,
};
use fxhash::FxHashSet;
use log::debug;
use std::collections::VecDeque;

/// A quarter turn each way on three faces. Small enough that six levels stay
/// cheap.
const MOVES: [Move; 6] = [
    Move::new(Face::Up, Turn::Clockwise),
    Move::new(Face::Up, Turn::CounterClockwise),
    Move::new(Face::Right, Turn::Clockwise),
    Move::new(Face::Right, Turn::CounterClockwise),
    Move::new(Face::Front, Turn::Clockwise),
    Move::new(Face::Front, Turn::CounterClockwise),
];

/// Breadth-first search from `target` over [`MOVES`], one level at a time, up
/// to `breadth_first_depth` moves. States are marked visited when they are
/// queued, and checked for being solved as soon as they are generated.
pub(super) fn search(target: &Cube, context: &mut SearchContext<'_>) -> Option<Vec<Move>> {
    let max_depth = context
        .config
        .breadth_first_depth
        .min(context.config.max_depth);

    let mut visited: FxHashSet<StateKey> = FxHashSet::default();
    visited.insert(target.key());
    let mut frontier: VecDeque<(Cube, Vec<Move>)> = VecDeque::from([(*target, vec![])]);

    for depth in 1..=max_depth {
        if context.deadline.expired() {
            return None;
        }
        context.stats.reached_depth(depth);
        for _ in 0..frontier.len() {
            let Some((cube, path)) = frontier.pop_front() else {
                break;
            };
            for move_ in MOVES {
                if path.last().is_some_and(|&last| move_.is_inverse_of(last)) {
                    continue;
                }
                let next = moves::apply(&cube, move_);
                if context.explore_node() && context.deadline.expired() {
                    return None;
                }
                if !visited.insert(next.key()) {
                    continue;
                }

                let mut next_path = path.clone();
                next_path.push(move_);
                if next.is_solved() {
                    return Some(next_path);
                }
                if depth < max_depth {
                    frontier.push_back((next, next_path));
                }
            }
        }
        debug!(
            working!("Breadth-first depth {} done, {} states queued"),
            depth,
            frontier.len()
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        moves::parse_sequence,
        solver::{SolverConfig, run_strategy},
    };
    use std::time::Duration;

    fn scrambled(notation: &str) -> Cube {
        let mut cube = Cube::new();
        cube.apply_notation(notation).unwrap();
        cube
    }

    #[test]
    fn test_single_move() {
        let (solution, stats) = run_strategy(search, &scrambled("U"), &SolverConfig::default());
        assert_eq!(solution.unwrap(), parse_sequence("U'").unwrap());
        assert_eq!(stats.max_depth_reached, 1);
    }

    #[test]
    fn test_two_moves() {
        let (solution, stats) =
            run_strategy(search, &scrambled("R U"), &SolverConfig::default());
        assert_eq!(solution.unwrap(), parse_sequence("U' R'").unwrap());
        assert_eq!(stats.max_depth_reached, 2);
    }

    #[test]
    fn test_finds_shortest_within_move_set() {
        let target = scrambled("F R' U F'");
        let (solution, _) = run_strategy(search, &target, &SolverConfig::default());
        let solution = solution.unwrap();
        assert!(solution.len() <= 4);
        let mut cube = target;
        cube.apply_moves(&solution);
        assert!(cube.is_solved());
    }

    #[test]
    fn test_depth_bound() {
        let config = SolverConfig {
            breadth_first_depth: 1,
            ..Default::default()
        };
        let (solution, stats) = run_strategy(search, &scrambled("R U"), &config);
        assert_eq!(solution, None);
        assert_eq!(stats.max_depth_reached, 1);
        assert_eq!(stats.nodes_explored, 6);

        // the caller's maximum depth caps the breadth-first bound too
        let config = SolverConfig::default().with_max_depth(1);
        assert_eq!(run_strategy(search, &scrambled("R U"), &config).0, None);
    }

    #[test]
    fn test_moves_outside_the_reduced_set() {
        // U, R and F never move the corner between D, B and L
        let (solution, stats) = run_strategy(search, &scrambled("D"), &SolverConfig::default());
        assert_eq!(solution, None);
        assert_eq!(stats.max_depth_reached, 6);
    }

    #[test]
    fn test_zero_timeout() {
        let config = SolverConfig::default().with_timeout(Duration::ZERO);
        let (solution, stats) = run_strategy(search, &scrambled("U"), &config);
        assert_eq!(solution, None);
        assert_eq!(stats.nodes_explored, 0);
    }
}
