use super::SearchContext;
use crate::{
    cube::{Cube, Face},
    moves::{Move, Turn},
    working,
};
use log::debug;

const fn m(face: Face, turn: Turn) -> Move {
    Move::new(face, turn)
}

const U: Move = m(Face::Up, Turn::Clockwise);
const U_PRIME: Move = m(Face::Up, Turn::CounterClockwise);
const U2: Move = m(Face::Up, Turn::Half);
const R: Move = m(Face::Right, Turn::Clockwise);
const R_PRIME: Move = m(Face::Right, Turn::CounterClockwise);
const F: Move = m(Face::Front, Turn::Clockwise);
const F_PRIME: Move = m(Face::Front, Turn::CounterClockwise);
const L: Move = m(Face::Left, Turn::Clockwise);
const L_PRIME: Move = m(Face::Left, Turn::CounterClockwise);
const D: Move = m(Face::Down, Turn::Clockwise);
const D_PRIME: Move = m(Face::Down, Turn::CounterClockwise);
const B: Move = m(Face::Back, Turn::Clockwise);
const B_PRIME: Move = m(Face::Back, Turn::CounterClockwise);

/// Candidate patterns in tie-breaking order: every quarter turn, then a few
/// common last-layer and pairing algorithms.
const CATALOG: &[&[Move]] = &[
    &[U],
    &[U_PRIME],
    &[R],
    &[R_PRIME],
    &[F],
    &[F_PRIME],
    &[L],
    &[L_PRIME],
    &[D],
    &[D_PRIME],
    &[B],
    &[B_PRIME],
    &[R, U, R_PRIME, U_PRIME],
    &[U, R, U_PRIME, R_PRIME],
    &[F, R, U, R_PRIME, U_PRIME, F_PRIME],
    &[R, U, R_PRIME, F, R, F_PRIME],
    &[U, R, U_PRIME, R_PRIME, U_PRIME, F, R, F_PRIME],
    &[R, U2, R_PRIME, U_PRIME, R, U_PRIME, R_PRIME],
    &[R, U, R_PRIME, U, R, U2, R_PRIME],
    &[F, U, R, U_PRIME, R_PRIME, F_PRIME],
    &[R, U, R_PRIME],
    &[F, U, F_PRIME],
    &[R, F, R_PRIME],
];

/// Hill-climb on the number of facelets matching the solved cube. Each
/// iteration applies whichever catalog pattern improves the count the most,
/// or the next pattern in rotation when none does. Returns as soon as any
/// candidate solves the cube, and gives up after `greedy_iterations` or once
/// the sequence is longer than `greedy_max_length`.
pub(super) fn search(target: &Cube, context: &mut SearchContext<'_>) -> Option<Vec<Move>> {
    let mut current = *target;
    let mut solution: Vec<Move> = vec![];

    for iteration in 0..context.config.greedy_iterations {
        if context.deadline.expired() {
            return None;
        }
        if current.is_solved() {
            return Some(solution);
        }

        let mut best_score = current.matching_facelets();
        let mut best: Option<(&[Move], Cube)> = None;
        for &pattern in CATALOG {
            let mut candidate = current;
            candidate.apply_moves(pattern);
            context.stats.nodes_explored += 1;
            if candidate.is_solved() {
                solution.extend_from_slice(pattern);
                return Some(solution);
            }
            let score = candidate.matching_facelets();
            if score > best_score {
                best_score = score;
                best = Some((pattern, candidate));
            }
        }

        let (pattern, next) = best.unwrap_or_else(|| {
            let pattern = CATALOG[iteration % CATALOG.len()];
            let mut next = current;
            next.apply_moves(pattern);
            (pattern, next)
        });
        current = next;
        solution.extend_from_slice(pattern);
        context.stats.reached_depth(solution.len());
        debug!(
            working!("Greedy iteration {}: {} facelets in place after {} moves"),
            iteration,
            current.matching_facelets(),
            solution.len()
        );

        if solution.len() > context.config.greedy_max_length {
            debug!("The greedy sequence grew past {} moves", context.config.greedy_max_length);
            break;
        }
    }

    current.is_solved().then_some(solution)
}
