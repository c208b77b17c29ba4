use super::{DepthOutcome, SearchContext, depth_limited_search};
use crate::{cube::Cube, moves::Move, working};
use log::debug;
use std::time::Instant;

/// Look for the scramble that produced `target`: enumerate every sequence of
/// one to `reverse_scramble_depth` moves that never undoes its previous move,
/// apply it to a solved cube, and compare. A match is undone by the inverse
/// sequence.
///
/// The enumeration grows by a factor of 17 per move, so beyond a handful of
/// moves it only ends because the deadline does. Scrambles further away than
/// the bound are never found.
pub(super) fn search(target: &Cube, context: &mut SearchContext<'_>) -> Option<Vec<Move>> {
    let max_length = context
        .config
        .reverse_scramble_depth
        .min(context.config.max_depth);

    for length in 1..=max_length {
        if context.deadline.expired() {
            return None;
        }
        let length_start = Instant::now();
        let outcome = depth_limited_search(
            &Cube::SOLVED,
            length,
            context,
            |state_stack, move_| {
                state_stack
                    .recent_move(0)
                    .is_some_and(|last| move_.is_inverse_of(last))
            },
            |cube| cube == target,
            super::Deadline::expired,
        );
        debug!(
            working!("Enumerated scrambles of length {} in {:.3}s"),
            length,
            length_start.elapsed().as_secs_f64()
        );
        match outcome {
            DepthOutcome::Found(scramble) => {
                return Some(scramble.into_iter().rev().map(Move::inverse).collect());
            }
            DepthOutcome::Exhausted => {}
            DepthOutcome::Aborted => return None,
        }
    }
    None
}
