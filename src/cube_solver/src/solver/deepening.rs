use super::{DepthOutcome, SearchContext, depth_limited_search};
use crate::{cube::Cube, moves::Move, optimizer, state_stack::StateStack, working};
use log::debug;
use std::time::Instant;

/// Skip turning the face that was just turned, which also covers undoing the
/// last move, and skip returning to the face turned two moves back.
fn prune(state_stack: &StateStack, move_: Move) -> bool {
    let Some(last) = state_stack.recent_move(0) else {
        return false;
    };
    move_.face == last.face
        || state_stack
            .recent_move(1)
            .is_some_and(|before_last| before_last.face == move_.face)
}

/// Iterative deepening from `target` up to `max_depth`. The whole search is
/// abandoned as soon as one depth runs past `deepening_depth_time_limit`.
pub(super) fn search(target: &Cube, context: &mut SearchContext<'_>) -> Option<Vec<Move>> {
    let depth_time_limit = context.config.deepening_depth_time_limit;

    for depth in 1..=context.config.max_depth {
        if context.deadline.expired() {
            return None;
        }
        debug!(working!("Searching depth {}..."), depth);
        let depth_start = Instant::now();
        let nodes_before = context.stats.nodes_explored;
        let outcome = depth_limited_search(
            target,
            depth,
            context,
            prune,
            Cube::is_solved,
            |deadline| deadline.expired() || depth_start.elapsed() > depth_time_limit,
        );
        let elapsed = depth_start.elapsed();
        debug!(
            working!("Traversed {} nodes in {:.3}s"),
            context.stats.nodes_explored - nodes_before,
            elapsed.as_secs_f64()
        );

        match outcome {
            DepthOutcome::Found(path) => return Some(optimizer::optimize(&path)),
            DepthOutcome::Aborted => return None,
            DepthOutcome::Exhausted => {}
        }
        if elapsed > depth_time_limit {
            debug!("Depth {depth} took too long, giving up");
            return None;
        }
    }
    None
}
