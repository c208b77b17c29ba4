use crate::{cube::Cube, moves::Move};

/// The path of a depth-first search, kept as an explicit stack of cube states
/// so deep searches never recurse. Entry zero is the root state and carries no
/// move. Every other entry is the state reached by applying its move to the
/// entry below it.
pub struct StateStack {
    stack: Vec<(Cube, Option<Move>)>,
    stack_pointer: usize,
}

impl From<&Cube> for StateStack {
    fn from(root: &Cube) -> Self {
        Self {
            stack: vec![(*root, None)],
            stack_pointer: 0,
        }
    }
}

impl StateStack {
    /// Grow the buffer so that `max_stack_pointer` moves can be pushed
    /// without reallocating.
    pub fn resize_if_needed(&mut self, max_stack_pointer: usize) {
        if self.stack.len() <= max_stack_pointer {
            let root = self.stack[0].0;
            self.stack.resize(max_stack_pointer + 1, (root, None));
        }
    }

    /// Push the state reached by applying `move_` to the last state.
    pub fn push_stack(&mut self, move_: Move) {
        let next = crate::moves::apply(&self.stack[self.stack_pointer].0, move_);
        self.stack_pointer += 1;
        if self.stack_pointer == self.stack.len() {
            self.stack.push((next, Some(move_)));
        } else {
            self.stack[self.stack_pointer] = (next, Some(move_));
        }
    }

    /// Pop the last state from the stack. The root is never popped.
    pub fn pop_stack(&mut self) {
        debug_assert!(self.stack_pointer > 0);
        self.stack_pointer = self.stack_pointer.saturating_sub(1);
    }

    /// The number of moves between the root and the last state.
    pub fn depth(&self) -> usize {
        self.stack_pointer
    }

    pub fn last_state(&self) -> &Cube {
        &self.stack[self.stack_pointer].0
    }

    /// The move `offset` entries below the top of the stack, where zero is the
    /// most recent move. `None` once the offset reaches the root.
    pub fn recent_move(&self, offset: usize) -> Option<Move> {
        self.stack_pointer
            .checked_sub(offset)
            .and_then(|entry_index| self.stack[entry_index].1)
    }

    pub fn create_move_history(&self) -> Vec<Move> {
        self.stack[1..=self.stack_pointer]
            .iter()
            .filter_map(|&(_, move_)| move_)
            .collect()
    }
}
