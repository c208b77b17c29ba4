mod breadth_first;
mod deepening;
mod greedy;
mod reverse_scramble;

use crate::{
    cube::Cube,
    heuristic::{Heuristic, UnknownHeuristicError},
    moves::{Move, format_sequence},
    start,
    state_stack::StateStack,
    stats::SearchStatistics,
    success, working,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    time::{Duration, Instant},
};
use thiserror::Error;

type StrategySearch = fn(&Cube, &mut SearchContext<'_>) -> Option<Vec<Move>>;

/// The strategies [`Solver::solve`] tries, in order.
const PIPELINE: [(Strategy, StrategySearch); 3] = [
    (Strategy::BreadthFirst, breadth_first::search),
    (Strategy::ReverseScramble, reverse_scramble::search),
    (Strategy::Greedy, greedy::search),
];

/// How many generated nodes pass between two deadline checks in the tight
/// search loops.
const DEADLINE_CHECK_INTERVAL: u64 = 1 << 12;

/// One part in this many of the timeout is held back for the greedy search,
/// which runs last and would otherwise be starved by the enumerating
/// strategies before it.
const GREEDY_RESERVE_DIVISOR: u32 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolverError {
    #[error(transparent)]
    UnknownHeuristic(#[from] UnknownHeuristicError),
}

/// The search strategies a solve can succeed with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    ReverseScramble,
    Greedy,
    IterativeDeepening,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::ReverseScramble => "reverse-scramble",
            Strategy::Greedy => "greedy",
            Strategy::IterativeDeepening => "iterative deepening",
        })
    }
}

/// Bounds on every search the solver runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SolverConfigRepr", into = "SolverConfigRepr")]
pub struct SolverConfig {
    /// Caps every depth bound below and the iterative-deepening loop.
    pub max_depth: usize,
    /// Wall-clock budget shared by all strategies of one solve.
    pub timeout: Duration,
    pub breadth_first_depth: usize,
    pub reverse_scramble_depth: usize,
    pub greedy_iterations: usize,
    /// The greedy search gives up once its sequence grows past this.
    pub greedy_max_length: usize,
    /// Iterative deepening gives up entirely when a single depth takes longer
    /// than this.
    pub deepening_depth_time_limit: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 25,
            timeout: Duration::from_secs(60),
            breadth_first_depth: 6,
            reverse_scramble_depth: 8,
            greedy_iterations: 50,
            greedy_max_length: 100,
            deepening_depth_time_limit: Duration::from_secs(10),
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The on-disk form of [`SolverConfig`], with durations in seconds.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct SolverConfigRepr {
    max_depth: usize,
    timeout_secs: f64,
    breadth_first_depth: usize,
    reverse_scramble_depth: usize,
    greedy_iterations: usize,
    greedy_max_length: usize,
    deepening_depth_time_limit_secs: f64,
}

impl Default for SolverConfigRepr {
    fn default() -> Self {
        SolverConfig::default().into()
    }
}

impl From<SolverConfigRepr> for SolverConfig {
    fn from(value: SolverConfigRepr) -> Self {
        let seconds = |secs: f64| Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO);
        Self {
            max_depth: value.max_depth,
            timeout: seconds(value.timeout_secs),
            breadth_first_depth: value.breadth_first_depth,
            reverse_scramble_depth: value.reverse_scramble_depth,
            greedy_iterations: value.greedy_iterations,
            greedy_max_length: value.greedy_max_length,
            deepening_depth_time_limit: seconds(value.deepening_depth_time_limit_secs),
        }
    }
}

impl From<SolverConfig> for SolverConfigRepr {
    fn from(value: SolverConfig) -> Self {
        Self {
            max_depth: value.max_depth,
            timeout_secs: value.timeout.as_secs_f64(),
            breadth_first_depth: value.breadth_first_depth,
            reverse_scramble_depth: value.reverse_scramble_depth,
            greedy_iterations: value.greedy_iterations,
            greedy_max_length: value.greedy_max_length,
            deepening_depth_time_limit_secs: value.deepening_depth_time_limit.as_secs_f64(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct Deadline {
    start: Instant,
    timeout: Duration,
}

impl Deadline {
    fn new(timeout: Duration) -> Self {
        Self {
            start: Instant::now(),
            timeout,
        }
    }

    fn expired(&self) -> bool {
        self.start.elapsed() >= self.timeout
    }
}

/// What a strategy gets to work with during one solve.
struct SearchContext<'a> {
    config: &'a SolverConfig,
    deadline: Deadline,
    stats: &'a mut SearchStatistics,
}

impl<'a> SearchContext<'a> {
    fn new(config: &'a SolverConfig, stats: &'a mut SearchStatistics) -> Self {
        Self {
            config,
            deadline: Deadline::new(config.timeout),
            stats,
        }
    }

    /// Count a generated node. Returns true once every
    /// `DEADLINE_CHECK_INTERVAL` nodes, when the caller should look at the
    /// clock.
    fn explore_node(&mut self) -> bool {
        self.stats.nodes_explored += 1;
        self.stats.nodes_explored % DEADLINE_CHECK_INTERVAL == 0
    }
}

/// Run a single strategy against `target` with a fresh deadline.
#[cfg(test)]
fn run_strategy(
    search: StrategySearch,
    target: &Cube,
    config: &SolverConfig,
) -> (Option<Vec<Move>>, SearchStatistics) {
    let mut stats = SearchStatistics::default();
    let solution = search(target, &mut SearchContext::new(config, &mut stats));
    (solution, stats)
}

enum DepthOutcome {
    Found(Vec<Move>),
    Exhausted,
    Aborted,
}

/// Walk every move sequence of exactly `depth` moves from `root` depth first,
/// trying moves in [`Move::ALL`] order and skipping those `prune` rejects.
/// Only the states at `depth` are tested with `is_goal`. `should_abort` is
/// consulted periodically with the solve's deadline.
fn depth_limited_search(
    root: &Cube,
    depth: usize,
    context: &mut SearchContext<'_>,
    prune: impl Fn(&StateStack, Move) -> bool,
    is_goal: impl Fn(&Cube) -> bool,
    should_abort: impl Fn(&Deadline) -> bool,
) -> DepthOutcome {
    debug_assert!(depth > 0);
    context.stats.reached_depth(depth);

    let mut state_stack = StateStack::from(root);
    state_stack.resize_if_needed(depth);
    // The index into `Move::ALL` of the next move to try at each stack depth
    let mut next_move_index = vec![0; depth + 1];
    loop {
        let level = state_stack.depth();
        let Some(&move_) = Move::ALL.get(next_move_index[level]) else {
            if level == 0 {
                return DepthOutcome::Exhausted;
            }
            state_stack.pop_stack();
            continue;
        };
        next_move_index[level] += 1;
        if prune(&state_stack, move_) {
            continue;
        }

        state_stack.push_stack(move_);
        let check_deadline = context.explore_node();
        if check_deadline && should_abort(&context.deadline) {
            return DepthOutcome::Aborted;
        }
        if state_stack.depth() == depth {
            if is_goal(state_stack.last_state()) {
                return DepthOutcome::Found(state_stack.create_move_history());
            }
            state_stack.pop_stack();
        } else {
            next_move_index[level + 1] = 0;
        }
    }
}

/// Finds move sequences that solve a cube, trying a fixed pipeline of
/// bounded strategies. A solver keeps the statistics of its last solve, so
/// concurrent solves need separate solvers.
#[derive(Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    stats: SearchStatistics,
}

impl Solver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            stats: SearchStatistics::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The statistics of the most recent solve.
    #[must_use]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.stats
    }

    /// Try bounded breadth-first search, then reverse-scramble enumeration,
    /// then greedy pattern improvement, returning the first solution found.
    /// All three share one deadline of [`SolverConfig::timeout`], except that
    /// the first two stop a tenth of it early so the greedy search always gets
    /// a turn. `Ok(None)` means every strategy came up empty, which is an
    /// expected outcome for hard scrambles.
    ///
    /// # Errors
    ///
    /// `SolverError::UnknownHeuristic` if `heuristic` is not the name of a
    /// [`Heuristic`]. Nothing is searched and the statistics are left as they
    /// were.
    pub fn solve(
        &mut self,
        cube: &Cube,
        heuristic: &str,
    ) -> Result<Option<Vec<Move>>, SolverError> {
        let heuristic = heuristic.parse::<Heuristic>()?;
        self.stats.reset();
        let start = Instant::now();
        self.stats.initial_estimate = heuristic.estimate(cube);

        if cube.is_solved() {
            debug!("The cube is already solved");
            return Ok(self.finish(start, Some(vec![])));
        }

        info!(
            start!("Solving a cube with a {} estimate of {}"),
            heuristic, self.stats.initial_estimate
        );
        let mut context = SearchContext::new(&self.config, &mut self.stats);
        let timeout = context.config.timeout;
        context.deadline.timeout = timeout - timeout / GREEDY_RESERVE_DIVISOR;
        let mut solution = None;
        for (strategy, search) in PIPELINE {
            if strategy == Strategy::Greedy {
                context.deadline.timeout = timeout;
            }
            if context.deadline.expired() {
                debug!("Out of time before the {strategy} search");
                continue;
            }
            debug!(working!("Trying the {} search"), strategy);
            let strategy_start = Instant::now();
            solution = search(cube, &mut context);
            debug!(
                working!("The {} search {} in {:.3}s"),
                strategy,
                if solution.is_some() {
                    "succeeded"
                } else {
                    "found nothing"
                },
                strategy_start.elapsed().as_secs_f64()
            );
            if solution.is_some() {
                context.stats.strategy = Some(strategy);
                break;
            }
        }
        Ok(self.finish(start, solution))
    }

    /// Search depth limits `1..=max_depth` exhaustively, skipping moves that
    /// repeat the last face or return to the face two moves back. Gives up on
    /// the timeout, or when a single depth takes longer than
    /// [`SolverConfig::deepening_depth_time_limit`]. The solution is
    /// simplified with [`crate::optimizer::optimize`].
    pub fn solve_iterative_deepening(&mut self, cube: &Cube) -> Option<Vec<Move>> {
        self.stats.reset();
        let start = Instant::now();
        self.stats.initial_estimate = Heuristic::Combined.estimate(cube);
        if cube.is_solved() {
            return self.finish(start, Some(vec![]));
        }

        info!(start!("Searching with iterative deepening"));
        let mut context = SearchContext::new(&self.config, &mut self.stats);
        let solution = deepening::search(cube, &mut context);
        if solution.is_some() {
            context.stats.strategy = Some(Strategy::IterativeDeepening);
        }
        self.finish(start, solution)
    }

    fn finish(&mut self, start: Instant, solution: Option<Vec<Move>>) -> Option<Vec<Move>> {
        self.stats.solve_time = start.elapsed();
        self.stats.solution_found = solution.is_some();
        self.stats.solution_length = solution.as_ref().map_or(0, Vec::len);
        match &solution {
            Some(moves) => info!(
                success!("Found the {} move solution {:?} in {:.3}s"),
                moves.len(),
                format_sequence(moves),
                self.stats.solve_time.as_secs_f64()
            ),
            None => info!(
                "No solution found after {} nodes in {:.3}s",
                self.stats.nodes_explored,
                self.stats.solve_time.as_secs_f64()
            ),
        }
        solution
    }
}
