use crate::solver::Strategy;
use std::{fmt, time::Duration};

/// Counters describing the most recent solve. Overwritten at the start of
/// every solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Cube states generated across every strategy that ran.
    pub nodes_explored: u64,
    pub solution_found: bool,
    pub solution_length: usize,
    pub solve_time: Duration,
    /// The deepest move count any strategy searched to.
    pub max_depth_reached: usize,
    /// The selected heuristic evaluated on the input cube.
    pub initial_estimate: usize,
    /// The strategy that produced the solution, if any.
    pub strategy: Option<Strategy>,
}

impl SearchStatistics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn reached_depth(&mut self, depth: usize) {
        self.max_depth_reached = self.max_depth_reached.max(depth);
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nodes: {}, Solution: {}, Length: {}, Time: {:.2}s",
            self.nodes_explored,
            if self.solution_found { "Yes" } else { "No" },
            self.solution_length,
            self.solve_time.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let stats = SearchStatistics {
            nodes_explored: 1234,
            solution_found: true,
            solution_length: 7,
            solve_time: Duration::from_millis(1500),
            ..Default::default()
        };
        assert_eq!(
            stats.to_string(),
            "Nodes: 1234, Solution: Yes, Length: 7, Time: 1.50s"
        );
        assert_eq!(
            SearchStatistics::default().to_string(),
            "Nodes: 0, Solution: No, Length: 0, Time: 0.00s"
        );
    }

    #[test]
    fn test_reset() {
        let mut stats = SearchStatistics {
            nodes_explored: 10,
            strategy: Some(Strategy::Greedy),
            ..Default::default()
        };
        stats.reached_depth(4);
        stats.reached_depth(2);
        assert_eq!(stats.max_depth_reached, 4);
        stats.reset();
        assert_eq!(stats, SearchStatistics::default());
    }
}
