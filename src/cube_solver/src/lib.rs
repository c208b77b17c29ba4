#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! A facelet-level model of the 3x3 cube together with a best-effort,
//! time-bounded solver.
//!
//! The cube is an array of 54 labels partitioned into six faces; each of the
//! 18 face turns is a permutation of those labels. [`solver::Solver`] runs a
//! fixed pipeline of bounded strategies and reports which one succeeded in
//! [`stats::SearchStatistics`].

pub mod cube;
pub mod heuristic;
pub mod moves;
pub mod optimizer;
pub mod solver;
pub(crate) mod state_stack;
pub mod stats;

pub use cube::{Cube, CubeError, Face};
pub use heuristic::{Heuristic, UnknownHeuristicError};
pub use moves::{Move, MoveError, Turn};
pub use solver::{Solver, SolverConfig, SolverError, Strategy};
pub use stats::SearchStatistics;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
