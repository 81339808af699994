//! Materialized islands handed to the constraint solver.

mod island_solver;

pub use island_solver::IslandSolver;
