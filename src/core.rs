pub mod grid;
pub mod powertrain;
pub mod solution;
pub mod solution_space;
pub mod solver;
pub mod step;
pub mod summary;
