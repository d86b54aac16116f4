pub mod annealing;
pub mod annealing_params;
pub mod construction;
pub mod neighborhood;
pub mod observer;
pub mod score;
pub mod solution;
pub mod solver;
pub mod solver_params;
