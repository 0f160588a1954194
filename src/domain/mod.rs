pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod tour;
pub mod validate;
