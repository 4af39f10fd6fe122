pub use solver::{
    perturbation_operators, polarizability, solve_response, CphfError, CphfMode, Reference,
    SolverConfig,
};

pub mod logging;
pub(crate) mod solver;
