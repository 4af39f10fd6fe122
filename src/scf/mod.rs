pub use diis::Diis;
pub use routine::{density_matrix, run_rhf, ScfError, ScfResult};

pub(crate) mod diis;
pub mod logging;
pub(crate) mod routine;
