pub use basis_set::{AngularMomentum, BasisFunction, BasisSet};
pub use shell::{cartesian_components, primitive_norm, AoBasis, Shell};

pub mod basis_set;
pub mod shell;
