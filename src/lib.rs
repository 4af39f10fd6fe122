//! Static dipole response properties from a coupled-perturbed RHF reference.
//!
//! The crate computes the static polarizability and the static first
//! hyperpolarizability of closed-shell molecules: AO integrals over
//! contracted Gaussians in the McMurchie-Davidson scheme, a DIIS
//! accelerated RHF reference, the coupled-perturbed equations for the
//! three dipole perturbations (solved by direct inversion of the orbital
//! Hessian or iteratively) and the 2n+1 rule contraction of the converged
//! response vectors.

pub mod basis;
pub mod constants;
pub mod cphf;
pub mod defaults;
pub mod initialization;
pub mod integrals;
pub mod io;
pub mod properties;
pub mod scf;
pub mod utils;

pub use crate::initialization::Molecule;
pub use crate::io::Configuration;
pub use crate::properties::{static_response, StaticResponse};
