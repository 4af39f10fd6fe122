use crate::basis::{AoBasis, BasisSet};
use crate::cphf::{
    perturbation_operators, polarizability, solve_response, CphfError, Reference, SolverConfig,
};
use crate::initialization::Molecule;
use crate::integrals::{eri_tensor, one_electron_integrals, JkEngine, OneElectronIntegrals};
use crate::properties::hyperpolarizability::hyperpolarizability;
use crate::properties::logging::*;
use crate::scf::{run_rhf, ScfError, ScfResult};
use crate::utils::Timer;
use log::{log_enabled, Level};
use ndarray::prelude::*;
use std::fmt;

/// Error of the property pipeline, wrapping the failing stage.
#[derive(Debug)]
pub enum BetaError {
    Scf(ScfError),
    Cphf(CphfError),
}

impl From<ScfError> for BetaError {
    fn from(error: ScfError) -> Self {
        BetaError::Scf(error)
    }
}

impl From<CphfError> for BetaError {
    fn from(error: CphfError) -> Self {
        BetaError::Cphf(error)
    }
}

impl fmt::Display for BetaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            BetaError::Scf(error) => write!(f, "{}", error),
            BetaError::Cphf(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for BetaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BetaError::Scf(error) => Some(error),
            BetaError::Cphf(error) => Some(error),
        }
    }
}

/// The outputs of one static response calculation.
pub struct StaticResponse {
    /// Total RHF energy in Hartree
    pub energy: f64,
    /// Static dipole polarizability, 3 x 3 in atomic units
    pub polarizability: Array2<f64>,
    /// Static first hyperpolarizability, packed 6 x 3 in atomic units
    pub hyperpolarizability: Array2<f64>,
}

/// Runs the full property pipeline on a molecule: AO integrals, RHF
/// reference, coupled-perturbed response and the tensor assembly.
pub fn static_response(molecule: &Molecule) -> Result<StaticResponse, BetaError> {
    let solver: SolverConfig = SolverConfig::from_config(&molecule.config.cphf)?;

    let timer: Timer = Timer::start();
    let basis_set: BasisSet = BasisSet::from_name(molecule.config.mol.basis_set.as_str());
    let basis: AoBasis = AoBasis::new(molecule, &basis_set);
    let ints: OneElectronIntegrals = one_electron_integrals(&basis, &molecule.atoms);
    let engine: JkEngine = JkEngine::new(eri_tensor(&basis));
    if log_enabled!(Level::Info) {
        print_integral_timing(basis.n_bf, &timer);
    }

    let scf: ScfResult = run_rhf(
        molecule,
        ints.s.view(),
        ints.t.view(),
        ints.v.view(),
        &engine,
    )?;
    let reference: Reference = Reference::new(scf.orbs.view(), scf.orbe.view(), molecule.n_occ);

    let perturbations: [Array2<f64>; 3] = perturbation_operators(&reference, &ints.dipole);
    let response: [Array2<f64>; 3] =
        solve_response(&reference, &perturbations, &engine, &solver)?;
    let alpha: Array2<f64> = polarizability(&response, &perturbations);
    let beta: Array2<f64> =
        hyperpolarizability(&reference, &ints.dipole, &response, &engine, 0.0);
    if log_enabled!(Level::Info) {
        print_polarizability(alpha.view());
        print_hyperpolarizability(beta.view());
    }

    Ok(StaticResponse {
        energy: scf.energy,
        polarizability: alpha,
        hyperpolarizability: beta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::settings::Configuration;
    use approx::assert_abs_diff_eq;

    #[test]
    fn water_sto_3g_pipeline() {
        let molecule: Molecule = Molecule::from(("data/water.xyz", Configuration::default()));
        let result: StaticResponse = static_response(&molecule).unwrap();
        assert_abs_diff_eq!(result.energy, -74.9420798971, epsilon = 1e-9);
        assert_eq!(result.polarizability.dim(), (3, 3));
        assert_eq!(result.hyperpolarizability.dim(), (6, 3));
        assert_abs_diff_eq!(result.polarizability[[1, 1]], 7.93556415, epsilon = 1e-6);
        assert_abs_diff_eq!(
            result.hyperpolarizability[[2, 2]],
            -5.20670472,
            epsilon = 1e-6
        );
    }
}
