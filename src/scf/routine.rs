use crate::defaults;
use crate::initialization::Molecule;
use crate::integrals::JkEngine;
use crate::scf::diis::Diis;
use crate::scf::logging::*;
use crate::utils::Timer;
use log::{log_enabled, Level};
use ndarray::prelude::*;
use ndarray_linalg::*;
use std::fmt;
use std::iter::FromIterator;

#[derive(Debug, Clone)]
pub struct ScfError {
    pub message: String,
    iteration: usize,
    energy_diff: f64,
    diis_error: f64,
}

impl ScfError {
    pub fn new(iter: usize, energy_diff: f64, diis_error: f64) -> Self {
        let message: String = format! {"SCF-Routine failed in Iteration: {}. The DIIS error\
         at the last iteration was {} and the energy\
         difference was {}",
        iter,
        diis_error,
        energy_diff};
        Self {
            message,
            iteration: iter,
            energy_diff,
            diis_error,
        }
    }
}

impl fmt::Display for ScfError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write! {f, "{}", self.message.as_str()}
    }
}

impl std::error::Error for ScfError {
    fn description(&self) -> &str {
        self.message.as_str()
    }
}

/// Converged restricted Hartree-Fock reference: total energy, orbital
/// coefficients (columns) and orbital energies in ascending order.
pub struct ScfResult {
    pub energy: f64,
    pub orbs: Array2<f64>,
    pub orbe: Array1<f64>,
}

/// The spin-restricted closed-shell density matrix without occupation
/// factors, D_mn = sum_i C_mi C_ni over the occupied columns.
pub fn density_matrix(orbs: ArrayView2<f64>, n_occ: usize) -> Array2<f64> {
    let c_occ: ArrayView2<f64> = orbs.slice(s![.., 0..n_occ]);
    c_occ.dot(&c_occ.t())
}

/// Restricted Hartree-Fock with DIIS accelerated Roothaan iterations.
/// The Fock matrix is rebuilt from the full repulsion tensor each cycle,
/// convergence requires both the energy change and the DIIS error below
/// their thresholds.
pub fn run_rhf(
    molecule: &Molecule,
    s: ArrayView2<f64>,
    t: ArrayView2<f64>,
    v: ArrayView2<f64>,
    engine: &JkEngine,
) -> Result<ScfResult, ScfError> {
    let timer: Timer = Timer::start();

    // SCF settings from the user input
    let max_iter: usize = molecule.config.scf.scf_max_cycles;
    let scf_energy_conv: f64 = molecule.config.scf.scf_energy_conv;
    let scf_density_conv: f64 = molecule.config.scf.scf_density_conv;
    let use_diis: bool = molecule.config.scf.scf_use_diis;

    let n_bf: usize = s.nrows();
    let n_occ: usize = molecule.n_occ;
    let rep_energy: f64 = molecule.nuclear_repulsion();
    let h0: Array2<f64> = &t + &v;

    if log_enabled!(Level::Info) {
        print_scf_init(
            max_iter,
            molecule.config.mol.basis_set.as_str(),
            rep_energy,
            use_diis,
        );
    }

    // convert generalized eigenvalue problem F.C = S.C.e into eigenvalue
    // problem F'.C' = C'.e by Loewdin orthogonalization, X = S^(-1/2)
    let x: Array2<f64> = s.ssqrt(UPLO::Upper).unwrap().inv().unwrap();

    // core Hamiltonian guess
    let h_prime: Array2<f64> = x.t().dot(&h0).dot(&x);
    let tmp: (Array1<f64>, Array2<f64>) = h_prime.eigh(UPLO::Upper).unwrap();
    let mut orbe: Array1<f64> = tmp.0;
    let mut orbs: Array2<f64> = x.dot(&tmp.1);
    let mut p: Array2<f64> = density_matrix(orbs.view(), n_occ);

    let mut accel: Diis = Diis::new(defaults::DIIS_LIMIT);
    let mut last_energy: f64 = 0.0;
    let mut total_energy: Result<f64, ScfError> = Ok(0.0);
    let mut scf_energy: f64 = 0.0;

    'scf_loop: for iter in 0..max_iter {
        let (j, k): (Array2<f64>, Array2<f64>) = engine.coulomb_exchange(p.view());
        let fock: Array2<f64> = &h0 + &(2.0 * j - k);

        // DIIS error is the orbital gradient in the orthonormal basis,
        // X.(FDS - SDF).X
        let fds: Array2<f64> = fock.dot(&p).dot(&s);
        let commutator: Array2<f64> = &fds - &fds.t();
        let error: Array2<f64> = x.dot(&commutator).dot(&x);
        let diis_error: f64 = (error.mapv(|e| e * e).sum() / (n_bf * n_bf) as f64).sqrt();

        scf_energy = (&p * &(&h0 + &fock)).sum();

        if log_enabled!(Level::Info) {
            print_energies_at_iteration(iter, scf_energy, rep_energy, last_energy, diis_error);
        }

        let energy_diff: f64 = last_energy - scf_energy;
        let converged: bool =
            energy_diff.abs() < scf_energy_conv && diis_error < scf_density_conv;
        last_energy = scf_energy;

        if converged {
            total_energy = Ok(scf_energy + rep_energy);
            break 'scf_loop;
        }
        total_energy = Err(ScfError::new(iter, energy_diff, diis_error));

        // extrapolate the raw Fock matrix and rediagonalize
        let fock: Array2<f64> = if use_diis {
            accel.next(fock, Array1::from_iter(error.iter().cloned()))
        } else {
            fock
        };
        let f_prime: Array2<f64> = x.t().dot(&fock).dot(&x);
        let tmp: (Array1<f64>, Array2<f64>) = f_prime.eigh(UPLO::Upper).unwrap();
        orbe = tmp.0;
        orbs = x.dot(&tmp.1);
        p = density_matrix(orbs.view(), n_occ);
    }

    if log_enabled!(Level::Info) {
        let f: Vec<f64> = (0..n_bf)
            .map(|i| if i < n_occ { 2.0 } else { 0.0 })
            .collect();
        print_scf_end(
            timer,
            molecule.config.jobtype.as_str(),
            scf_energy,
            rep_energy,
            orbe.view(),
            &f,
        );
    }

    let energy: f64 = total_energy?;
    Ok(ScfResult { energy, orbs, orbe })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{AoBasis, BasisSet};
    use crate::integrals::{eri_tensor, one_electron_integrals, OneElectronIntegrals};
    use crate::io::settings::Configuration;
    use approx::assert_abs_diff_eq;

    fn rhf_energy(molecule: &Molecule, basis_name: &str) -> f64 {
        let basis_set: BasisSet = BasisSet::from_name(basis_name);
        let basis: AoBasis = AoBasis::new(molecule, &basis_set);
        let ints: OneElectronIntegrals = one_electron_integrals(&basis, &molecule.atoms);
        let engine: JkEngine = JkEngine::new(eri_tensor(&basis));
        let result: ScfResult = run_rhf(
            molecule,
            ints.s.view(),
            ints.t.view(),
            ints.v.view(),
            &engine,
        )
        .unwrap();
        result.energy
    }

    #[test]
    fn h2_sto_3g_energy() {
        let numbers: Vec<u8> = vec![1, 1];
        let coords: Array2<f64> =
            Array2::from_shape_vec((2, 3), vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.4]).unwrap();
        let molecule: Molecule = Molecule::from((numbers, coords, Configuration::default()));
        assert_abs_diff_eq!(rhf_energy(&molecule, "sto-3g"), -1.1167143251, epsilon = 1e-9);
    }

    #[test]
    fn water_sto_3g_energy() {
        let molecule: Molecule = Molecule::from(("data/water.xyz", Configuration::default()));
        assert_abs_diff_eq!(
            rhf_energy(&molecule, "sto-3g"),
            -74.9420798971,
            epsilon = 1e-9
        );
    }

    #[test]
    fn nonconvergence_is_an_error() {
        let mut config: Configuration = Configuration::default();
        config.scf.scf_max_cycles = 2;
        config.scf.scf_energy_conv = 1.0e-14;
        config.scf.scf_density_conv = 1.0e-14;
        let molecule: Molecule = Molecule::from(("data/water.xyz", config));
        let basis_set: BasisSet = BasisSet::from_name("sto-3g");
        let basis: AoBasis = AoBasis::new(&molecule, &basis_set);
        let ints: OneElectronIntegrals = one_electron_integrals(&basis, &molecule.atoms);
        let engine: JkEngine = JkEngine::new(eri_tensor(&basis));
        let result = run_rhf(
            &molecule,
            ints.s.view(),
            ints.t.view(),
            ints.v.view(),
            &engine,
        );
        assert!(result.is_err());
    }
}
