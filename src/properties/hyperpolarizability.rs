use crate::cphf::Reference;
use crate::integrals::{JkBuilder, JkEngine};
use ndarray::prelude::*;

/// Axis-pair labels of the packed rows, in the order the tensor is stored.
pub const BETA_ROWS: [&str; 6] = ["xx", "yy", "zz", "xy", "xz", "yz"];

// first and second axis of each packed row
const PAIR_A: [usize; 6] = [0, 1, 2, 0, 0, 1];
const PAIR_B: [usize; 6] = [0, 1, 2, 1, 2, 2];

fn trace_occ(product: &Array2<f64>, n_occ: usize) -> f64 {
    product.diag().slice(s![0..n_occ]).sum()
}

/// The static first dipole hyperpolarizability over the 2n+1 rule, packed
/// into six rows for the symmetric axis pairs xx, yy, zz, xy, xz, yz and
/// three columns for the remaining axis.
///
/// The ingredients are the full MO dipole matrices, the orbital rotation
/// matrices U built from the converged response vectors, the perturbed
/// Fock-like matrices G and their energy-weighted combinations E. The
/// frequency shift `omega` enters the energy weights and is zero for the
/// static tensor. All six permutations of each index triple enter the
/// contraction, so the result keeps the full permutation symmetry of the
/// static tensor.
pub fn hyperpolarizability(
    reference: &Reference,
    dipole: &[Array2<f64>; 3],
    response: &[Array2<f64>; 3],
    engine: &JkEngine,
    omega: f64,
) -> Array2<f64> {
    let n_occ: usize = reference.n_occ;
    let n_virt: usize = reference.n_virt();
    let n_orb: usize = reference.n_orb();
    let orbs: ArrayView2<f64> = reference.orbs;
    let orbe: ArrayView1<f64> = reference.orbe;
    let occ: Array2<f64> = reference.occ_coefficients().to_owned();
    let virt: ArrayView2<f64> = reference.virt_coefficients();

    let dmo: [Array2<f64>; 3] = [
        orbs.t().dot(&dipole[0]).dot(&orbs),
        orbs.t().dot(&dipole[1]).dot(&orbs),
        orbs.t().dot(&dipole[2]).dot(&orbs),
    ];

    // antisymmetric orbital rotations carrying the response vectors
    let mut u: Vec<Array2<f64>> = Vec::with_capacity(3);
    for d in 0..3 {
        let mut rotation: Array2<f64> = Array2::zeros((n_orb, n_orb));
        for i in 0..n_occ {
            for a in 0..n_virt {
                rotation[[i, n_occ + a]] = 0.5 * response[d][[i, a]];
                rotation[[n_occ + a, i]] = -0.5 * response[d][[i, a]];
            }
        }
        u.push(rotation);
    }

    // perturbed Fock contributions from the relaxed densities, batched
    // through the J/K builder like the response iterations
    let mut builder: JkBuilder = JkBuilder::new(engine);
    let slots: [usize; 3] = [
        builder.add_pair(occ.clone(), virt.dot(&response[0].t())),
        builder.add_pair(occ.clone(), virt.dot(&response[1].t())),
        builder.add_pair(occ.clone(), virt.dot(&response[2].t())),
    ];
    builder.compute();
    let mut g: Vec<Array2<f64>> = Vec::with_capacity(3);
    for d in 0..3 {
        let j: &Array2<f64> = builder.coulomb(slots[d]);
        let k: &Array2<f64> = builder.exchange(slots[d]);
        let m: Array2<f64> = 0.5 * (4.0 * j - &k.t() - k);
        g.push(&dmo[d] + &orbs.t().dot(&m).dot(&orbs));
    }

    // energy-weighted combination, E[p, q] = G[p, q] + (eps_p + omega - eps_q) U[p, q]
    let mut e: Vec<Array2<f64>> = Vec::with_capacity(3);
    for d in 0..3 {
        e.push(Array2::from_shape_fn((n_orb, n_orb), |(p, q)| {
            g[d][[p, q]] + (orbe[p] + omega - orbe[q]) * u[d][[p, q]]
        }));
    }

    let mut beta: Array2<f64> = Array2::zeros((6, 3));
    for r in 0..6 {
        let b: usize = PAIR_A[r];
        let c: usize = PAIR_B[r];
        for a in 0..3 {
            let left: f64 = 2.0 * trace_occ(&u[a].dot(&g[b]).dot(&u[c]), n_occ)
                + 2.0 * trace_occ(&u[a].dot(&g[c]).dot(&u[b]), n_occ)
                + 2.0 * trace_occ(&u[c].dot(&g[a]).dot(&u[b]), n_occ);
            let right: f64 = trace_occ(&u[c].dot(&u[b]).dot(&e[a]), n_occ)
                + trace_occ(&u[b].dot(&u[c]).dot(&e[a]), n_occ)
                + trace_occ(&u[c].dot(&u[a]).dot(&e[b]), n_occ)
                + trace_occ(&u[a].dot(&u[c]).dot(&e[b]), n_occ)
                + trace_occ(&u[b].dot(&u[a]).dot(&e[c]), n_occ)
                + trace_occ(&u[a].dot(&u[b]).dot(&e[c]), n_occ);
            beta[[r, a]] = -2.0 * (left - right);
        }
    }
    beta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{AoBasis, BasisSet};
    use crate::cphf::{perturbation_operators, solve_response, CphfMode, SolverConfig};
    use crate::initialization::Molecule;
    use crate::integrals::{eri_tensor, one_electron_integrals, OneElectronIntegrals};
    use crate::io::settings::Configuration;
    use crate::scf::{run_rhf, ScfResult};
    use approx::assert_abs_diff_eq;

    fn water_beta(omega: f64) -> Array2<f64> {
        let molecule: Molecule = Molecule::from(("data/water.xyz", Configuration::default()));
        let basis_set: BasisSet = BasisSet::from_name("sto-3g");
        let basis: AoBasis = AoBasis::new(&molecule, &basis_set);
        let ints: OneElectronIntegrals = one_electron_integrals(&basis, &molecule.atoms);
        let engine: JkEngine = JkEngine::new(eri_tensor(&basis));
        let scf: ScfResult = run_rhf(
            &molecule,
            ints.s.view(),
            ints.t.view(),
            ints.v.view(),
            &engine,
        )
        .unwrap();
        let reference: Reference =
            Reference::new(scf.orbs.view(), scf.orbe.view(), molecule.n_occ);
        let perturbations: [Array2<f64>; 3] = perturbation_operators(&reference, &ints.dipole);
        let config: SolverConfig = SolverConfig {
            mode: CphfMode::Direct,
            max_cycles: 50,
            conv: 1.0e-14,
            use_diis: true,
            memory_budget_gb: 2.0,
        };
        let response: [Array2<f64>; 3] =
            solve_response(&reference, &perturbations, &engine, &config).unwrap();
        hyperpolarizability(&reference, &ints.dipole, &response, &engine, omega)
    }

    #[test]
    fn water_sto_3g_reference_components() {
        let beta: Array2<f64> = water_beta(0.0);
        assert_abs_diff_eq!(beta[[0, 2]], 0.13857969, epsilon = 1e-6);
        assert_abs_diff_eq!(beta[[1, 2]], -9.34243101, epsilon = 1e-6);
        assert_abs_diff_eq!(beta[[2, 2]], -5.20670472, epsilon = 1e-6);
    }

    #[test]
    fn symmetry_forbidden_components_vanish() {
        let beta: Array2<f64> = water_beta(0.0);
        // C2 axis along z, molecule in the yz plane: every component with an
        // odd power of x or of y vanishes
        for a in 0..3 {
            assert_abs_diff_eq!(beta[[3, a]], 0.0, epsilon = 1e-8);
        }
        for &r in [0usize, 1, 2, 5].iter() {
            assert_abs_diff_eq!(beta[[r, 0]], 0.0, epsilon = 1e-8);
        }
        assert_abs_diff_eq!(beta[[0, 1]], 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(beta[[1, 1]], 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(beta[[2, 1]], 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(beta[[4, 1]], 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(beta[[4, 2]], 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(beta[[5, 2]], 0.0, epsilon = 1e-8);
    }

    #[test]
    fn kleinman_symmetry_holds_at_zero_frequency() {
        let beta: Array2<f64> = water_beta(0.0);
        // beta(xz),x equals beta(xx),z and beta(yz),y equals beta(yy),z
        assert_abs_diff_eq!(beta[[4, 0]], beta[[0, 2]], epsilon = 1e-8);
        assert_abs_diff_eq!(beta[[5, 1]], beta[[1, 2]], epsilon = 1e-8);
    }

    #[test]
    fn uniform_frequency_shift_cancels_in_the_contraction() {
        // the six right-hand orderings of U U E sum to an antisymmetric
        // matrix, so a uniform shift carries no occupied trace
        let beta_static: Array2<f64> = water_beta(0.0);
        let beta_shifted: Array2<f64> = water_beta(0.3);
        assert_abs_diff_eq!(beta_static, beta_shifted, epsilon = 1e-8);
    }
}
