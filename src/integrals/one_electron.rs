use crate::basis::shell::AoBasis;
use crate::basis::shell::Shell;
use crate::basis::primitive_norm;
use crate::initialization::Atom;
use crate::integrals::hermite::{hermite_coulomb, hermite_expansion};
use nalgebra::Vector3;
use ndarray::prelude::*;
use std::f64::consts::PI;

/// The one-electron integral matrices in the final (spherical) basis.
/// The dipole matrices are the matrix elements of the electronic dipole
/// operator -r about the origin, the charge of the electron included.
pub struct OneElectronIntegrals {
    pub s: Array2<f64>,
    pub t: Array2<f64>,
    pub v: Array2<f64>,
    pub dipole: [Array2<f64>; 3],
}

/// Overlap, kinetic, nuclear-attraction and dipole integrals over all shell
/// pairs, assembled by McMurchie-Davidson recursion.
pub fn one_electron_integrals(basis: &AoBasis, atoms: &[Atom]) -> OneElectronIntegrals {
    let n_bf: usize = basis.n_bf;
    let mut s: Array2<f64> = Array2::zeros((n_bf, n_bf));
    let mut t: Array2<f64> = Array2::zeros((n_bf, n_bf));
    let mut v: Array2<f64> = Array2::zeros((n_bf, n_bf));
    let mut dipole: [Array2<f64>; 3] = [
        Array2::zeros((n_bf, n_bf)),
        Array2::zeros((n_bf, n_bf)),
        Array2::zeros((n_bf, n_bf)),
    ];

    let n_shells: usize = basis.shells.len();
    for ish in 0..n_shells {
        let sa: &Shell = &basis.shells[ish];
        for jsh in ish..n_shells {
            let sb: &Shell = &basis.shells[jsh];
            let (na, nb): (usize, usize) = (sa.n_cart(), sb.n_cart());
            let mut b_s: Array2<f64> = Array2::zeros((na, nb));
            let mut b_t: Array2<f64> = Array2::zeros((na, nb));
            let mut b_v: Array2<f64> = Array2::zeros((na, nb));
            let mut b_d: [Array2<f64>; 3] = [
                Array2::zeros((na, nb)),
                Array2::zeros((na, nb)),
                Array2::zeros((na, nb)),
            ];
            let ab: Vector3<f64> = sa.center - sb.center;

            for (ia, &alpha) in sa.exponents.iter().enumerate() {
                let ca: f64 = sa.coefficients[ia];
                for (ib, &beta) in sb.exponents.iter().enumerate() {
                    let cb: f64 = sb.coefficients[ib];
                    let p: f64 = alpha + beta;
                    let pc: f64 = (PI / p).powf(1.5);
                    let pcenter: Vector3<f64> = (alpha * sa.center + beta * sb.center) / p;
                    // tables sized for the j + 2 shift of the kinetic part
                    let e: [Array3<f64>; 3] = [
                        hermite_expansion(sa.l, sb.l + 2, alpha, beta, ab[0]),
                        hermite_expansion(sa.l, sb.l + 2, alpha, beta, ab[1]),
                        hermite_expansion(sa.l, sb.l + 2, alpha, beta, ab[2]),
                    ];

                    for (c1, l1) in sa.components.iter().enumerate() {
                        let n1: f64 = primitive_norm(alpha, l1[0], l1[1], l1[2]);
                        for (c2, l2) in sb.components.iter().enumerate() {
                            let n2: f64 = primitive_norm(beta, l2[0], l2[1], l2[2]);
                            let cc: f64 = ca * cb * n1 * n2;
                            let o: [f64; 3] = [
                                e[0][[l1[0] as usize, l2[0] as usize, 0]],
                                e[1][[l1[1] as usize, l2[1] as usize, 0]],
                                e[2][[l1[2] as usize, l2[2] as usize, 0]],
                            ];
                            b_s[[c1, c2]] += cc * pc * o[0] * o[1] * o[2];

                            // kinetic energy, one dimension differentiated at a time
                            let mut tk: [f64; 3] = [0.0; 3];
                            for d in 0..3 {
                                let i: usize = l1[d] as usize;
                                let j: usize = l2[d] as usize;
                                let mut tt: f64 = beta * (2 * j + 1) as f64 * e[d][[i, j, 0]];
                                tt -= 2.0 * beta * beta * e[d][[i, j + 2, 0]];
                                if j >= 2 {
                                    tt -= 0.5 * (j * (j - 1)) as f64 * e[d][[i, j - 2, 0]];
                                }
                                tk[d] = tt;
                            }
                            b_t[[c1, c2]] += cc
                                * pc
                                * (tk[0] * o[1] * o[2] + o[0] * tk[1] * o[2] + o[0] * o[1] * tk[2]);

                            // dipole moment, the electron charge gives the minus sign
                            for d in 0..3 {
                                let i: usize = l1[d] as usize;
                                let j: usize = l2[d] as usize;
                                let dd: f64 = e[d][[i, j, 1]] + pcenter[d] * e[d][[i, j, 0]];
                                let mut value: f64 = cc * pc * dd;
                                for d2 in 0..3 {
                                    if d2 != d {
                                        value *= o[d2];
                                    }
                                }
                                b_d[d][[c1, c2]] -= value;
                            }

                            // nuclear attraction summed over all centers
                            let mut vs: f64 = 0.0;
                            for atom in atoms.iter() {
                                let rc: Array3<f64> = hermite_coulomb(
                                    sa.l + sb.l,
                                    p,
                                    pcenter[0] - atom.xyz[0],
                                    pcenter[1] - atom.xyz[1],
                                    pcenter[2] - atom.xyz[2],
                                );
                                let mut acc: f64 = 0.0;
                                for tt in 0..=(l1[0] + l2[0]) as usize {
                                    let ex: f64 = e[0][[l1[0] as usize, l2[0] as usize, tt]];
                                    if ex == 0.0 {
                                        continue;
                                    }
                                    for u in 0..=(l1[1] + l2[1]) as usize {
                                        let ey: f64 = e[1][[l1[1] as usize, l2[1] as usize, u]];
                                        if ey == 0.0 {
                                            continue;
                                        }
                                        for w in 0..=(l1[2] + l2[2]) as usize {
                                            let ez: f64 =
                                                e[2][[l1[2] as usize, l2[2] as usize, w]];
                                            if ez == 0.0 {
                                                continue;
                                            }
                                            acc += ex * ey * ez * rc[[tt, u, w]];
                                        }
                                    }
                                }
                                vs -= atom.number as f64 * acc;
                            }
                            b_v[[c1, c2]] += cc * (2.0 * PI / p) * vs;
                        }
                    }
                }
            }

            // cartesian to spherical on both shells, then scatter both triangles
            let wa: Array2<f64> = sa.spherical_matrix();
            let wb: Array2<f64> = sb.spherical_matrix();
            let oi: usize = basis.offsets[ish];
            let oj: usize = basis.offsets[jsh];
            scatter_symmetric(&mut s, &wa.dot(&b_s).dot(&wb.t()), oi, oj);
            scatter_symmetric(&mut t, &wa.dot(&b_t).dot(&wb.t()), oi, oj);
            scatter_symmetric(&mut v, &wa.dot(&b_v).dot(&wb.t()), oi, oj);
            for d in 0..3 {
                scatter_symmetric(&mut dipole[d], &wa.dot(&b_d[d]).dot(&wb.t()), oi, oj);
            }
        }
    }

    OneElectronIntegrals { s, t, v, dipole }
}

fn scatter_symmetric(target: &mut Array2<f64>, block: &Array2<f64>, oi: usize, oj: usize) {
    for (r, row) in block.outer_iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            target[[oi + r, oj + c]] = *value;
            target[[oj + c, oi + r]] = *value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisSet;
    use crate::initialization::Molecule;
    use crate::io::settings::Configuration;
    use approx::assert_abs_diff_eq;

    fn h2() -> Molecule {
        let numbers: Vec<u8> = vec![1, 1];
        let coords: Array2<f64> =
            Array2::from_shape_vec((2, 3), vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.4]).unwrap();
        Molecule::from((numbers, coords, Configuration::default()))
    }

    #[test]
    fn h2_sto_3g_reference_integrals() {
        // Szabo-Ostlund values for H2 at R = 1.4 bohr
        let molecule: Molecule = h2();
        let basis_set: BasisSet = BasisSet::from_name("sto-3g");
        let basis: AoBasis = AoBasis::new(&molecule, &basis_set);
        let ints: OneElectronIntegrals = one_electron_integrals(&basis, &molecule.atoms);
        assert_abs_diff_eq!(ints.s[[0, 0]], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(ints.s[[0, 1]], 0.6593182061, epsilon = 1e-9);
        assert_abs_diff_eq!(ints.t[[0, 0]], 0.7600318836, epsilon = 1e-9);
        assert_abs_diff_eq!(ints.v[[0, 0]], -1.8804408925, epsilon = 1e-9);
    }

    #[test]
    fn h2_dipole_center_of_charge() {
        // the center-of-mass frame puts the H2 bond center at z = 0, the
        // diagonal dipole elements are the (negated) orbital centers
        let molecule: Molecule = h2();
        let basis_set: BasisSet = BasisSet::from_name("sto-3g");
        let basis: AoBasis = AoBasis::new(&molecule, &basis_set);
        let ints: OneElectronIntegrals = one_electron_integrals(&basis, &molecule.atoms);
        let z0: f64 = molecule.atoms[0].xyz[2];
        let z1: f64 = molecule.atoms[1].xyz[2];
        assert_abs_diff_eq!(ints.dipole[2][[0, 0]], -z0, epsilon = 1e-10);
        assert_abs_diff_eq!(ints.dipole[2][[1, 1]], -z1, epsilon = 1e-10);
        assert_abs_diff_eq!(ints.dipole[0][[0, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ints.dipole[1][[1, 1]], 0.0, epsilon = 1e-12);
    }
}
