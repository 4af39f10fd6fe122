use crate::basis::primitive_norm;
use crate::basis::shell::{AoBasis, Shell};
use crate::integrals::hermite::{hermite_coulomb, hermite_expansion};
use nalgebra::Vector3;
use ndarray::prelude::*;
use std::f64::consts::PI;

/// Hermite expansion terms of one contracted primitive product, screened and
/// flattened so that the quartet loop only multiplies and adds.
pub struct PrimitivePair {
    pub p: f64,
    pub center: Vector3<f64>,
    pub coef: f64,
    pub terms: Vec<Vec<(usize, usize, usize, f64)>>,
    pub terms_phased: Vec<Vec<(usize, usize, usize, f64)>>,
}

pub struct ShellPair {
    pub la: usize,
    pub lb: usize,
    pub n_cart: usize,
    pub prims: Vec<PrimitivePair>,
}

impl ShellPair {
    pub fn new(sa: &Shell, sb: &Shell) -> Self {
        let ab: Vector3<f64> = sa.center - sb.center;
        let mut prims: Vec<PrimitivePair> = Vec::new();
        for (ia, &alpha) in sa.exponents.iter().enumerate() {
            for (ib, &beta) in sb.exponents.iter().enumerate() {
                let coef: f64 = sa.coefficients[ia] * sb.coefficients[ib];
                let p: f64 = alpha + beta;
                let q: f64 = alpha * beta / p;
                let kab: f64 = (-q * ab.norm_squared()).exp();
                if coef.abs() * kab < 1.0e-18 {
                    continue;
                }
                let center: Vector3<f64> = (alpha * sa.center + beta * sb.center) / p;
                let e: [Array3<f64>; 3] = [
                    hermite_expansion(sa.l, sb.l, alpha, beta, ab[0]),
                    hermite_expansion(sa.l, sb.l, alpha, beta, ab[1]),
                    hermite_expansion(sa.l, sb.l, alpha, beta, ab[2]),
                ];
                let n_pairs: usize = sa.components.len() * sb.components.len();
                let mut terms: Vec<Vec<(usize, usize, usize, f64)>> =
                    Vec::with_capacity(n_pairs);
                let mut terms_phased: Vec<Vec<(usize, usize, usize, f64)>> =
                    Vec::with_capacity(n_pairs);
                for l1 in sa.components.iter() {
                    let n1: f64 = primitive_norm(alpha, l1[0], l1[1], l1[2]);
                    for l2 in sb.components.iter() {
                        let n2: f64 = primitive_norm(beta, l2[0], l2[1], l2[2]);
                        let nn: f64 = n1 * n2;
                        let mut tl: Vec<(usize, usize, usize, f64)> = Vec::new();
                        for t in 0..=(l1[0] + l2[0]) as usize {
                            let ex: f64 = e[0][[l1[0] as usize, l2[0] as usize, t]];
                            if ex == 0.0 {
                                continue;
                            }
                            for u in 0..=(l1[1] + l2[1]) as usize {
                                let ey: f64 = e[1][[l1[1] as usize, l2[1] as usize, u]];
                                if ey == 0.0 {
                                    continue;
                                }
                                for v in 0..=(l1[2] + l2[2]) as usize {
                                    let ez: f64 = e[2][[l1[2] as usize, l2[2] as usize, v]];
                                    if ez == 0.0 {
                                        continue;
                                    }
                                    tl.push((t, u, v, nn * ex * ey * ez));
                                }
                            }
                        }
                        // the ket side carries the (-1)^(t+u+v) phase of R
                        let tl_ph: Vec<(usize, usize, usize, f64)> = tl
                            .iter()
                            .map(|&(t, u, v, value)| {
                                if (t + u + v) % 2 == 0 {
                                    (t, u, v, value)
                                } else {
                                    (t, u, v, -value)
                                }
                            })
                            .collect();
                        terms.push(tl);
                        terms_phased.push(tl_ph);
                    }
                }
                prims.push(PrimitivePair {
                    p,
                    center,
                    coef,
                    terms,
                    terms_phased,
                });
            }
        }
        ShellPair {
            la: sa.l,
            lb: sb.l,
            n_cart: sa.n_cart() * sb.n_cart(),
            prims,
        }
    }
}

/// The full (mn|ls) tensor in chemist notation over the spherical basis.
/// Unique shell quartets are evaluated once and written to all eight
/// index permutations.
pub fn eri_tensor(basis: &AoBasis) -> Array4<f64> {
    let n_bf: usize = basis.n_bf;
    let mut eri: Array4<f64> = Array4::zeros((n_bf, n_bf, n_bf, n_bf));
    let n_shells: usize = basis.shells.len();
    let mut pair_index: Vec<(usize, usize)> = Vec::new();
    for i in 0..n_shells {
        for j in i..n_shells {
            pair_index.push((i, j));
        }
    }
    let pairs: Vec<ShellPair> = pair_index
        .iter()
        .map(|&(i, j)| ShellPair::new(&basis.shells[i], &basis.shells[j]))
        .collect();

    for ip in 0..pairs.len() {
        let (i, j): (usize, usize) = pair_index[ip];
        let bra: &ShellPair = &pairs[ip];
        for jp in ip..pairs.len() {
            let (k, l): (usize, usize) = pair_index[jp];
            let ket: &ShellPair = &pairs[jp];
            let ltot: usize = bra.la + bra.lb + ket.la + ket.lb;
            let mut block: Array2<f64> = Array2::zeros((bra.n_cart, ket.n_cart));
            for pa in bra.prims.iter() {
                for pb in ket.prims.iter() {
                    let fac: f64 = 2.0 * PI.powf(2.5)
                        / (pa.p * pb.p * (pa.p + pb.p).sqrt())
                        * pa.coef
                        * pb.coef;
                    if fac.abs() < 1.0e-16 {
                        continue;
                    }
                    let alpha: f64 = pa.p * pb.p / (pa.p + pb.p);
                    let pq: Vector3<f64> = pa.center - pb.center;
                    let rc: Array3<f64> = hermite_coulomb(ltot, alpha, pq[0], pq[1], pq[2]);
                    for (ei, ta) in pa.terms.iter().enumerate() {
                        for (ej, tb) in pb.terms_phased.iter().enumerate() {
                            let mut acc: f64 = 0.0;
                            for &(t, u, v, ea) in ta.iter() {
                                let mut sum: f64 = 0.0;
                                for &(t2, u2, v2, ek) in tb.iter() {
                                    sum += ek * rc[[t + t2, u + u2, v + v2]];
                                }
                                acc += ea * sum;
                            }
                            block[[ei, ej]] += fac * acc;
                        }
                    }
                }
            }

            let (sa, sb, sc, sd): (&Shell, &Shell, &Shell, &Shell) = (
                &basis.shells[i],
                &basis.shells[j],
                &basis.shells[k],
                &basis.shells[l],
            );
            let shaped: Array4<f64> = block
                .into_shape((sa.n_cart(), sb.n_cart(), sc.n_cart(), sd.n_cart()))
                .unwrap();
            let shaped: Array4<f64> = spherical_transform(shaped, [sa, sb, sc, sd]);
            let (oa, ob, oc, od): (usize, usize, usize, usize) = (
                basis.offsets[i],
                basis.offsets[j],
                basis.offsets[k],
                basis.offsets[l],
            );
            let dims: &[usize] = shaped.shape();
            for a in 0..dims[0] {
                let pa: usize = oa + a;
                for b in 0..dims[1] {
                    let pb: usize = ob + b;
                    for c in 0..dims[2] {
                        let pc: usize = oc + c;
                        for d in 0..dims[3] {
                            let pd: usize = od + d;
                            let value: f64 = shaped[[a, b, c, d]];
                            eri[[pa, pb, pc, pd]] = value;
                            eri[[pb, pa, pc, pd]] = value;
                            eri[[pa, pb, pd, pc]] = value;
                            eri[[pb, pa, pd, pc]] = value;
                            eri[[pc, pd, pa, pb]] = value;
                            eri[[pd, pc, pa, pb]] = value;
                            eri[[pc, pd, pb, pa]] = value;
                            eri[[pd, pc, pb, pa]] = value;
                        }
                    }
                }
            }
        }
    }
    eri
}

/// Contracts each index of a quartet block with the cartesian to spherical
/// matrix of its shell. Each cycle maps the leading axis and rotates it to
/// the back, four cycles restore the original order.
fn spherical_transform(block: Array4<f64>, shells: [&Shell; 4]) -> Array4<f64> {
    if shells.iter().all(|shell| shell.l < 2) {
        return block;
    }
    let mut out: Array4<f64> = block;
    for shell in shells.iter() {
        let w: Array2<f64> = shell.spherical_matrix();
        let (n0, n1, n2, n3): (usize, usize, usize, usize) = out.dim();
        let flat: Array2<f64> = out.into_shape((n0, n1 * n2 * n3)).unwrap();
        let mixed: Array2<f64> = w.dot(&flat);
        let m: usize = mixed.nrows();
        out = mixed
            .into_shape((m, n1, n2, n3))
            .unwrap()
            .permuted_axes([1, 2, 3, 0])
            .as_standard_layout()
            .to_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisSet;
    use crate::initialization::Molecule;
    use crate::io::settings::Configuration;
    use approx::assert_abs_diff_eq;

    fn sto_3g_basis(molecule: &Molecule) -> AoBasis {
        let basis_set: BasisSet = BasisSet::from_name("sto-3g");
        AoBasis::new(molecule, &basis_set)
    }

    #[test]
    fn h2_reference_repulsion() {
        // Szabo-Ostlund two-electron integrals for H2 at R = 1.4 bohr
        let numbers: Vec<u8> = vec![1, 1];
        let coords: Array2<f64> =
            Array2::from_shape_vec((2, 3), vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.4]).unwrap();
        let molecule: Molecule = Molecule::from((numbers, coords, Configuration::default()));
        let eri: Array4<f64> = eri_tensor(&sto_3g_basis(&molecule));
        assert_abs_diff_eq!(eri[[0, 0, 0, 0]], 0.7746059439, epsilon = 1e-9);
        assert_abs_diff_eq!(eri[[0, 0, 1, 1]], 0.5696759256, epsilon = 1e-9);
        assert_abs_diff_eq!(eri[[0, 1, 0, 1]], 0.2970285403, epsilon = 1e-9);
        assert_abs_diff_eq!(eri[[0, 0, 0, 1]], 0.4441076580, epsilon = 1e-9);
    }

    #[test]
    fn water_mixed_shell_elements() {
        let molecule: Molecule = Molecule::from(("data/water.xyz", Configuration::default()));
        let eri: Array4<f64> = eri_tensor(&sto_3g_basis(&molecule));
        assert_abs_diff_eq!(eri[[0, 0, 0, 0]], 4.7850654047, epsilon = 1e-8);
        assert_abs_diff_eq!(eri[[0, 1, 2, 2]], 0.2566839858, epsilon = 1e-8);
        assert_abs_diff_eq!(eri[[3, 3, 4, 4]], 0.7852702031, epsilon = 1e-8);
        assert_abs_diff_eq!(eri[[1, 4, 4, 1]], 0.1805183921, epsilon = 1e-8);
        assert_abs_diff_eq!(eri[[5, 5, 6, 6]], 0.3025378888, epsilon = 1e-8);
        assert_abs_diff_eq!(eri[[0, 5, 5, 6]], 0.0040917656, epsilon = 1e-8);
    }

    #[test]
    fn eightfold_permutation_symmetry() {
        let molecule: Molecule = Molecule::from(("data/water.xyz", Configuration::default()));
        let eri: Array4<f64> = eri_tensor(&sto_3g_basis(&molecule));
        let idx: [(usize, usize, usize, usize); 3] = [(0, 2, 4, 5), (1, 3, 5, 6), (2, 4, 0, 1)];
        for &(m, n, l, s) in idx.iter() {
            let value: f64 = eri[[m, n, l, s]];
            assert_abs_diff_eq!(eri[[n, m, l, s]], value, epsilon = 1e-12);
            assert_abs_diff_eq!(eri[[m, n, s, l]], value, epsilon = 1e-12);
            assert_abs_diff_eq!(eri[[l, s, m, n]], value, epsilon = 1e-12);
            assert_abs_diff_eq!(eri[[s, l, n, m]], value, epsilon = 1e-12);
        }
    }
}
