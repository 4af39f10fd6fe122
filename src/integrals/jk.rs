use ndarray::prelude::*;

/// Coulomb and exchange builds from the in-core integral tensor.
///
/// A permuted copy with the exchange index order (ml|ns) is kept alongside
/// the plain tensor so that both J and K reduce to one matrix-vector product
/// over the compound index pair.
pub struct JkEngine {
    eri: Array4<f64>,
    eri_exchange: Array4<f64>,
    n_bf: usize,
}

impl JkEngine {
    pub fn new(eri: Array4<f64>) -> Self {
        let n_bf: usize = eri.shape()[0];
        let eri_exchange: Array4<f64> = eri
            .view()
            .permuted_axes([0, 2, 1, 3])
            .as_standard_layout()
            .to_owned();
        JkEngine {
            eri,
            eri_exchange,
            n_bf,
        }
    }

    pub fn n_bf(&self) -> usize {
        self.n_bf
    }

    pub fn eri(&self) -> ArrayView4<f64> {
        self.eri.view()
    }

    /// J and K for a generalized, possibly non-symmetric density:
    /// J_mn = sum_ls (mn|ls) D_ls and K_mn = sum_ls (ml|ns) D_ls.
    pub fn coulomb_exchange(&self, density: ArrayView2<f64>) -> (Array2<f64>, Array2<f64>) {
        let n: usize = self.n_bf;
        let d_flat: Array1<f64> = density.to_owned().into_shape(n * n).unwrap();
        let j: Array2<f64> = self
            .eri
            .view()
            .into_shape((n * n, n * n))
            .unwrap()
            .dot(&d_flat)
            .into_shape((n, n))
            .unwrap();
        let k: Array2<f64> = self
            .eri_exchange
            .view()
            .into_shape((n * n, n * n))
            .unwrap()
            .dot(&d_flat)
            .into_shape((n, n))
            .unwrap();
        (j, k)
    }
}

/// Batched J/K builds over registered left/right orbital pairs.
///
/// Each pair stands for the density D = left * right^T. Between compute
/// calls only the right factors change, the left factors stay registered,
/// which matches the update pattern of the coupled-perturbed iterations.
pub struct JkBuilder<'a> {
    engine: &'a JkEngine,
    left: Vec<Array2<f64>>,
    right: Vec<Array2<f64>>,
    coulomb: Vec<Array2<f64>>,
    exchange: Vec<Array2<f64>>,
}

impl<'a> JkBuilder<'a> {
    pub fn new(engine: &'a JkEngine) -> Self {
        JkBuilder {
            engine,
            left: Vec::new(),
            right: Vec::new(),
            coulomb: Vec::new(),
            exchange: Vec::new(),
        }
    }

    /// Registers a density factor pair and returns its slot index.
    pub fn add_pair(&mut self, left: Array2<f64>, right: Array2<f64>) -> usize {
        let n: usize = self.engine.n_bf;
        self.left.push(left);
        self.right.push(right);
        self.coulomb.push(Array2::zeros((n, n)));
        self.exchange.push(Array2::zeros((n, n)));
        self.left.len() - 1
    }

    pub fn set_right(&mut self, slot: usize, right: Array2<f64>) {
        self.right[slot] = right;
    }

    pub fn compute(&mut self) {
        for slot in 0..self.left.len() {
            let density: Array2<f64> = self.left[slot].dot(&self.right[slot].t());
            let (j, k): (Array2<f64>, Array2<f64>) =
                self.engine.coulomb_exchange(density.view());
            self.coulomb[slot] = j;
            self.exchange[slot] = k;
        }
    }

    pub fn coulomb(&self, slot: usize) -> &Array2<f64> {
        &self.coulomb[slot]
    }

    pub fn exchange(&self, slot: usize) -> &Array2<f64> {
        &self.exchange[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{AoBasis, BasisSet};
    use crate::initialization::Molecule;
    use crate::integrals::two_electron::eri_tensor;
    use crate::io::settings::Configuration;
    use approx::{assert_abs_diff_eq, AbsDiffEq};

    fn water_eri() -> Array4<f64> {
        let molecule: Molecule = Molecule::from(("data/water.xyz", Configuration::default()));
        let basis_set: BasisSet = BasisSet::from_name("sto-3g");
        eri_tensor(&AoBasis::new(&molecule, &basis_set))
    }

    #[test]
    fn matches_explicit_contraction() {
        let eri: Array4<f64> = water_eri();
        let n: usize = eri.shape()[0];
        // deliberately non-symmetric density
        let density: Array2<f64> =
            Array2::from_shape_fn((n, n), |(l, s)| 0.1 * (l + 1) as f64 - 0.037 * (s + 1) as f64);
        let engine: JkEngine = JkEngine::new(eri.clone());
        let (j, k): (Array2<f64>, Array2<f64>) = engine.coulomb_exchange(density.view());
        for m in 0..n {
            for nn in 0..n {
                let mut j_ref: f64 = 0.0;
                let mut k_ref: f64 = 0.0;
                for l in 0..n {
                    for s in 0..n {
                        j_ref += eri[[m, nn, l, s]] * density[[l, s]];
                        k_ref += eri[[m, l, nn, s]] * density[[l, s]];
                    }
                }
                assert_abs_diff_eq!(j[[m, nn]], j_ref, epsilon = 1e-10);
                assert_abs_diff_eq!(k[[m, nn]], k_ref, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn builder_recomputes_after_right_update() {
        let eri: Array4<f64> = water_eri();
        let n: usize = eri.shape()[0];
        let engine: JkEngine = JkEngine::new(eri);
        let left: Array2<f64> = Array2::from_shape_fn((n, 2), |(m, i)| 0.3 / (m + i + 1) as f64);
        let right: Array2<f64> = Array2::from_shape_fn((n, 2), |(m, i)| 0.1 * (m as f64) - i as f64);
        let mut builder: JkBuilder = JkBuilder::new(&engine);
        let slot: usize = builder.add_pair(left.clone(), right.clone());
        builder.compute();
        let (j_ref, k_ref) = engine.coulomb_exchange(left.dot(&right.t()).view());
        assert!(builder.coulomb(slot).abs_diff_eq(&j_ref, 1e-12));
        assert!(builder.exchange(slot).abs_diff_eq(&k_ref, 1e-12));

        let right2: Array2<f64> = 2.0 * &right;
        builder.set_right(slot, right2.clone());
        builder.compute();
        let (j2, k2) = engine.coulomb_exchange(left.dot(&right2.t()).view());
        assert!(builder.coulomb(slot).abs_diff_eq(&j2, 1e-12));
        assert!(builder.exchange(slot).abs_diff_eq(&k2, 1e-12));
    }
}
