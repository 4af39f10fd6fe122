use crate::basis::basis_set::BasisSet;
use crate::initialization::Molecule;
use nalgebra::Vector3;
use ndarray::prelude::*;
use std::f64::consts::PI;

const SQRT3_HALF: f64 = 0.8660254037844386;

/// Coefficients of the five real spherical d functions in the basis of the
/// six per-component normalized cartesian d functions. The cartesian order is
/// xx, xy, xz, yy, yz, zz and the spherical order is xy, yz, 3z^2-r^2, xz,
/// x^2-y^2.
pub const SPHERICAL_D: [[f64; 6]; 5] = [
    [0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    [-0.5, 0.0, 0.0, -0.5, 0.0, 1.0],
    [0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
    [SQRT3_HALF, 0.0, 0.0, -SQRT3_HALF, 0.0, 0.0],
];

/// The double factorial n!! with (-1)!! = 1.
pub fn double_factorial(n: i32) -> f64 {
    let mut result: f64 = 1.0;
    let mut k: i32 = n;
    while k > 1 {
        result *= k as f64;
        k -= 2;
    }
    result
}

/// Normalization constant of a primitive cartesian Gaussian with the
/// exponent alpha and the angular momentum (lx, ly, lz).
pub fn primitive_norm(alpha: f64, lx: i32, ly: i32, lz: i32) -> f64 {
    let l: i32 = lx + ly + lz;
    let num: f64 = (2.0 * alpha / PI).powf(1.5) * (4.0 * alpha).powi(l);
    let den: f64 = double_factorial(2 * lx - 1)
        * double_factorial(2 * ly - 1)
        * double_factorial(2 * lz - 1);
    (num / den).sqrt()
}

/// The cartesian components (lx, ly, lz) of a shell with angular momentum l,
/// ordered by descending lx, then descending ly.
pub fn cartesian_components(l: usize) -> Vec<[i32; 3]> {
    let l: i32 = l as i32;
    let mut components: Vec<[i32; 3]> = Vec::new();
    for lx in (0..=l).rev() {
        for ly in (0..=(l - lx)).rev() {
            components.push([lx, ly, l - lx - ly]);
        }
    }
    components
}

/// A contracted shell of cartesian Gaussians on a common center. The
/// contraction coefficients are rescaled on construction so that the axial
/// component (l, 0, 0) of the contracted function is normalized.
#[derive(Debug, Clone)]
pub struct Shell {
    pub l: usize,
    pub center: Vector3<f64>,
    pub exponents: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub components: Vec<[i32; 3]>,
}

impl Shell {
    pub fn new(l: usize, center: Vector3<f64>, exponents: Vec<f64>, coefficients: &[f64]) -> Self {
        let li: i32 = l as i32;
        let axial_norms: Vec<f64> = exponents
            .iter()
            .map(|alpha| primitive_norm(*alpha, li, 0, 0))
            .collect();
        // self-overlap of the axial component of the contracted function
        let mut overlap: f64 = 0.0;
        for (i, alpha_i) in exponents.iter().enumerate() {
            for (j, alpha_j) in exponents.iter().enumerate() {
                let p: f64 = alpha_i + alpha_j;
                let sij: f64 =
                    double_factorial(2 * li - 1) / (2.0 * p).powi(li) * (PI / p).powf(1.5);
                overlap += coefficients[i] * coefficients[j] * axial_norms[i] * axial_norms[j] * sij;
            }
        }
        let scale: f64 = 1.0 / overlap.sqrt();
        let coefficients: Vec<f64> = coefficients.iter().map(|c| c * scale).collect();
        Self {
            l,
            center,
            exponents,
            coefficients,
            components: cartesian_components(l),
        }
    }

    /// Number of cartesian components.
    pub fn n_cart(&self) -> usize {
        self.components.len()
    }

    /// Number of basis functions the shell contributes. The d shells are
    /// transformed to the five real spherical functions.
    pub fn n_sph(&self) -> usize {
        match self.l {
            2 => 5,
            _ => self.n_cart(),
        }
    }

    /// The transformation from the cartesian components to the final basis
    /// functions of the shell. The identity for s and p shells.
    pub fn spherical_matrix(&self) -> Array2<f64> {
        match self.l {
            0 | 1 => Array2::eye(self.n_cart()),
            2 => {
                let mut w: Array2<f64> = Array2::zeros((5, 6));
                for (r, row) in SPHERICAL_D.iter().enumerate() {
                    for (c, value) in row.iter().enumerate() {
                        w[[r, c]] = *value;
                    }
                }
                w
            }
            l => panic!(
                "The spherical transformation for angular momentum {} is not implemented",
                l
            ),
        }
    }
}

/// The atomic-orbital basis of a molecule: all shells together with the
/// offsets of their basis functions in the full (spherical) basis.
pub struct AoBasis {
    pub shells: Vec<Shell>,
    pub offsets: Vec<usize>,
    pub n_bf: usize,
}

impl AoBasis {
    pub fn new(molecule: &Molecule, basis_set: &BasisSet) -> Self {
        let mut shells: Vec<Shell> = Vec::new();
        for atom in molecule.atoms.iter() {
            for function in basis_set.basis_functions(atom.kind).iter() {
                shells.push(Shell::new(
                    function.l as usize,
                    atom.xyz,
                    function.exponents.clone(),
                    &function.coefficients,
                ));
            }
        }
        let mut offsets: Vec<usize> = Vec::with_capacity(shells.len());
        let mut n_bf: usize = 0;
        for shell in shells.iter() {
            offsets.push(n_bf);
            n_bf += shell.n_sph();
        }
        Self {
            shells,
            offsets,
            n_bf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cartesian_component_order() {
        assert_eq!(cartesian_components(0), vec![[0, 0, 0]]);
        assert_eq!(cartesian_components(1), vec![[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
        assert_eq!(
            cartesian_components(2),
            vec![
                [2, 0, 0],
                [1, 1, 0],
                [1, 0, 1],
                [0, 2, 0],
                [0, 1, 1],
                [0, 0, 2]
            ]
        );
    }

    #[test]
    fn double_factorials() {
        assert_relative_eq!(double_factorial(-1), 1.0);
        assert_relative_eq!(double_factorial(0), 1.0);
        assert_relative_eq!(double_factorial(3), 3.0);
        assert_relative_eq!(double_factorial(5), 15.0);
        assert_relative_eq!(double_factorial(7), 105.0);
    }

    #[test]
    fn normalized_contraction() {
        // a single primitive is normalized already, the rescaling keeps its
        // coefficient at one
        let shell: Shell = Shell::new(0, Vector3::zeros(), vec![0.5], &[1.0]);
        assert_relative_eq!(shell.coefficients[0], 1.0, epsilon = 1e-12);
        // an arbitrary scale on the input coefficients must cancel
        let scaled: Shell = Shell::new(1, Vector3::zeros(), vec![0.7, 0.2], &[0.9, 0.4]);
        let reference: Shell = Shell::new(1, Vector3::zeros(), vec![0.7, 0.2], &[1.8, 0.8]);
        assert_relative_eq!(
            scaled.coefficients[0],
            reference.coefficients[0],
            epsilon = 1e-12
        );
        assert_relative_eq!(
            scaled.coefficients[1],
            reference.coefficients[1],
            epsilon = 1e-12
        );
    }
}
