use crate::integrals::boys::boys;
use ndarray::prelude::*;

/// Hermite expansion coefficients E_t^{ij} of a one-dimensional Gaussian
/// product, for all i <= la, j <= lb and t <= i + j. The returned array has
/// one extra slot along t so that the recursion can read the vanishing
/// coefficient above the band. `ab` is the bra-ket center distance A - B
/// along this dimension.
pub fn hermite_expansion(la: usize, lb: usize, a: f64, b: f64, ab: f64) -> Array3<f64> {
    let p: f64 = a + b;
    let q: f64 = a * b / p;
    let tdim: usize = la + lb + 1;
    let mut e: Array3<f64> = Array3::zeros((la + 1, lb + 1, tdim + 1));
    e[[0, 0, 0]] = (-q * ab * ab).exp();
    let half_p: f64 = 0.5 / p;
    let fa: f64 = -q * ab / a;
    let fb: f64 = q * ab / b;
    for i in 1..=la {
        for t in 0..=i {
            let mut value: f64 = fa * e[[i - 1, 0, t]] + (t + 1) as f64 * e[[i - 1, 0, t + 1]];
            if t > 0 {
                value += half_p * e[[i - 1, 0, t - 1]];
            }
            e[[i, 0, t]] = value;
        }
    }
    for j in 1..=lb {
        for i in 0..=la {
            for t in 0..=(i + j) {
                let mut value: f64 =
                    fb * e[[i, j - 1, t]] + (t + 1) as f64 * e[[i, j - 1, t + 1]];
                if t > 0 {
                    value += half_p * e[[i, j - 1, t - 1]];
                }
                e[[i, j, t]] = value;
            }
        }
    }
    e
}

/// The Hermite-Coulomb integrals R_{tuv} for all t + u + v <= lmax at
/// auxiliary order zero, built by downward recursion over the auxiliary
/// order. (x, y, z) is the distance vector between the two composite
/// Gaussian centers and p their total exponent.
pub fn hermite_coulomb(lmax: usize, p: f64, x: f64, y: f64, z: f64) -> Array3<f64> {
    let f: Vec<f64> = boys(lmax, p * (x * x + y * y + z * z));
    let dim: usize = lmax + 1;
    let mut prev: Array3<f64> = Array3::zeros((dim, dim, dim));
    let mut cur: Array3<f64> = Array3::zeros((dim, dim, dim));
    for n in (0..=lmax).rev() {
        let mx: usize = lmax - n;
        cur[[0, 0, 0]] = (-2.0 * p).powi(n as i32) * f[n];
        for t in 0..=mx {
            for u in 0..=(mx - t) {
                for v in 0..=(mx - t - u) {
                    if t + u + v == 0 {
                        continue;
                    }
                    let value: f64 = if t > 0 {
                        let mut value = x * prev[[t - 1, u, v]];
                        if t > 1 {
                            value += (t - 1) as f64 * prev[[t - 2, u, v]];
                        }
                        value
                    } else if u > 0 {
                        let mut value = y * prev[[t, u - 1, v]];
                        if u > 1 {
                            value += (u - 1) as f64 * prev[[t, u - 2, v]];
                        }
                        value
                    } else {
                        let mut value = z * prev[[t, u, v - 1]];
                        if v > 1 {
                            value += (v - 1) as f64 * prev[[t, u, v - 2]];
                        }
                        value
                    };
                    cur[[t, u, v]] = value;
                }
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn expansion_reproduces_gaussian_overlap() {
        // the t = 0 coefficient times (pi/p)^(3/2) is the 1s-1s overlap
        let a: f64 = 0.8;
        let b: f64 = 1.3;
        let ab: f64 = 0.9;
        let p: f64 = a + b;
        let e: Array3<f64> = hermite_expansion(0, 0, a, b, ab);
        let overlap: f64 = e[[0, 0, 0]] * (PI / p).powf(1.5);
        let reference: f64 = (PI / p).powf(1.5) * (-a * b / p * ab * ab).exp();
        assert_abs_diff_eq!(overlap, reference, epsilon = 1e-15);
    }

    #[test]
    fn expansion_coefficients_sum_rule() {
        // for ab = 0 the i = 1, j = 1 band reduces to E_0 = 1/(2p), E_1 = 0
        let a: f64 = 0.6;
        let b: f64 = 0.4;
        let e: Array3<f64> = hermite_expansion(1, 1, a, b, 0.0);
        assert_abs_diff_eq!(e[[1, 1, 0]], 0.5 / (a + b), epsilon = 1e-15);
        assert_abs_diff_eq!(e[[1, 1, 1]], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn coulomb_cube_base_value() {
        // R_000 at auxiliary order zero is the plain Boys value F_0(p r^2)
        let cube: Array3<f64> = hermite_coulomb(2, 1.7, 0.3, -0.2, 0.5);
        let r2: f64 = 0.3 * 0.3 + 0.2 * 0.2 + 0.5 * 0.5;
        let f0: f64 = boys(0, 1.7 * r2)[0];
        assert_abs_diff_eq!(cube[[0, 0, 0]], f0, epsilon = 1e-15);
    }

    #[test]
    fn coulomb_cube_first_derivatives() {
        // R_100 = x * (-2p) F_1
        let p: f64 = 0.9;
        let (x, y, z): (f64, f64, f64) = (0.4, 0.1, -0.3);
        let cube: Array3<f64> = hermite_coulomb(1, p, x, y, z);
        let f: Vec<f64> = boys(1, p * (x * x + y * y + z * z));
        assert_abs_diff_eq!(cube[[1, 0, 0]], x * (-2.0 * p) * f[1], epsilon = 1e-15);
        assert_abs_diff_eq!(cube[[0, 1, 0]], y * (-2.0 * p) * f[1], epsilon = 1e-15);
        assert_abs_diff_eq!(cube[[0, 0, 1]], z * (-2.0 * p) * f[1], epsilon = 1e-15);
    }
}
