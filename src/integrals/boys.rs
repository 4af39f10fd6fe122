use libm::erf;
use std::f64::consts::PI;

/// The Boys function F_n(x) for all orders 0..=nmax.
///
/// Three regimes are used: a two-term Taylor expansion for very small
/// arguments, a series evaluation of the highest order followed by downward
/// recursion for moderate arguments, and the closed form of F_0 followed by
/// upward recursion for large arguments where the recursion is stable.
pub fn boys(nmax: usize, x: f64) -> Vec<f64> {
    let mut out: Vec<f64> = vec![0.0; nmax + 1];
    if x < 1e-12 {
        for (n, value) in out.iter_mut().enumerate() {
            *value = 1.0 / (2 * n + 1) as f64 - x / (2 * n + 3) as f64;
        }
        return out;
    }
    let ex: f64 = (-x).exp();
    if x < 35.0 {
        // series for the top order, then downward recursion
        let mut term: f64 = 1.0 / (2 * nmax + 1) as f64;
        let mut acc: f64 = term;
        let mut k: usize = 0;
        loop {
            k += 1;
            term *= 2.0 * x / (2 * nmax + 2 * k + 1) as f64;
            acc += term;
            if term < acc * 1e-17 || k > 1000 {
                break;
            }
        }
        out[nmax] = acc * ex;
        for n in (0..nmax).rev() {
            out[n] = (2.0 * x * out[n + 1] + ex) / (2 * n + 1) as f64;
        }
    } else {
        out[0] = 0.5 * (PI / x).sqrt() * erf(x.sqrt());
        for n in 1..=nmax {
            out[n] = ((2 * n - 1) as f64 * out[n - 1] - ex) / (2.0 * x);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn boys_limits() {
        assert_abs_diff_eq!(boys(0, 0.0)[0], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(boys(3, 0.0)[3], 1.0 / 7.0, epsilon = 1e-15);
    }

    #[test]
    fn boys_small_and_moderate_arguments() {
        assert_abs_diff_eq!(boys(0, 0.5)[0], 8.556243918921488e-01, epsilon = 1e-14);
        assert_abs_diff_eq!(boys(1, 0.5)[1], 2.490937321795154e-01, epsilon = 1e-14);
        assert_abs_diff_eq!(boys(2, 3.0)[2], 2.958186292732058e-02, epsilon = 1e-14);
        assert_abs_diff_eq!(boys(4, 12.5)[4], 6.717797532407724e-05, epsilon = 1e-16);
        assert_abs_diff_eq!(boys(8, 0.01)[8], 5.829958734493101e-02, epsilon = 1e-14);
    }

    #[test]
    fn boys_large_arguments() {
        assert_abs_diff_eq!(boys(3, 40.0)[3], 4.105218176072645e-06, epsilon = 1e-17);
        assert_abs_diff_eq!(boys(6, 36.0)[6], 1.102105590114844e-08, epsilon = 1e-19);
    }

    #[test]
    fn boys_downward_consistency() {
        // F_n(x) = (2x F_{n+1}(x) + exp(-x)) / (2n + 1)
        let f: Vec<f64> = boys(5, 7.3);
        for n in 0..5 {
            let rec: f64 = (2.0 * 7.3 * f[n + 1] + (-7.3f64).exp()) / (2 * n + 1) as f64;
            assert_abs_diff_eq!(f[n], rec, epsilon = 1e-14);
        }
    }
}
