use ndarray::prelude::*;
use ndarray_linalg::Solve;

/// Pulay extrapolation over a rolling window of (trial, error) pairs,
/// [Pulay:1980:393]. The same accelerator drives the SCF Fock updates and
/// the coupled-perturbed amplitude updates, only the error metric differs.
pub struct Diis {
    trial_vectors: Vec<Array2<f64>>,
    error_vectors: Vec<Array1<f64>>,
    memory: usize,
}

impl Diis {
    pub fn new(memory: usize) -> Diis {
        let t_v: Vec<Array2<f64>> = Vec::new();
        let e_v: Vec<Array1<f64>> = Vec::new();
        Diis {
            trial_vectors: t_v,
            error_vectors: e_v,
            memory,
        }
    }

    pub fn len(&self) -> usize {
        self.trial_vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trial_vectors.is_empty()
    }

    /// Stores the pair and returns the extrapolated trial. The incoming
    /// trial is passed through unchanged while fewer than two pairs are
    /// stored or the Pulay system is degenerate.
    pub fn next(&mut self, trial: Array2<f64>, error: Array1<f64>) -> Array2<f64> {
        self.trial_vectors.push(trial.clone());
        self.error_vectors.push(error);
        if self.trial_vectors.len() > self.memory {
            self.trial_vectors.remove(0);
            self.error_vectors.remove(0);
        }
        let diis_count: usize = self.error_vectors.len();
        if diis_count < 2 {
            return trial;
        }

        // build error matrix B, [Pulay:1980:393], Eqn. 6, LHS
        let mut b: Array2<f64> = Array2::zeros((diis_count + 1, diis_count + 1));
        for (idx1, e1) in self.error_vectors.iter().enumerate() {
            for (idx2, e2) in self.error_vectors.iter().enumerate() {
                if idx2 <= idx1 {
                    let val: f64 = e1.dot(e2);
                    b[[idx1, idx2]] = val;
                    b[[idx2, idx1]] = val;
                }
            }
        }
        b.slice_mut(s![diis_count, ..]).fill(-1.0);
        b.slice_mut(s![.., diis_count]).fill(-1.0);
        b[[diis_count, diis_count]] = 0.0;

        // build residual vector, [Pulay:1980:393], Eqn. 6, RHS
        let mut resid: Array1<f64> = Array1::zeros(diis_count + 1);
        resid[diis_count] = -1.0;

        // solve Pulay equations, [Pulay:1980:393], Eqn. 6
        let ci: Array1<f64> = match b.solve_into(resid) {
            Ok(ci) => ci,
            Err(_) => return trial,
        };

        // linear combination of the stored trials
        let mut next: Array2<f64> = Array2::zeros(self.trial_vectors[0].raw_dim());
        for (idx, coeff) in ci.slice(s![0..diis_count]).iter().enumerate() {
            next += &self.trial_vectors[idx].map(|x| x * *coeff);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::AbsDiffEq;

    #[test]
    fn passes_through_first_trial() {
        let mut diis: Diis = Diis::new(6);
        assert!(diis.is_empty());
        let trial: Array2<f64> = Array2::from_shape_fn((3, 3), |(i, j)| (i + 2 * j) as f64);
        let error: Array1<f64> = Array1::from_elem(9, 0.1);
        let out: Array2<f64> = diis.next(trial.clone(), error);
        assert!(out.abs_diff_eq(&trial, 1e-14));
        assert!(!diis.is_empty());
        assert_eq!(diis.len(), 1);
    }

    #[test]
    fn interpolates_linear_errors_to_zero() {
        // two trials with opposite errors, the extrapolation lands halfway
        let mut diis: Diis = Diis::new(6);
        let t1: Array2<f64> = Array2::from_elem((2, 2), 1.0);
        let t2: Array2<f64> = Array2::from_elem((2, 2), 3.0);
        let e1: Array1<f64> = Array1::from_elem(4, -1.0);
        let e2: Array1<f64> = Array1::from_elem(4, 1.0);
        diis.next(t1, e1);
        let out: Array2<f64> = diis.next(t2, e2);
        assert!(out.abs_diff_eq(&Array2::from_elem((2, 2), 2.0), 1e-12));
    }

    #[test]
    fn degenerate_history_returns_latest() {
        // identical error vectors make the Pulay matrix singular
        let mut diis: Diis = Diis::new(6);
        let e: Array1<f64> = Array1::from_elem(4, 0.5);
        diis.next(Array2::from_elem((2, 2), 1.0), e.clone());
        let trial: Array2<f64> = Array2::from_elem((2, 2), 2.0);
        let out: Array2<f64> = diis.next(trial.clone(), e);
        assert!(out.abs_diff_eq(&trial, 1e-14));
    }

    #[test]
    fn window_is_bounded() {
        let mut diis: Diis = Diis::new(3);
        for k in 0..10 {
            let trial: Array2<f64> = Array2::from_elem((2, 2), k as f64);
            let error: Array1<f64> = Array1::from_shape_fn(4, |i| (k + i) as f64 * 0.01);
            diis.next(trial, error);
        }
        assert_eq!(diis.len(), 3);
    }
}
