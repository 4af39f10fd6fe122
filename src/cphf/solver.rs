use crate::cphf::logging::*;
use crate::defaults;
use crate::integrals::{JkBuilder, JkEngine};
use crate::io::settings::CphfConfig;
use crate::scf::Diis;
use crate::utils::Timer;
use log::{log_enabled, Level};
use ndarray::prelude::*;
use ndarray_linalg::Inverse;
use std::fmt;
use std::iter::FromIterator;

/// The converged mean-field data the response equations are built from.
/// Occupied columns come first in the coefficient matrix, the orbital
/// energies are in the same order as the columns.
pub struct Reference<'a> {
    pub orbs: ArrayView2<'a, f64>,
    pub orbe: ArrayView1<'a, f64>,
    pub n_occ: usize,
}

impl<'a> Reference<'a> {
    pub fn new(orbs: ArrayView2<'a, f64>, orbe: ArrayView1<'a, f64>, n_occ: usize) -> Self {
        Reference { orbs, orbe, n_occ }
    }

    pub fn n_bf(&self) -> usize {
        self.orbs.nrows()
    }

    pub fn n_orb(&self) -> usize {
        self.orbs.ncols()
    }

    pub fn n_virt(&self) -> usize {
        self.n_orb() - self.n_occ
    }

    pub fn occ_coefficients(&self) -> ArrayView2<'a, f64> {
        self.orbs.slice_move(s![.., 0..self.n_occ])
    }

    pub fn virt_coefficients(&self) -> ArrayView2<'a, f64> {
        self.orbs.slice_move(s![.., self.n_occ..])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CphfMode {
    Direct,
    Iterative,
}

impl CphfMode {
    pub fn from_name(name: &str) -> Result<Self, CphfError> {
        match name {
            "direct" => Ok(CphfMode::Direct),
            "iterative" => Ok(CphfMode::Iterative),
            _ => Err(CphfError::Configuration(format!(
                "The CPHF mode {} is not available, use direct or iterative",
                name
            ))),
        }
    }
}

impl fmt::Display for CphfMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            CphfMode::Direct => write!(f, "direct"),
            CphfMode::Iterative => write!(f, "iterative"),
        }
    }
}

/// Validated solver settings, assembled from the user configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub mode: CphfMode,
    pub max_cycles: usize,
    pub conv: f64,
    pub use_diis: bool,
    pub memory_budget_gb: f64,
}

impl SolverConfig {
    pub fn from_config(config: &CphfConfig) -> Result<Self, CphfError> {
        Ok(SolverConfig {
            mode: CphfMode::from_name(config.cphf_mode.as_str())?,
            max_cycles: config.cphf_max_cycles,
            conv: config.cphf_conv,
            use_diis: config.cphf_use_diis,
            memory_budget_gb: config.memory_budget_gb,
        })
    }
}

#[derive(Debug, Clone)]
pub enum CphfError {
    Configuration(String),
    ResourceExhausted { required_gb: f64, budget_gb: f64 },
    Numerical(String),
    NotConverged { iterations: usize, residual: f64 },
}

impl fmt::Display for CphfError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            CphfError::Configuration(message) => write!(f, "{}", message),
            CphfError::ResourceExhausted {
                required_gb,
                budget_gb,
            } => write!(
                f,
                "The repulsion tensor needs {:.3} GiB but the memory budget is {:.3} GiB",
                required_gb, budget_gb
            ),
            CphfError::Numerical(operation) => {
                write!(f, "CPHF-Routine failed: {}", operation)
            }
            CphfError::NotConverged {
                iterations,
                residual,
            } => write!(
                f,
                "CPHF-Routine did not converge within {} iterations, the last residual was {:e}",
                iterations, residual
            ),
        }
    }
}

impl std::error::Error for CphfError {}

/// The dipole blocks that drive the response equations: the occupied times
/// virtual slice of the MO transformed dipole integrals, scaled by -2 for
/// the spin-summed closed-shell reference.
pub fn perturbation_operators(
    reference: &Reference,
    dipole: &[Array2<f64>; 3],
) -> [Array2<f64>; 3] {
    let occ: ArrayView2<f64> = reference.occ_coefficients();
    let virt: ArrayView2<f64> = reference.virt_coefficients();
    let op = |d: usize| -> Array2<f64> { -2.0 * occ.t().dot(&dipole[d]).dot(&virt) };
    [op(0), op(1), op(2)]
}

/// First-order response vectors for all three dipole perturbations,
/// dispatched to the direct or the iterative solver.
pub fn solve_response(
    reference: &Reference,
    perturbations: &[Array2<f64>; 3],
    engine: &JkEngine,
    config: &SolverConfig,
) -> Result<[Array2<f64>; 3], CphfError> {
    if reference.n_occ == 0 || reference.n_virt() == 0 {
        return Err(CphfError::Configuration(String::from(
            "The reference has no occupied-virtual pairs, the response space is empty",
        )));
    }
    if log_enabled!(Level::Info) {
        print_cphf_init(config, reference.n_occ, reference.n_virt());
    }
    match config.mode {
        CphfMode::Direct => solve_direct(reference, perturbations, engine, config),
        CphfMode::Iterative => solve_iterative(reference, perturbations, engine, config),
    }
}

/// Builds the explicit orbital Hessian in the MO basis and solves the
/// response equations by matrix inversion.
fn solve_direct(
    reference: &Reference,
    perturbations: &[Array2<f64>; 3],
    engine: &JkEngine,
    config: &SolverConfig,
) -> Result<[Array2<f64>; 3], CphfError> {
    let n_bf: usize = reference.n_bf();
    let n_orb: usize = reference.n_orb();
    let n_occ: usize = reference.n_occ;
    let n_virt: usize = reference.n_virt();

    // the in-core size of the repulsion tensor decides whether the
    // transformation is attempted at all
    let required_gb: f64 = (n_bf as f64).powi(4) * 8.0 / f64::powi(1024.0, 3);
    if required_gb > config.memory_budget_gb {
        return Err(CphfError::ResourceExhausted {
            required_gb,
            budget_gb: config.memory_budget_gb,
        });
    }

    let timer: Timer = Timer::start();
    let orbs: ArrayView2<f64> = reference.orbs;
    let eri_flat: ArrayView2<f64> = engine
        .eri()
        .into_shape((n_bf, n_bf * n_bf * n_bf))
        .unwrap();

    // quarter transforms of the repulsion tensor, one occupied orbital at
    // a time: mo[i][p, q, r] = (ip|qr) over molecular orbitals
    let mut mo: Vec<Array3<f64>> = Vec::with_capacity(n_occ);
    for i in 0..n_occ {
        let half: Array1<f64> = eri_flat.t().dot(&orbs.column(i));
        let mut block: Array3<f64> = half.into_shape((n_bf, n_bf, n_bf)).unwrap();
        // map the leading axis into the MO basis and rotate it to the back,
        // three cycles transform the remaining indices and restore the order
        for _ in 0..3 {
            let (n0, n1, n2): (usize, usize, usize) = block.dim();
            let flat: Array2<f64> = block.into_shape((n0, n1 * n2)).unwrap();
            let mixed: Array2<f64> = orbs.t().dot(&flat);
            block = mixed
                .into_shape((n_orb, n1, n2))
                .unwrap()
                .permuted_axes([1, 2, 0])
                .as_standard_layout()
                .to_owned();
        }
        mo.push(block);
    }
    if log_enabled!(Level::Info) {
        print_stage_timing("MO transformation of the repulsion tensor:", &timer);
    }

    let timer: Timer = Timer::start();
    let mut hessian: Array4<f64> = Array4::zeros((n_occ, n_virt, n_occ, n_virt));
    for i in 0..n_occ {
        for a in 0..n_virt {
            for j in 0..n_occ {
                for b in 0..n_virt {
                    let mut value: f64 = 4.0 * mo[i][[n_occ + a, j, n_occ + b]]
                        - mo[j][[n_occ + a, i, n_occ + b]]
                        - mo[i][[j, n_occ + a, n_occ + b]];
                    if i == j && a == b {
                        value += reference.orbe[n_occ + a] - reference.orbe[i];
                    }
                    hessian[[i, a, j, b]] = value;
                }
            }
        }
    }
    let ov: usize = n_occ * n_virt;
    let hessian: Array2<f64> = hessian
        .into_shape((ov, ov))
        .map_err(|_| CphfError::Numerical(String::from("reshape of the orbital Hessian failed")))?;
    let hessian_inv: Array2<f64> = hessian
        .inv()
        .map_err(|_| CphfError::Numerical(String::from("inversion of the orbital Hessian failed")))?;
    if log_enabled!(Level::Info) {
        print_stage_timing("inversion of the orbital Hessian:", &timer);
    }

    let solve = |pert: &Array2<f64>| -> Result<Array2<f64>, CphfError> {
        let rhs: Array1<f64> = Array1::from_iter(pert.iter().cloned());
        hessian_inv
            .dot(&rhs)
            .into_shape((n_occ, n_virt))
            .map_err(|_| CphfError::Numerical(String::from("reshape of the response vector failed")))
    };
    Ok([
        solve(&perturbations[0])?,
        solve(&perturbations[1])?,
        solve(&perturbations[2])?,
    ])
}

/// Self-consistent solution of the response equations. Each iteration
/// rebuilds the perturbed Fock contribution 4J - K^T - K from the current
/// response vectors through the batched J/K builder and refines the guess
/// with the orbital energy denominators, optionally DIIS accelerated.
fn solve_iterative(
    reference: &Reference,
    perturbations: &[Array2<f64>; 3],
    engine: &JkEngine,
    config: &SolverConfig,
) -> Result<[Array2<f64>; 3], CphfError> {
    let timer: Timer = Timer::start();
    let n_occ: usize = reference.n_occ;
    let n_virt: usize = reference.n_virt();
    let orbe: ArrayView1<f64> = reference.orbe;

    // orbital energy denominators eps_a - eps_i and the uncoupled guess
    let denom: Array2<f64> =
        Array2::from_shape_fn((n_occ, n_virt), |(i, a)| orbe[n_occ + a] - orbe[i]);
    let mut x: [Array2<f64>; 3] = [
        &perturbations[0] / &denom,
        &perturbations[1] / &denom,
        &perturbations[2] / &denom,
    ];
    let mut x_old: [Array2<f64>; 3] = [
        Array2::zeros((n_occ, n_virt)),
        Array2::zeros((n_occ, n_virt)),
        Array2::zeros((n_occ, n_virt)),
    ];
    let mut accel: [Diis; 3] = [
        Diis::new(defaults::CPHF_DIIS_LIMIT),
        Diis::new(defaults::CPHF_DIIS_LIMIT),
        Diis::new(defaults::CPHF_DIIS_LIMIT),
    ];

    let occ: Array2<f64> = reference.occ_coefficients().to_owned();
    let virt: Array2<f64> = reference.virt_coefficients().to_owned();
    // one J/K pair per direction, only the right factors change later
    let mut builder: JkBuilder = JkBuilder::new(engine);
    let slots: [usize; 3] = [
        builder.add_pair(occ.clone(), virt.dot(&x[0].t())),
        builder.add_pair(occ.clone(), virt.dot(&x[1].t())),
        builder.add_pair(occ.clone(), virt.dot(&x[2].t())),
    ];

    if log_enabled!(Level::Info) {
        print_iteration_header();
    }
    let mut residual_max: f64 = 0.0;
    for iter in 0..config.max_cycles {
        if iter > 0 {
            for d in 0..3 {
                builder.set_right(slots[d], virt.dot(&x[d].t()));
            }
        }
        builder.compute();

        for d in 0..3 {
            let j: &Array2<f64> = builder.coulomb(slots[d]);
            let k: &Array2<f64> = builder.exchange(slots[d]);
            let m: Array2<f64> = 4.0 * j - &k.t() - k;
            let update: Array2<f64> =
                (&perturbations[d] - &occ.t().dot(&m).dot(&virt)) / &denom;
            x[d] = if config.use_diis {
                let residual: Array2<f64> = &update - &x_old[d];
                accel[d].next(update, Array1::from_iter(residual.iter().cloned()))
            } else {
                update
            };
        }

        // largest squared elementwise change per direction
        let mut changes: [f64; 3] = [0.0; 3];
        for d in 0..3 {
            let diff: Array2<f64> = &x[d] - &x_old[d];
            changes[d] = diff.iter().fold(0.0f64, |mx, &v| mx.max(v * v));
            x_old[d] = x[d].clone();
        }
        let residual_avg: f64 = changes.iter().sum::<f64>() / 3.0;
        residual_max = changes.iter().fold(0.0f64, |mx, &v| mx.max(v));
        if log_enabled!(Level::Info) {
            print_residuals_at_iteration(iter, residual_avg, residual_max, accel[0].len());
        }
        if residual_max < config.conv {
            if log_enabled!(Level::Info) {
                print_cphf_end(timer, iter + 1);
            }
            return Ok(x);
        }
    }
    Err(CphfError::NotConverged {
        iterations: config.max_cycles,
        residual: residual_max,
    })
}

/// The static polarizability from the response vectors: alpha[i, f] is the
/// full occupied times virtual contraction of response vector i with
/// perturbation f.
pub fn polarizability(
    response: &[Array2<f64>; 3],
    perturbations: &[Array2<f64>; 3],
) -> Array2<f64> {
    let mut alpha: Array2<f64> = Array2::zeros((3, 3));
    for i in 0..3 {
        for f in 0..3 {
            alpha[[i, f]] = (&response[i] * &perturbations[f]).sum();
        }
    }
    alpha
}
