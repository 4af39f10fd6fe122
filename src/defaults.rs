// MOLECULE SPECIFICATION
// charge of the molecule in a.u.
pub const CHARGE: i8 = 0;
// spin multiplicity 2S + 1, only closed-shell references are supported
pub const MULTIPLICITY: u8 = 1;
// jobtype
pub const JOBTYPE: &str = "beta";
// config file
pub const CONFIG_FILE_NAME: &str = "beryl.toml";

// basis set used if the input does not request one
pub const BASIS_SET: &str = "sto-3g";

// SCF ITERATION
// stop the SCF calculation after maxiter iterations
pub const SCF_MAX_CYCLES: usize = 100;
// convergence thresholds for the total energy and the orbital gradient
pub const SCF_ENERGY_CONV: f64 = 1.0e-11;
pub const SCF_DENSITY_CONV: f64 = 1.0e-9;
// accelerate the Roothaan iterations with DIIS
pub const SCF_USE_DIIS: bool = true;
// number of Fock matrices kept for the DIIS extrapolation
pub const DIIS_LIMIT: usize = 8;

// CPHF ITERATION
// solver mode, either "direct" or "iterative"
pub const CPHF_MODE: &str = "direct";
// stop the iterative CPHF solver after maxiter iterations
pub const CPHF_MAX_CYCLES: usize = 30;
// convergence threshold for the maximum squared change of the
// response vectors between two iterations
pub const CPHF_CONV: f64 = 1.0e-9;
// accelerate the fixed-point iteration with DIIS
pub const CPHF_USE_DIIS: bool = true;
// number of response vectors kept for the DIIS extrapolation
pub const CPHF_DIIS_LIMIT: usize = 6;
// upper bound for the in-core electron repulsion tensor in GiB
pub const MEMORY_BUDGET_GB: f64 = 2.0;
