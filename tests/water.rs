use approx::assert_abs_diff_eq;
use beryl::initialization::Molecule;
use beryl::io::Configuration;
use beryl::properties::{static_response, StaticResponse};

/// Water (O-H 1.1 A, 104 deg, C2 axis along z) in aug-cc-pVDZ against
/// published CPHF values for this geometry.
#[test]
fn water_aug_cc_pvdz_static_response() {
    let mut config: Configuration = Configuration::default();
    config.mol.basis_set = String::from("aug-cc-pvdz");
    let molecule: Molecule = Molecule::from(("data/water.xyz", config));
    let result: StaticResponse = static_response(&molecule).unwrap();

    assert_abs_diff_eq!(result.energy, -76.0033570129, epsilon = 1e-8);

    let alpha = &result.polarizability;
    assert_abs_diff_eq!(alpha[[0, 0]], 8.01523461, epsilon = 1e-5);
    assert_abs_diff_eq!(alpha[[1, 1]], 12.50373582, epsilon = 1e-5);
    assert_abs_diff_eq!(alpha[[2, 2]], 10.04227753, epsilon = 1e-5);

    let beta = &result.hyperpolarizability;
    assert_abs_diff_eq!(beta[[0, 2]], 0.22845961, epsilon = 1e-3);
    assert_abs_diff_eq!(beta[[1, 2]], -25.35477024, epsilon = 1e-3);
    assert_abs_diff_eq!(beta[[2, 2]], -10.84022133, epsilon = 1e-3);
    // the x column vanishes by symmetry except for the xz row, which
    // repeats beta(xx),z through Kleinman symmetry
    for &row in [0usize, 1, 2, 3, 5].iter() {
        assert_abs_diff_eq!(beta[[row, 0]], 0.0, epsilon = 1e-6);
    }
    assert_abs_diff_eq!(beta[[4, 0]], beta[[0, 2]], epsilon = 1e-8);
    assert_abs_diff_eq!(beta[[5, 1]], beta[[1, 2]], epsilon = 1e-8);
}

/// The same pipeline through the iterative solver with DIIS.
#[test]
fn water_sto_3g_iterative_pipeline() {
    let mut config: Configuration = Configuration::default();
    config.cphf.cphf_mode = String::from("iterative");
    config.cphf.cphf_conv = 1.0e-14;
    config.cphf.cphf_max_cycles = 50;
    let molecule: Molecule = Molecule::from(("data/water.xyz", config));
    let result: StaticResponse = static_response(&molecule).unwrap();

    assert_abs_diff_eq!(result.energy, -74.9420798971, epsilon = 1e-9);
    assert_abs_diff_eq!(result.polarizability[[2, 2]], 3.06821138, epsilon = 1e-5);
    assert_abs_diff_eq!(result.hyperpolarizability[[1, 2]], -9.34243101, epsilon = 1e-5);
    assert_abs_diff_eq!(result.hyperpolarizability[[2, 2]], -5.20670472, epsilon = 1e-5);
}
