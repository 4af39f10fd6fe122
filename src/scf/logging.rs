use crate::utils::Timer;
use log::info;
use ndarray::ArrayView1;

pub fn print_scf_init(max_iter: usize, basis_name: &str, rep_energy: f64, use_diis: bool) {
    info!("{:^80}", "");
    info!("{: ^80}", "SCF-Routine");
    info!("{:-^80}", "");
    info!("{: <25} {}", "max. iterations:", max_iter);
    info!("{: <25} {}", "basis set:", basis_name);
    info!("{: <25} {}", "DIIS acceleration:", use_diis);
    info!("{: <25} {:.14} Hartree", "nuclear repulsion:", rep_energy);
    info!("{:^80}", "");
    info!(
        "{: <45} ",
        "SCF Iterations: all quantities are in atomic units"
    );
    info!("{:-^62} ", "");
    info!(
        "{: <5} {: >18} {: >18} {: >18}",
        "Iter.", "SCF Energy", "Energy diff.", "DIIS error"
    );
    info!("{:-^62} ", "");
}

pub fn print_energies_at_iteration(
    iter: usize,
    scf_energy: f64,
    rep_energy: f64,
    energy_old: f64,
    diis_error: f64,
) {
    if iter == 0 {
        info!(
            "{: >5} {:>18.10e} {:>18.13} {:>18.10e}",
            iter + 1,
            scf_energy + rep_energy,
            0.0,
            diis_error,
        );
    } else {
        info!(
            "{: >5} {:>18.10e} {:>18.10e} {:>18.10e}",
            iter + 1,
            scf_energy + rep_energy,
            energy_old - scf_energy,
            diis_error,
        );
    }
}

pub fn print_scf_end(
    timer: Timer,
    jobtype: &str,
    scf_energy: f64,
    rep_energy: f64,
    orbe: ArrayView1<f64>,
    f: &[f64],
) {
    info!("{:-^62} ", "");
    info!("{: ^62}", "SCF converged");
    info!("{:^80} ", "");
    info!("electronic energy: {:18.14} Hartree", scf_energy);
    info!("nuclear repulsion: {:18.14} Hartree", rep_energy);
    info!(
        "Total energy: {:18.14} Hartree",
        scf_energy + rep_energy
    );
    info!("{:-<80} ", "");
    info!("{}", timer);
    if jobtype == "sp" {
        print_orbital_information(orbe.view(), f);
    }
}

pub fn print_orbital_information(orbe: ArrayView1<f64>, f: &[f64]) {
    info!("{:^80} ", "");
    info!(
        "{:^8} {:^6} {:>18.14} | {:^8} {:^6} {:>18.14}",
        "Orb.", "Occ.", "Energy/Hartree", "Orb.", "Occ.", "Energy/Hartree"
    );
    info!("{:-^71} ", "");
    let n_orbs: usize = orbe.len();
    for i in (0..n_orbs).step_by(2) {
        if i + 1 < n_orbs {
            info!(
                "MO:{:>5} {:>6.2} {:>18.14} | MO:{:>5} {:>6.2} {:>18.14}",
                i + 1,
                f[i],
                orbe[i],
                i + 2,
                f[i + 1],
                orbe[i + 1]
            );
        } else {
            info!("MO:{:>5} {:>6.2} {:>18.14} |", i + 1, f[i], orbe[i]);
        }
    }
    info!("{:-^71} ", "");
}
