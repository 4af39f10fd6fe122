use crate::properties::hyperpolarizability::BETA_ROWS;
use crate::utils::Timer;
use log::info;
use ndarray::prelude::*;

const AXES: [&str; 3] = ["x", "y", "z"];

pub fn print_integral_timing(n_bf: usize, timer: &Timer) {
    info!("{: <25} {}", "basis dimension:", n_bf);
    info!(
        "{: <45} {:>8.2} s",
        "AO integral evaluation:",
        timer.time.elapsed().as_secs_f32()
    );
}

pub fn print_polarizability(alpha: ArrayView2<f64>) {
    info!("{:^80}", "");
    info!("{: ^80}", "Static dipole polarizability (a.u.)");
    info!("{:-^80}", "");
    info!("{: >6} {: >16} {: >16} {: >16}", "", "x", "y", "z");
    for (i, axis) in AXES.iter().enumerate() {
        info!(
            "{: >6} {:>16.8} {:>16.8} {:>16.8}",
            axis,
            alpha[[i, 0]],
            alpha[[i, 1]],
            alpha[[i, 2]]
        );
    }
    let isotropic: f64 = (alpha[[0, 0]] + alpha[[1, 1]] + alpha[[2, 2]]) / 3.0;
    info!("{:^80}", "");
    info!("{: <25} {:>16.8}", "isotropic average:", isotropic);
}

pub fn print_hyperpolarizability(beta: ArrayView2<f64>) {
    info!("{:^80}", "");
    info!("{: ^80}", "Static first hyperpolarizability (a.u.)");
    info!("{:-^80}", "");
    info!("{: >6} {: >16} {: >16} {: >16}", "", "x", "y", "z");
    for (r, pair) in BETA_ROWS.iter().enumerate() {
        info!(
            "{: >6} {:>16.8} {:>16.8} {:>16.8}",
            pair,
            beta[[r, 0]],
            beta[[r, 1]],
            beta[[r, 2]]
        );
    }
    info!("{:^80}", "");
}
