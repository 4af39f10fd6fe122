use crate::cphf::solver::SolverConfig;
use crate::utils::Timer;
use log::info;

pub fn print_cphf_init(config: &SolverConfig, n_occ: usize, n_virt: usize) {
    info!("{:^80}", "");
    info!("{: ^80}", "CPHF-Routine");
    info!("{:-^80}", "");
    info!("{: <25} {}", "solver mode:", config.mode);
    info!("{: <25} {}", "max. iterations:", config.max_cycles);
    info!("{: <25} {:e}", "convergence:", config.conv);
    info!("{: <25} {}", "DIIS acceleration:", config.use_diis);
    info!("{: <25} {} occ. x {} virt.", "response dimension:", n_occ, n_virt);
    info!("{:^80}", "");
}

pub fn print_iteration_header() {
    info!("{:-^62} ", "");
    info!(
        "{: <5} {: >18} {: >18} {: >10}",
        "Iter.", "Avg. residual", "Max. residual", "DIIS dim."
    );
    info!("{:-^62} ", "");
}

pub fn print_residuals_at_iteration(
    iter: usize,
    residual_avg: f64,
    residual_max: f64,
    diis_dim: usize,
) {
    info!(
        "{: >5} {:>18.10e} {:>18.10e} {: >10}",
        iter + 1,
        residual_avg,
        residual_max,
        diis_dim,
    );
}

pub fn print_stage_timing(stage: &str, timer: &Timer) {
    info!(
        "{: <45} {:>8.2} s",
        stage,
        timer.time.elapsed().as_secs_f32()
    );
}

pub fn print_cphf_end(timer: Timer, iterations: usize) {
    info!("{:-^62} ", "");
    info!(
        "{: ^62}",
        format!("CPHF converged in {} iterations", iterations)
    );
    info!("{:^80} ", "");
    info!("{}", timer);
}
