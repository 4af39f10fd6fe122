use crate::utils::Timer;
use clap::{crate_name, crate_version};
use log::warn;

const LOG_WIDTH: usize = 80;

pub fn write_header() {
    warn!("{: ^LOG_WIDTH$}", "-----------------");
    warn!("{: ^LOG_WIDTH$}", crate_name!().to_uppercase());
    warn!("{: ^LOG_WIDTH$}", "-----------------");
    warn!("{: ^LOG_WIDTH$}", format!("version: {}", crate_version!()));
    warn!("{: ^LOG_WIDTH$}", "");
    warn!("{: ^LOG_WIDTH$}", format!("{::^56}", ""));
    warn!(
        "{: ^80}",
        "::     static dipole polarizabilities and first       ::"
    );
    warn!(
        "{: ^80}",
        "::  hyperpolarizabilities from coupled-perturbed RHF  ::"
    );
    warn!("{: ^LOG_WIDTH$}", format!("{::^56}", ""));
    warn!("{: ^LOG_WIDTH$}", "");
}

pub fn write_footer(timer: Timer) {
    warn!(
        "{:>68} {:>8.2} s",
        "total elapsed time:",
        timer.time.elapsed().as_secs_f32()
    );
    warn!("{: ^80}", "");
    warn!("{: ^80}", "::::::::::::::::::::::::::::::::::::::");
    warn!(
        "{: ^80}",
        format!(
            "::   Thank you for using {}      ::",
            crate_name!().to_uppercase()
        )
    );
    warn!("{: ^80}", "::::::::::::::::::::::::::::::::::::::");
    warn!("{: ^80}", "");
}
