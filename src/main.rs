use anyhow::Result;
use beryl::basis::{AoBasis, BasisSet};
use beryl::initialization::Molecule;
use beryl::integrals::{eri_tensor, one_electron_integrals, JkEngine, OneElectronIntegrals};
use beryl::io::{read_input, write_footer, write_header, Configuration};
use beryl::properties::static_response;
use beryl::scf::run_rhf;
use beryl::utils::Timer;
use chemfiles::Frame;
use clap::{App, Arg};
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

#[macro_use]
extern crate clap;

fn main() -> Result<()> {
    // Input.
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about("static dipole polarizabilities and first hyperpolarizabilities from coupled-perturbed RHF")
        .arg(
            Arg::new("xyz-File")
                .about("Sets the xyz file to use")
                .required(true)
                .index(1),
        )
        .get_matches();
    // The file containing the cartesian coordinates is the only mandatory file to
    // start a calculation.
    let geometry_file = matches.value_of("xyz-File").unwrap();
    let (frame, config): (Frame, Configuration) = read_input(geometry_file);

    // Multithreading.
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallelization.number_of_cores)
        .build_global()
        .unwrap();

    // Logging.
    // The log level is set.
    let log_level: LevelFilter = match config.verbose {
        2 => LevelFilter::Trace,
        1 => LevelFilter::Debug,
        0 => LevelFilter::Info,
        -1 => LevelFilter::Warn,
        -2 => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    // and the logger is build.
    Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, log_level)
        .init();

    // The program header is written to the command line.
    write_header();
    // and the total wall-time timer is started.
    let timer: Timer = Timer::start();

    // Computations.
    // ................................................................
    match config.jobtype.as_str() {
        // the static response properties, the purpose of this program
        "beta" => {
            let molecule: Molecule = Molecule::from((frame, config.clone()));
            static_response(&molecule)?;
        }
        // a bare single-point SCF energy
        "sp" => {
            let molecule: Molecule = Molecule::from((frame, config.clone()));
            let basis_set: BasisSet = BasisSet::from_name(molecule.config.mol.basis_set.as_str());
            let basis: AoBasis = AoBasis::new(&molecule, &basis_set);
            let ints: OneElectronIntegrals = one_electron_integrals(&basis, &molecule.atoms);
            let engine: JkEngine = JkEngine::new(eri_tensor(&basis));
            run_rhf(
                &molecule,
                ints.s.view(),
                ints.t.view(),
                ints.v.view(),
                &engine,
            )?;
        }
        jtype => {
            println!("Jobtype: {} is not available.", jtype);
            println!("Choose one of the available types: beta, sp");
        }
    }
    // ................................................................

    // Finished.
    // The total wall-time is printed together with the end statement.
    write_footer(timer);
    Ok(())
}
