use crate::initialization::atom::Atom;
use crate::io::settings::Configuration;
use crate::io::{frame_to_coordinates, read_file_to_frame};
use chemfiles::Frame;
use nalgebra::Vector3;
use ndarray::prelude::*;

/// Type that holds the molecular geometry together with the electron counts
/// that define the closed-shell reference. All positions are stored in bohr
/// and are shifted into the center-of-mass frame on construction.
pub struct Molecule {
    /// The global configuration of the calculation
    pub config: Configuration,
    /// All atoms of the molecule
    pub atoms: Vec<Atom>,
    /// Number of atoms
    pub n_atoms: usize,
    /// Number of electrons
    pub n_elec: usize,
    /// Number of doubly occupied orbitals
    pub n_occ: usize,
    /// Charge of the molecule
    pub charge: i8,
}

impl From<(Vec<u8>, Array2<f64>, Configuration)> for Molecule {
    /// Creates a new [Molecule] from the atomic numbers, the coordinates (in bohr)
    /// and the global configuration as [Configuration](crate::io::settings::Configuration).
    fn from(molecule: (Vec<u8>, Array2<f64>, Configuration)) -> Self {
        let mut atoms: Vec<Atom> = Vec::with_capacity(molecule.0.len());
        molecule
            .0
            .iter()
            .for_each(|num| atoms.push(Atom::from(*num)));
        // set the positions for each atom
        molecule
            .1
            .outer_iter()
            .enumerate()
            .for_each(|(idx, position)| {
                atoms[idx].position_from_slice(position.as_slice().unwrap())
            });
        // shift the molecule into its center-of-mass frame
        let total_mass: f64 = atoms.iter().fold(0.0, |m, atom| m + atom.mass);
        let com: Vector3<f64> = atoms
            .iter()
            .fold(Vector3::zeros(), |com, atom| com + atom.mass * atom.xyz)
            / total_mass;
        atoms.iter_mut().for_each(|atom| atom.xyz -= com);
        // calculate the number of electrons
        let charge: i8 = molecule.2.mol.charge;
        let n_elec: usize =
            (atoms.iter().fold(0, |n, atom| n + atom.n_elec()) as isize - charge as isize) as usize;
        // only restricted closed-shell references are supported
        match molecule.2.mol.multiplicity {
            1u8 => {}
            _ => panic!("The specified multiplicity is not implemented"),
        };
        if n_elec % 2 != 0 {
            panic!("An odd number of electrons requires an open-shell reference");
        }
        let n_occ: usize = n_elec / 2;

        Self {
            config: molecule.2,
            n_atoms: atoms.len(),
            atoms,
            n_elec,
            n_occ,
            charge,
        }
    }
}

impl From<(Frame, Configuration)> for Molecule {
    /// Creates a new [Molecule] from a [Frame](chemfiles::Frame) and
    /// the global configuration as [Configuration](crate::io::settings::Configuration).
    fn from(frame: (Frame, Configuration)) -> Self {
        let (numbers, coords) = frame_to_coordinates(frame.0);
        Self::from((numbers, coords, frame.1))
    }
}

impl From<(&str, Configuration)> for Molecule {
    /// Creates a new [Molecule] from a &str and
    /// the global configuration as [Configuration](crate::io::settings::Configuration).
    fn from(filename_and_config: (&str, Configuration)) -> Self {
        let frame: Frame = read_file_to_frame(filename_and_config.0);
        let (numbers, coords) = frame_to_coordinates(frame);
        Self::from((numbers, coords, filename_and_config.1))
    }
}

impl Molecule {
    /// The classical Coulomb repulsion between the nuclei in Hartree.
    pub fn nuclear_repulsion(&self) -> f64 {
        let mut e_nuc: f64 = 0.0;
        for (i, atom_i) in self.atoms.iter().enumerate() {
            for atom_j in self.atoms[0..i].iter() {
                let r: f64 = (atom_i - atom_j).norm();
                e_nuc += atom_i.number as f64 * atom_j.number as f64 / r;
            }
        }
        e_nuc
    }
}
