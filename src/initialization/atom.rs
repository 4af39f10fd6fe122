use crate::initialization::elements::Element;
use nalgebra::Vector3;
use std::ops::Sub;

/// `Atom` type that contains basic information about the chemical element and
/// the position of the atom in bohr. The basis functions that are centered on
/// the atom are constructed separately from the basis-set data.
#[derive(Clone, Debug)]
pub struct Atom {
    /// Name of the chemical element
    pub name: &'static str,
    /// Ordinary number of the element
    pub number: u8,
    /// Element as an enum
    pub kind: Element,
    /// Mass of the most abundant isotope in atomic mass units
    pub mass: f64,
    /// Position of the atom in bohr
    pub xyz: Vector3<f64>,
}

impl From<Element> for Atom {
    /// Create a new [Atom] from the chemical [Element]. The initial position
    /// is set to the origin.
    fn from(element: Element) -> Self {
        Atom {
            name: element.symbol(),
            number: element.number(),
            kind: element,
            mass: element.mass(),
            xyz: Vector3::<f64>::zeros(),
        }
    }
}

impl From<&str> for Atom {
    /// Create a new [Atom] from the atomic symbol (case insensitive).
    fn from(symbol: &str) -> Self {
        Self::from(Element::from(symbol))
    }
}

impl From<u8> for Atom {
    /// Create a new [Atom] from the atomic number.
    fn from(number: u8) -> Self {
        Self::from(Element::from(number))
    }
}

impl Atom {
    pub fn position_from_slice(&mut self, position: &[f64]) {
        self.xyz = Vector3::from_iterator(position.iter().cloned());
    }

    /// Number of electrons the neutral atom contributes.
    pub fn n_elec(&self) -> usize {
        self.number as usize
    }
}

impl Sub for &Atom {
    type Output = Vector3<f64>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.xyz - rhs.xyz
    }
}
