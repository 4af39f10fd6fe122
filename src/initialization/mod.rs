pub use atom::Atom;
pub use elements::Element;
pub use molecule::Molecule;

pub mod atom;
pub mod elements;
pub mod molecule;
