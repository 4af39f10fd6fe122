use crate::constants::ATOMIC_MASSES;
use std::fmt;

/// The chemical elements up to argon. Heavier elements would require basis
/// sets beyond the ones shipped with the program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    H = 1,
    He = 2,
    Li = 3,
    Be = 4,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Ne = 10,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Ar = 18,
}

impl Element {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::He => "He",
            Element::Li => "Li",
            Element::Be => "Be",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Ne => "Ne",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Al => "Al",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Ar => "Ar",
        }
    }

    /// Mass of the most abundant isotope in atomic mass units.
    pub fn mass(&self) -> f64 {
        *ATOMIC_MASSES.get(&self.number()).unwrap()
    }
}

impl From<u8> for Element {
    fn from(number: u8) -> Self {
        match number {
            1 => Element::H,
            2 => Element::He,
            3 => Element::Li,
            4 => Element::Be,
            5 => Element::B,
            6 => Element::C,
            7 => Element::N,
            8 => Element::O,
            9 => Element::F,
            10 => Element::Ne,
            11 => Element::Na,
            12 => Element::Mg,
            13 => Element::Al,
            14 => Element::Si,
            15 => Element::P,
            16 => Element::S,
            17 => Element::Cl,
            18 => Element::Ar,
            n => panic!("Element with atomic number {} is not implemented", n),
        }
    }
}

impl From<&str> for Element {
    /// Create the element from its symbol (case insensitive).
    fn from(symbol: &str) -> Self {
        match symbol.to_lowercase().as_str() {
            "h" => Element::H,
            "he" => Element::He,
            "li" => Element::Li,
            "be" => Element::Be,
            "b" => Element::B,
            "c" => Element::C,
            "n" => Element::N,
            "o" => Element::O,
            "f" => Element::F,
            "ne" => Element::Ne,
            "na" => Element::Na,
            "mg" => Element::Mg,
            "al" => Element::Al,
            "si" => Element::Si,
            "p" => Element::P,
            "s" => Element::S,
            "cl" => Element::Cl,
            "ar" => Element::Ar,
            s => panic!("Element with symbol {} is not implemented", s),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
